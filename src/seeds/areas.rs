//! Areas and cargos: the administrative catalog.
//!
//! Seven areas with their positions. Cargo names are unique per area.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::catalog::{Catalog, ChildGroup, ParentSeed};
use super::seeder::Seeder;
use super::store::{
    CatalogCounts, CatalogLabels, CatalogStore, ClearedRecords, ParentBreakdown, ResolvedParent,
};
use crate::error::{PersistenceContext, SeedError};
use crate::models::area::{self, Entity as Area};
use crate::models::cargo::{self, Entity as Cargo};

const AREAS: &[(&str, &str)] = &[
    (
        "Administración",
        "Área encargada de la gestión administrativa y financiera de la empresa",
    ),
    (
        "Recursos Humanos",
        "Gestión del talento humano, nómina y bienestar laboral",
    ),
    (
        "Tecnología",
        "Desarrollo de software, infraestructura IT y soporte técnico",
    ),
    (
        "Ventas",
        "Gestión de ventas, atención al cliente y desarrollo comercial",
    ),
    (
        "Marketing",
        "Marketing digital, publicidad y estrategias de comunicación",
    ),
    ("Operaciones", "Gestión de procesos operativos y logística"),
    ("Finanzas", "Contabilidad, presupuestos y análisis financiero"),
];

const CARGOS: &[(&str, &[&str])] = &[
    (
        "Administración",
        &[
            "Gerente General",
            "Asistente Administrativo",
            "Coordinador Administrativo",
            "Secretaria Ejecutiva",
        ],
    ),
    (
        "Recursos Humanos",
        &[
            "Gerente de RRHH",
            "Especialista en Reclutamiento",
            "Analista de Nómina",
            "Coordinador de Bienestar",
        ],
    ),
    (
        "Tecnología",
        &[
            "CTO - Director de Tecnología",
            "Desarrollador Senior",
            "Desarrollador Junior",
            "Arquitecto de Software",
            "DevOps Engineer",
            "QA Tester",
            "Soporte Técnico",
        ],
    ),
    (
        "Ventas",
        &[
            "Gerente de Ventas",
            "Ejecutivo de Ventas",
            "Asesor Comercial",
            "Coordinador de Ventas",
        ],
    ),
    (
        "Marketing",
        &[
            "Gerente de Marketing",
            "Especialista en Marketing Digital",
            "Community Manager",
            "Diseñador Gráfico",
            "Analista de Marketing",
        ],
    ),
    (
        "Operaciones",
        &[
            "Gerente de Operaciones",
            "Coordinador Logístico",
            "Supervisor de Producción",
            "Analista de Procesos",
        ],
    ),
    (
        "Finanzas",
        &[
            "Gerente Financiero",
            "Contador General",
            "Analista Financiero",
            "Asistente Contable",
        ],
    ),
];

pub const LABELS: CatalogLabels = CatalogLabels {
    title: "🏢 CARGADOR DE ÁREAS Y CARGOS",
    parent_singular: "Área",
    parent_plural: "Áreas",
    child_singular: "Cargo",
    child_plural: "Cargos",
    parent_feminine: true,
    child_feminine: false,
    parent_icon: "🏢",
    child_icon: "👔",
};

/// The compiled-in areas/cargos catalog.
pub fn catalog() -> Catalog<String> {
    let parents = AREAS
        .iter()
        .map(|(name, description)| ParentSeed::new(*name, *description))
        .collect();
    let groups = CARGOS
        .iter()
        .map(|(area, cargos)| ChildGroup {
            parent: area.to_string(),
            children: cargos.iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    Catalog::new(parents, groups)
}

/// Seeder over the built-in catalog.
pub fn seeder(db: &DatabaseConnection) -> Seeder<'_, AreaStore> {
    Seeder::new(db, AreaStore, catalog())
}

fn cargo_description(cargo: &str, area: &str) -> String {
    format!("Cargo de {cargo} en el área de {area}")
}

/// `areas` / `cargos` tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaStore;

#[async_trait]
impl CatalogStore for AreaStore {
    type Child = String;

    fn labels(&self) -> &CatalogLabels {
        &LABELS
    }

    async fn clear(&self, txn: &DatabaseTransaction) -> Result<ClearedRecords, SeedError> {
        let children = Cargo::delete_many()
            .exec(txn)
            .await
            .step("deleting cargos")?
            .rows_affected;
        let parents = Area::delete_many()
            .exec(txn)
            .await
            .step("deleting areas")?
            .rows_affected;
        Ok(ClearedRecords { parents, children })
    }

    async fn get_or_create_parent(
        &self,
        txn: &DatabaseTransaction,
        seed: &ParentSeed,
    ) -> Result<ResolvedParent, SeedError> {
        let step = format!("creating area '{}'", seed.name);
        let now: DateTimeWithTimeZone = Utc::now().into();

        let model = area::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(seed.name.clone()),
            description: Set(seed.description.clone()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = Area::insert(model)
            .on_conflict(OnConflict::column(area::Column::Name).do_nothing().to_owned())
            .exec_without_returning(txn)
            .await
            .step(&step)?;

        let stored = Area::find()
            .filter(area::Column::Name.eq(seed.name.as_str()))
            .one(txn)
            .await
            .step(&step)?
            .ok_or_else(|| {
                SeedError::persistence(
                    &step,
                    DbErr::RecordNotFound(format!("area '{}'", seed.name)),
                )
            })?;

        Ok(ResolvedParent {
            id: stored.id,
            name: stored.name,
            created: inserted > 0,
        })
    }

    async fn get_or_create_child(
        &self,
        txn: &DatabaseTransaction,
        parent: &ResolvedParent,
        seed: &String,
    ) -> Result<bool, SeedError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let model = cargo::ActiveModel {
            id: Set(Uuid::new_v4()),
            area_id: Set(parent.id),
            name: Set(seed.clone()),
            description: Set(cargo_description(seed, &parent.name)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = Cargo::insert(model)
            .on_conflict(
                OnConflict::columns([cargo::Column::Name, cargo::Column::AreaId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await
            .step(&format!("creating cargo '{}' in '{}'", seed, parent.name))?;

        Ok(inserted > 0)
    }

    async fn counts<C>(&self, db: &C) -> Result<CatalogCounts, DbErr>
    where
        C: ConnectionTrait,
    {
        let total_parents = Area::find().count(db).await?;
        let active_parents = Area::find()
            .filter(area::Column::IsActive.eq(true))
            .count(db)
            .await?;
        let total_children = Cargo::find().count(db).await?;
        let active_children = Cargo::find()
            .filter(cargo::Column::IsActive.eq(true))
            .count(db)
            .await?;

        Ok(CatalogCounts {
            total_parents,
            active_parents,
            total_children,
            active_children: Some(active_children),
        })
    }

    async fn breakdown<C>(
        &self,
        db: &C,
        parent_limit: Option<u64>,
        preview_len: u64,
    ) -> Result<Vec<ParentBreakdown>, DbErr>
    where
        C: ConnectionTrait,
    {
        let areas = Area::find()
            .order_by_asc(area::Column::Name)
            .limit(parent_limit)
            .all(db)
            .await?;

        let mut breakdown = Vec::with_capacity(areas.len());
        for area in areas {
            let child_count = Cargo::find()
                .filter(cargo::Column::AreaId.eq(area.id))
                .count(db)
                .await?;
            let preview = Cargo::find()
                .filter(cargo::Column::AreaId.eq(area.id))
                .order_by_asc(cargo::Column::Name)
                .limit(preview_len)
                .all(db)
                .await?
                .into_iter()
                .map(|cargo| cargo.name)
                .collect();

            breakdown.push(ParentBreakdown {
                name: area.name,
                child_count,
                preview,
            });
        }

        Ok(breakdown)
    }
}
