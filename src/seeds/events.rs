//! Categorias and eventos: the events catalog.
//!
//! Events are attributed to a principal resolved before the transaction
//! opens. Their start date is relative to the moment of seeding.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use super::catalog::{Catalog, ChildSeed, ParentSeed};
use super::seeder::Seeder;
use super::store::{
    CatalogCounts, CatalogLabels, CatalogStore, ClearedRecords, ParentBreakdown, ResolvedParent,
    StatLine,
};
use crate::error::{PersistenceContext, SeedError};
use crate::models::categoria::{self, Entity as Categoria};
use crate::models::evento::{self, Entity as Evento};
use crate::models::user;
use crate::repositories::UserRepository;

/// Number of events applied when no limit is given.
pub const DEFAULT_EVENT_COUNT: usize = 15;

const CATEGORIAS: &[(&str, &str)] = &[
    (
        "Tecnología",
        "Eventos relacionados con tecnología, innovación y desarrollo de software",
    ),
    (
        "Educación",
        "Conferencias, talleres y cursos educativos para la comunidad",
    ),
    (
        "Deportes",
        "Eventos deportivos, competencias y actividades físicas",
    ),
    (
        "Cultura",
        "Actividades culturales, exposiciones y festivales artísticos",
    ),
    (
        "Negocios",
        "Conferencias empresariales, networking y eventos corporativos",
    ),
    ("Salud", "Conferencias médicas, campañas de salud y bienestar"),
    (
        "Arte",
        "Exposiciones artísticas, galerías y eventos creativos",
    ),
    (
        "Música",
        "Conciertos, festivales musicales y presentaciones artísticas",
    ),
];

struct EventFixture {
    title: &'static str,
    description: &'static str,
    categoria: &'static str,
    published: bool,
    pinned: bool,
    days_ahead: i64,
}

const EVENTOS: &[EventFixture] = &[
    EventFixture {
        title: "Conferencia de Inteligencia Artificial 2024",
        description: "Un evento dedicado a las últimas tendencias en IA, machine learning y deep learning. Expertos de todo el mundo compartirán sus conocimientos y experiencias en esta conferencia magistral.",
        categoria: "Tecnología",
        published: true,
        pinned: true,
        days_ahead: 45,
    },
    EventFixture {
        title: "Taller de Desarrollo Web Moderno",
        description: "Aprende las últimas tecnologías de desarrollo web: React, Vue, Node.js y más. Incluye prácticas hands-on y proyectos reales para consolidar el aprendizaje.",
        categoria: "Tecnología",
        published: true,
        pinned: false,
        days_ahead: 50,
    },
    EventFixture {
        title: "Seminario de Metodologías Educativas",
        description: "Nuevas estrategias pedagógicas para el siglo XXI. Dirigido a docentes y profesionales de la educación que buscan innovar en sus prácticas.",
        categoria: "Educación",
        published: true,
        pinned: false,
        days_ahead: 55,
    },
    EventFixture {
        title: "Copa Universitaria de Fútbol",
        description: "Torneo anual entre universidades. Participan 16 equipos de toda la región en una competencia emocionante que durará tres semanas.",
        categoria: "Deportes",
        published: true,
        pinned: true,
        days_ahead: 65,
    },
    EventFixture {
        title: "Festival de Arte Contemporáneo",
        description: "Exposición de artistas locales e internacionales. Incluye pintura, escultura, instalaciones y arte digital en una muestra sin precedentes.",
        categoria: "Arte",
        published: false,
        pinned: false,
        days_ahead: 70,
    },
    EventFixture {
        title: "Congreso de Emprendimiento Digital",
        description: "Startups, inversión, marketing digital y estrategias de negocio para el mundo digital actual. Conecta con inversores y otros emprendedores.",
        categoria: "Negocios",
        published: true,
        pinned: false,
        days_ahead: 75,
    },
    EventFixture {
        title: "Simposio de Salud Mental",
        description: "Profesionales de la salud mental comparten las últimas investigaciones y tratamientos. Dirigido a psicólogos, psiquiatras y trabajadores sociales.",
        categoria: "Salud",
        published: true,
        pinned: false,
        days_ahead: 80,
    },
    EventFixture {
        title: "Concierto de Música Clásica",
        description: "La Orquesta Sinfónica Nacional presenta un repertorio de obras maestras clásicas en una velada inolvidable en el Teatro Principal.",
        categoria: "Música",
        published: true,
        pinned: true,
        days_ahead: 85,
    },
    EventFixture {
        title: "Workshop de Fotografía Digital",
        description: "Técnicas avanzadas de fotografía digital, edición y composición. Para fotógrafos principiantes y experimentados que quieren mejorar sus habilidades.",
        categoria: "Arte",
        published: false,
        pinned: false,
        days_ahead: 90,
    },
    EventFixture {
        title: "Maratón de la Ciudad",
        description: "Evento deportivo anual que recorre los principales puntos turísticos de la ciudad. Categorías: 5k, 10k, 21k y 42k para todos los niveles.",
        categoria: "Deportes",
        published: true,
        pinned: false,
        days_ahead: 95,
    },
    EventFixture {
        title: "Cumbre de Liderazgo Femenino",
        description: "Mujeres líderes en diferentes industrias comparten sus experiencias y estrategias para el éxito profesional en un ambiente inspirador.",
        categoria: "Negocios",
        published: true,
        pinned: true,
        days_ahead: 100,
    },
    EventFixture {
        title: "Festival Gastronómico Internacional",
        description: "Chefs de diferentes países presentan sus especialidades culinarias en un evento lleno de sabores únicos y experiencias gastronómicas.",
        categoria: "Cultura",
        published: false,
        pinned: false,
        days_ahead: 105,
    },
    EventFixture {
        title: "Hackathon de Innovación Social",
        description: "Desarrolladores, diseñadores y emprendedores se unen para crear soluciones tecnológicas a problemas sociales en 48 horas intensas.",
        categoria: "Tecnología",
        published: true,
        pinned: false,
        days_ahead: 110,
    },
    EventFixture {
        title: "Congreso de Medicina Preventiva",
        description: "Últimos avances en medicina preventiva y salud pública. Dirigido a profesionales de la salud interesados en la prevención de enfermedades.",
        categoria: "Salud",
        published: true,
        pinned: false,
        days_ahead: 115,
    },
    EventFixture {
        title: "Feria del Libro y la Literatura",
        description: "Escritores, editoriales y amantes de la literatura se reúnen en una celebración de las letras con presentaciones, talleres y firmas de libros.",
        categoria: "Cultura",
        published: true,
        pinned: false,
        days_ahead: 120,
    },
];

pub const LABELS: CatalogLabels = CatalogLabels {
    title: "📅 POBLADOR DE CATEGORÍAS Y EVENTOS",
    parent_singular: "Categoría",
    parent_plural: "Categorías",
    child_singular: "Evento",
    child_plural: "Eventos",
    parent_feminine: true,
    child_feminine: false,
    parent_icon: "🏷️",
    child_icon: "📅",
};

/// An event to ensure under its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSeed {
    pub title: String,
    pub description: String,
    pub published: bool,
    pub pinned: bool,
    /// Days from the moment of seeding until the event starts
    pub days_ahead: i64,
}

impl ChildSeed for EventSeed {
    fn name(&self) -> &str {
        &self.title
    }
}

/// The compiled-in categorias/eventos catalog, events in fixture order.
pub fn catalog() -> Catalog<EventSeed> {
    let parents = CATEGORIAS
        .iter()
        .map(|(name, description)| ParentSeed::new(*name, *description))
        .collect();
    let entries = EVENTOS.iter().map(|fixture| {
        (
            fixture.categoria.to_string(),
            EventSeed {
                title: fixture.title.to_string(),
                description: fixture.description.to_string(),
                published: fixture.published,
                pinned: fixture.pinned,
                days_ahead: fixture.days_ahead,
            },
        )
    });
    Catalog::from_entries(parents, entries)
}

/// Seeder over the built-in catalog, limited to the first `count` events.
pub fn seeder(
    db: &DatabaseConnection,
    count: usize,
    owner: Option<String>,
) -> Seeder<'_, EventStore> {
    Seeder::new(db, EventStore::new(owner), catalog().limit_children(count))
}

/// `categorias` / `eventos` tables.
#[derive(Debug, Clone)]
pub struct EventStore {
    owner_username: Option<String>,
    owner: Option<user::Model>,
    now: DateTime<Utc>,
}

impl EventStore {
    /// `owner_username` pins the principal; `None` picks one automatically.
    pub fn new(owner_username: Option<String>) -> Self {
        Self {
            owner_username,
            owner: None,
            now: Utc::now(),
        }
    }

    /// Principal resolved by `prepare`, if any.
    pub fn owner(&self) -> Option<&user::Model> {
        self.owner.as_ref()
    }

    fn require_owner(&self) -> Result<&user::Model, SeedError> {
        self.owner.as_ref().ok_or_else(|| {
            SeedError::Configuration("event owner has not been resolved".to_string())
        })
    }
}

#[async_trait]
impl CatalogStore for EventStore {
    type Child = EventSeed;

    fn labels(&self) -> &CatalogLabels {
        &LABELS
    }

    async fn prepare(&mut self, db: &DatabaseConnection) -> Result<(), SeedError> {
        let users = UserRepository::new(db);

        let owner = match self.owner_username.as_deref() {
            Some(username) => users
                .find_by_username(username)
                .await
                .step("looking up the event owner")?
                .ok_or_else(|| {
                    SeedError::Configuration(format!("user '{username}' does not exist"))
                })?,
            None => users
                .find_default_owner()
                .await
                .step("looking up a default event owner")?
                .ok_or_else(|| {
                    SeedError::Configuration(
                        "no users found; create a superuser before seeding events".to_string(),
                    )
                })?,
        };

        info!(owner = %owner.username, "Resolved event owner");
        self.owner = Some(owner);
        Ok(())
    }

    async fn clear(&self, txn: &DatabaseTransaction) -> Result<ClearedRecords, SeedError> {
        let children = Evento::delete_many()
            .exec(txn)
            .await
            .step("deleting eventos")?
            .rows_affected;
        let parents = Categoria::delete_many()
            .exec(txn)
            .await
            .step("deleting categorias")?
            .rows_affected;
        Ok(ClearedRecords { parents, children })
    }

    async fn get_or_create_parent(
        &self,
        txn: &DatabaseTransaction,
        seed: &ParentSeed,
    ) -> Result<ResolvedParent, SeedError> {
        let owner = self.require_owner()?;
        let step = format!("creating categoria '{}'", seed.name);
        let now: DateTimeWithTimeZone = Utc::now().into();

        let model = categoria::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(seed.name.clone()),
            description: Set(seed.description.clone()),
            is_active: Set(true),
            created_by: Set(Some(owner.id)),
            updated_by: Set(Some(owner.id)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = Categoria::insert(model)
            .on_conflict(
                OnConflict::column(categoria::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await
            .step(&step)?;

        let stored = Categoria::find()
            .filter(categoria::Column::Name.eq(seed.name.as_str()))
            .one(txn)
            .await
            .step(&step)?
            .ok_or_else(|| {
                SeedError::persistence(
                    &step,
                    DbErr::RecordNotFound(format!("categoria '{}'", seed.name)),
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
        seed: &EventSeed,
    ) -> Result<bool, SeedError> {
        let owner = self.require_owner()?;
        let now: DateTimeWithTimeZone = Utc::now().into();
        let starts_at: DateTimeWithTimeZone = (self.now + Duration::days(seed.days_ahead)).into();

        let model = evento::ActiveModel {
            id: Set(Uuid::new_v4()),
            categoria_id: Set(parent.id),
            title: Set(seed.title.clone()),
            description: Set(seed.description.clone()),
            starts_at: Set(starts_at),
            published: Set(seed.published),
            is_pinned: Set(seed.pinned),
            author_id: Set(owner.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = Evento::insert(model)
            .on_conflict(
                OnConflict::columns([evento::Column::Title, evento::Column::CategoriaId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await
            .step(&format!("creating evento '{}' in '{}'", seed.title, parent.name))?;

        Ok(inserted > 0)
    }

    async fn counts<C>(&self, db: &C) -> Result<CatalogCounts, DbErr>
    where
        C: ConnectionTrait,
    {
        let total_parents = Categoria::find().count(db).await?;
        let active_parents = Categoria::find()
            .filter(categoria::Column::IsActive.eq(true))
            .count(db)
            .await?;
        let total_children = Evento::find().count(db).await?;

        Ok(CatalogCounts {
            total_parents,
            active_parents,
            total_children,
            active_children: None,
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
        let categorias = Categoria::find()
            .order_by_asc(categoria::Column::Name)
            .limit(parent_limit)
            .all(db)
            .await?;

        let mut breakdown = Vec::with_capacity(categorias.len());
        for categoria in categorias {
            let child_count = Evento::find()
                .filter(evento::Column::CategoriaId.eq(categoria.id))
                .count(db)
                .await?;
            let preview = Evento::find()
                .filter(evento::Column::CategoriaId.eq(categoria.id))
                .order_by_asc(evento::Column::Title)
                .limit(preview_len)
                .all(db)
                .await?
                .into_iter()
                .map(|evento| evento.title)
                .collect();

            breakdown.push(ParentBreakdown {
                name: categoria.name,
                child_count,
                preview,
            });
        }

        Ok(breakdown)
    }

    async fn extra_stats<C>(&self, db: &C) -> Result<Vec<StatLine>, DbErr>
    where
        C: ConnectionTrait,
    {
        let total = Evento::find().count(db).await?;
        let published = Evento::find()
            .filter(evento::Column::Published.eq(true))
            .count(db)
            .await?;
        let pinned = Evento::find()
            .filter(evento::Column::IsPinned.eq(true))
            .count(db)
            .await?;
        let categorias = Categoria::find().count(db).await?;

        let mut lines = vec![
            StatLine::new("Total eventos", total),
            StatLine::new("Eventos publicados", published),
            StatLine::new("Eventos fijados", pinned),
            StatLine::new("Total categorías", categorias),
        ];
        if let Some(owner) = &self.owner {
            lines.push(StatLine::new(
                "Usuario administrador",
                owner.display_identity(),
            ));
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_category() {
        let catalog = catalog();
        assert_eq!(catalog.parent_count(), 8);
        assert_eq!(catalog.child_count(), DEFAULT_EVENT_COUNT);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.orphan_groups().count(), 0);
        for parent in &catalog.parents {
            assert!(catalog.children_of(&parent.name).count() > 0, "{}", parent.name);
        }
    }

    #[test]
    fn limit_follows_fixture_order() {
        let catalog = catalog().limit_children(5);
        let titles: Vec<&str> = catalog
            .groups
            .iter()
            .flat_map(|g| g.children.iter().map(|c| c.title.as_str()))
            .collect();
        assert_eq!(
            titles,
            vec![
                "Conferencia de Inteligencia Artificial 2024",
                "Taller de Desarrollo Web Moderno",
                "Seminario de Metodologías Educativas",
                "Copa Universitaria de Fútbol",
                "Festival de Arte Contemporáneo",
            ]
        );
    }

    #[test]
    fn fixture_flags_match_expected_totals() {
        assert_eq!(EVENTOS.iter().filter(|e| e.published).count(), 12);
        assert_eq!(EVENTOS.iter().filter(|e| e.pinned).count(), 4);
    }
}
