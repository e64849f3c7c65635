//! Persistence seam between the generic seeding pipeline and a concrete
//! parent/child table pair.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr};
use uuid::Uuid;

use super::catalog::{ChildSeed, ParentSeed};
use crate::error::SeedError;

/// Display vocabulary of a catalog (Spanish, as shown to operators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLabels {
    /// Banner printed at the top of a run
    pub title: &'static str,
    pub parent_singular: &'static str,
    pub parent_plural: &'static str,
    pub child_singular: &'static str,
    pub child_plural: &'static str,
    /// Grammatical gender, used for participles ("creadas" / "creados")
    pub parent_feminine: bool,
    pub child_feminine: bool,
    pub parent_icon: &'static str,
    pub child_icon: &'static str,
}

impl CatalogLabels {
    pub(crate) fn participle(feminine: bool, singular: bool, stem: &str) -> String {
        let ending = match (feminine, singular) {
            (true, true) => "a",
            (true, false) => "as",
            (false, true) => "o",
            (false, false) => "os",
        };
        format!("{stem}{ending}")
    }
}

/// A parent row after get-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParent {
    pub id: Uuid,
    pub name: String,
    pub created: bool,
}

/// Rows removed by the clear step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearedRecords {
    pub parents: u64,
    pub children: u64,
}

/// Aggregate counts read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub total_parents: u64,
    pub active_parents: u64,
    pub total_children: u64,
    /// `None` when the child table has no active flag
    pub active_children: Option<u64>,
}

impl CatalogCounts {
    /// True when either side of the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.total_parents == 0 || self.total_children == 0
    }
}

/// One parent with its child count and a short, name-ordered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentBreakdown {
    pub name: String,
    pub child_count: u64,
    pub preview: Vec<String>,
}

impl ParentBreakdown {
    /// Children not shown in the preview.
    pub fn remaining(&self) -> u64 {
        self.child_count.saturating_sub(self.preview.len() as u64)
    }
}

/// Extra label/value line a catalog adds to its summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

impl StatLine {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Storage operations one catalog needs.
///
/// Writes receive the run's transaction; reads are generic so they can run
/// inside the transaction (summary) or on the pool (verification).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    type Child: ChildSeed;

    fn labels(&self) -> &CatalogLabels;

    /// Resolves prerequisites before any write. Failing here aborts the run
    /// with nothing touched.
    async fn prepare(&mut self, _db: &DatabaseConnection) -> Result<(), SeedError> {
        Ok(())
    }

    /// Deletes every child row, then every parent row.
    async fn clear(&self, txn: &DatabaseTransaction) -> Result<ClearedRecords, SeedError>;

    /// Inserts the parent unless its name exists, then returns the stored row.
    async fn get_or_create_parent(
        &self,
        txn: &DatabaseTransaction,
        seed: &ParentSeed,
    ) -> Result<ResolvedParent, SeedError>;

    /// Inserts the child unless (name, parent) exists. Returns whether a row was created.
    async fn get_or_create_child(
        &self,
        txn: &DatabaseTransaction,
        parent: &ResolvedParent,
        seed: &Self::Child,
    ) -> Result<bool, SeedError>;

    async fn counts<C>(&self, db: &C) -> Result<CatalogCounts, DbErr>
    where
        C: ConnectionTrait;

    /// Parents ordered by name (at most `parent_limit` when given), each with
    /// its child count and up to `preview` child names.
    async fn breakdown<C>(
        &self,
        db: &C,
        parent_limit: Option<u64>,
        preview: u64,
    ) -> Result<Vec<ParentBreakdown>, DbErr>
    where
        C: ConnectionTrait;

    async fn extra_stats<C>(&self, _db: &C) -> Result<Vec<StatLine>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participles_follow_gender_and_number() {
        assert_eq!(CatalogLabels::participle(true, false, "cread"), "creadas");
        assert_eq!(CatalogLabels::participle(false, false, "activ"), "activos");
        assert_eq!(CatalogLabels::participle(true, true, "cread"), "creada");
        assert_eq!(CatalogLabels::participle(false, true, "cread"), "creado");
    }

    #[test]
    fn remaining_never_underflows() {
        let breakdown = ParentBreakdown {
            name: "Tecnología".to_string(),
            child_count: 7,
            preview: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(breakdown.remaining(), 4);

        let small = ParentBreakdown {
            name: "Ventas".to_string(),
            child_count: 2,
            preview: vec!["a".into(), "b".into()],
        };
        assert_eq!(small.remaining(), 0);
    }
}
