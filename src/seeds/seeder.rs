//! The seeding pipeline shared by every catalog.
//!
//! One run opens a single transaction, optionally clears the catalog tables,
//! resolves every parent, then every child of every resolved parent. Any
//! failure rolls the whole run back.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, warn};

use super::catalog::{Catalog, ChildSeed};
use super::store::{
    CatalogCounts, CatalogLabels, CatalogStore, ClearedRecords, ParentBreakdown, ResolvedParent,
    StatLine,
};
use crate::error::{PersistenceContext, SeedError};

/// Maximum parents listed by verification and children previewed per parent.
pub const PREVIEW_LIMIT: u64 = 3;

/// Mode flags of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOptions {
    /// Delete all children then all parents before seeding
    pub clear_first: bool,
    /// Skip writes; only run verification
    pub verify_only: bool,
}

/// Outcome of one child get-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOutcome {
    pub parent: String,
    pub name: String,
    pub created: bool,
}

/// What a successful `seed()` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub labels: CatalogLabels,
    pub cleared: Option<ClearedRecords>,
    pub parents: Vec<ResolvedParent>,
    pub children: Vec<ChildOutcome>,
    /// Per-parent counts read back before commit, ordered by parent name
    pub breakdown: Vec<ParentBreakdown>,
    pub extra: Vec<StatLine>,
}

impl SeedSummary {
    pub fn parents_processed(&self) -> usize {
        self.parents.len()
    }

    pub fn parents_created(&self) -> usize {
        self.parents.iter().filter(|p| p.created).count()
    }

    pub fn children_processed(&self) -> usize {
        self.children.len()
    }

    pub fn children_created(&self) -> usize {
        self.children.iter().filter(|c| c.created).count()
    }
}

/// Result of the read-only verification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub labels: CatalogLabels,
    pub counts: CatalogCounts,
    /// Empty when `counts.is_empty()`
    pub samples: Vec<ParentBreakdown>,
}

impl Verification {
    /// Verification found no data; reported as a warning, not an error.
    pub fn is_warning(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Everything one invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub seed: Option<SeedSummary>,
    pub verification: Verification,
}

/// Seeds one catalog into one store.
pub struct Seeder<'a, S: CatalogStore> {
    db: &'a DatabaseConnection,
    store: S,
    catalog: Catalog<S::Child>,
}

impl<'a, S: CatalogStore> Seeder<'a, S> {
    pub fn new(db: &'a DatabaseConnection, store: S, catalog: Catalog<S::Child>) -> Self {
        Self { db, store, catalog }
    }

    pub fn catalog(&self) -> &Catalog<S::Child> {
        &self.catalog
    }

    /// Seeds (unless `verify_only`) and then verifies.
    pub async fn run(&mut self, options: SeedOptions) -> Result<RunReport, SeedError> {
        let seed = if options.verify_only {
            None
        } else {
            Some(self.seed(options.clear_first).await?)
        };
        let verification = self.verify().await?;
        Ok(RunReport { seed, verification })
    }

    /// Ensures every catalog record exists exactly once, in one transaction.
    pub async fn seed(&mut self, clear_first: bool) -> Result<SeedSummary, SeedError> {
        self.catalog.validate()?;
        self.store.prepare(self.db).await?;

        for orphan in self.catalog.orphan_groups() {
            warn!(
                parent = %orphan.parent,
                children = orphan.children.len(),
                "Skipping children of a parent missing from the catalog"
            );
        }

        let txn = self.db.begin().await.step("opening the transaction")?;

        match self.write_catalog(&txn, clear_first).await {
            Ok(summary) => {
                txn.commit().await.step("committing the transaction")?;
                info!(
                    parents = summary.parents_processed(),
                    parents_created = summary.parents_created(),
                    children = summary.children_processed(),
                    children_created = summary.children_created(),
                    "Catalog seeded"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "Seeding failed; rolling back");
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn write_catalog(
        &self,
        txn: &DatabaseTransaction,
        clear_first: bool,
    ) -> Result<SeedSummary, SeedError> {
        let labels = *self.store.labels();

        let cleared = if clear_first {
            let cleared = self.store.clear(txn).await?;
            info!(
                parents = cleared.parents,
                children = cleared.children,
                "Cleared existing catalog rows"
            );
            Some(cleared)
        } else {
            None
        };

        let mut parents = Vec::with_capacity(self.catalog.parent_count());
        for seed in &self.catalog.parents {
            let resolved = self.store.get_or_create_parent(txn, seed).await?;
            info!(
                parent = %resolved.name,
                created = resolved.created,
                "Resolved parent"
            );
            parents.push(resolved);
        }

        let mut children = Vec::with_capacity(self.catalog.child_count());
        for parent in &parents {
            for seed in self.catalog.children_of(&parent.name) {
                let created = self.store.get_or_create_child(txn, parent, seed).await?;
                info!(
                    parent = %parent.name,
                    child = %seed.name(),
                    created,
                    "Resolved child"
                );
                children.push(ChildOutcome {
                    parent: parent.name.clone(),
                    name: seed.name().to_string(),
                    created,
                });
            }
        }

        let breakdown = self
            .store
            .breakdown(txn, None, PREVIEW_LIMIT)
            .await
            .step("reading the per-parent breakdown")?;
        let extra = self
            .store
            .extra_stats(txn)
            .await
            .step("reading catalog statistics")?;

        Ok(SeedSummary {
            labels,
            cleared,
            parents,
            children,
            breakdown,
            extra,
        })
    }

    /// Read-only report of what is currently stored.
    pub async fn verify(&self) -> Result<Verification, SeedError> {
        let counts = self
            .store
            .counts(self.db)
            .await
            .step("counting catalog rows")?;

        let samples = if counts.is_empty() {
            warn!(
                parents = counts.total_parents,
                children = counts.total_children,
                "Catalog has no data"
            );
            Vec::new()
        } else {
            self.store
                .breakdown(self.db, Some(PREVIEW_LIMIT), PREVIEW_LIMIT)
                .await
                .step("reading catalog samples")?
        };

        Ok(Verification {
            labels: *self.store.labels(),
            counts,
            samples,
        })
    }
}
