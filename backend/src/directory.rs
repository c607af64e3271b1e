use std::sync::Arc;
use tracing::{debug, info, instrument};

use shared::{validate_identity, AdminRecord, Direction, Reputation, VoteOutcome};
use crate::cache::ReputationCache;
use crate::config::Config;
use crate::error::{DirectoryError, DirectoryResult};
use crate::processor::VoteProcessor;
use crate::queries::Queries;
use crate::schema;
use crate::store::Store;

/// Admin reputation directory: the store is the source of truth, the cache
/// serves every read. Cheap to clone; clones share the same pool and cache.
#[derive(Debug, Clone)]
pub struct AdminDirectory {
    store: Store,
    cache: Arc<ReputationCache>,
}

fn checked_identity(auth: &str) -> DirectoryResult<()> {
    validate_identity(auth).map_err(|e| DirectoryError::InvalidIdentity(auth.to_string(), e))
}

impl AdminDirectory {
    pub fn new(store: Store, cache: Arc<ReputationCache>) -> Self {
        Self { store, cache }
    }

    /// Connects, bootstraps the schema and fills the cache.
    pub async fn open(config: &Config) -> DirectoryResult<Self> {
        let directory = Self::new(Store::connect(config).await?, Arc::new(ReputationCache::new()));
        directory.ensure_schema().await?;
        Ok(directory)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn cache(&self) -> &ReputationCache {
        &self.cache
    }

    /// Creates missing tables, then reloads the cache. Any failure here is
    /// reported as [`DirectoryError::Schema`] and must stop startup.
    pub async fn ensure_schema(&self) -> DirectoryResult<usize> {
        let created = schema::ensure_tables(&self.store).await?;
        let admins = self
            .cache
            .reload_all(&self.store)
            .await
            .map_err(|e| DirectoryError::Schema(e.to_string()))?;
        info!("Schema ready ({} tables created, {} admins cached)", created, admins);
        Ok(created)
    }

    pub async fn reload_all(&self) -> DirectoryResult<usize> {
        self.cache.reload_all(&self.store).await
    }

    pub fn reputation(&self, auth: &str) -> Option<Reputation> {
        self.cache.reputation(auth)
    }

    pub fn contact(&self, auth: &str) -> Option<String> {
        self.cache.contact(auth)
    }

    pub fn is_listed(&self, auth: &str) -> bool {
        self.cache.contains(auth)
    }

    pub fn snapshot(&self, auth: &str) -> Option<AdminRecord> {
        self.cache.snapshot(auth)
    }

    /// Inserts a zeroed record for `auth` unless one exists. Returns whether a row was added.
    #[instrument(skip(self))]
    pub async fn ensure_registered(&self, auth: &str) -> DirectoryResult<bool> {
        checked_identity(auth)?;

        let mut tx = self.store.begin().await?;
        if Queries::admin_exists(&mut *tx, auth).await? {
            tx.rollback().await?;
            return Ok(false);
        }

        Queries::insert_admin(&mut *tx, auth).await?;
        tx.commit().await?;

        self.cache.insert(AdminRecord::new(auth)).await;
        info!("Registered admin {}", auth);
        Ok(true)
    }

    /// Replaces the contact text of `auth`. The text is stored as given.
    /// A cache refresh failure after commit is returned to the caller.
    #[instrument(skip(self, contact))]
    pub async fn set_contact(&self, auth: &str, contact: &str) -> DirectoryResult<()> {
        checked_identity(auth)?;

        let mut tx = self.store.begin().await?;
        let touched = Queries::update_contact(&mut *tx, auth, contact).await?;
        tx.commit().await?;

        if touched == 0 {
            debug!("Contact update for unlisted admin {} changed nothing", auth);
        }
        self.cache.refresh_one(&self.store, auth).await
    }

    pub async fn apply_vote(&self, voter: &str, target: &str, want_like: bool) -> DirectoryResult<VoteOutcome> {
        VoteProcessor::apply_vote(&self.store, &self.cache, voter, target, Direction::from_like(want_like)).await
    }

    /// Current outstanding direction of `voter` towards `target`, read from the store.
    pub async fn vote_direction(&self, voter: &str, target: &str) -> DirectoryResult<Option<Direction>> {
        checked_identity(voter)?;
        checked_identity(target)?;
        VoteProcessor::current_direction(&self.store, voter, target).await
    }
}
