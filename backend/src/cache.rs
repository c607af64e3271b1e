use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use shared::{AdminRecord, Reputation};
use crate::error::DirectoryResult;
use crate::queries::Queries;
use crate::store::Store;

/// Last-known snapshot of every admin, keyed by `auth`.
///
/// Readers only take the map's read lock and never wait on the store.
/// Writers (`reload_all`, `refresh_one`, `insert`) are serialized by
/// `writer`, which is held across the store read and the map update so two
/// refreshes of the same admin cannot land out of order.
#[derive(Debug, Default)]
pub struct ReputationCache {
    entries: RwLock<HashMap<String, AdminRecord>>,
    writer: Mutex<()>,
}

impl ReputationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, AdminRecord>> {
        self.entries.read().unwrap_or_else(|e| {
            warn!("Reputation cache lock was poisoned, recovering");
            PoisonError::into_inner(e)
        })
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, AdminRecord>> {
        self.entries.write().unwrap_or_else(|e| {
            warn!("Reputation cache lock was poisoned, recovering");
            PoisonError::into_inner(e)
        })
    }

    /// Replaces the whole map with a full scan of the store.
    pub async fn reload_all(&self, store: &Store) -> DirectoryResult<usize> {
        let _writer = self.writer.lock().await;
        let admins = Queries::fetch_all_admins(store.pool()).await?;
        let fresh: HashMap<String, AdminRecord> = admins
            .into_iter()
            .map(|admin| (admin.auth.clone(), admin))
            .collect();
        let count = fresh.len();
        *self.write_entries() = fresh;
        debug!("Reputation cache reloaded with {} admins", count);
        Ok(count)
    }

    /// Re-reads one admin. An admin missing from the store is dropped from the cache.
    pub async fn refresh_one(&self, store: &Store, auth: &str) -> DirectoryResult<()> {
        let _writer = self.writer.lock().await;
        let record = Queries::fetch_admin(store.pool(), auth).await?;
        let mut entries = self.write_entries();
        match record {
            Some(admin) => {
                entries.insert(auth.to_string(), admin);
            }
            None => {
                if entries.remove(auth).is_some() {
                    debug!("Dropped {} from reputation cache", auth);
                }
            }
        }
        Ok(())
    }

    /// Adds a freshly committed record. An entry already present came from a
    /// later store read and is kept.
    pub async fn insert(&self, admin: AdminRecord) {
        let _writer = self.writer.lock().await;
        self.write_entries().entry(admin.auth.clone()).or_insert(admin);
    }

    pub fn reputation(&self, auth: &str) -> Option<Reputation> {
        self.read_entries().get(auth).map(AdminRecord::reputation)
    }

    pub fn contact(&self, auth: &str) -> Option<String> {
        self.read_entries().get(auth).and_then(|admin| admin.contact.clone())
    }

    pub fn snapshot(&self, auth: &str) -> Option<AdminRecord> {
        self.read_entries().get(auth).cloned()
    }

    pub fn contains(&self, auth: &str) -> bool {
        self.read_entries().contains_key(auth)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }
}
