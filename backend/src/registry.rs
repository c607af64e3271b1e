use std::collections::HashSet;
use tracing::debug;

use crate::directory::AdminDirectory;
use crate::error::DirectoryResult;

/// The host's list of server admins. Groups and flags live there, not here.
pub trait AdminRegistry: Send + Sync {
    fn is_admin(&self, auth: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    admins: HashSet<String>,
}

impl StaticRegistry {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl AdminRegistry for StaticRegistry {
    fn is_admin(&self, auth: &str) -> bool {
        self.admins.contains(auth)
    }
}

/// Called once a client has fully connected. Recognized admins get a
/// directory entry; everyone else is ignored. Returns whether a row was added.
pub async fn on_full_connect(
    directory: &AdminDirectory,
    registry: &dyn AdminRegistry,
    auth: &str,
) -> DirectoryResult<bool> {
    if !registry.is_admin(auth) {
        debug!("{} connected but is not a server admin", auth);
        return Ok(false);
    }
    directory.ensure_registered(auth).await
}
