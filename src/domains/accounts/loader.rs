use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::common::{HostId, UserId};
use crate::error::StoreError;
use crate::loader::BatchFn;
use crate::store::Datastore;

use super::models::{Host, User};

/// Batches host lookups by id.
pub struct HostLoader {
    pub db: Arc<dyn Datastore>,
}

impl HostLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<HostId, Host> for HostLoader {
    fn load(
        &mut self,
        keys: &[HostId],
    ) -> impl Future<Output = Result<HashMap<HostId, Host>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let hosts = db.hosts_by_ids(&keys).await?;
            Ok(hosts.into_iter().map(|h| (h.id.clone(), h)).collect())
        }
    }
}

/// Batches user lookups by id.
pub struct UserLoader {
    pub db: Arc<dyn Datastore>,
}

impl UserLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<UserId, User> for UserLoader {
    fn load(
        &mut self,
        keys: &[UserId],
    ) -> impl Future<Output = Result<HashMap<UserId, User>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let users = db.users_by_ids(&keys).await?;
            Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
        }
    }
}
