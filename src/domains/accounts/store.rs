use async_trait::async_trait;

use crate::common::{HostId, UserId};
use crate::error::StoreError;

use super::models::{Host, User};

/// Account lookups backing the host and user loaders.
///
/// Batch fetches return matches only, in any order; callers decide what a
/// missing id means.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn hosts_by_ids(&self, ids: &[HostId]) -> Result<Vec<Host>, StoreError>;

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError>;

    /// Provisioning hook used by seeds and account sync.
    async fn upsert_host(&self, host: Host) -> Result<Host, StoreError>;

    async fn upsert_user(&self, user: User) -> Result<User, StoreError>;
}
