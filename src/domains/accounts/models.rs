use serde::{Deserialize, Serialize};

use crate::common::{HostId, UserId};
use crate::context::Loaders;
use crate::domains::reviews::models::Review;
use crate::error::LoadError;

/// Organizer account, provisioned by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: HostId,
    pub nickname: String,
}

/// Attendee account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub nickname: String,
}

impl User {
    /// Reviews this user has written, batched across the response tree.
    pub async fn reviews(&self, loaders: &Loaders) -> Result<Vec<Review>, LoadError> {
        loaders.user_reviews.load(self.id.clone()).await
    }
}
