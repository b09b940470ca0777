use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{MeetingId, ReviewId, UserId};
use crate::context::Loaders;
use crate::domains::accounts::models::User;
use crate::domains::meetings::models::Meeting;
use crate::error::LoadError;

/// A participant's write-up of a meeting they attended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub meeting_id: MeetingId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewReview {
    pub meeting_id: MeetingId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

// =============================================================================
// Relationship resolvers
// =============================================================================

impl Review {
    /// The user who wrote this review.
    pub async fn author(&self, loaders: &Loaders) -> Result<User, LoadError> {
        loaders.user.load(self.author_id.clone()).await
    }

    /// The meeting this review is about.
    pub async fn meeting(&self, loaders: &Loaders) -> Result<Meeting, LoadError> {
        loaders.meeting.load(self.meeting_id).await
    }
}
