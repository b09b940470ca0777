use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{HostId, MeetingId, ParticipationId, UserId};
use crate::context::Loaders;
use crate::domains::accounts::models::{Host, User};
use crate::domains::reviews::models::Review;
use crate::error::LoadError;

/// A scheduled gathering, organized by a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,
    pub host_id: HostId,
    pub title: String,
    pub content: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Last instant a user may join.
    pub deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub place: String,
    pub updated_at: DateTime<Utc>,
}

/// A user's registration for a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: ParticipationId,
    pub meeting_id: MeetingId,
    pub user_id: UserId,
    /// Set when the user checks in at the meeting.
    pub attended: bool,
}

// =============================================================================
// Creation / update parameter structs
// =============================================================================

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewMeeting {
    pub host_id: HostId,
    pub title: String,
    pub content: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub place: String,
}

#[derive(Debug, Clone, Default)]
pub struct MeetingUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    pub place: Option<String>,
}

// =============================================================================
// Relationship resolvers
// =============================================================================

impl Meeting {
    /// Organizer profile, batched across the response tree.
    pub async fn host(&self, loaders: &Loaders) -> Result<Host, LoadError> {
        loaders.host.load(self.host_id.clone()).await
    }

    /// Users registered for this meeting.
    pub async fn participants(&self, loaders: &Loaders) -> Result<Vec<User>, LoadError> {
        loaders.meeting_participants.load(self.id).await
    }

    /// Reviews written about this meeting.
    pub async fn reviews(&self, loaders: &Loaders) -> Result<Vec<Review>, LoadError> {
        loaders.meeting_reviews.load(self.id).await
    }

    /// Live registration count; reads fresh every batch.
    pub async fn participant_count(&self, loaders: &Loaders) -> Result<i64, LoadError> {
        loaders.participant_count.load(self.id).await
    }

    /// Whether the meeting can still be joined at `now`.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        now < self.deadline
    }
}
