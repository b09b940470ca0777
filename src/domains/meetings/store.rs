use async_trait::async_trait;

use crate::common::{FetchDirective, HostId, MeetingId, UserId};
use crate::domains::accounts::models::User;
use crate::error::StoreError;

use super::models::{Meeting, MeetingUpdate, NewMeeting, Participation};

/// Narrows a meeting listing to a slice of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeetingFilter {
    #[default]
    All,
    ByHost(HostId),
}

#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// One page of meetings matching `filter`, windowed by `directive`.
    async fn meetings_page(
        &self,
        filter: &MeetingFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Meeting>, StoreError>;

    async fn meetings_by_ids(&self, ids: &[MeetingId]) -> Result<Vec<Meeting>, StoreError>;

    /// Registered users for each meeting, keyed by meeting id.
    async fn users_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, User)>, StoreError>;

    /// Registration counts for each meeting, keyed by meeting id.
    async fn participant_counts(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, i64)>, StoreError>;

    /// The user's registration for the meeting, if any.
    async fn find_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<Option<Participation>, StoreError>;

    async fn insert_meeting(&self, meeting: NewMeeting) -> Result<Meeting, StoreError>;

    async fn update_meeting(
        &self,
        id: MeetingId,
        changes: MeetingUpdate,
    ) -> Result<Option<Meeting>, StoreError>;

    async fn delete_meeting(&self, id: MeetingId) -> Result<bool, StoreError>;

    async fn insert_participation(
        &self,
        meeting_id: MeetingId,
        user_id: UserId,
    ) -> Result<Participation, StoreError>;

    async fn delete_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError>;

    /// Marks the user's registration as attended. Returns false when no
    /// registration exists.
    async fn set_attended(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError>;
}
