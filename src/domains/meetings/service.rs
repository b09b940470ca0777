use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::common::{build_connection, Connection, EntityKind, MeetingId, PageRequest, UserId};
use crate::error::{AppError, DomainError};
use crate::store::Datastore;

use super::models::{Meeting, MeetingUpdate, NewMeeting, Participation};
use super::store::MeetingFilter;

/// Default window for a top-level meeting listing.
pub const MEETING_PAGE_SIZE: i32 = 10;
/// Default window when listing one host's meetings.
pub const HOST_MEETING_PAGE_SIZE: i32 = 5;

#[derive(Clone)]
pub struct MeetingService {
    db: Arc<dyn Datastore>,
}

impl MeetingService {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: MeetingId) -> Result<Meeting, AppError> {
        let mut found = self.db.meetings_by_ids(&[id]).await?;
        found.pop().ok_or_else(|| meeting_not_found(id))
    }

    /// One page of meetings matching `filter`, newest-first under cursor
    /// paging and insertion-order under offset paging.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &MeetingFilter,
        page: &PageRequest,
    ) -> Result<Connection<Meeting>, AppError> {
        let descriptor = page.resolve()?;
        let rows = self.db.meetings_page(filter, descriptor.directive()).await?;
        Ok(build_connection(rows, &descriptor, EntityKind::Meeting, |m| {
            m.id.into()
        }))
    }

    pub async fn create(&self, params: NewMeeting) -> Result<Meeting, AppError> {
        require_filled("title", &params.title)?;
        require_filled("content", &params.content)?;
        Ok(self.db.insert_meeting(params).await?)
    }

    pub async fn update(
        &self,
        id: MeetingId,
        changes: MeetingUpdate,
    ) -> Result<Meeting, AppError> {
        if let Some(title) = &changes.title {
            require_filled("title", title)?;
        }
        self.db
            .update_meeting(id, changes)
            .await?
            .ok_or_else(|| meeting_not_found(id))
    }

    pub async fn delete(&self, id: MeetingId) -> Result<(), AppError> {
        if self.db.delete_meeting(id).await? {
            Ok(())
        } else {
            Err(meeting_not_found(id))
        }
    }

    // =========================================================================
    // Participation
    // =========================================================================

    /// Registers `user_id` for the meeting.
    ///
    /// Rejected when the deadline has passed, the meeting is at capacity, or
    /// the user already joined.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        meeting_id: MeetingId,
        user_id: UserId,
    ) -> Result<Participation, AppError> {
        let meeting = self.get(meeting_id).await?;

        if !meeting.is_open_at(Utc::now()) {
            return Err(DomainError::ParticipationClosed { meeting_id }.into());
        }

        if self
            .db
            .find_participation(meeting_id, &user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyJoined { meeting_id, user_id }.into());
        }

        let counts = self.db.participant_counts(&[meeting_id]).await?;
        let current = counts
            .iter()
            .find(|(id, _)| *id == meeting_id)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        if current >= meeting.max_participants as i64 {
            return Err(DomainError::MeetingFull {
                meeting_id,
                capacity: meeting.max_participants,
            }
            .into());
        }

        Ok(self.db.insert_participation(meeting_id, user_id).await?)
    }

    pub async fn leave(&self, meeting_id: MeetingId, user_id: &UserId) -> Result<(), AppError> {
        if self.db.delete_participation(meeting_id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotParticipant {
                meeting_id,
                user_id: user_id.clone(),
            }
            .into())
        }
    }

    /// Marks the user as having attended the meeting.
    pub async fn check_in(&self, meeting_id: MeetingId, user_id: &UserId) -> Result<(), AppError> {
        if self.db.set_attended(meeting_id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotParticipant {
                meeting_id,
                user_id: user_id.clone(),
            }
            .into())
        }
    }
}

fn meeting_not_found(id: MeetingId) -> AppError {
    DomainError::NotFound {
        entity: "meeting",
        id: id.to_string(),
    }
    .into()
}

fn require_filled(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(DomainError::BlankField { field }.into())
    } else {
        Ok(())
    }
}
