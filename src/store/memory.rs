//! In-memory datastore backed by ordered maps.
//!
//! Entity tables are `BTreeMap`s keyed by id, so offset scans walk insertion
//! order and cursor scans walk id-descending without an index. Used by tests
//! and local development; a SQL backend implements the same traits.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::common::{FetchDirective, HostId, MeetingId, ParticipationId, ReviewId, UserId};
use crate::domains::accounts::models::{Host, User};
use crate::domains::accounts::AccountStore;
use crate::domains::meetings::models::{Meeting, MeetingUpdate, NewMeeting, Participation};
use crate::domains::meetings::{MeetingFilter, MeetingStore};
use crate::domains::reviews::models::{NewReview, Review, ReviewUpdate};
use crate::domains::reviews::{ReviewFilter, ReviewStore};
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    meetings: BTreeMap<i64, Meeting>,
    reviews: BTreeMap<i64, Review>,
    participations: BTreeMap<i64, Participation>,
    hosts: HashMap<HostId, Host>,
    users: HashMap<UserId, User>,
    next_meeting_id: i64,
    next_review_id: i64,
    next_participation_id: i64,
}

impl Tables {
    fn next_meeting_id(&mut self) -> i64 {
        self.next_meeting_id += 1;
        self.next_meeting_id
    }

    fn next_review_id(&mut self) -> i64 {
        self.next_review_id += 1;
        self.next_review_id
    }

    fn next_participation_id(&mut self) -> i64 {
        self.next_participation_id += 1;
        self.next_participation_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Walk one window of a table.
///
/// `Offset` walks ascending id order; `Before` walks descending, strictly
/// below `before` when set. The limit counts matching rows, so filters are
/// applied before it.
fn page_scan<T, F>(table: &BTreeMap<i64, T>, directive: FetchDirective, matches: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    match directive {
        FetchDirective::Offset { offset, limit } => table
            .values()
            .filter(|&row| matches(row))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect(),
        FetchDirective::Before { before, limit } => {
            let upper = match before {
                Some(id) => Bound::Excluded(id),
                None => Bound::Unbounded,
            };
            table
                .range((Bound::Unbounded, upper))
                .rev()
                .map(|(_, row)| row)
                .filter(|&row| matches(row))
                .take(limit as usize)
                .cloned()
                .collect()
        }
    }
}

// =============================================================================
// MeetingStore
// =============================================================================

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn meetings_page(
        &self,
        filter: &MeetingFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Meeting>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page_scan(&tables.meetings, directive, |m| match filter {
            MeetingFilter::All => true,
            MeetingFilter::ByHost(host_id) => m.host_id == *host_id,
        }))
    }

    async fn meetings_by_ids(&self, ids: &[MeetingId]) -> Result<Vec<Meeting>, StoreError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.meetings.get(&id.value()))
            .cloned()
            .collect())
    }

    async fn users_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, User)>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows = Vec::new();
        for participation in tables.participations.values() {
            if !meeting_ids.contains(&participation.meeting_id) {
                continue;
            }
            if let Some(user) = tables.users.get(&participation.user_id) {
                rows.push((participation.meeting_id, user.clone()));
            }
        }
        Ok(rows)
    }

    async fn participant_counts(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, i64)>, StoreError> {
        let tables = self.tables.read().await;
        Ok(meeting_ids
            .iter()
            .map(|id| {
                let count = tables
                    .participations
                    .values()
                    .filter(|p| p.meeting_id == *id)
                    .count() as i64;
                (*id, count)
            })
            .collect())
    }

    async fn find_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<Option<Participation>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .participations
            .values()
            .find(|p| p.meeting_id == meeting_id && p.user_id == *user_id)
            .cloned())
    }

    async fn insert_meeting(&self, meeting: NewMeeting) -> Result<Meeting, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_meeting_id();
        let row = Meeting {
            id: MeetingId::new(id),
            host_id: meeting.host_id,
            title: meeting.title,
            content: meeting.content,
            start_at: meeting.start_at,
            end_at: meeting.end_at,
            deadline: meeting.deadline,
            max_participants: meeting.max_participants,
            place: meeting.place,
            updated_at: Utc::now(),
        };
        tables.meetings.insert(id, row.clone());
        Ok(row)
    }

    async fn update_meeting(
        &self,
        id: MeetingId,
        changes: MeetingUpdate,
    ) -> Result<Option<Meeting>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.meetings.get_mut(&id.value()) {
            Some(meeting) => {
                if let Some(title) = changes.title {
                    meeting.title = title;
                }
                if let Some(content) = changes.content {
                    meeting.content = content;
                }
                if let Some(start_at) = changes.start_at {
                    meeting.start_at = start_at;
                }
                if let Some(end_at) = changes.end_at {
                    meeting.end_at = end_at;
                }
                if let Some(deadline) = changes.deadline {
                    meeting.deadline = deadline;
                }
                if let Some(max_participants) = changes.max_participants {
                    meeting.max_participants = max_participants;
                }
                if let Some(place) = changes.place {
                    meeting.place = place;
                }
                meeting.updated_at = Utc::now();
                Ok(Some(meeting.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_meeting(&self, id: MeetingId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.meetings.remove(&id.value()).is_some())
    }

    async fn insert_participation(
        &self,
        meeting_id: MeetingId,
        user_id: UserId,
    ) -> Result<Participation, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_participation_id();
        let row = Participation {
            id: ParticipationId::new(id),
            meeting_id,
            user_id,
            attended: false,
        };
        tables.participations.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let found = tables
            .participations
            .values()
            .find(|p| p.meeting_id == meeting_id && p.user_id == *user_id)
            .map(|p| p.id.value());
        match found {
            Some(id) => {
                tables.participations.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_attended(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables
            .participations
            .values_mut()
            .find(|p| p.meeting_id == meeting_id && p.user_id == *user_id)
        {
            Some(participation) => {
                participation.attended = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// =============================================================================
// ReviewStore
// =============================================================================

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn reviews_page(
        &self,
        filter: &ReviewFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page_scan(&tables.reviews, directive, |r| match filter {
            ReviewFilter::All => true,
            ReviewFilter::ByMeeting(meeting_id) => r.meeting_id == *meeting_id,
            ReviewFilter::ByAuthor(author_id) => r.author_id == *author_id,
        }))
    }

    async fn reviews_by_ids(&self, ids: &[ReviewId]) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.reviews.get(&id.value()))
            .cloned()
            .collect())
    }

    async fn reviews_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .filter(|r| meeting_ids.contains(&r.meeting_id))
            .cloned()
            .collect())
    }

    async fn reviews_for_authors(
        &self,
        author_ids: &[UserId],
    ) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .filter(|r| author_ids.contains(&r.author_id))
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_review_id();
        let row = Review {
            id: ReviewId::new(id),
            meeting_id: review.meeting_id,
            author_id: review.author_id,
            title: review.title,
            content: review.content,
            updated_at: Utc::now(),
        };
        tables.reviews.insert(id, row.clone());
        Ok(row)
    }

    async fn update_review(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Option<Review>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.reviews.get_mut(&id.value()) {
            Some(review) => {
                if let Some(title) = changes.title {
                    review.title = title;
                }
                if let Some(content) = changes.content {
                    review.content = content;
                }
                review.updated_at = Utc::now();
                Ok(Some(review.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_review(&self, id: ReviewId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.reviews.remove(&id.value()).is_some())
    }
}

// =============================================================================
// AccountStore
// =============================================================================

#[async_trait]
impl AccountStore for MemoryStore {
    async fn hosts_by_ids(&self, ids: &[HostId]) -> Result<Vec<Host>, StoreError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.hosts.get(id))
            .cloned()
            .collect())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .cloned()
            .collect())
    }

    async fn upsert_host(&self, host: Host) -> Result<Host, StoreError> {
        let mut tables = self.tables.write().await;
        tables.hosts.insert(host.id.clone(), host.clone());
        Ok(host)
    }

    async fn upsert_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
