//! Datastore wrappers for asserting batching behavior.
//!
//! `CountingStore` counts batch reads so tests can prove a whole page
//! resolved a relationship with a single fetch. `FailingStore` fails batch
//! reads so tests can watch one failure fan out to every pending load.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use gather_core::common::{FetchDirective, HostId, MeetingId, ReviewId, UserId};
use gather_core::domains::accounts::models::{Host, User};
use gather_core::domains::accounts::AccountStore;
use gather_core::domains::meetings::models::{Meeting, MeetingUpdate, NewMeeting, Participation};
use gather_core::domains::meetings::{MeetingFilter, MeetingStore};
use gather_core::domains::reviews::models::{NewReview, Review, ReviewUpdate};
use gather_core::domains::reviews::{ReviewFilter, ReviewStore};
use gather_core::error::StoreError;
use gather_core::store::Datastore;

// =============================================================================
// CountingStore
// =============================================================================

pub struct CountingStore {
    inner: Arc<dyn Datastore>,
    pub meetings_by_ids_calls: AtomicUsize,
    pub hosts_by_ids_calls: AtomicUsize,
    pub users_by_ids_calls: AtomicUsize,
    pub users_for_meetings_calls: AtomicUsize,
    pub reviews_for_meetings_calls: AtomicUsize,
    pub reviews_for_authors_calls: AtomicUsize,
    pub participant_counts_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn Datastore>) -> Self {
        CountingStore {
            inner,
            meetings_by_ids_calls: AtomicUsize::new(0),
            hosts_by_ids_calls: AtomicUsize::new(0),
            users_by_ids_calls: AtomicUsize::new(0),
            users_for_meetings_calls: AtomicUsize::new(0),
            reviews_for_meetings_calls: AtomicUsize::new(0),
            reviews_for_authors_calls: AtomicUsize::new(0),
            participant_counts_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MeetingStore for CountingStore {
    async fn meetings_page(
        &self,
        filter: &MeetingFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Meeting>, StoreError> {
        self.inner.meetings_page(filter, directive).await
    }

    async fn meetings_by_ids(&self, ids: &[MeetingId]) -> Result<Vec<Meeting>, StoreError> {
        self.meetings_by_ids_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.meetings_by_ids(ids).await
    }

    async fn users_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, User)>, StoreError> {
        self.users_for_meetings_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.users_for_meetings(meeting_ids).await
    }

    async fn participant_counts(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, i64)>, StoreError> {
        self.participant_counts_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.participant_counts(meeting_ids).await
    }

    async fn find_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<Option<Participation>, StoreError> {
        self.inner.find_participation(meeting_id, user_id).await
    }

    async fn insert_meeting(&self, meeting: NewMeeting) -> Result<Meeting, StoreError> {
        self.inner.insert_meeting(meeting).await
    }

    async fn update_meeting(
        &self,
        id: MeetingId,
        changes: MeetingUpdate,
    ) -> Result<Option<Meeting>, StoreError> {
        self.inner.update_meeting(id, changes).await
    }

    async fn delete_meeting(&self, id: MeetingId) -> Result<bool, StoreError> {
        self.inner.delete_meeting(id).await
    }

    async fn insert_participation(
        &self,
        meeting_id: MeetingId,
        user_id: UserId,
    ) -> Result<Participation, StoreError> {
        self.inner.insert_participation(meeting_id, user_id).await
    }

    async fn delete_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        self.inner.delete_participation(meeting_id, user_id).await
    }

    async fn set_attended(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        self.inner.set_attended(meeting_id, user_id).await
    }
}

#[async_trait]
impl ReviewStore for CountingStore {
    async fn reviews_page(
        &self,
        filter: &ReviewFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_page(filter, directive).await
    }

    async fn reviews_by_ids(&self, ids: &[ReviewId]) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_by_ids(ids).await
    }

    async fn reviews_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<Review>, StoreError> {
        self.reviews_for_meetings_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.reviews_for_meetings(meeting_ids).await
    }

    async fn reviews_for_authors(
        &self,
        author_ids: &[UserId],
    ) -> Result<Vec<Review>, StoreError> {
        self.reviews_for_authors_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.reviews_for_authors(author_ids).await
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        self.inner.insert_review(review).await
    }

    async fn update_review(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Option<Review>, StoreError> {
        self.inner.update_review(id, changes).await
    }

    async fn delete_review(&self, id: ReviewId) -> Result<bool, StoreError> {
        self.inner.delete_review(id).await
    }
}

#[async_trait]
impl AccountStore for CountingStore {
    async fn hosts_by_ids(&self, ids: &[HostId]) -> Result<Vec<Host>, StoreError> {
        self.hosts_by_ids_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.hosts_by_ids(ids).await
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        self.users_by_ids_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.users_by_ids(ids).await
    }

    async fn upsert_host(&self, host: Host) -> Result<Host, StoreError> {
        self.inner.upsert_host(host).await
    }

    async fn upsert_user(&self, user: User) -> Result<User, StoreError> {
        self.inner.upsert_user(user).await
    }
}

// =============================================================================
// FailingStore
// =============================================================================

/// Fails every batch read; writes and listings still hit the wrapped store.
pub struct FailingStore {
    inner: Arc<dyn Datastore>,
}

impl FailingStore {
    pub fn new(inner: Arc<dyn Datastore>) -> Self {
        FailingStore { inner }
    }
}

fn injected_failure() -> StoreError {
    StoreError::Internal(anyhow::anyhow!("injected batch read failure"))
}

#[async_trait]
impl MeetingStore for FailingStore {
    async fn meetings_page(
        &self,
        filter: &MeetingFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Meeting>, StoreError> {
        self.inner.meetings_page(filter, directive).await
    }

    async fn meetings_by_ids(&self, _ids: &[MeetingId]) -> Result<Vec<Meeting>, StoreError> {
        Err(injected_failure())
    }

    async fn users_for_meetings(
        &self,
        _meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, User)>, StoreError> {
        Err(injected_failure())
    }

    async fn participant_counts(
        &self,
        _meeting_ids: &[MeetingId],
    ) -> Result<Vec<(MeetingId, i64)>, StoreError> {
        Err(injected_failure())
    }

    async fn find_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<Option<Participation>, StoreError> {
        self.inner.find_participation(meeting_id, user_id).await
    }

    async fn insert_meeting(&self, meeting: NewMeeting) -> Result<Meeting, StoreError> {
        self.inner.insert_meeting(meeting).await
    }

    async fn update_meeting(
        &self,
        id: MeetingId,
        changes: MeetingUpdate,
    ) -> Result<Option<Meeting>, StoreError> {
        self.inner.update_meeting(id, changes).await
    }

    async fn delete_meeting(&self, id: MeetingId) -> Result<bool, StoreError> {
        self.inner.delete_meeting(id).await
    }

    async fn insert_participation(
        &self,
        meeting_id: MeetingId,
        user_id: UserId,
    ) -> Result<Participation, StoreError> {
        self.inner.insert_participation(meeting_id, user_id).await
    }

    async fn delete_participation(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        self.inner.delete_participation(meeting_id, user_id).await
    }

    async fn set_attended(
        &self,
        meeting_id: MeetingId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        self.inner.set_attended(meeting_id, user_id).await
    }
}

#[async_trait]
impl ReviewStore for FailingStore {
    async fn reviews_page(
        &self,
        filter: &ReviewFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_page(filter, directive).await
    }

    async fn reviews_by_ids(&self, _ids: &[ReviewId]) -> Result<Vec<Review>, StoreError> {
        Err(injected_failure())
    }

    async fn reviews_for_meetings(
        &self,
        _meeting_ids: &[MeetingId],
    ) -> Result<Vec<Review>, StoreError> {
        Err(injected_failure())
    }

    async fn reviews_for_authors(
        &self,
        _author_ids: &[UserId],
    ) -> Result<Vec<Review>, StoreError> {
        Err(injected_failure())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        self.inner.insert_review(review).await
    }

    async fn update_review(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Option<Review>, StoreError> {
        self.inner.update_review(id, changes).await
    }

    async fn delete_review(&self, id: ReviewId) -> Result<bool, StoreError> {
        self.inner.delete_review(id).await
    }
}

#[async_trait]
impl AccountStore for FailingStore {
    async fn hosts_by_ids(&self, _ids: &[HostId]) -> Result<Vec<Host>, StoreError> {
        Err(injected_failure())
    }

    async fn users_by_ids(&self, _ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        Err(injected_failure())
    }

    async fn upsert_host(&self, host: Host) -> Result<Host, StoreError> {
        self.inner.upsert_host(host).await
    }

    async fn upsert_user(&self, user: User) -> Result<User, StoreError> {
        self.inner.upsert_user(user).await
    }
}
