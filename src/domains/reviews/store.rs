use async_trait::async_trait;

use crate::common::{FetchDirective, MeetingId, ReviewId, UserId};
use crate::error::StoreError;

use super::models::{NewReview, Review, ReviewUpdate};

/// Narrows a review listing to a slice of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    ByMeeting(MeetingId),
    ByAuthor(UserId),
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// One page of reviews matching `filter`, windowed by `directive`.
    async fn reviews_page(
        &self,
        filter: &ReviewFilter,
        directive: FetchDirective,
    ) -> Result<Vec<Review>, StoreError>;

    async fn reviews_by_ids(&self, ids: &[ReviewId]) -> Result<Vec<Review>, StoreError>;

    /// Every review for each of the given meetings.
    async fn reviews_for_meetings(
        &self,
        meeting_ids: &[MeetingId],
    ) -> Result<Vec<Review>, StoreError>;

    /// Every review written by each of the given users.
    async fn reviews_for_authors(&self, author_ids: &[UserId])
        -> Result<Vec<Review>, StoreError>;

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;

    async fn update_review(
        &self,
        id: ReviewId,
        changes: ReviewUpdate,
    ) -> Result<Option<Review>, StoreError>;

    async fn delete_review(&self, id: ReviewId) -> Result<bool, StoreError>;
}
