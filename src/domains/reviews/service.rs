use std::sync::Arc;

use tracing::instrument;

use crate::common::{build_connection, Connection, EntityKind, PageRequest, ReviewId, UserId};
use crate::error::{AppError, DomainError};
use crate::store::Datastore;

use super::models::{NewReview, Review, ReviewUpdate};
use super::store::ReviewFilter;

/// Default window for a top-level review listing.
pub const REVIEW_PAGE_SIZE: i32 = 10;
/// Default window when listing one meeting's reviews.
pub const MEETING_REVIEW_PAGE_SIZE: i32 = 5;
/// Default window when listing one user's reviews.
pub const USER_REVIEW_PAGE_SIZE: i32 = 5;

#[derive(Clone)]
pub struct ReviewService {
    db: Arc<dyn Datastore>,
}

impl ReviewService {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: ReviewId) -> Result<Review, AppError> {
        let mut found = self.db.reviews_by_ids(&[id]).await?;
        found.pop().ok_or_else(|| review_not_found(id))
    }

    /// One page of reviews matching `filter`, newest-first under cursor
    /// paging and insertion-order under offset paging.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: &PageRequest,
    ) -> Result<Connection<Review>, AppError> {
        let descriptor = page.resolve()?;
        let rows = self.db.reviews_page(filter, descriptor.directive()).await?;
        Ok(build_connection(rows, &descriptor, EntityKind::Review, |r| {
            r.id.into()
        }))
    }

    /// Publishes a review. Only users who attended the meeting may write one.
    #[instrument(skip(self, params), fields(meeting_id = %params.meeting_id))]
    pub async fn create(&self, params: NewReview) -> Result<Review, AppError> {
        require_filled("title", &params.title)?;
        require_filled("content", &params.content)?;

        let participation = self
            .db
            .find_participation(params.meeting_id, &params.author_id)
            .await?;
        match participation {
            Some(p) if p.attended => {}
            _ => {
                return Err(DomainError::ReviewNotAllowed {
                    meeting_id: params.meeting_id,
                    user_id: params.author_id.clone(),
                }
                .into());
            }
        }

        Ok(self.db.insert_review(params).await?)
    }

    /// Applies `changes` to the review. Only its author may edit it.
    pub async fn update(
        &self,
        id: ReviewId,
        actor: &UserId,
        changes: ReviewUpdate,
    ) -> Result<Review, AppError> {
        if let Some(title) = &changes.title {
            require_filled("title", title)?;
        }

        let review = self.get(id).await?;
        if review.author_id != *actor {
            return Err(DomainError::NotReviewAuthor {
                review_id: id,
                user_id: actor.clone(),
            }
            .into());
        }

        self.db
            .update_review(id, changes)
            .await?
            .ok_or_else(|| review_not_found(id))
    }

    /// Removes the review. Only its author may delete it.
    pub async fn delete(&self, id: ReviewId, actor: &UserId) -> Result<(), AppError> {
        let review = self.get(id).await?;
        if review.author_id != *actor {
            return Err(DomainError::NotReviewAuthor {
                review_id: id,
                user_id: actor.clone(),
            }
            .into());
        }

        if self.db.delete_review(id).await? {
            Ok(())
        } else {
            Err(review_not_found(id))
        }
    }
}

fn review_not_found(id: ReviewId) -> AppError {
    DomainError::NotFound {
        entity: "review",
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
