use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::common::{MeetingId, UserId};
use crate::error::StoreError;
use crate::loader::BatchFn;
use crate::store::Datastore;

use super::models::Review;

/// Batches review-list lookups by meeting id.
pub struct MeetingReviewsLoader {
    pub db: Arc<dyn Datastore>,
}

impl MeetingReviewsLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<MeetingId, Vec<Review>> for MeetingReviewsLoader {
    fn load(
        &mut self,
        keys: &[MeetingId],
    ) -> impl Future<Output = Result<HashMap<MeetingId, Vec<Review>>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let reviews = db.reviews_for_meetings(&keys).await?;

            let mut map: HashMap<MeetingId, Vec<Review>> = HashMap::new();
            for review in reviews {
                map.entry(review.meeting_id).or_default().push(review);
            }

            // Ensure every requested key has an entry
            for id in &keys {
                map.entry(*id).or_default();
            }

            Ok(map)
        }
    }
}

/// Batches review-list lookups by author id.
pub struct UserReviewsLoader {
    pub db: Arc<dyn Datastore>,
}

impl UserReviewsLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<UserId, Vec<Review>> for UserReviewsLoader {
    fn load(
        &mut self,
        keys: &[UserId],
    ) -> impl Future<Output = Result<HashMap<UserId, Vec<Review>>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let reviews = db.reviews_for_authors(&keys).await?;

            let mut map: HashMap<UserId, Vec<Review>> = HashMap::new();
            for review in reviews {
                map.entry(review.author_id.clone()).or_default().push(review);
            }

            // Ensure every requested key has an entry
            for id in &keys {
                map.entry(id.clone()).or_default();
            }

            Ok(map)
        }
    }
}
