//! Per-request wiring: services plus a fresh set of loaders.

use std::sync::Arc;

use crate::common::{HostId, MeetingId, UserId};
use crate::domains::accounts::loader::{HostLoader, UserLoader};
use crate::domains::accounts::models::{Host, User};
use crate::domains::meetings::loader::{
    MeetingLoader, MeetingParticipantsLoader, ParticipantCountLoader,
};
use crate::domains::meetings::models::Meeting;
use crate::domains::meetings::MeetingService;
use crate::domains::reviews::loader::{MeetingReviewsLoader, UserReviewsLoader};
use crate::domains::reviews::models::Review;
use crate::domains::reviews::ReviewService;
use crate::loader::Loader;
use crate::store::Datastore;

/// Batched entity loaders.
///
/// Built fresh for every request so the caches never outlive one response
/// tree.
pub struct Loaders {
    pub meeting: Loader<MeetingId, Meeting, MeetingLoader>,
    pub host: Loader<HostId, Host, HostLoader>,
    pub user: Loader<UserId, User, UserLoader>,
    pub meeting_participants: Loader<MeetingId, Vec<User>, MeetingParticipantsLoader>,
    pub meeting_reviews: Loader<MeetingId, Vec<Review>, MeetingReviewsLoader>,
    pub user_reviews: Loader<UserId, Vec<Review>, UserReviewsLoader>,
    /// Counts move as users join mid-request, so this loader never caches.
    pub participant_count: Loader<MeetingId, i64, ParticipantCountLoader>,
}

impl Loaders {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Loaders {
            meeting: Loader::new("meeting", MeetingLoader::new(db.clone())),
            host: Loader::new("host", HostLoader::new(db.clone())),
            user: Loader::new("user", UserLoader::new(db.clone())),
            meeting_participants: Loader::new(
                "meeting participants",
                MeetingParticipantsLoader::new(db.clone()),
            ),
            meeting_reviews: Loader::new("meeting reviews", MeetingReviewsLoader::new(db.clone())),
            user_reviews: Loader::new("user reviews", UserReviewsLoader::new(db.clone())),
            participant_count: Loader::without_cache(
                "participant count",
                ParticipantCountLoader::new(db),
            ),
        }
    }
}

/// Everything one request touches.
///
/// Transports build one of these per incoming request and drop it with the
/// response.
pub struct RequestContext {
    pub db: Arc<dyn Datastore>,
    pub meetings: MeetingService,
    pub reviews: ReviewService,
    pub loaders: Loaders,
}

impl RequestContext {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        RequestContext {
            meetings: MeetingService::new(db.clone()),
            reviews: ReviewService::new(db.clone()),
            loaders: Loaders::new(db.clone()),
            db,
        }
    }
}
