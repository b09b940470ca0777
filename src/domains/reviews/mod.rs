pub mod loader;
pub mod models;
pub mod service;
pub mod store;

// Re-export models
pub use models::{NewReview, Review, ReviewUpdate};

// Re-export service
pub use service::{
    ReviewService, MEETING_REVIEW_PAGE_SIZE, REVIEW_PAGE_SIZE, USER_REVIEW_PAGE_SIZE,
};

// Re-export store trait and filter
pub use store::{ReviewFilter, ReviewStore};
