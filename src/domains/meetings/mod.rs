pub mod loader;
pub mod models;
pub mod service;
pub mod store;

// Re-export models
pub use models::{Meeting, MeetingUpdate, NewMeeting, Participation};

// Re-export service
pub use service::{MeetingService, HOST_MEETING_PAGE_SIZE, MEETING_PAGE_SIZE};

// Re-export store trait and filter
pub use store::{MeetingFilter, MeetingStore};
