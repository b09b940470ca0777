//! Typed id definitions for all domain entities.
//!
//! # Example
//!
//! ```rust
//! use gather_core::common::{MeetingId, ReviewId};
//!
//! // These are incompatible types - the compiler prevents mixing them up
//! let meeting_id = MeetingId::new(1);
//! let review_id = ReviewId::new(1);
//!
//! // This would be a compile error:
//! // let wrong: ReviewId = meeting_id;
//! ```

// Re-export the core id types
pub use super::id::{ExternalId, Id};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Meeting entities.
pub struct Meeting;

/// Marker type for Review entities.
pub struct Review;

/// Marker type for Participation entities (meeting registrations).
pub struct Participation;

/// Marker type for Host accounts (organizers).
pub struct Host;

/// Marker type for User accounts (attendees).
pub struct User;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed id for Meeting entities.
pub type MeetingId = Id<Meeting>;

/// Typed id for Review entities.
pub type ReviewId = Id<Review>;

/// Typed id for Participation entities.
pub type ParticipationId = Id<Participation>;

/// Typed id for Host accounts (identity-provider assigned).
pub type HostId = ExternalId<Host>;

/// Typed id for User accounts (identity-provider assigned).
pub type UserId = ExternalId<User>;
