//! Error taxonomy for the API core.
//!
//! Every failure carries an explicit classification instead of encoding it in
//! the error's name, so transport adapters map errors to wire responses with
//! an exhaustive match rather than string inspection.

use std::sync::Arc;

use thiserror::Error;

use crate::common::{MeetingId, ReviewId, UserId};

/// Broad classification a transport uses when mapping an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something invalid; retrying unchanged will fail again.
    Client,
    /// The system failed; the request may succeed later.
    Server,
}

/// Cursor strings that do not decode back to an id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is empty")]
    Empty,

    #[error("cursor is not valid base64")]
    InvalidEncoding,

    #[error("cursor payload is not valid UTF-8")]
    InvalidPayload,

    #[error("cursor payload has fewer than two segments")]
    MissingSegments,

    #[error("cursor id segment is not numeric: {0:?}")]
    InvalidId(String),
}

/// Page requests that do not resolve to exactly one paging mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    #[error("cannot combine pageNum/pageSize with first/after")]
    MixedModes,

    #[error("page request needs either pageNum/pageSize or first/after")]
    MissingMode,

    #[error("pageNum and pageSize must be provided together")]
    IncompleteOffset,

    #[error("{field} must be a positive integer")]
    NonPositive { field: &'static str },

    #[error("invalid cursor: {0}")]
    Cursor(#[from] CursorError),
}

/// Failures surfaced by a batched loader.
///
/// `Clone` so one batch failure fans out to every call waiting on it.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("no {entity} found for key {key}")]
    Missing { entity: &'static str, key: String },

    #[error("batch fetch failed: {0}")]
    Fetch(Arc<StoreError>),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Missing { .. } => ErrorKind::Client,
            LoadError::Fetch(_) => ErrorKind::Server,
        }
    }
}

/// Infrastructure failure reported by a datastore implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("datastore failure: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Domain rule violations and missing entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("registration for meeting {meeting_id} has closed")]
    ParticipationClosed { meeting_id: MeetingId },

    #[error("meeting {meeting_id} is full ({capacity} participants)")]
    MeetingFull { meeting_id: MeetingId, capacity: i32 },

    #[error("user {user_id} already joined meeting {meeting_id}")]
    AlreadyJoined { meeting_id: MeetingId, user_id: UserId },

    #[error("user {user_id} is not a participant of meeting {meeting_id}")]
    NotParticipant { meeting_id: MeetingId, user_id: UserId },

    #[error("user {user_id} has not attended meeting {meeting_id}")]
    ReviewNotAllowed { meeting_id: MeetingId, user_id: UserId },

    #[error("user {user_id} is not the author of review {review_id}")]
    NotReviewAuthor { review_id: ReviewId, user_id: UserId },

    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
}

/// Umbrella error returned by the services.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Paging(#[from] PagingError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CursorError> for AppError {
    fn from(err: CursorError) -> Self {
        AppError::Paging(PagingError::Cursor(err))
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Paging(_) => ErrorKind::Client,
            AppError::Load(err) => err.kind(),
            AppError::Domain(_) => ErrorKind::Client,
            AppError::Store(_) => ErrorKind::Server,
        }
    }

    /// HTTP status the transport should answer with.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Paging(_) => 400,
            AppError::Load(LoadError::Missing { .. }) => 404,
            AppError::Load(LoadError::Fetch(_)) => 500,
            AppError::Domain(DomainError::NotFound { .. }) => 404,
            AppError::Domain(DomainError::NotReviewAuthor { .. }) => 403,
            AppError::Domain(_) => 400,
            AppError::Store(_) => 500,
        }
    }
}
