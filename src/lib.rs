// Gather - API Core
//
// This crate provides the backend core for a meetup platform: meetings,
// participation, and post-meeting reviews. Listings page in two modes
// (positional and cursor) and relationship fields resolve through batched
// per-request loaders.
//
// Transports (HTTP, GraphQL) live outside this crate and talk to it through
// RequestContext.

pub mod common;
pub mod context;
pub mod domains;
pub mod error;
pub mod loader;
pub mod store;

pub use context::{Loaders, RequestContext};
pub use error::{AppError, ErrorKind};
