// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod pagination;

pub use entity_ids::*;
pub use id::{ExternalId, Id};
pub use pagination::{
    build_connection, trim_lookahead, Connection, Cursor, Edge, EntityKind, FetchDirective,
    PageDescriptor, PageInfo, PageRequest, MAX_PAGE_SIZE,
};
