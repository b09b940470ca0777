//! Dual-mode pagination and relay-style connection building.
//!
//! Listings accept either offset arguments (`pageNum`/`pageSize`) or cursor
//! arguments (`first`/`after`). [`PageRequest::resolve`] normalizes the raw
//! arguments into a [`PageDescriptor`], stores receive a [`FetchDirective`]
//! that already includes the lookahead row, and [`build_connection`] turns
//! the fetched rows into a [`Connection`] with `totalCount`, `pageInfo`, and
//! edges.
//!
//! # Usage
//!
//! ```rust,ignore
//! // In a listing resolver
//! let request = PageRequest::cursor(10, after);
//! let descriptor = request.resolve()?;
//!
//! // In the store
//! let rows = store.reviews_page(&filter, descriptor.directive()).await?;
//!
//! // Build connection
//! let connection = build_connection(rows, &descriptor, EntityKind::Review, |r| r.id.into());
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use std::fmt;

use crate::error::{CursorError, PagingError};

/// Largest page a caller may request in either mode.
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Entity kind
// ============================================================================

/// Entity tag embedded in cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Meeting,
    Review,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Meeting => "meeting",
            EntityKind::Review => "review",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Opaque cursor for pagination (base64-encoded `id:kind` pair).
///
/// Primary keys are auto-increment, so ordering by id is stable. The kind
/// segment is carried for debuggability; decoding checks that it is present
/// but does not match it against the caller's entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    id: i64,
    kind: String,
}

impl Cursor {
    /// Create a cursor for an entity id.
    pub fn new(id: i64, kind: EntityKind) -> Self {
        Cursor {
            id,
            kind: kind.as_str().to_string(),
        }
    }

    /// Encode the cursor as a base64 string.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}:{}", self.id, self.kind))
    }

    /// Encode an id directly to a cursor string.
    pub fn encode_id(id: impl Into<i64>, kind: EntityKind) -> String {
        Cursor::new(id.into(), kind).encode()
    }

    /// Decode a cursor string back to a Cursor.
    pub fn decode(s: &str) -> Result<Self, CursorError> {
        if s.is_empty() {
            return Err(CursorError::Empty);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|_| CursorError::InvalidEncoding)?;
        let payload = String::from_utf8(bytes).map_err(|_| CursorError::InvalidPayload)?;
        let mut segments = payload.splitn(2, ':');
        let id_segment = segments.next().unwrap_or_default();
        let kind = segments.next().ok_or(CursorError::MissingSegments)?;
        let id = id_segment
            .parse::<i64>()
            .map_err(|_| CursorError::InvalidId(id_segment.to_string()))?;
        Ok(Cursor {
            id,
            kind: kind.to_string(),
        })
    }

    /// The entity id the cursor points at.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The decoded kind tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

// ============================================================================
// Page request & descriptor
// ============================================================================

/// Raw paging arguments as the transport hands them over.
///
/// Callers fill either the offset pair or the cursor pair; [`Self::resolve`]
/// rejects mixtures. An empty-string `after` counts as absent, matching how
/// web frameworks surface omitted query parameters.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// 1-based page number (offset mode).
    pub page_num: Option<i32>,
    /// Rows per page (offset mode).
    pub page_size: Option<i32>,
    /// Number of rows to return (cursor mode).
    pub first: Option<i32>,
    /// Encoded cursor to continue after (cursor mode).
    pub after: Option<String>,
}

impl PageRequest {
    /// Create offset-mode arguments.
    pub fn offset(page_num: i32, page_size: i32) -> Self {
        PageRequest {
            page_num: Some(page_num),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    /// Create cursor-mode arguments.
    pub fn cursor(first: i32, after: Option<String>) -> Self {
        PageRequest {
            first: Some(first),
            after,
            ..Default::default()
        }
    }

    /// Normalize and validate the arguments into exactly one paging mode.
    ///
    /// Cursor fields take the mode decision: `first` defaults to 1 when only
    /// `after` is given. Offset mode needs both of its fields. Mixing the two
    /// modes or supplying neither is rejected before any fetch happens.
    pub fn resolve(&self) -> Result<PageDescriptor, PagingError> {
        let after = self.after.as_deref().filter(|s| !s.is_empty());
        let cursor_mode = self.first.is_some() || after.is_some();
        let offset_mode = self.page_num.is_some() || self.page_size.is_some();

        if cursor_mode && offset_mode {
            return Err(PagingError::MixedModes);
        }

        if cursor_mode {
            let first = i64::from(self.first.unwrap_or(1));
            if first < 1 {
                return Err(PagingError::NonPositive { field: "first" });
            }
            let after = after.map(Cursor::decode).transpose()?.map(|c| c.id());
            return Ok(PageDescriptor::Cursor {
                first: first.min(MAX_PAGE_SIZE),
                after,
            });
        }

        match (self.page_num, self.page_size) {
            (Some(num), Some(size)) => {
                if num < 1 {
                    return Err(PagingError::NonPositive { field: "pageNum" });
                }
                if size < 1 {
                    return Err(PagingError::NonPositive { field: "pageSize" });
                }
                Ok(PageDescriptor::Offset {
                    page_num: i64::from(num),
                    page_size: i64::from(size).min(MAX_PAGE_SIZE),
                })
            }
            (None, None) => Err(PagingError::MissingMode),
            _ => Err(PagingError::IncompleteOffset),
        }
    }
}

/// A validated page request: exactly one paging mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDescriptor {
    /// Positional paging: 1-based page number and page length.
    Offset { page_num: i64, page_size: i64 },
    /// Cursor paging: row count plus the id decoded from `after`, if any.
    Cursor { first: i64, after: Option<i64> },
}

impl PageDescriptor {
    /// Number of rows the caller asked for.
    pub fn requested(&self) -> i64 {
        match self {
            PageDescriptor::Offset { page_size, .. } => *page_size,
            PageDescriptor::Cursor { first, .. } => *first,
        }
    }

    /// Rows to fetch: requested plus one lookahead row for `hasNextPage`.
    pub fn fetch_limit(&self) -> i64 {
        self.requested() + 1
    }

    /// Derive the store-facing fetch directive.
    ///
    /// Both modes include the lookahead row in `limit`. A cursor request
    /// without `after` starts from the newest row (`before: None`).
    pub fn directive(&self) -> FetchDirective {
        match self {
            PageDescriptor::Offset { page_num, page_size } => FetchDirective::Offset {
                offset: (page_num - 1) * page_size,
                limit: self.fetch_limit(),
            },
            PageDescriptor::Cursor { after, .. } => FetchDirective::Before {
                before: *after,
                limit: self.fetch_limit(),
            },
        }
    }
}

/// Bounded fetch instructions handed to a store.
///
/// `limit` already includes the lookahead row. `Offset` scans run in
/// insertion order; `Before` scans run id-descending, strictly below
/// `before` when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirective {
    Offset { offset: i64, limit: i64 },
    Before { before: Option<i64>, limit: i64 },
}

// ============================================================================
// Connection types
// ============================================================================

/// Page information for a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more rows exist past this page.
    pub has_next_page: bool,
    /// Cursor of the last edge, absent for an empty page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Page info for a page with no rows.
    pub fn empty() -> Self {
        PageInfo {
            has_next_page: false,
            end_cursor: None,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::empty()
    }
}

/// One row of a connection: the entity plus its resume cursor.
#[derive(Debug, Clone, Serialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// Relay-style page of rows.
///
/// `total_count` is the number of rows in this page, not in the dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub total_count: i32,
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Connection for an empty page.
    pub fn empty() -> Self {
        Connection {
            total_count: 0,
            page_info: PageInfo::empty(),
            edges: Vec::new(),
        }
    }

    /// Convenience: the page's entities without their cursors.
    pub fn nodes(&self) -> Vec<&T> {
        self.edges.iter().map(|e| &e.node).collect()
    }
}

// ============================================================================
// Connection builder
// ============================================================================

/// Trim the lookahead row and determine whether more rows exist.
///
/// Stores return up to `requested + 1` rows; anything past `requested` only
/// signals that the next page is non-empty.
pub fn trim_lookahead<T>(rows: Vec<T>, requested: i64) -> (Vec<T>, bool) {
    let has_more = rows.len() as i64 > requested;
    let rows = if has_more {
        rows.into_iter().take(requested as usize).collect()
    } else {
        rows
    };
    (rows, has_more)
}

/// Assemble a connection from fetched rows.
///
/// Rows must arrive in fetch order; the builder never re-sorts. `id_of`
/// projects the primary key each edge's cursor encodes.
pub fn build_connection<T>(
    rows: Vec<T>,
    descriptor: &PageDescriptor,
    kind: EntityKind,
    id_of: impl Fn(&T) -> i64,
) -> Connection<T> {
    let (rows, has_more) = trim_lookahead(rows, descriptor.requested());
    if rows.is_empty() {
        return Connection::empty();
    }

    let edges: Vec<Edge<T>> = rows
        .into_iter()
        .map(|node| {
            let cursor = Cursor::encode_id(id_of(&node), kind);
            Edge { node, cursor }
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: has_more,
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Connection {
        total_count: edges.len() as i32,
        page_info,
        edges,
    }
}
