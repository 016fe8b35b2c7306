// 📄 Connections - Relay pagination over an in-memory slice
//
// Cursors are base64("arrayconnection:<offset>"), a pure function of the
// position in the underlying slice. `after`/`before` bound the window first,
// then `first`/`last` trim it.

use async_graphql::SimpleObject;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

const CURSOR_PREFIX: &str = "arrayconnection:";

// ============================================================================
// ARGUMENTS & ERRORS
// ============================================================================

/// Standard connection arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl ConnectionArgs {
    pub fn first(n: i32) -> Self {
        ConnectionArgs {
            first: Some(n),
            ..Default::default()
        }
    }

    pub fn last(n: i32) -> Self {
        ConnectionArgs {
            last: Some(n),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    NegativeFirst(i32),
    NegativeLast(i32),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::NegativeFirst(n) => {
                write!(f, "Argument \"first\" must be a non-negative integer, got {}", n)
            }
            ConnectionError::NegativeLast(n) => {
                write!(f, "Argument \"last\" must be a non-negative integer, got {}", n)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

// ============================================================================
// CURSORS
// ============================================================================

pub fn offset_to_cursor(offset: i64) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

/// Offset encoded in a cursor, or None when the cursor is not one of ours
pub fn cursor_to_offset(cursor: &str) -> Option<i64> {
    let bytes = STANDARD.decode(cursor).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.strip_prefix(CURSOR_PREFIX)?.parse().ok()
}

fn offset_with_default(cursor: Option<&str>, default: i64) -> i64 {
    cursor.and_then(cursor_to_offset).unwrap_or(default)
}

// ============================================================================
// CONNECTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// Information about pagination in a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, SimpleObject)]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// When paginating backwards, are there more items?
    pub has_previous_page: bool,
    /// When paginating backwards, the cursor to continue.
    pub start_cursor: Option<String>,
    /// When paginating forwards, the cursor to continue.
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Window `items` according to `args`.
pub fn connection_from_slice<T: Clone>(items: &[T], args: &ConnectionArgs) -> Result<Connection<T>, ConnectionError> {
    let length = items.len() as i64;

    let before_offset = offset_with_default(args.before.as_deref(), length);
    let after_offset = offset_with_default(args.after.as_deref(), -1);

    let mut start_offset = after_offset.max(-1) + 1;
    let mut end_offset = before_offset.min(length);

    if let Some(first) = args.first {
        if first < 0 {
            return Err(ConnectionError::NegativeFirst(first));
        }
        end_offset = end_offset.min(start_offset + i64::from(first));
    }
    if let Some(last) = args.last {
        if last < 0 {
            return Err(ConnectionError::NegativeLast(last));
        }
        start_offset = start_offset.max(end_offset - i64::from(last));
    }

    let lo = start_offset.clamp(0, length) as usize;
    let hi = end_offset.clamp(0, length) as usize;
    let window: &[T] = if lo < hi { &items[lo..hi] } else { &[] };

    let edges: Vec<Edge<T>> = window
        .iter()
        .enumerate()
        .map(|(i, node)| Edge {
            node: node.clone(),
            cursor: offset_to_cursor(start_offset + i as i64),
        })
        .collect();

    let lower_bound = if args.after.is_some() { after_offset + 1 } else { 0 };
    let upper_bound = if args.before.is_some() { before_offset } else { length };

    let page_info = PageInfo {
        has_next_page: args.first.is_some() && end_offset < upper_bound,
        has_previous_page: args.last.is_some() && start_offset > lower_bound,
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Ok(Connection { edges, page_info })
}
