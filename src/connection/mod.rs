//! Relay connection engine: argument validation, cursors, filtering, ordering and windowing.

use async_graphql::SimpleObject;

pub mod arguments;
pub mod assembler;
pub mod cursor;
pub mod order;
pub mod search;
pub mod visibility;
pub mod window;

/// A node of a connection together with its cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<Node> {
    pub cursor: String,
    pub node: Node,
}

/// Information about the page of a connection.
///
/// Cursors are empty strings, never null, when the page has no edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, SimpleObject)]
pub struct PageInfo {
    /// Whether elements exist after the page.
    pub has_next_page: bool,
    /// Whether elements exist before the page.
    pub has_previous_page: bool,
    /// Cursor of the first edge of the page.
    pub start_cursor: String,
    /// Cursor of the last edge of the page.
    pub end_cursor: String,
}

/// A page of a relay connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<Node> {
    /// The edges of the page.
    pub edges: Vec<Edge<Node>>,
    pub page_info: PageInfo,
    /// The total amount of items in this connection, regardless of pagination.
    pub total_count: u64,
}
