use async_graphql::SimpleObject;

use crate::{
    connection::{Connection, Edge, PageInfo},
    organization::OrganizationNode,
};

/// An organization together with its cursor.
#[derive(Debug, Clone, SimpleObject)]
pub struct OrganizationEdge {
    /// Opaque cursor of the organization.
    pub cursor: String,
    pub node: OrganizationNode,
}

/// A connection of Organizations.
#[derive(Debug, Clone, SimpleObject)]
pub struct OrganizationConnection {
    /// The resulting edges.
    pub edges: Vec<OrganizationEdge>,
    /// Information to aid in pagination.
    pub page_info: PageInfo,
    /// The total amount of organizations in this connection, regardless of pagination.
    pub total_count: u64,
}

impl From<Edge<OrganizationNode>> for OrganizationEdge {
    fn from(value: Edge<OrganizationNode>) -> Self {
        Self {
            cursor: value.cursor,
            node: value.node,
        }
    }
}

/// Implementation of conversion from Connection<OrganizationNode> to OrganizationConnection.
///
/// Prevents GraphQL naming conflicts.
impl From<Connection<OrganizationNode>> for OrganizationConnection {
    fn from(value: Connection<OrganizationNode>) -> Self {
        Self {
            edges: value.edges.into_iter().map(OrganizationEdge::from).collect(),
            page_info: value.page_info,
            total_count: value.total_count,
        }
    }
}
