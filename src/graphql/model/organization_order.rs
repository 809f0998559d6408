use async_graphql::InputObject;

use crate::connection::order::{OrderBy, OrderDirection, OrganizationOrderField};

/// Specifies the order of organizations.
#[derive(Debug, Default, Clone, Copy, InputObject)]
pub struct OrganizationOrderInput {
    /// Field that organizations should be ordered by, the organization key if unset.
    pub field: Option<OrganizationOrderField>,
    /// Order direction of organizations.
    pub direction: Option<OrderDirection>,
}

impl From<OrganizationOrderInput> for OrderBy {
    fn from(value: OrganizationOrderInput) -> Self {
        OrderBy::new(value.field, value.direction)
    }
}
