use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    connection::cursor::{self, EntityType},
    graphql::{
        loader_context,
        model::{
            connection::organization_connection::OrganizationConnection,
            organization_order::OrganizationOrderInput,
        },
    },
    organization::loader::{OrgConnectionsByDomainId, OrganizationConnectionArgs},
};

/// Domain monitored by the tracker, stored in the `domains` collection.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Domain {
    /// Domain key.
    #[graphql(skip)]
    pub _id: String,
    /// Domain name, e.g. `canada.ca`.
    pub domain: String,
}

#[ComplexObject]
impl Domain {
    /// Global id of the domain.
    async fn id(&self) -> ID {
        ID(cursor::encode(EntityType::Domain, &self._id))
    }

    /// Retrieves the organizations claiming this domain that the user may see.
    #[allow(clippy::too_many_arguments)]
    async fn organizations<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "Returns the first `n` organizations of the list.")] first: Option<i32>,
        #[graphql(desc = "Returns the last `n` organizations of the list.")] last: Option<i32>,
        #[graphql(desc = "Returns organizations after this cursor.")] after: Option<String>,
        #[graphql(desc = "Returns organizations before this cursor.")] before: Option<String>,
        #[graphql(desc = "Ordering options for the returned organizations.")] order_by: Option<
            OrganizationOrderInput,
        >,
        #[graphql(desc = "Filters organizations by name or acronym.")] search: Option<String>,
        #[graphql(desc = "Only organizations the user administrates.")] is_admin: Option<bool>,
        #[graphql(desc = "Whether the super admin organization may be returned.")]
        include_super_admin_org: Option<bool>,
        #[graphql(desc = "Only verified organizations.")] is_verified: Option<bool>,
    ) -> Result<OrganizationConnection> {
        let context = loader_context(ctx)?;
        let args = OrganizationConnectionArgs {
            first: first.map(Value::from),
            last: last.map(Value::from),
            before,
            after,
            order_by: order_by.unwrap_or_default().into(),
            search,
            is_super_admin: None,
            is_admin: is_admin.unwrap_or_default(),
            include_super_admin_org,
            is_verified: is_verified.unwrap_or_default(),
        };
        let loader = OrgConnectionsByDomainId::new(context.clone());
        match loader.load(&self._id, args).await {
            Ok(connection) => Ok(connection.into()),
            Err(connection_error) => Err(context.localize(connection_error)),
        }
    }
}
