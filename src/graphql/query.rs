use async_graphql::{Context, Object, Result};
use log::error;
use serde_json::Value;

use super::{
    loader_context, localized_error,
    model::{
        connection::organization_connection::OrganizationConnection,
        organization_order::OrganizationOrderInput,
    },
};
use crate::{
    connection::search::cleanse_input,
    domain::Domain,
    error::ErrorKind,
    i18n::Message,
    organization::loader::{OrgConnectionsByUserId, OrganizationConnectionArgs},
};

/// Describes GraphQL organization queries.
pub struct Query;

#[Object]
impl Query {
    /// Select organizations a user has access to.
    #[allow(clippy::too_many_arguments)]
    async fn find_my_organizations<'a>(
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
        let loader = OrgConnectionsByUserId::new(context.clone());
        match loader.load(args).await {
            Ok(connection) => Ok(connection.into()),
            Err(connection_error) => Err(context.localize(connection_error)),
        }
    }

    /// Retrieves a domain by its domain name.
    async fn find_domain_by_domain<'a>(
        &self,
        ctx: &Context<'a>,
        #[graphql(desc = "Domain name of the domain to retrieve.")] domain: String,
    ) -> Result<Domain> {
        let context = loader_context(ctx)?;
        let domain = cleanse_input(&domain).to_lowercase();
        match context.store.find_domain(&domain).await {
            Ok(Some(found)) => Ok(found),
            Ok(None) => Err(localized_error(ctx, Message::DomainNotFound, "NOT_FOUND")),
            Err(source) => {
                error!(
                    "Database error occurred while user: {} was trying to find domain: {}, error: {}",
                    context.caller_key, domain, source
                );
                Err(localized_error(
                    ctx,
                    Message::DomainNotFound,
                    ErrorKind::Storage.as_str(),
                ))
            }
        }
    }
}
