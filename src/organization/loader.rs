//! Connection loaders returning the organizations visible to a caller.

use std::sync::Arc;

use log::error;
use serde_json::Value;

use super::{Organization, OrganizationNode};
use crate::{
    connection::{
        Connection,
        arguments::{Audit, validate_page_limit},
        assembler::assemble,
        cursor::EntityType,
        order::OrderBy,
        search::{InputSanitizer, SearchFilter, cleanse_input},
        visibility::{VisibilityFlags, build_visibility_filter, is_super_admin},
        window::window,
    },
    error::ConnectionError,
    i18n::{Language, MessageCatalog},
    storage::{OrganizationQuery, OrganizationStore, StoreResult},
};

/// GraphQL type name of the nodes of organization connections.
pub const CONNECTION: &str = "Organization";

const BY_USER_ID: &str = "loadOrgConnectionsByUserId";
const BY_DOMAIN_ID: &str = "loadOrgConnectionsByDomainId";

/// Request scoped dependencies of the organization loaders.
#[derive(Clone)]
pub struct LoaderContext {
    pub store: Arc<dyn OrganizationStore>,
    /// Language organization details are projected into.
    pub language: Language,
    /// Key of the calling user.
    pub caller_key: String,
    pub sanitizer: InputSanitizer,
    pub catalog: Arc<dyn MessageCatalog>,
}

impl LoaderContext {
    /// Creates a context that sanitizes search input with [`cleanse_input`].
    pub fn new(
        store: Arc<dyn OrganizationStore>,
        language: Language,
        caller_key: impl Into<String>,
        catalog: Arc<dyn MessageCatalog>,
    ) -> Self {
        Self {
            store,
            language,
            caller_key: caller_key.into(),
            sanitizer: cleanse_input,
            catalog,
        }
    }

    /// Localizes a loader failure for the caller of this context.
    pub fn localize(&self, error: ConnectionError) -> async_graphql::Error {
        error.into_graphql_error(self.catalog.as_ref(), self.language)
    }
}

/// Arguments of an organization connection.
///
/// `first` and `last` are kept raw, their shape, type and range are validated by the loaders.
#[derive(Debug, Clone, Default)]
pub struct OrganizationConnectionArgs {
    pub first: Option<Value>,
    pub last: Option<Value>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub order_by: OrderBy,
    pub search: Option<String>,
    /// Derived from the caller's affiliations when unset.
    pub is_super_admin: Option<bool>,
    pub is_admin: bool,
    /// Defaults to `true` when unset.
    pub include_super_admin_org: Option<bool>,
    pub is_verified: bool,
}

impl OrganizationConnectionArgs {
    fn visibility_flags(&self, is_super_admin: bool) -> VisibilityFlags {
        VisibilityFlags {
            is_super_admin,
            is_admin: self.is_admin,
            include_super_admin_org: self.include_super_admin_org.unwrap_or(true),
            is_verified: self.is_verified,
        }
    }
}

/// Loads the organizations the caller is affiliated with.
pub struct OrgConnectionsByUserId {
    context: LoaderContext,
}

impl OrgConnectionsByUserId {
    pub fn new(context: LoaderContext) -> Self {
        Self { context }
    }

    /// Loads one page of the caller's organizations.
    pub async fn load(
        &self,
        args: OrganizationConnectionArgs,
    ) -> Result<Connection<OrganizationNode>, ConnectionError> {
        load_connection(&self.context, BY_USER_ID, None, args).await
    }
}

/// Loads the organizations claiming a domain.
pub struct OrgConnectionsByDomainId {
    context: LoaderContext,
}

impl OrgConnectionsByDomainId {
    pub fn new(context: LoaderContext) -> Self {
        Self { context }
    }

    /// Loads one page of the claimants of a domain that are visible to the caller.
    ///
    /// * `domain_key` - Key of the domain the connection is scoped to.
    /// * `args` - Connection arguments.
    pub async fn load(
        &self,
        domain_key: &str,
        args: OrganizationConnectionArgs,
    ) -> Result<Connection<OrganizationNode>, ConnectionError> {
        load_connection(&self.context, BY_DOMAIN_ID, Some(domain_key), args).await
    }
}

/// Validates, queries, windows and assembles one page of organizations.
///
/// Arguments are validated before the store is touched.
/// Store and projection failures are logged once and surface as [`ConnectionError::Storage`].
async fn load_connection(
    context: &LoaderContext,
    operation: &'static str,
    domain_key: Option<&str>,
    args: OrganizationConnectionArgs,
) -> Result<Connection<OrganizationNode>, ConnectionError> {
    let audit = Audit {
        caller: &context.caller_key,
        operation,
        connection: CONNECTION,
    };
    let limit = validate_page_limit(args.first.as_ref(), args.last.as_ref(), &audit)?;

    let storage_error = |source| {
        let error = ConnectionError::Storage {
            caller: context.caller_key.clone(),
            operation,
            source,
        };
        error!("{}", error);
        error
    };

    let organizations = find_visible_organizations(context, domain_key, &args)
        .await
        .map_err(storage_error)?;
    let page = window(
        &organizations,
        organization_key,
        EntityType::Organization,
        args.after.as_deref(),
        args.before.as_deref(),
        limit,
    );
    assemble(
        &organizations,
        &page,
        organization_key,
        EntityType::Organization,
        |organization| organization.project(context.language),
    )
    .map_err(storage_error)
}

/// Full filtered and sorted result set of a connection.
async fn find_visible_organizations(
    context: &LoaderContext,
    domain_key: Option<&str>,
    args: &OrganizationConnectionArgs,
) -> StoreResult<Vec<Organization>> {
    let (affiliations, super_admin) = if args.is_super_admin == Some(true) {
        (Vec::new(), true)
    } else {
        let affiliations = context.store.affiliations_of(&context.caller_key).await?;
        let super_admin = args
            .is_super_admin
            .unwrap_or_else(|| is_super_admin(&affiliations));
        (affiliations, super_admin)
    };
    let flags = args.visibility_flags(super_admin);
    let claimants = match domain_key {
        Some(domain_key) => Some(context.store.claimants_of(domain_key).await?),
        None => None,
    };
    let query = OrganizationQuery {
        visibility: build_visibility_filter(&affiliations, claimants.as_deref(), flags),
        search: SearchFilter::new(args.search.as_deref(), context.sanitizer),
        order_by: args.order_by,
        language: context.language,
    };
    context.store.find_organizations(&query).await
}

fn organization_key(organization: &Organization) -> &str {
    &organization._id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        i18n::DefaultCatalog,
        organization::{Permission, tests::organization},
        storage::memory::MemoryOrganizationStore,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context(store: Arc<MemoryOrganizationStore>) -> LoaderContext {
        LoaderContext::new(store, Language::En, "caller", Arc::new(DefaultCatalog))
    }

    fn store() -> MemoryOrganizationStore {
        MemoryOrganizationStore::new()
            .with_organization(organization("1", "org one", "ONE"))
            .with_organization(organization("2", "org two", "TWO"))
            .with_affiliation("caller", "1", Permission::Admin)
            .with_affiliation("caller", "2", Permission::User)
    }

    #[tokio::test]
    async fn validation_runs_before_the_store_is_queried() {
        let store = Arc::new(store());
        let loader = OrgConnectionsByUserId::new(context(store.clone()));
        let error = loader
            .load(OrganizationConnectionArgs {
                first: Some(json!(1)),
                last: Some(json!(1)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentShape);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn super_admins_skip_the_affiliation_lookup() {
        let store = Arc::new(store().with_organization(organization("3", "org three", "THREE")));
        let loader = OrgConnectionsByUserId::new(context(store.clone()));
        let connection = loader
            .load(OrganizationConnectionArgs {
                first: Some(json!(10)),
                is_super_admin: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(connection.total_count, 3);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn super_admin_permission_is_derived_from_fetched_affiliations() {
        let store = Arc::new(
            store()
                .with_organization(organization("3", "org three", "THREE"))
                .with_affiliation("caller", "sa", Permission::SuperAdmin),
        );
        let connection = OrgConnectionsByUserId::new(context(store.clone()))
            .load(OrganizationConnectionArgs {
                first: Some(json!(10)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(connection.total_count, 3);
        // One affiliation lookup and one organization query.
        assert_eq!(store.calls(), 2);

        let connection = OrgConnectionsByUserId::new(context(store))
            .load(OrganizationConnectionArgs {
                first: Some(json!(10)),
                is_super_admin: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(connection.total_count, 2);
    }

    #[tokio::test]
    async fn missing_details_fail_the_whole_page() {
        let mut english_only = organization("3", "org three", "THREE");
        english_only.details.remove("fr");
        let store = Arc::new(
            store()
                .with_organization(english_only)
                .with_affiliation("caller", "3", Permission::User),
        );
        let mut context = context(store);
        context.language = Language::Fr;
        let error = OrgConnectionsByUserId::new(context)
            .load(OrganizationConnectionArgs {
                first: Some(json!(10)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Storage);
        assert_eq!(
            error.user_message(&DefaultCatalog, Language::Fr),
            "Impossible de charger l'organisation (s). Veuillez réessayer."
        );
    }
}
