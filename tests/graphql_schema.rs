mod common;

use std::sync::Arc;

use async_graphql::Request;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{CALLER, two_organizations};
use tracker_organizations::{
    authentication::AuthorizedUserHeader,
    connection::cursor::{self, EntityType},
    graphql::{OrganizationSchema, build_schema, schema_sdl},
    i18n::{DefaultCatalog, Language},
    storage::memory::MemoryOrganizationStore,
};

fn schema(store: MemoryOrganizationStore) -> OrganizationSchema {
    build_schema(Arc::new(store), Arc::new(DefaultCatalog))
}

fn as_caller(query: &str) -> Request {
    Request::new(query).data(AuthorizedUserHeader {
        id: CALLER.to_string(),
        language: None,
    })
}

fn error_code(response: &async_graphql::Response) -> Option<async_graphql::Value> {
    response
        .errors
        .first()
        .and_then(|error| error.extensions.as_ref())
        .and_then(|extensions| extensions.get("code"))
        .cloned()
}

#[tokio::test]
async fn find_my_organizations_returns_a_relay_connection() {
    let response = schema(two_organizations())
        .execute(as_caller(
            "{ findMyOrganizations(first: 1) {
                totalCount
                edges { cursor node { name acronym domainCount } }
                pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
            } }",
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let org_one = cursor::encode(EntityType::Organization, "1");
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "findMyOrganizations": {
                "totalCount": 2,
                "edges": [
                    { "cursor": org_one, "node": { "name": "org one", "acronym": "ONE", "domainCount": 1 } }
                ],
                "pageInfo": {
                    "hasNextPage": true,
                    "hasPreviousPage": false,
                    "startCursor": org_one,
                    "endCursor": org_one
                }
            }
        })
    );
}

#[tokio::test]
async fn page_size_errors_are_localized_and_coded() {
    let request = as_caller("{ findMyOrganizations(first: 101) { totalCount } }").data(Language::Fr);
    let response = schema(two_organizations()).execute(request).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.errors[0].message,
        "La demande de `101` enregistrements sur la connexion `Organization` dépasse la limite `first` de 100 enregistrements."
    );
    assert_eq!(
        error_code(&response),
        Some(async_graphql::Value::from("ARGUMENT_RANGE"))
    );
}

#[tokio::test]
async fn page_size_is_validated_before_the_store_is_queried() {
    let store = Arc::new(two_organizations().failing("socket closed"));
    let schema = build_schema(store.clone(), Arc::new(DefaultCatalog));
    let response = schema
        .execute(as_caller("{ findMyOrganizations(first: 101) { totalCount } }"))
        .await;
    assert_eq!(
        error_code(&response),
        Some(async_graphql::Value::from("ARGUMENT_RANGE"))
    );
    assert_eq!(store.calls(), 0);

    let response = schema
        .execute(as_caller(
            r#"{ findDomainByDomain(domain: "canada.ca") { domain } }"#,
        ))
        .await;
    assert_eq!(error_code(&response), Some(async_graphql::Value::from("STORAGE")));
}

#[tokio::test]
async fn affiliations_are_fetched_once_per_connection() {
    let store = Arc::new(two_organizations());
    let schema = build_schema(store.clone(), Arc::new(DefaultCatalog));
    let response = schema
        .execute(as_caller("{ findMyOrganizations(first: 5) { totalCount } }"))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn missing_page_size_is_rejected() {
    let response = schema(two_organizations())
        .execute(as_caller("{ findMyOrganizations { totalCount } }"))
        .await;
    assert_eq!(
        response.errors[0].message,
        "You must provide a `first` or `last` value to properly paginate the `Organization` connection."
    );
    assert_eq!(
        error_code(&response),
        Some(async_graphql::Value::from("ARGUMENT_SHAPE"))
    );
}

#[tokio::test]
async fn anonymous_requests_are_rejected() {
    let response = schema(two_organizations())
        .execute(Request::new("{ findMyOrganizations(first: 5) { totalCount } }"))
        .await;
    assert_eq!(
        response.errors[0].message,
        "Authentication error. Please sign in."
    );
    assert_eq!(
        error_code(&response),
        Some(async_graphql::Value::from("UNAUTHENTICATED"))
    );
}

#[tokio::test]
async fn storage_failures_hide_their_cause() {
    let response = schema(two_organizations().failing("socket closed"))
        .execute(as_caller("{ findMyOrganizations(first: 5) { totalCount } }"))
        .await;
    assert_eq!(
        response.errors[0].message,
        "Unable to load organization(s). Please try again."
    );
    assert_eq!(error_code(&response), Some(async_graphql::Value::from("STORAGE")));
}

#[tokio::test]
async fn domain_lists_its_claimants() {
    let response = schema(two_organizations())
        .execute(as_caller(
            r#"{ findDomainByDomain(domain: " Canada.ca ") {
                domain
                organizations(first: 5, search: "two") { totalCount edges { node { name } } }
            } }"#,
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "findDomainByDomain": {
                "domain": "canada.ca",
                "organizations": {
                    "totalCount": 1,
                    "edges": [{ "node": { "name": "org two" } }]
                }
            }
        })
    );
}

#[tokio::test]
async fn unknown_domains_are_reported() {
    let response = schema(two_organizations())
        .execute(as_caller(r#"{ findDomainByDomain(domain: "unknown.ca") { domain } }"#))
        .await;
    assert_eq!(
        response.errors[0].message,
        "Unable to find domain. Please try again."
    );
    assert_eq!(error_code(&response), Some(async_graphql::Value::from("NOT_FOUND")));
}

#[test]
fn exported_schema_contains_the_connection_types() {
    let sdl = schema_sdl();
    assert!(sdl.contains("type OrganizationConnection"));
    assert!(sdl.contains("findMyOrganizations("));
    assert!(sdl.contains("enum OrganizationOrderField"));
}
