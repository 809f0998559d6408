//! Storage query executor consumed by the connection loaders.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    connection::{order::OrderBy, search::SearchFilter, visibility::VisibilityFilter},
    domain::Domain,
    i18n::Language,
    organization::{Affiliation, Organization},
};

pub mod memory;
pub mod mongo;

/// Failure raised by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB operation failed: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("Document could not be decoded: {0}")]
    Decode(#[from] bson::de::Error),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Organization `{key}` has no details in language `{language}`.")]
    MissingDetails { key: String, language: &'static str },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Composed filter, search and ordering of one organization connection.
#[derive(Debug, Clone)]
pub struct OrganizationQuery {
    pub visibility: VisibilityFilter,
    pub search: SearchFilter,
    pub order_by: OrderBy,
    /// Language that search and localized ordering apply to.
    pub language: Language,
}

/// Read access to organizations and the edges that decide their visibility.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Affiliations of a user.
    async fn affiliations_of(&self, user_key: &str) -> StoreResult<Vec<Affiliation>>;

    /// Keys of the organizations claiming a domain.
    async fn claimants_of(&self, domain_key: &str) -> StoreResult<Vec<String>>;

    /// All organizations matching `query`, ordered by `query.order_by`, with `domain_count` filled in.
    async fn find_organizations(&self, query: &OrganizationQuery) -> StoreResult<Vec<Organization>>;

    /// Domain of a specific domain name.
    async fn find_domain(&self, domain: &str) -> StoreResult<Option<Domain>>;
}
