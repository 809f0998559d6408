use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{OrganizationQuery, OrganizationStore, StoreError, StoreResult};
use crate::{
    domain::Domain,
    organization::{Affiliation, Claim, Organization, Permission},
};

/// Store keeping all documents in memory.
///
/// Evaluates queries with the same semantics as the MongoDB store, which makes it the
/// reference the loaders are tested against.
#[derive(Debug, Default)]
pub struct MemoryOrganizationStore {
    organizations: Vec<Organization>,
    affiliations: Vec<Affiliation>,
    claims: Vec<Claim>,
    domains: Vec<Domain>,
    /// Message of the error every operation fails with, if set.
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MemoryOrganizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an organization, insertion order does not influence query results.
    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organizations.push(organization);
        self
    }

    pub fn with_affiliation(mut self, user_key: &str, org_key: &str, permission: Permission) -> Self {
        self.affiliations.push(Affiliation {
            user_key: user_key.to_string(),
            org_key: org_key.to_string(),
            permission,
        });
        self
    }

    pub fn with_claim(mut self, org_key: &str, domain_key: &str) -> Self {
        self.claims.push(Claim {
            org_key: org_key.to_string(),
            domain_key: domain_key.to_string(),
        });
        self
    }

    pub fn with_domain(mut self, key: &str, domain: &str) -> Self {
        self.domains.push(Domain {
            _id: key.to_string(),
            domain: domain.to_string(),
        });
        self
    }

    /// Makes every operation fail with a query error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Amount of operations that were executed against the store.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(StoreError::Query(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrganizationStore {
    async fn affiliations_of(&self, user_key: &str) -> StoreResult<Vec<Affiliation>> {
        self.begin()?;
        Ok(self
            .affiliations
            .iter()
            .filter(|affiliation| affiliation.user_key == user_key)
            .cloned()
            .collect())
    }

    async fn claimants_of(&self, domain_key: &str) -> StoreResult<Vec<String>> {
        self.begin()?;
        Ok(self
            .claims
            .iter()
            .filter(|claim| claim.domain_key == domain_key)
            .map(|claim| claim.org_key.clone())
            .collect())
    }

    async fn find_organizations(&self, query: &OrganizationQuery) -> StoreResult<Vec<Organization>> {
        self.begin()?;
        let mut organizations: Vec<Organization> = self
            .organizations
            .iter()
            .filter(|organization| query.visibility.admits(organization))
            .filter(|organization| query.search.matches(organization, query.language))
            .cloned()
            .map(|mut organization| {
                organization.domain_count = self
                    .claims
                    .iter()
                    .filter(|claim| claim.org_key == organization._id)
                    .count() as u64;
                organization
            })
            .collect();
        query.order_by.sort(&mut organizations, query.language);
        Ok(organizations)
    }

    async fn find_domain(&self, domain: &str) -> StoreResult<Option<Domain>> {
        self.begin()?;
        Ok(self
            .domains
            .iter()
            .find(|candidate| candidate.domain == domain)
            .cloned())
    }
}
