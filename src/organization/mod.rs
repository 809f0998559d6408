use std::collections::BTreeMap;

use async_graphql::{ID, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::{
    connection::cursor::{self, EntityType},
    i18n::Language,
    storage::StoreError,
};

pub mod loader;

/// Details of an organization in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationDetails {
    pub name: String,
    pub acronym: String,
    pub slug: String,
    pub zone: String,
    pub sector: String,
    pub country: String,
    pub province: String,
    pub city: String,
}

/// Pass and fail counters of one check category.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(default)]
pub struct SummaryCounts {
    /// Domains passing the checks of the category.
    pub pass: u64,
    /// Domains failing the checks of the category.
    pub fail: u64,
    /// Domains that were checked.
    pub total: u64,
}

/// Aggregated scan results of all domains claimed by an organization.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(default)]
pub struct Summaries {
    /// DMARC, SPF and DKIM results.
    pub mail: SummaryCounts,
    /// HTTPS and SSL results.
    pub web: SummaryCounts,
}

/// Organization as stored in the `organizations` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization key.
    pub _id: String,
    /// Whether the organization was verified by the platform.
    #[serde(default)]
    pub verified: bool,
    /// Marks the reserved organization holding platform wide administrative scope.
    #[serde(default)]
    pub super_admin: bool,
    #[serde(default)]
    pub summaries: Summaries,
    /// Details keyed by language tag.
    #[serde(default)]
    pub details: BTreeMap<String, OrganizationDetails>,
    /// Amount of domains claimed by the organization, filled in by the store.
    #[serde(default)]
    pub domain_count: u64,
}

impl Organization {
    pub fn details(&self, language: Language) -> Option<&OrganizationDetails> {
        self.details.get(language.as_str())
    }

    /// Projects the organization into `language`.
    ///
    /// Fails when the organization has no details in that language.
    pub fn project(&self, language: Language) -> Result<OrganizationNode, StoreError> {
        let details = self
            .details(language)
            .ok_or_else(|| StoreError::MissingDetails {
                key: self._id.clone(),
                language: language.as_str(),
            })?
            .clone();
        Ok(OrganizationNode {
            id: ID(cursor::encode(EntityType::Organization, &self._id)),
            acronym: details.acronym,
            name: details.name,
            slug: details.slug,
            zone: details.zone,
            sector: details.sector,
            country: details.country,
            province: details.province,
            city: details.city,
            verified: self.verified,
            summaries: self.summaries,
            domain_count: self.domain_count,
        })
    }
}

/// An organization in the language of the caller.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "Organization")]
pub struct OrganizationNode {
    /// Global id of the organization.
    pub id: ID,
    pub acronym: String,
    pub name: String,
    pub slug: String,
    /// Government zone, e.g. `FED` or `PROV`.
    pub zone: String,
    pub sector: String,
    pub country: String,
    pub province: String,
    pub city: String,
    /// Whether the organization was verified by the platform.
    pub verified: bool,
    /// Aggregated scan results of the organization's domains.
    pub summaries: Summaries,
    /// Amount of domains claimed by the organization.
    pub domain_count: u64,
}

/// Permission of a user within an organization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    User,
    Admin,
    SuperAdmin,
}

/// Affiliation of a user with an organization, stored in the `affiliations` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub user_key: String,
    pub org_key: String,
    pub permission: Permission,
}

/// Claim of an organization on a domain, stored in the `claims` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub org_key: String,
    pub domain_key: String,
}
