#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc};

use tracker_organizations::{
    i18n::{DefaultCatalog, Language},
    organization::{Organization, OrganizationDetails, Permission, Summaries, loader::LoaderContext},
    storage::memory::MemoryOrganizationStore,
};

pub const CALLER: &str = "caller";
pub const DOMAIN: &str = "domain-1";

/// Organization with identical English and French details.
pub fn organization(key: &str, name: &str, acronym: &str) -> Organization {
    let details = OrganizationDetails {
        name: name.to_string(),
        acronym: acronym.to_string(),
        slug: name.replace(' ', "-"),
        ..Default::default()
    };
    Organization {
        _id: key.to_string(),
        verified: false,
        super_admin: false,
        summaries: Summaries::default(),
        details: BTreeMap::from([
            ("en".to_string(), details.clone()),
            ("fr".to_string(), details),
        ]),
        domain_count: 0,
    }
}

/// "org one" administrated by the caller and "org two" the caller is a user of, both claiming one domain.
pub fn two_organizations() -> MemoryOrganizationStore {
    MemoryOrganizationStore::new()
        .with_organization(organization("1", "org one", "ONE"))
        .with_organization(organization("2", "org two", "TWO"))
        .with_affiliation(CALLER, "1", Permission::Admin)
        .with_affiliation(CALLER, "2", Permission::User)
        .with_claim("1", DOMAIN)
        .with_claim("2", DOMAIN)
        .with_domain(DOMAIN, "canada.ca")
}

pub fn context(store: &Arc<MemoryOrganizationStore>) -> LoaderContext {
    LoaderContext::new(
        store.clone(),
        Language::En,
        CALLER,
        Arc::new(DefaultCatalog),
    )
}
