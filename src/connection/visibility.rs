use std::collections::BTreeSet;

use bson::{Document, doc};

use crate::organization::{Affiliation, Organization, Permission};

/// Flags of a connection request that influence which organizations are visible.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VisibilityFlags {
    /// Caller is a super admin, affiliations are not checked.
    pub is_super_admin: bool,
    /// Only organizations the caller administrates.
    pub is_admin: bool,
    /// Whether the reserved super admin organization may be part of the result.
    pub include_super_admin_org: bool,
    /// Only verified organizations.
    pub is_verified: bool,
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self {
            is_super_admin: false,
            is_admin: false,
            include_super_admin_org: true,
            is_verified: false,
        }
    }
}

/// Set of organization keys a query is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyScope {
    All,
    Only(BTreeSet<String>),
}

impl KeyScope {
    pub fn contains(&self, key: &str) -> bool {
        match self {
            KeyScope::All => true,
            KeyScope::Only(keys) => keys.contains(key),
        }
    }
}

/// Predicate selecting the organizations a caller may see.
///
/// Usable both in memory through [`VisibilityFilter::admits`] and as MongoDB `$match` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityFilter {
    pub scope: KeyScope,
    pub include_super_admin_org: bool,
    pub verified_only: bool,
}

impl VisibilityFilter {
    pub fn admits(&self, organization: &Organization) -> bool {
        self.scope.contains(&organization._id)
            && (self.include_super_admin_org || !organization.super_admin)
            && (!self.verified_only || organization.verified)
    }

    /// MongoDB `$match` fragment of this filter.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let KeyScope::Only(keys) = &self.scope {
            let keys: Vec<String> = keys.iter().cloned().collect();
            filter.insert("_id", doc! { "$in": keys });
        }
        if !self.include_super_admin_org {
            filter.insert("super_admin", doc! { "$ne": true });
        }
        if self.verified_only {
            filter.insert("verified", true);
        }
        filter
    }
}

/// Whether any affiliation of the caller grants super admin permission.
pub fn is_super_admin(affiliations: &[Affiliation]) -> bool {
    affiliations
        .iter()
        .any(|affiliation| affiliation.permission == Permission::SuperAdmin)
}

/// Builds the visibility filter of a caller.
///
/// * `affiliations` - Affiliations of the caller.
/// * `claimants` - Keys of the organizations claiming the domain a connection is scoped to, if any.
/// * `flags` - Visibility flags of the request.
pub fn build_visibility_filter(
    affiliations: &[Affiliation],
    claimants: Option<&[String]>,
    flags: VisibilityFlags,
) -> VisibilityFilter {
    let scope = match claimants {
        None => user_scope(affiliations, flags),
        Some(claimants) => domain_scope(affiliations, claimants, flags),
    };
    VisibilityFilter {
        scope,
        include_super_admin_org: flags.include_super_admin_org,
        verified_only: flags.is_verified,
    }
}

/// Organizations reachable through the caller's own affiliations.
fn user_scope(affiliations: &[Affiliation], flags: VisibilityFlags) -> KeyScope {
    if flags.is_super_admin {
        return KeyScope::All;
    }
    let keys = affiliations
        .iter()
        .filter(|affiliation| !flags.is_admin || affiliation.permission == Permission::Admin)
        .map(|affiliation| affiliation.org_key.clone())
        .collect();
    KeyScope::Only(keys)
}

/// Claimants of a domain that are visible to the caller.
///
/// A claimant is visible when the caller is affiliated with it, or with any other claimant
/// of the same domain. With `is_admin` only administrated claimants are visible.
fn domain_scope(affiliations: &[Affiliation], claimants: &[String], flags: VisibilityFlags) -> KeyScope {
    let claimants: BTreeSet<String> = claimants.iter().cloned().collect();
    let KeyScope::Only(reachable) = user_scope(affiliations, flags) else {
        return KeyScope::Only(claimants);
    };
    if flags.is_admin {
        return KeyScope::Only(claimants.intersection(&reachable).cloned().collect());
    }
    if claimants.is_disjoint(&reachable) {
        KeyScope::Only(BTreeSet::new())
    } else {
        KeyScope::Only(claimants)
    }
}
