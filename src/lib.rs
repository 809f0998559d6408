//! Organization connections of the domain security posture tracker.
//!
//! Lists the organizations a user may see as relay connections, either all of the
//! user's organizations or the claimants of one domain.

pub mod authentication;
pub mod config;
pub mod connection;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod i18n;
pub mod organization;
pub mod storage;
