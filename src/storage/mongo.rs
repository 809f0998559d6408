use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use super::{OrganizationQuery, OrganizationStore, StoreError, StoreResult};
use crate::{
    domain::Domain,
    organization::{Affiliation, Claim, Organization},
};

const ORGANIZATIONS: &str = "organizations";
const AFFILIATIONS: &str = "affiliations";
const CLAIMS: &str = "claims";
const DOMAINS: &str = "domains";

/// Store backed by the MongoDB collections of the tracker.
#[derive(Clone)]
pub struct MongoOrganizationStore {
    organizations: Collection<Organization>,
    affiliations: Collection<Affiliation>,
    claims: Collection<Claim>,
    domains: Collection<Domain>,
}

impl MongoOrganizationStore {
    pub fn new(db_client: &Database) -> Self {
        Self {
            organizations: db_client.collection::<Organization>(ORGANIZATIONS),
            affiliations: db_client.collection::<Affiliation>(AFFILIATIONS),
            claims: db_client.collection::<Claim>(CLAIMS),
            domains: db_client.collection::<Domain>(DOMAINS),
        }
    }
}

/// Builds the aggregation pipeline of an organization query.
///
/// Visibility, search and ordering are evaluated by MongoDB in a single aggregation.
/// `domain_count` is derived from the claims collection so it can be sorted on.
pub fn organization_pipeline(query: &OrganizationQuery) -> Vec<Document> {
    let visibility = query.visibility.to_document();
    let filter = match query.search.to_document(query.language) {
        Some(search) => doc! { "$and": [visibility, search] },
        None => visibility,
    };
    vec![
        doc! { "$match": filter },
        doc! { "$lookup": {
            "from": CLAIMS,
            "localField": "_id",
            "foreignField": "org_key",
            "as": "claims"
        } },
        doc! { "$addFields": { "domain_count": { "$size": "$claims" } } },
        doc! { "$project": { "claims": 0 } },
        doc! { "$sort": query.order_by.sort_document(query.language) },
    ]
}

#[async_trait]
impl OrganizationStore for MongoOrganizationStore {
    async fn affiliations_of(&self, user_key: &str) -> StoreResult<Vec<Affiliation>> {
        let cursor = self
            .affiliations
            .find(doc! { "user_key": user_key }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn claimants_of(&self, domain_key: &str) -> StoreResult<Vec<String>> {
        let cursor = self
            .claims
            .find(doc! { "domain_key": domain_key }, None)
            .await?;
        let claims: Vec<Claim> = cursor.try_collect().await?;
        Ok(claims.into_iter().map(|claim| claim.org_key).collect())
    }

    async fn find_organizations(&self, query: &OrganizationQuery) -> StoreResult<Vec<Organization>> {
        let cursor = self
            .organizations
            .aggregate(organization_pipeline(query), None)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents
            .into_iter()
            .map(|document| bson::from_document(document).map_err(StoreError::from))
            .collect()
    }

    async fn find_domain(&self, domain: &str) -> StoreResult<Option<Domain>> {
        Ok(self
            .domains
            .find_one(doc! { "domain": domain }, None)
            .await?)
    }
}
