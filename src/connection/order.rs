use std::{cmp::Ordering, str::FromStr};

use async_graphql::Enum;
use bson::Document;

use crate::{
    i18n::Language,
    organization::{Organization, OrganizationDetails},
};

/// GraphQL order direction.
#[derive(Debug, Default, Enum, Copy, Clone, Eq, PartialEq)]
pub enum OrderDirection {
    /// Ascending order direction.
    #[default]
    Asc,
    /// Descending order direction.
    Desc,
}

/// Implements conversion to i32 for MongoDB document sorting.
impl From<OrderDirection> for i32 {
    fn from(value: OrderDirection) -> Self {
        match value {
            OrderDirection::Asc => 1,
            OrderDirection::Desc => -1,
        }
    }
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            _ => Err(format!("Order direction: `{}` is not supported.", value)),
        }
    }
}

/// Describes the fields that organizations can be ordered by.
#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
pub enum OrganizationOrderField {
    /// Orders by "acronym".
    Acronym,
    /// Orders by "name".
    Name,
    /// Orders by "slug".
    Slug,
    /// Orders by "zone".
    Zone,
    /// Orders by "sector".
    Sector,
    /// Orders by "country".
    Country,
    /// Orders by "province".
    Province,
    /// Orders by "city".
    City,
    /// Orders by "verified".
    Verified,
    /// Orders by passing mail checks.
    SummaryMailPass,
    /// Orders by failing mail checks.
    SummaryMailFail,
    /// Orders by checked mail domains.
    SummaryMailTotal,
    /// Orders by passing web checks.
    SummaryWebPass,
    /// Orders by failing web checks.
    SummaryWebFail,
    /// Orders by checked web domains.
    SummaryWebTotal,
    /// Orders by the amount of claimed domains.
    DomainCount,
}

impl OrganizationOrderField {
    /// Whether the field is part of the localized details.
    fn is_localized(&self) -> bool {
        matches!(
            self,
            OrganizationOrderField::Acronym
                | OrganizationOrderField::Name
                | OrganizationOrderField::Slug
                | OrganizationOrderField::Zone
                | OrganizationOrderField::Sector
                | OrganizationOrderField::Country
                | OrganizationOrderField::Province
                | OrganizationOrderField::City
        )
    }

    fn text<'a>(&self, details: &'a OrganizationDetails) -> &'a str {
        match self {
            OrganizationOrderField::Acronym => details.acronym.as_str(),
            OrganizationOrderField::Name => details.name.as_str(),
            OrganizationOrderField::Slug => details.slug.as_str(),
            OrganizationOrderField::Zone => details.zone.as_str(),
            OrganizationOrderField::Sector => details.sector.as_str(),
            OrganizationOrderField::Country => details.country.as_str(),
            OrganizationOrderField::Province => details.province.as_str(),
            _ => details.city.as_str(),
        }
    }

    /// Document path of the field in the `organizations` collection.
    pub fn path(&self, language: Language) -> String {
        let localized = |name: &str| format!("details.{}.{}", language.as_str(), name);
        match self {
            OrganizationOrderField::Acronym => localized("acronym"),
            OrganizationOrderField::Name => localized("name"),
            OrganizationOrderField::Slug => localized("slug"),
            OrganizationOrderField::Zone => localized("zone"),
            OrganizationOrderField::Sector => localized("sector"),
            OrganizationOrderField::Country => localized("country"),
            OrganizationOrderField::Province => localized("province"),
            OrganizationOrderField::City => localized("city"),
            OrganizationOrderField::Verified => "verified".to_string(),
            OrganizationOrderField::SummaryMailPass => "summaries.mail.pass".to_string(),
            OrganizationOrderField::SummaryMailFail => "summaries.mail.fail".to_string(),
            OrganizationOrderField::SummaryMailTotal => "summaries.mail.total".to_string(),
            OrganizationOrderField::SummaryWebPass => "summaries.web.pass".to_string(),
            OrganizationOrderField::SummaryWebFail => "summaries.web.fail".to_string(),
            OrganizationOrderField::SummaryWebTotal => "summaries.web.total".to_string(),
            OrganizationOrderField::DomainCount => "domain_count".to_string(),
        }
    }

    /// Value of the field for one organization.
    ///
    /// Text fields of organizations without details in `language` sort as empty strings.
    pub fn value(&self, organization: &Organization, language: Language) -> SortValue {
        if self.is_localized() {
            let value = organization
                .details(language)
                .map(|details| self.text(details))
                .unwrap_or_default();
            return SortValue::Text(value.to_string());
        }
        let summaries = &organization.summaries;
        match self {
            OrganizationOrderField::Verified => SortValue::Flag(organization.verified),
            OrganizationOrderField::SummaryMailPass => SortValue::Count(summaries.mail.pass),
            OrganizationOrderField::SummaryMailFail => SortValue::Count(summaries.mail.fail),
            OrganizationOrderField::SummaryMailTotal => SortValue::Count(summaries.mail.total),
            OrganizationOrderField::SummaryWebPass => SortValue::Count(summaries.web.pass),
            OrganizationOrderField::SummaryWebFail => SortValue::Count(summaries.web.fail),
            OrganizationOrderField::SummaryWebTotal => SortValue::Count(summaries.web.total),
            _ => SortValue::Count(organization.domain_count),
        }
    }
}

impl FromStr for OrganizationOrderField {
    type Err = String;

    /// Parses field names ignoring case and separators, `summary-mail-pass` and `SUMMARY_MAIL_PASS` are equal.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "acronym" => OrganizationOrderField::Acronym,
            "name" => OrganizationOrderField::Name,
            "slug" => OrganizationOrderField::Slug,
            "zone" => OrganizationOrderField::Zone,
            "sector" => OrganizationOrderField::Sector,
            "country" => OrganizationOrderField::Country,
            "province" => OrganizationOrderField::Province,
            "city" => OrganizationOrderField::City,
            "verified" => OrganizationOrderField::Verified,
            "summarymailpass" => OrganizationOrderField::SummaryMailPass,
            "summarymailfail" => OrganizationOrderField::SummaryMailFail,
            "summarymailtotal" => OrganizationOrderField::SummaryMailTotal,
            "summarywebpass" => OrganizationOrderField::SummaryWebPass,
            "summarywebfail" => OrganizationOrderField::SummaryWebFail,
            "summarywebtotal" => OrganizationOrderField::SummaryWebTotal,
            "domaincount" => OrganizationOrderField::DomainCount,
            _ => return Err(format!("Order field: `{}` is not supported.", value)),
        };
        Ok(field)
    }
}

/// Primary sort value of an organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Flag(bool),
    Count(u64),
}

/// Resolved ordering of an organization connection.
///
/// The organization key is always appended as secondary sort key in the same direction,
/// which makes the order total and cursor anchors unambiguous.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    /// Primary field, `None` orders by key only.
    pub field: Option<OrganizationOrderField>,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn new(field: Option<OrganizationOrderField>, direction: Option<OrderDirection>) -> Self {
        Self {
            field,
            direction: direction.unwrap_or_default(),
        }
    }

    /// Ordering from textual field and direction names, e.g. `summary-mail-pass` and `desc`.
    pub fn parse(field: Option<&str>, direction: Option<&str>) -> Result<Self, String> {
        let field = field.map(str::parse).transpose()?;
        let direction = direction.map(str::parse).transpose()?;
        Ok(Self::new(field, direction))
    }

    /// Compares two organizations according to this ordering.
    pub fn compare(&self, x: &Organization, y: &Organization, language: Language) -> Ordering {
        let primary = match self.field {
            Some(field) => field.value(x, language).cmp(&field.value(y, language)),
            None => Ordering::Equal,
        };
        let ordering = primary.then_with(|| x._id.cmp(&y._id));
        match self.direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        }
    }

    /// Sorts organizations in place.
    pub fn sort(&self, organizations: &mut [Organization], language: Language) {
        organizations.sort_by(|x, y| self.compare(x, y, language));
    }

    /// MongoDB `$sort` document of this ordering.
    pub fn sort_document(&self, language: Language) -> Document {
        let direction = i32::from(self.direction);
        let mut sorting_doc = Document::new();
        if let Some(field) = self.field {
            sorting_doc.insert(field.path(language), direction);
        }
        sorting_doc.insert("_id", direction);
        sorting_doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::tests::organization;
    use bson::doc;
    use pretty_assertions::assert_eq;

    fn keys(organizations: &[Organization]) -> Vec<&str> {
        organizations.iter().map(|org| org._id.as_str()).collect()
    }

    #[test]
    fn parses_field_names_ignoring_case_and_separators() {
        for name in ["summary-mail-pass", "SUMMARY_MAIL_PASS", "summaryMailPass"] {
            assert_eq!(
                name.parse::<OrganizationOrderField>(),
                Ok(OrganizationOrderField::SummaryMailPass)
            );
        }
        assert_eq!("DESC".parse::<OrderDirection>(), Ok(OrderDirection::Desc));
        assert!("domains".parse::<OrganizationOrderField>().is_err());
    }

    #[test]
    fn defaults_to_key_ascending() {
        let mut orgs = vec![
            organization("3", "c", "C"),
            organization("1", "a", "A"),
            organization("2", "b", "B"),
        ];
        OrderBy::default().sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["1", "2", "3"]);
    }

    #[test]
    fn breaks_ties_by_key_in_same_direction() {
        let mut orgs = vec![
            organization("2", "same", "S"),
            organization("3", "other", "A"),
            organization("1", "same", "S"),
        ];
        let ascending = OrderBy::new(Some(OrganizationOrderField::Acronym), None);
        ascending.sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["3", "1", "2"]);

        let descending = OrderBy::new(
            Some(OrganizationOrderField::Acronym),
            Some(OrderDirection::Desc),
        );
        descending.sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["2", "1", "3"]);
    }

    #[test]
    fn orders_by_counters_and_flags() {
        let mut low = organization("1", "low", "L");
        low.summaries.web.fail = 1;
        low.domain_count = 10;
        let mut high = organization("2", "high", "H");
        high.summaries.web.fail = 5;
        high.verified = true;
        high.domain_count = 2;
        let mut orgs = vec![high, low];

        OrderBy::new(Some(OrganizationOrderField::SummaryWebFail), None).sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["1", "2"]);
        OrderBy::new(Some(OrganizationOrderField::DomainCount), None).sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["2", "1"]);
        OrderBy::new(Some(OrganizationOrderField::Verified), Some(OrderDirection::Desc))
            .sort(&mut orgs, Language::En);
        assert_eq!(keys(&orgs), vec!["2", "1"]);
    }

    #[test]
    fn sort_document_appends_key() {
        let order_by = OrderBy::new(
            Some(OrganizationOrderField::Name),
            Some(OrderDirection::Desc),
        );
        let document = order_by.sort_document(Language::Fr);
        let entries: Vec<(&String, &bson::Bson)> = document.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "details.fr.name");
        assert_eq!(entries[1].0, "_id");
        assert_eq!(document.get_i32("_id").unwrap(), -1);
        assert_eq!(
            OrderBy::default().sort_document(Language::En),
            doc! { "_id": 1 }
        );
    }
}
