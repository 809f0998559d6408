use bson::{Document, doc};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{i18n::Language, organization::Organization};

/// Cleans raw user input before it is used in a query.
pub type InputSanitizer = fn(&str) -> String;

/// Default sanitizer: trims surrounding whitespace and drops control characters.
pub fn cleanse_input(input: &str) -> String {
    input.trim().chars().filter(|c| !c.is_control()).collect()
}

/// Lowercases `text` and strips its diacritics, `Québec` folds to `quebec`.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Accented Latin letters MongoDB patterns expand folded letters into.
const ACCENTED_LETTERS: std::ops::RangeInclusive<char> = '\u{c0}'..='\u{17f}';

/// Regex matching `term` the way [`fold`] compares.
///
/// `term` must already be folded. Every letter becomes a class of itself and the accented
/// letters folding to it, MongoDB adds case insensitivity through the `i` option.
fn folded_pattern(term: &str) -> String {
    let mut pattern = String::new();
    for letter in term.chars() {
        let escaped = regex::escape(letter.encode_utf8(&mut [0; 4]));
        let variants: String = ACCENTED_LETTERS
            .filter(|candidate| {
                let folded = fold(candidate.encode_utf8(&mut [0; 4]));
                let mut folded = folded.chars();
                folded.next() == Some(letter) && folded.next().is_none()
            })
            .collect();
        if variants.is_empty() {
            pattern.push_str(&escaped);
        } else {
            pattern.push('[');
            pattern.push_str(&escaped);
            pattern.push_str(&variants);
            pattern.push(']');
        }
    }
    pattern
}

/// Case and diacritic insensitive substring filter over the localized `name` and `acronym`
/// of organizations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Folded, sanitized search term. `None` lets every organization pass.
    term: Option<String>,
}

impl SearchFilter {
    pub fn new(search: Option<&str>, sanitizer: InputSanitizer) -> Self {
        let term = search
            .map(sanitizer)
            .filter(|term| !term.is_empty())
            .map(|term| fold(&term));
        Self { term }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Whether the organization's details in `language` contain the term.
    pub fn matches(&self, organization: &Organization, language: Language) -> bool {
        let Some(term) = &self.term else {
            return true;
        };
        match organization.details(language) {
            Some(details) => {
                fold(&details.name).contains(term.as_str())
                    || fold(&details.acronym).contains(term.as_str())
            }
            None => false,
        }
    }

    /// MongoDB `$match` fragment of this filter, `None` when every organization passes.
    pub fn to_document(&self, language: Language) -> Option<Document> {
        let term = self.term.as_ref()?;
        let pattern = folded_pattern(term);
        let name = format!("details.{}.name", language.as_str());
        let acronym = format!("details.{}.acronym", language.as_str());
        Some(doc! {
            "$or": [
                { name: { "$regex": pattern.clone(), "$options": "i" } },
                { acronym: { "$regex": pattern, "$options": "i" } }
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::tests::organization;

    #[test]
    fn cleanses_whitespace_and_control_characters() {
        assert_eq!(cleanse_input("  org\u{0} one\n "), "org one");
    }

    #[test]
    fn blank_search_lets_everything_pass() {
        let filter = SearchFilter::new(Some("   "), cleanse_input);
        assert_eq!(filter.term(), None);
        assert!(filter.to_document(Language::En).is_none());
        assert!(filter.matches(&organization("1", "org one", "ONE"), Language::En));
    }

    #[test]
    fn matches_name_or_acronym_ignoring_case() {
        let filter = SearchFilter::new(Some("One"), cleanse_input);
        assert!(filter.matches(&organization("1", "org one", "O1"), Language::En));
        assert!(filter.matches(&organization("2", "first org", "ONE"), Language::En));
        assert!(!filter.matches(&organization("3", "org two", "TWO"), Language::En));
    }

    #[test]
    fn searches_in_the_callers_language() {
        let mut org = organization("1", "org one", "ONE");
        org.details.get_mut("fr").unwrap().name = "org un".to_string();
        let filter = SearchFilter::new(Some("un"), cleanse_input);
        assert!(filter.matches(&org, Language::Fr));
        assert!(!filter.matches(&org, Language::En));
    }

    fn name_pattern(search: &str) -> String {
        let filter = SearchFilter::new(Some(search), cleanse_input);
        let document = filter.to_document(Language::Fr).unwrap();
        let clauses = document.get_array("$or").unwrap();
        let name = clauses[0].as_document().unwrap();
        let regex = name.get_document("details.fr.name").unwrap();
        regex.get_str("$regex").unwrap().to_string()
    }

    #[test]
    fn escapes_regex_metacharacters() {
        assert_eq!(name_pattern("1.2"), "1\\.2");
    }

    #[test]
    fn folds_case_and_diacritics() {
        assert_eq!(fold("Gouvernement du QUÉBEC"), "gouvernement du quebec");
        assert_eq!(fold("Ça coûte"), "ca coute");

        let quebec = organization("1", "Gouvernement du Québec", "QC");
        let filter = SearchFilter::new(Some("quebec"), cleanse_input);
        assert!(filter.matches(&quebec, Language::En));

        let plain = organization("2", "Ville de Quebec", "VQ");
        let filter = SearchFilter::new(Some("QUÉBEC"), cleanse_input);
        assert_eq!(filter.term(), Some("quebec"));
        assert!(filter.matches(&plain, Language::En));
        assert!(filter.matches(&quebec, Language::En));
    }

    #[test]
    fn mongo_pattern_matches_accented_letters() {
        let pattern = name_pattern("QUÉBEC");
        let expression = regex::RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .unwrap();
        assert!(expression.is_match("Gouvernement du Québec"));
        assert!(expression.is_match("VILLE DE QUÉBEC"));
        assert!(expression.is_match("quebec"));
        assert!(!expression.is_match("quibec"));
    }
}
