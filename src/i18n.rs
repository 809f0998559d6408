use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages that organization details and user facing messages are available in.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

impl Language {
    /// Tag under which organization details are stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Picks the first supported language out of an `Accept-Language` header value.
    ///
    /// Falls back to English when nothing in the header is supported.
    pub fn from_accept_language(header: &str) -> Self {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(|tag| tag.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = String;

    /// Parses a language tag, ignoring case and region subtags (`fr-CA` is French).
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => Err(format!("Language tag: `{}` is not supported.", tag)),
        }
    }
}

/// User facing messages the connection loaders can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Neither `first` nor `last` was given.
    MissingFirstOrLast { connection: &'static str },
    /// Both `first` and `last` were given.
    FirstAndLastTogether { connection: &'static str },
    /// `argument` is not an integer, `actual` names the runtime type that was received.
    ArgumentType {
        argument: &'static str,
        actual: &'static str,
    },
    /// `argument` is negative.
    BelowZero {
        argument: &'static str,
        connection: &'static str,
    },
    /// `argument` asks for more records than the connection allows.
    AboveLimit {
        argument: &'static str,
        connection: &'static str,
        requested: String,
        limit: u64,
    },
    /// Storage failed, details stay in the server logs.
    LoadOrganizationsFailed,
    /// The request carries no authenticated user.
    AuthenticationRequired,
    /// No domain with the requested domain name exists.
    DomainNotFound,
}

/// Translates messages into the language of the caller.
///
/// Message text is injected into the loaders through this trait, loaders never format user facing text themselves.
pub trait MessageCatalog: Send + Sync {
    fn translate(&self, message: &Message, language: Language) -> String;
}

/// Catalog with the English and French texts of the tracker.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCatalog;

impl MessageCatalog for DefaultCatalog {
    fn translate(&self, message: &Message, language: Language) -> String {
        match language {
            Language::En => english(message),
            Language::Fr => french(message),
        }
    }
}

fn english(message: &Message) -> String {
    match message {
        Message::MissingFirstOrLast { connection } => format!(
            "You must provide a `first` or `last` value to properly paginate the `{}` connection.",
            connection
        ),
        Message::FirstAndLastTogether { connection } => format!(
            "Passing both `first` and `last` to paginate the `{}` connection is not supported.",
            connection
        ),
        Message::ArgumentType { argument, actual } => {
            format!("`{}` must be of type `number` not `{}`.", argument, actual)
        }
        Message::BelowZero {
            argument,
            connection,
        } => format!(
            "`{}` on the `{}` connection cannot be less than zero.",
            argument, connection
        ),
        Message::AboveLimit {
            argument,
            connection,
            requested,
            limit,
        } => format!(
            "Requesting `{}` records on the `{}` connection exceeds the `{}` limit of {} records.",
            requested, connection, argument, limit
        ),
        Message::LoadOrganizationsFailed => {
            "Unable to load organization(s). Please try again.".to_string()
        }
        Message::AuthenticationRequired => {
            "Authentication error. Please sign in.".to_string()
        }
        Message::DomainNotFound => "Unable to find domain. Please try again.".to_string(),
    }
}

fn french(message: &Message) -> String {
    match message {
        Message::MissingFirstOrLast { connection } => format!(
            "Vous devez fournir une valeur `first` ou `last` pour paginer correctement la connexion `{}`.",
            connection
        ),
        Message::FirstAndLastTogether { connection } => format!(
            "Passer à la fois `first` et `last` pour paginer la connexion `{}` n'est pas supporté.",
            connection
        ),
        Message::ArgumentType { argument, actual } => {
            format!("`{}` doit être de type `number` et non `{}`.", argument, actual)
        }
        Message::BelowZero {
            argument,
            connection,
        } => format!(
            "`{}` sur la connexion `{}` ne peut être inférieur à zéro.",
            argument, connection
        ),
        Message::AboveLimit {
            argument,
            connection,
            requested,
            limit,
        } => format!(
            "La demande de `{}` enregistrements sur la connexion `{}` dépasse la limite `{}` de {} enregistrements.",
            requested, connection, argument, limit
        ),
        Message::LoadOrganizationsFailed => {
            "Impossible de charger l'organisation (s). Veuillez réessayer.".to_string()
        }
        Message::AuthenticationRequired => {
            "Erreur d'authentification. Veuillez vous connecter.".to_string()
        }
        Message::DomainNotFound => {
            "Impossible de trouver le domaine. Veuillez réessayer.".to_string()
        }
    }
}
