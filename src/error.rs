use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::{
    i18n::{Language, Message, MessageCatalog},
    storage::StoreError,
};

/// Distinguishable kinds of connection failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// `first` and `last` are both set or both missing.
    ArgumentShape,
    /// `first` or `last` is not an integer.
    ArgumentType,
    /// `first` or `last` is negative or above the page size ceiling.
    ArgumentRange,
    /// The storage query or the projection of its results failed.
    Storage,
    /// A cursor could not be decoded for the connection it was passed to.
    ///
    /// Never surfaced to callers, the windower treats such cursors as unset.
    InvalidCursor,
}

impl ErrorKind {
    /// Code that is attached to GraphQL errors as the `code` extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ArgumentShape => "ARGUMENT_SHAPE",
            ErrorKind::ArgumentType => "ARGUMENT_TYPE",
            ErrorKind::ArgumentRange => "ARGUMENT_RANGE",
            ErrorKind::Storage => "STORAGE",
            ErrorKind::InvalidCursor => "INVALID_CURSOR",
        }
    }
}

/// Failure of a connection loader.
///
/// The `Display` output is the audit detail written to the server logs.
/// Clients only ever see [`ConnectionError::user_message`].
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("User: {caller} did not have either `first` or `last` arguments set for: {operation}.")]
    MissingFirstOrLast {
        caller: String,
        operation: &'static str,
        connection: &'static str,
    },
    #[error("User: {caller} attempted to have `first` and `last` arguments set for: {operation}.")]
    FirstAndLastTogether {
        caller: String,
        operation: &'static str,
        connection: &'static str,
    },
    #[error("User: {caller} attempted to have `{argument}` set as a {actual} for: {operation}.")]
    ArgumentType {
        caller: String,
        operation: &'static str,
        argument: &'static str,
        actual: &'static str,
    },
    #[error("User: {caller} attempted to have `{argument}` set below zero for: {operation}.")]
    BelowZero {
        caller: String,
        operation: &'static str,
        connection: &'static str,
        argument: &'static str,
    },
    #[error(
        "User: {caller} attempted to have `{argument}` set to {requested} for: {operation}, the limit is {limit}."
    )]
    AboveLimit {
        caller: String,
        operation: &'static str,
        connection: &'static str,
        argument: &'static str,
        requested: String,
        limit: u64,
    },
    #[error(
        "Database error occurred while user: {caller} was trying to query organizations in {operation}, error: {source}"
    )]
    Storage {
        caller: String,
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectionError::MissingFirstOrLast { .. }
            | ConnectionError::FirstAndLastTogether { .. } => ErrorKind::ArgumentShape,
            ConnectionError::ArgumentType { .. } => ErrorKind::ArgumentType,
            ConnectionError::BelowZero { .. } | ConnectionError::AboveLimit { .. } => {
                ErrorKind::ArgumentRange
            }
            ConnectionError::Storage { .. } => ErrorKind::Storage,
        }
    }

    /// Message that is safe to show to the caller.
    pub fn message(&self) -> Message {
        match *self {
            ConnectionError::MissingFirstOrLast { connection, .. } => {
                Message::MissingFirstOrLast { connection }
            }
            ConnectionError::FirstAndLastTogether { connection, .. } => {
                Message::FirstAndLastTogether { connection }
            }
            ConnectionError::ArgumentType {
                argument, actual, ..
            } => Message::ArgumentType { argument, actual },
            ConnectionError::BelowZero {
                argument,
                connection,
                ..
            } => Message::BelowZero {
                argument,
                connection,
            },
            ConnectionError::AboveLimit {
                argument,
                connection,
                ref requested,
                limit,
                ..
            } => Message::AboveLimit {
                argument,
                connection,
                requested: requested.clone(),
                limit,
            },
            ConnectionError::Storage { .. } => Message::LoadOrganizationsFailed,
        }
    }

    /// Localized text of [`ConnectionError::message`].
    pub fn user_message(&self, catalog: &dyn MessageCatalog, language: Language) -> String {
        catalog.translate(&self.message(), language)
    }

    /// Converts into a GraphQL error carrying the localized message and the kind as `code` extension.
    pub fn into_graphql_error(
        self,
        catalog: &dyn MessageCatalog,
        language: Language,
    ) -> async_graphql::Error {
        let code = self.kind().as_str();
        async_graphql::Error::new(self.user_message(catalog, language))
            .extend_with(|_, extensions| extensions.set("code", code))
    }
}
