use async_graphql::{Context, Error, Result};
use axum::http::{HeaderMap, header::ACCEPT_LANGUAGE};
use serde::Deserialize;

use crate::{
    graphql::localized_error,
    i18n::{Language, Message},
};

/// Name of the header the gateway forwards the authenticated user in.
pub const AUTHORIZED_USER_HEADER: &str = "Authorized-User";

/// Authorized user of a request, as JSON in the `Authorized-User` header.
///
/// ```json
/// { "id": "123", "language": "fr" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizedUserHeader {
    /// Key of the user.
    pub id: String,
    /// Preferred language of the user.
    #[serde(default)]
    pub language: Option<Language>,
}

impl TryFrom<&HeaderMap> for AuthorizedUserHeader {
    type Error = Error;

    fn try_from(header_map: &HeaderMap) -> Result<Self, Self::Error> {
        let value = header_map
            .get(AUTHORIZED_USER_HEADER)
            .ok_or_else(|| Error::new("Authorized-User header is missing."))?;
        let authorized_user = serde_json::from_str(value.to_str()?)?;
        Ok(authorized_user)
    }
}

/// Language of a request.
///
/// The preference of the authorized user wins over the `Accept-Language` header, English is the fallback.
pub fn request_language(
    header_map: &HeaderMap,
    authorized_user: Option<&AuthorizedUserHeader>,
) -> Language {
    if let Some(language) = authorized_user.and_then(|user| user.language) {
        return language;
    }
    header_map
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Returns the authorized user of the request.
///
/// Fails with a localized `UNAUTHENTICATED` error if the request carries none.
pub fn authenticate_user<'a>(ctx: &Context<'a>) -> Result<&'a AuthorizedUserHeader> {
    ctx.data::<AuthorizedUserHeader>()
        .map_err(|_| localized_error(ctx, Message::AuthenticationRequired, "UNAUTHENTICATED"))
}
