//! GraphQL surface of the organization connections.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Error, ErrorExtensions, Result, SDLExportOptions,
    Schema, extensions::Logger,
};

use crate::{
    authentication::authenticate_user,
    i18n::{DefaultCatalog, Language, Message, MessageCatalog},
    organization::loader::LoaderContext,
    storage::OrganizationStore,
};

pub mod model;
pub mod query;

use query::Query;

pub type OrganizationSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builds the executable schema.
///
/// * `store` - Store the connection loaders query.
/// * `catalog` - Catalog user facing messages are translated with.
pub fn build_schema(
    store: Arc<dyn OrganizationStore>,
    catalog: Arc<dyn MessageCatalog>,
) -> OrganizationSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .extension(Logger)
        .data(store)
        .data(catalog)
        .enable_federation()
        .finish()
}

/// SDL of the schema, as written by `--generate-schema`.
pub fn schema_sdl() -> String {
    let schema = Schema::build(Query, EmptyMutation, EmptySubscription).finish();
    schema.sdl_with_options(SDLExportOptions::new().federation())
}

/// Language of the current request, English if the handler did not attach one.
pub(crate) fn request_language(ctx: &Context<'_>) -> Language {
    ctx.data_opt::<Language>().copied().unwrap_or_default()
}

/// Translates `message` into the request language and tags it with `code`.
pub(crate) fn localized_error(ctx: &Context<'_>, message: Message, code: &'static str) -> Error {
    let language = request_language(ctx);
    let text = match ctx.data_opt::<Arc<dyn MessageCatalog>>() {
        Some(catalog) => catalog.translate(&message, language),
        None => DefaultCatalog.translate(&message, language),
    };
    Error::new(text).extend_with(|_, extensions| extensions.set("code", code))
}

/// Builds the loader context of the authenticated caller.
pub(crate) fn loader_context(ctx: &Context<'_>) -> Result<LoaderContext> {
    let authorized_user = authenticate_user(ctx)?;
    let store = ctx.data::<Arc<dyn OrganizationStore>>()?.clone();
    let catalog = ctx.data::<Arc<dyn MessageCatalog>>()?.clone();
    Ok(LoaderContext::new(
        store,
        request_language(ctx),
        authorized_user.id.clone(),
        catalog,
    ))
}
