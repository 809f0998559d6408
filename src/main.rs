use std::{
    fs::{self, File},
    io::Write,
    sync::Arc,
};

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::header::HeaderMap,
    response::{self, IntoResponse},
    routing::get,
};
use clap::Parser;
use log::info;
use mongodb::{Client, options::ClientOptions};
use simple_logger::SimpleLogger;

use tracker_organizations::{
    authentication::{AuthorizedUserHeader, request_language},
    config::Args,
    graphql::{OrganizationSchema, build_schema, schema_sdl},
    i18n::DefaultCatalog,
    storage::mongo::MongoOrganizationStore,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Builds the GraphiQL frontend.
async fn graphiql() -> impl IntoResponse {
    response::Html(GraphiQLSource::build().endpoint("/").finish())
}

/// Describes the handler for GraphQL requests.
///
/// Parses the "Authorized-User" header and writes it, together with the request language,
/// in the context data of the specific request. Then executes the GraphQL schema with the request.
async fn graphql_handler(
    State(schema): State<OrganizationSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut req = req.into_inner();
    let authorized_user = AuthorizedUserHeader::try_from(&headers).ok();
    req = req.data(request_language(&headers, authorized_user.as_ref()));
    if let Some(authorized_user) = authorized_user {
        req = req.data(authorized_user);
    }
    schema.execute(req).await.into()
}

/// Activates logger and parses arguments for optional schema generation. Otherwise starts the GraphQL server.
#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level).init()?;

    if args.generate_schema {
        fs::create_dir_all("./schemas")?;
        let mut file = File::create("./schemas/organization.graphql")?;
        file.write_all(schema_sdl().as_bytes())?;
        info!("GraphQL schema: ./schemas/organization.graphql was successfully generated!");
    } else {
        start_service(&args).await?;
    }
    Ok(())
}

/// Connects to MongoDB and serves GraphiQL and GraphQL on the configured address.
async fn start_service(args: &Args) -> Result<(), BoxError> {
    let mut client_options = ClientOptions::parse(&args.mongodb_uri).await?;
    client_options.app_name = Some("Organization".to_string());
    let client = Client::with_options(client_options)?;
    let db_client = client.database(&args.mongodb_database);

    let schema = build_schema(
        Arc::new(MongoOrganizationStore::new(&db_client)),
        Arc::new(DefaultCatalog),
    );
    let app = Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .with_state(schema);

    let listener = tokio::net::TcpListener::bind(&args.bind_address).await?;
    info!("GraphiQL IDE: http://{}", args.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
