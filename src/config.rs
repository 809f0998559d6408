use clap::Parser;
use log::LevelFilter;

/// Configuration of the organization service, read from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generates GraphQL schema in `./schemas/organization.graphql`.
    #[arg(long)]
    pub generate_schema: bool,

    /// Connection string of the MongoDB deployment.
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Database holding the tracker collections.
    #[arg(long, env = "MONGODB_DATABASE", default_value = "tracker-database")]
    pub mongodb_database: String,

    /// Address the GraphQL server listens on.
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    pub bind_address: String,

    /// Maximum level of log records.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", value_parser = parse_level_filter)]
    pub log_level: LevelFilter,
}

fn parse_level_filter(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("Log level: `{}` is not supported.", level))
}
