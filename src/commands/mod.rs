//! CLI command definitions and dispatch.

pub mod auth;
pub mod classify;
pub mod extensions;
pub mod prettify;
pub mod query;
pub mod schema;

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use ide_client::HttpTransport;
use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;
use ide_shell::{BootReport, IdeContext, Session, boot, builtin_extensions};
use ide_store::FileStorage;

use crate::output::OutputFormat;

/// GraphQL IDE: run and inspect operations against a WPGraphQL endpoint
#[derive(Debug, Parser)]
#[command(name = "graphql-ide", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/graphql-ide.toml")]
    pub config: String,

    /// Boot data JSON handed over by the host
    #[arg(short, long)]
    pub boot_data: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Execute an operation
    Query(query::QueryArgs),
    /// Show how an operation would be sent
    Classify(classify::ClassifyArgs),
    /// Fetch the schema by introspection
    Schema(schema::SchemaArgs),
    /// Inspect or change the authenticated/public toggle
    Auth(auth::AuthArgs),
    /// List registered toolbar buttons and activity panels
    Extensions,
    /// Reformat an operation
    Prettify(prettify::PrettifyArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &IdeConfig) -> Result<(), AppError> {
        let data = load_boot_data(self.boot_data.as_deref())?;
        match &self.command {
            Commands::Query(args) => query::execute(args, config, &data).await,
            Commands::Classify(args) => classify::execute(args, config, &data, self.format),
            Commands::Schema(args) => schema::execute(args, config, &data, self.format).await,
            Commands::Auth(args) => auth::execute(args, config, &data, self.format),
            Commands::Extensions => extensions::execute(config, &data, self.format),
            Commands::Prettify(args) => prettify::execute(args),
        }
    }
}

/// Helper: read boot data from a JSON file, or use defaults
pub fn load_boot_data(path: Option<&str>) -> Result<BootData, AppError> {
    let Some(path) = path else {
        return Ok(BootData::default());
    };
    let raw = std::fs::read_to_string(Path::new(path)).map_err(|e| {
        AppError::with_source(
            ide_core::error::ErrorKind::NotFound,
            format!("Cannot read boot data '{path}': {e}"),
            e,
        )
    })?;
    BootData::from_json(&raw)
}

/// Helper: the configuration with the boot data's endpoint applied
fn effective_config(config: &IdeConfig, data: &BootData) -> IdeConfig {
    let mut config = config.clone();
    if let Some(url) = &data.graphql_endpoint {
        config.endpoint.url = url.clone();
    }
    config
}

/// Helper: boot a session with the built-in extensions
pub fn open_session(config: &IdeConfig, data: &BootData) -> Result<(Session, BootReport), AppError> {
    let context = IdeContext::new(Arc::new(FileStorage::new(&config.storage.path)));
    let report = boot(&context, &builtin_extensions(), data);

    let transport = HttpTransport::from_config(&effective_config(config, data))?;
    let session = Session::new(context, Arc::new(transport))
        .with_external_fragments(data.context.external_fragments.clone());

    Ok((session, report))
}

/// Helper: read an operation given inline or as `@path`
pub fn read_document(source: &str) -> Result<String, AppError> {
    match source.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path)).map_err(|e| {
            AppError::with_source(
                ide_core::error::ErrorKind::NotFound,
                format!("Cannot read operation file '{path}': {e}"),
                e,
            )
        }),
        None => Ok(source.to_string()),
    }
}
