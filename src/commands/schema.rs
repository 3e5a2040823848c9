//! Schema introspection.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;

use crate::output::{self, OutputFormat};

/// Arguments for the schema command
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Print the full introspection result instead of a type summary
    #[arg(long)]
    pub raw: bool,
}

/// Schema type display row
#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    /// Kind
    kind: String,
    /// Name
    name: String,
    /// Fields
    fields: usize,
}

/// Execute the schema command
pub async fn execute(
    args: &SchemaArgs,
    config: &IdeConfig,
    data: &BootData,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (session, _) = super::open_session(config, data)?;
    let schema = session.fetch_schema().await?;

    if args.raw {
        output::print_response(schema.introspection());
        return Ok(());
    }

    let rows: Vec<TypeRow> = schema.introspection()["__schema"]["types"]
        .as_array()
        .map(|types| {
            types
                .iter()
                .filter(|t| !t["name"].as_str().unwrap_or("").starts_with("__"))
                .map(|t| TypeRow {
                    kind: t["kind"].as_str().unwrap_or("").to_string(),
                    name: t["name"].as_str().unwrap_or("").to_string(),
                    fields: t["fields"].as_array().map(Vec::len).unwrap_or(0),
                })
                .collect()
        })
        .unwrap_or_default();

    output::print_list(&rows, format);
    Ok(())
}
