//! Introspection classification.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ide_client::{OperationRequest, RequestDispatcher, is_introspection};
use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;
use ide_shell::{IdeContext, boot};
use ide_store::FileStorage;

use crate::output::{self, OutputFormat};

/// Arguments for the classify command
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Operation document, or `@path` to read it from a file
    pub document: String,
}

/// Classification display row
#[derive(Debug, Serialize, Tabled)]
struct ClassifyRow {
    /// Introspection-class
    introspection: bool,
    /// Parsed
    parsed: bool,
    /// Authenticated toggle
    authenticated: bool,
    /// Credentials
    credentials: String,
}

/// Execute the classify command
pub fn execute(
    args: &ClassifyArgs,
    config: &IdeConfig,
    data: &BootData,
    format: OutputFormat,
) -> Result<(), AppError> {
    let document = super::read_document(&args.document)?;

    let context = IdeContext::new(std::sync::Arc::new(FileStorage::new(&config.storage.path)));
    let report = boot(&context, &[], data);
    let plan = RequestDispatcher::plan(&OperationRequest::new(document.as_str()), report.is_authenticated);

    let row = ClassifyRow {
        introspection: plan.is_introspection,
        parsed: is_introspection(&document).is_ok(),
        authenticated: report.is_authenticated,
        credentials: plan.credentials.to_string(),
    };

    output::print_list(&[row], format);
    Ok(())
}
