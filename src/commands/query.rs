//! Operation execution.

use clap::Args;

use ide_client::OperationRequest;
use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;

use crate::output;

/// Arguments for the query command
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Operation document, or `@path` to read it from a file
    pub document: String,

    /// Variables as a JSON object
    #[arg(long)]
    pub variables: Option<String>,

    /// Operation to run when the document holds several
    #[arg(long)]
    pub operation_name: Option<String>,
}

/// Execute the query command
pub async fn execute(args: &QueryArgs, config: &IdeConfig, data: &BootData) -> Result<(), AppError> {
    let (session, _) = super::open_session(config, data)?;

    let mut request = OperationRequest::new(super::read_document(&args.document)?);
    if let Some(raw) = &args.variables {
        let variables: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Variables are not valid JSON: {e}")))?;
        request = request.with_variables(variables);
    }
    if let Some(name) = &args.operation_name {
        request = request.with_operation_name(name);
    }

    session.set_query(request.query.clone());
    let response = session.execute(&request).await?;

    output::print_response(&response);
    Ok(())
}
