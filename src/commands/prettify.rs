//! Operation formatting.

use clap::Args;

use ide_client::{merge_fragments, prettify};
use ide_core::error::AppError;

/// Arguments for the prettify command
#[derive(Debug, Args)]
pub struct PrettifyArgs {
    /// Operation document, or `@path` to read it from a file
    pub document: String,

    /// Inline fragment spreads before formatting
    #[arg(long)]
    pub merge_fragments: bool,
}

/// Execute the prettify command
pub fn execute(args: &PrettifyArgs) -> Result<(), AppError> {
    let document = super::read_document(&args.document)?;

    let formatted = if args.merge_fragments {
        merge_fragments(&document, &[])?
    } else {
        prettify(&document)?
    };

    print!("{formatted}");
    Ok(())
}
