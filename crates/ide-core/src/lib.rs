//! # ide-core
//!
//! Core crate for the GraphQL IDE. Contains configuration schemas,
//! the boot context handed over by the host, and the unified error system.
//!
//! This crate has **no** internal dependencies on other IDE crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
