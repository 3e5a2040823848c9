//! Shared types handed across crate boundaries.

pub mod boot;

pub use boot::{AdminBarEntry, BootContext, BootData, LinkBehavior};
