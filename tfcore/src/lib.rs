//! tfcore - Terraform plugin contract for Rust providers
//!
//! Defines the types a provider implements against: the dynamic value model,
//! attribute schemas, diagnostics, and the `Provider`/`DataSource` traits the
//! host runtime binds to. The wire transport between Terraform and the
//! provider process lives in the host, not here.

pub mod context;
pub mod data_source;
pub mod error;
pub mod provider;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use context::Context;
pub use data_source::{DataSource, DataSourceWithConfigure};
pub use error::{Result, TfcoreError};
pub use provider::{DataSourceFactory, Provider};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{Diagnostic, Dynamic, DynamicValue};
