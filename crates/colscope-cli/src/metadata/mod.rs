//! Live database catalog connectors.
//!
//! Reads tables, views and procedure bodies straight from a database's system
//! catalogs so lineage can be extracted without hand-writing a metadata
//! document.

#[cfg(feature = "metadata-provider")]
mod sqlx_provider;

#[cfg(feature = "metadata-provider")]
pub use sqlx_provider::{DatabaseType, SqlxConnector};
