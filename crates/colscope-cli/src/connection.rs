//! Connection configuration and connector construction.
//!
//! The configuration is an ordinary value built from command-line arguments
//! and handed to [`ConnectionConfig::connect`]; nothing is persisted.

use anyhow::{Context, Result};
use colscope_core::{Connector, Dialect, DocumentConnector};
use std::path::PathBuf;

use crate::cli::Args;
use crate::input::read_input;

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    /// A JSON metadata document (stdin when `path` is `None`)
    Document {
        path: Option<PathBuf>,
        label: Option<String>,
    },
    /// A live database reached through a connection URL
    #[cfg(feature = "metadata-provider")]
    Database {
        url: String,
        schema: Option<String>,
        label: Option<String>,
    },
}

impl ConnectionConfig {
    pub fn from_args(args: &Args) -> Self {
        #[cfg(feature = "metadata-provider")]
        if let Some(url) = &args.metadata_url {
            return Self::Database {
                url: url.clone(),
                schema: args.metadata_schema.clone(),
                label: args.label.clone(),
            };
        }

        Self::Document {
            path: args.document.clone(),
            label: args.label.clone(),
        }
    }

    /// Whether the configuration embeds a password-bearing URL.
    pub fn exposes_credentials(&self) -> bool {
        match self {
            Self::Document { .. } => false,
            #[cfg(feature = "metadata-provider")]
            Self::Database { url, .. } => url.contains('@') && !url.starts_with("sqlite"),
        }
    }

    /// Open the configured source.
    ///
    /// Documents are read and deserialized here; database connections are
    /// established here. Either failure is a configuration error.
    pub fn connect(&self, dialect: Dialect) -> Result<Box<dyn Connector>> {
        match self {
            Self::Document { path, label } => {
                let source = read_input(path.as_deref())?;
                let connector = DocumentConnector::from_json(&source.content)
                    .with_context(|| format!("Failed to load metadata document: {}", source.name))?
                    .with_dialect(dialect);
                let label = label.clone().or_else(|| {
                    connector
                        .document()
                        .database_name
                        .is_none()
                        .then_some(source.stem)
                        .flatten()
                });
                Ok(Box::new(match label {
                    Some(label) => connector.with_label(label),
                    None => connector,
                }))
            }
            #[cfg(feature = "metadata-provider")]
            Self::Database { url, schema, label } => {
                let connector = crate::metadata::SqlxConnector::connect(url, schema.clone())
                    .context("Failed to connect to metadata database")?;
                Ok(Box::new(match label {
                    Some(label) => connector.with_label(label.clone()),
                    None => connector,
                }))
            }
        }
    }
}
