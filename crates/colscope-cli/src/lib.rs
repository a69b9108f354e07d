//! colscope CLI library.
//!
//! The binary is a thin wrapper over these modules; they are exposed so the
//! connection and output layers can be tested and reused.

pub mod cli;
pub mod connection;
pub mod input;
pub mod logging;
#[cfg(feature = "metadata-provider")]
pub mod metadata;
pub mod output;

pub use cli::Args;
pub use connection::ConnectionConfig;
