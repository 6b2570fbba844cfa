//! Error types emitted by the boundary CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use boundary_core::{ExportError, SourceAccessError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the boundary CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Reading an input layer failed.
    #[error("failed to ingest {path:?}: {source}")]
    Ingest {
        /// Input that failed.
        path: Utf8PathBuf,
        /// Underlying reader failure.
        #[source]
        source: SourceAccessError,
    },
    /// Computing or writing the hull failed.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Serializing the export report failed.
    #[error("failed to serialize export report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the export report failed.
    #[error("failed to write export report: {0}")]
    WriteReport(#[source] std::io::Error),
}
