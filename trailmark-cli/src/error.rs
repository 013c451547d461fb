//! Error types emitted by the Trailmark CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use trailmark_core::CoordinateError;
use trailmark_data::{CatalogLoadError, GemStoreError};

/// Errors emitted by the Trailmark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the target catalog failed.
    #[error(transparent)]
    LoadCatalog(#[from] CatalogLoadError),
    /// Reading, updating or writing the gem store failed.
    #[error(transparent)]
    GemStore(#[from] GemStoreError),
    /// A coordinate argument was out of range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    /// The radius argument was not a positive finite number.
    #[error("radius must be a positive number of metres, got {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// Reading interactive input failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
