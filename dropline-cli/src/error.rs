//! Error types emitted by the dropline CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dropline_core::{RouteError, SequenceError};
use thiserror::Error;

/// Errors emitted by the dropline CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// Only one half of the start coordinate was supplied.
    #[error("--{given} was set without --{missing}; give both or neither")]
    IncompleteStart {
        given: &'static str,
        missing: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the stop manifest failed.
    #[error("failed to open stop manifest at {path:?}: {source}")]
    OpenRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the stop manifest failed.
    #[error("failed to read stop manifest at {path:?}: {source}")]
    ReadRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The stop manifest could not be decoded.
    #[error("failed to parse stop manifest JSON at {path:?}: {field}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        /// Location of the offending value, e.g. `stops[0].lat`.
        field: String,
        #[source]
        source: serde_json::Error,
    },
    /// The sequencer rejected the request.
    #[error("sequencing failed: {source}")]
    Sequence {
        #[source]
        source: SequenceError,
    },
    /// Building the directions link failed.
    #[error("failed to build directions URL: {0}")]
    DirectionsUrl(#[from] RouteError),
    /// Serializing the sequenced route failed.
    #[error("failed to serialize route: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the sequenced route failed.
    #[error("failed to write route: {0}")]
    WriteOutput(#[source] std::io::Error),
}
