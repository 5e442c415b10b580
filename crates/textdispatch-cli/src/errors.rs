//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use textdispatch_core::{CodecError, CompileError};
use textdispatch_demos::{BrainFError, ForthError, ShowcaseError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("bf needs a program: pass a FILE or --code")]
    MissingProgram,
    #[error("failed to read program '{path}': {source}")]
    ReadProgram {
        path: Utf8PathBuf,
        source: Arc<io::Error>,
    },
    #[error("brainf: {0}")]
    BrainF(#[from] BrainFError),
    #[error("forth: {0}")]
    Forth(#[from] ForthError),
    #[error("showcase: {0}")]
    Showcase(#[from] ShowcaseError),
    #[error("failed to compile handler: {0}")]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("failed to serialise output: {0}")]
    Serialise(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] io::Error),
}
