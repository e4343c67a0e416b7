//! Errors that abort a harvest run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fetch::FetchError;

/// Run-level failures. Per-trainer and per-creature problems never surface
/// here; they degrade the affected record instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The output file cannot be placed where requested.
    #[error("output destination {path} is unusable: {reason}")]
    OutputDestination { path: PathBuf, reason: String },

    /// Discovery finished without a single trainer and nobody asked to stop.
    #[error("no trainers with build articles were found")]
    NoTrainers,

    /// The final snapshot could not be written.
    #[error("failed to write snapshot to {path}")]
    Checkpoint {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The HTTP client could not be built.
    #[error("failed to set up HTTP client")]
    Client {
        #[source]
        source: FetchError,
    },

    /// An existing output file could not be read for resuming.
    #[error("failed to read {path} for resume")]
    ResumeRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An existing output file is not a valid snapshot.
    #[error("{path} is not a valid snapshot; refusing to overwrite it")]
    ResumeParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HarvestError {
    pub fn output_destination(path: &Path, reason: impl Into<String>) -> Self {
        Self::OutputDestination {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn checkpoint(path: &Path, source: io::Error) -> Self {
        Self::Checkpoint {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn client(source: FetchError) -> Self {
        Self::Client { source }
    }
}
