//! Human-readable progress reporting.
//!
//! The crawl reports what it is doing as single lines of text. Where those
//! lines end up is the caller's business: the CLI draws them above a spinner,
//! a GUI host can append them to a log pane, tests collect them in a `Vec`.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

/// Receiver for progress lines.
pub trait ProgressSink: Send + Sync {
    /// Accepts one line of progress text.
    fn line(&self, text: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn line(&self, text: &str) {
        self(text);
    }
}

/// Sink that forwards lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn line(&self, text: &str) {
        info!(target: "harvest_core::progress", "{text}");
    }
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the lines received so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl ProgressSink for MemorySink {
    fn line(&self, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.to_string());
        }
    }
}

/// Progress milestones of a crawl, rendered to text through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A listing page is about to be fetched.
    PageFetching { page: u32 },
    /// A listing page yielded `found` new trainers with articles.
    PageParsed { page: u32, found: usize },
    /// Listing discovery finished.
    ListingDone { trainers: usize },
    /// Work on a trainer started.
    TrainerStarted {
        index: usize,
        total: usize,
        name: String,
        rank: u32,
    },
    /// A creature was added to the current trainer.
    CreatureAdded { name: String },
    /// A creature reference could not be resolved.
    CreatureFailed { creature_ref: String },
    /// Work on a trainer finished.
    TrainerFinished {
        index: usize,
        total: usize,
        creatures: usize,
    },
    /// A checkpoint was written.
    CheckpointSaved { records: usize },
    /// Cancellation was observed.
    Cancelled,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageFetching { page } => write!(f, "Fetching page {page} of trainer list..."),
            Self::PageParsed { page, found } => {
                write!(f, "Page {page}: found {found} trainers with articles")
            }
            Self::ListingDone { trainers } => {
                write!(f, "Found {trainers} trainers with build articles")
            }
            Self::TrainerStarted {
                index,
                total,
                name,
                rank,
            } => write!(f, "Processing trainer {index}/{total}: {name} (Rank {rank})"),
            Self::CreatureAdded { name } => write!(f, "  Added {name}"),
            Self::CreatureFailed { creature_ref } => {
                write!(f, "  Failed to get data for {creature_ref}")
            }
            Self::TrainerFinished {
                index,
                total,
                creatures,
            } => write!(f, "Finished trainer {index}/{total} ({creatures} creatures)"),
            Self::CheckpointSaved { records } => {
                write!(f, "Checkpoint saved ({records} trainers)")
            }
            Self::Cancelled => write!(f, "Stop requested, saving collected data"),
        }
    }
}

/// Renders `event` and hands the line to `sink`.
pub fn report(sink: &dyn ProgressSink, event: &ProgressEvent) {
    sink.line(&event.to_string());
}
