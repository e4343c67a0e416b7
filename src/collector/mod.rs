//! Sequential harvest with periodic snapshots.
//!
//! The [`Collector`] discovers trainers through the listing, fetches each
//! build article once, extracts every visible team member from it and
//! appends the result to an in-memory list. The whole list is written to the
//! output file every [`HarvestConfig::checkpoint_interval`] trainers and
//! once more at the end, so an interrupted run loses at most one interval of
//! work.
//!
//! Cancellation is cooperative. The token is checked before every listing
//! page and before every trainer; once it fires, no new request is issued,
//! the collected records are flushed and the run returns normally.

mod checkpoint;
mod error;

pub use checkpoint::{load_snapshot, render_snapshot, temp_path, validate_destination, write_snapshot};
pub use error::HarvestError;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::config::HarvestConfig;
use crate::extract::{Extractor, article_blocks};
use crate::fetch::{PageFetcher, fetch_with_retry};
use crate::listing::{Paginator, StopReason};
use crate::model::{TrainerRecord, TrainerStub};
use crate::progress::{ProgressEvent, ProgressSink, report};

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Trainers found by the listing (before `max_trainers` truncation).
    pub discovered: usize,
    /// Records carried over from an existing output file.
    pub resumed: usize,
    /// Discovered trainers skipped because a resumed record already covers them.
    pub skipped: usize,
    /// Trainers processed in this run.
    pub processed: usize,
    /// Creatures added in this run.
    pub creatures: usize,
    /// Articles that could not be fetched.
    pub failed_articles: usize,
    /// References dropped because no name could be assigned.
    pub failed_creatures: usize,
    /// Whether the run stopped on cancellation.
    pub cancelled: bool,
}

/// Records and totals of a finished run.
#[derive(Debug, Clone)]
pub struct Harvest {
    /// Every record written to the output file, resumed ones first.
    pub records: Vec<TrainerRecord>,
    pub summary: HarvestSummary,
}

/// Drives a complete harvest.
pub struct Collector<'a> {
    fetcher: &'a dyn PageFetcher,
    extractor: Extractor,
    config: &'a HarvestConfig,
    progress: &'a dyn ProgressSink,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        extractor: Extractor,
        config: &'a HarvestConfig,
        progress: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
            progress,
        }
    }

    /// Runs discovery and collection, writing snapshots along the way.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::OutputDestination`] before any request if the output
    ///   path cannot hold a file.
    /// - [`HarvestError::ResumeRead`] / [`HarvestError::ResumeParse`] when
    ///   resuming from an unreadable file.
    /// - [`HarvestError::NoTrainers`] if discovery found nothing and the run
    ///   was not cancelled.
    /// - [`HarvestError::Checkpoint`] if the final snapshot cannot be written.
    #[instrument(skip_all, fields(output = %self.config.output_path.display()))]
    pub async fn run(&self, cancel: &CancellationToken) -> Result<Harvest, HarvestError> {
        let config = self.config;
        validate_destination(&config.output_path)?;

        let mut records = if config.resume {
            let existing = load_snapshot(&config.output_path).await?;
            info!(records = existing.len(), "resuming from existing output");
            existing
        } else {
            Vec::new()
        };
        let mut summary = HarvestSummary {
            resumed: records.len(),
            ..HarvestSummary::default()
        };

        let discovery = Paginator::new(self.fetcher, &config.base_url, config.listing, self.progress)
            .list_trainers_with_articles(&config.query, cancel)
            .await;
        summary.discovered = discovery.stubs.len();
        summary.cancelled = discovery.stop == StopReason::Cancelled;

        if discovery.stubs.is_empty() && !cancel.is_cancelled() {
            return Err(HarvestError::NoTrainers);
        }

        let mut stubs = discovery.stubs;
        if let Some(max) = config.max_trainers {
            stubs.truncate(max);
        }
        let considered = stubs.len();
        let pending: Vec<TrainerStub> = stubs
            .into_iter()
            .filter(|stub| !records.iter().any(|record| stub.matches(record)))
            .collect();
        summary.skipped = considered - pending.len();
        if summary.skipped > 0 {
            info!(skipped = summary.skipped, "trainers already present in output");
        }

        let total = pending.len();
        for (position, stub) in pending.iter().enumerate() {
            if cancel.is_cancelled() {
                report(self.progress, &ProgressEvent::Cancelled);
                info!(processed = summary.processed, total, "harvest cancelled");
                summary.cancelled = true;
                break;
            }

            let index = position + 1;
            report(
                self.progress,
                &ProgressEvent::TrainerStarted {
                    index,
                    total,
                    name: stub.trainer_name.clone(),
                    rank: stub.rank,
                },
            );

            let record = self.collect_trainer(stub, &mut summary).await;
            report(
                self.progress,
                &ProgressEvent::TrainerFinished {
                    index,
                    total,
                    creatures: record.pokemon.len(),
                },
            );
            records.push(record);
            summary.processed += 1;

            if config.checkpoint_interval > 0 && summary.processed % config.checkpoint_interval == 0 {
                match write_snapshot(&config.output_path, &records).await {
                    Ok(()) => report(
                        self.progress,
                        &ProgressEvent::CheckpointSaved {
                            records: records.len(),
                        },
                    ),
                    Err(error) => warn!(
                        error = %error,
                        records = records.len(),
                        "checkpoint write failed, continuing"
                    ),
                }
            }
        }

        write_snapshot(&config.output_path, &records)
            .await
            .map_err(|source| HarvestError::checkpoint(&config.output_path, source))?;
        report(
            self.progress,
            &ProgressEvent::CheckpointSaved {
                records: records.len(),
            },
        );

        info!(
            trainers = records.len(),
            processed = summary.processed,
            creatures = summary.creatures,
            failed_articles = summary.failed_articles,
            failed_creatures = summary.failed_creatures,
            skipped = summary.skipped,
            cancelled = summary.cancelled,
            "harvest finished"
        );

        Ok(Harvest { records, summary })
    }

    /// Builds the record for one trainer. Never fails: an unreachable article
    /// yields a record with an empty team.
    #[instrument(skip_all, fields(rank = stub.rank, url = %stub.article_url))]
    async fn collect_trainer(&self, stub: &TrainerStub, summary: &mut HarvestSummary) -> TrainerRecord {
        let mut record = TrainerRecord::from_stub(stub);

        let html = match fetch_with_retry(self.fetcher, &self.config.retry, &stub.article_url).await {
            Ok(html) => html,
            Err(error) => {
                warn!(error = %error, "article fetch failed, keeping trainer without team");
                summary.failed_articles += 1;
                return record;
            }
        };

        let blocks = article_blocks(&html);
        for creature_ref in &stub.creature_refs {
            let creature = self.extractor.extract_from_blocks(&blocks, creature_ref);
            if creature.name.trim().is_empty() {
                warn!(creature_ref = %creature_ref, "no name for creature reference, dropping");
                summary.failed_creatures += 1;
                report(
                    self.progress,
                    &ProgressEvent::CreatureFailed {
                        creature_ref: creature_ref.clone(),
                    },
                );
                continue;
            }

            report(
                self.progress,
                &ProgressEvent::CreatureAdded {
                    name: creature.name.clone(),
                },
            );
            summary.creatures += 1;
            record.pokemon.push(creature);
        }

        record
    }
}
