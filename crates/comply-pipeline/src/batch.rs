//! Batch runner: documents fan out over the pipeline's rayon pool.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use comply_core::errors::PipelineError;
use comply_core::models::SessionSummary;
use comply_core::tracing_setup::events;
use comply_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;
use serde::Serialize;

use crate::document::ComplyPipeline;
use crate::report::DocumentReport;

/// Results of one batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub session_id: String,
    pub documents: Vec<DocumentReport>,
    /// Inputs never started because the batch was cancelled.
    pub not_started: Vec<String>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.documents.iter().filter(|d| d.is_processed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.documents.iter().filter(|d| d.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.documents.iter().filter(|d| d.is_failed()).count()
    }

    pub fn was_cancelled(&self) -> bool {
        !self.not_started.is_empty()
    }
}

/// Stops scheduling when the caller cancels or a worker hits a fatal error.
struct StopSignal<'a> {
    cancel: &'a CancellationToken,
    aborted: AtomicBool,
}

impl Cancellable for StopSignal<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.aborted.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }
}

impl ComplyPipeline {
    /// Process `paths` with the configured worker count under a fresh
    /// session id. A session summary row follows each processed document's
    /// records.
    ///
    /// A ledger failure aborts the batch and is returned; documents already
    /// running finish their current stage and are discarded.
    pub fn run_batch(
        &self,
        paths: &[PathBuf],
        cancel: &CancellationToken,
    ) -> Result<BatchReport, PipelineError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let span = comply_core::batch_span!(session_id.as_str(), paths.len());
        let _entered = span.enter();

        let stop = StopSignal {
            cancel,
            aborted: AtomicBool::new(false),
        };

        let results: Vec<Result<Option<DocumentReport>, PipelineError>> = self.threads.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    span.in_scope(|| {
                        if stop.is_cancelled() {
                            return Ok(None);
                        }
                        let outcome = self
                            .process_document(path, &stop)
                            .and_then(|report| self.write_summary(&session_id, report));
                        if outcome.is_err() {
                            stop.cancel();
                        }
                        outcome.map(Some)
                    })
                })
                .collect()
        });

        let mut documents = Vec::with_capacity(paths.len());
        let mut not_started = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result? {
                Some(report) => documents.push(report),
                None => not_started.push(path.display().to_string()),
            }
        }

        let report = BatchReport {
            session_id,
            documents,
            not_started,
        };
        if report.was_cancelled() {
            tracing::warn!(
                session_id = %report.session_id,
                not_started = report.not_started.len(),
                "batch cancelled"
            );
        }
        events::batch_completed(
            &report.session_id,
            report.processed(),
            report.skipped(),
            report.failed(),
        );
        Ok(report)
    }

    fn write_summary(&self, session_id: &str, report: DocumentReport) -> Result<DocumentReport, PipelineError> {
        // Only processed documents carry a score.
        if let Some(score) = report.score.as_ref() {
            let summary = SessionSummary::new(
                session_id,
                &report.filepath,
                report.pii_count,
                report.rewrite_count,
                score,
            );
            self.ledger.write_session_summary(&summary)?;
        }
        Ok(report)
    }
}
