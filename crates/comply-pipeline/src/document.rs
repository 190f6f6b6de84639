//! Per-document processing.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use comply_core::config::ComplyConfig;
use comply_core::errors::{ComplyErrorCode, DetectionError, PipelineError};
use comply_core::models::{
    AuditRecord, DocumentLayout, EventCode, Hit, HitSet, HitSource, PendingReview, Tier3Event,
    UpsertOutcome,
};
use comply_core::tracing_setup::events;
use comply_core::traits::{Cancellable, DocumentExtractor, LedgerStore};
use comply_detection::{
    merge, ManualOverrides, MergeOutcome, RecognizerAdapter, RecognizerPool, RedactionActuator,
    Tier1Scanner,
};
use comply_layout::LayoutSegmenter;
use comply_neutralizer::{NeutralizationOutcome, Neutralizer};
use comply_scoring::{ScoreInputs, TrustScorer};

use crate::degradation::{DegradationEvent, DegradationTracker, TrackedDegradation};
use crate::report::{DocumentReport, DocumentStatus};

/// Component name used for recognizer degradations.
pub const RECOGNIZER_COMPONENT: &str = "recognizer";

/// Explicitly constructed pipeline context. Immutable after construction
/// except for the degradation tracker; shared by all workers.
pub struct ComplyPipeline {
    pub(crate) config: ComplyConfig,
    pub(crate) segmenter: LayoutSegmenter,
    pub(crate) scanner: Tier1Scanner,
    pub(crate) manual: ManualOverrides,
    pub(crate) adapter: RecognizerAdapter,
    pub(crate) recognizers: Option<RecognizerPool>,
    pub(crate) recognizer_enabled: bool,
    pub(crate) actuator: RedactionActuator,
    pub(crate) neutralizer: Neutralizer,
    pub(crate) scorer: TrustScorer,
    pub(crate) extractor: Arc<dyn DocumentExtractor>,
    pub(crate) ledger: Arc<dyn LedgerStore>,
    pub(crate) degradation: Mutex<DegradationTracker>,
    pub(crate) threads: rayon::ThreadPool,
}

/// Everything a successful run produced, before it is persisted.
struct ProcessedDocument {
    layout: DocumentLayout,
    merged: MergeOutcome,
    neutralized: NeutralizationOutcome,
    degraded: bool,
    records: Vec<AuditRecord>,
}

/// Tier-2 result for one document.
enum Tier2 {
    Hits(Vec<Hit>),
    Disabled,
    Degraded(String),
}

impl ComplyPipeline {
    pub fn config(&self) -> &ComplyConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    /// Snapshot of recorded degradations.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradation
            .lock()
            .map(|t| t.events().to_vec())
            .unwrap_or_default()
    }

    /// Process one document and persist its records.
    ///
    /// Unsupported inputs are skipped and recoverable failures are reported
    /// in the returned `DocumentReport`, each with a single audit record.
    /// Only a ledger failure is returned as `Err`.
    pub fn process_document(
        &self,
        path: &Path,
        cancel: &dyn Cancellable,
    ) -> Result<DocumentReport, PipelineError> {
        let filepath = path.display().to_string();
        let _span = comply_core::document_span!(filepath.as_str()).entered();

        if let Some(reason) = self.unsupported_reason(path) {
            events::document_skipped(&filepath, &reason);
            let record = AuditRecord::new(&filepath, EventCode::Skipped, None, 1.0, reason.clone());
            self.ledger.append_audit_records(&[record])?;
            return Ok(DocumentReport::skipped(&filepath, reason));
        }

        match self.run_stages(path, &filepath, cancel) {
            Ok(doc) => self.persist(&filepath, doc),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                let code = e.error_code();
                let message = e.to_string();
                events::document_failed(&filepath, code, &message);
                let record = AuditRecord::new(
                    &filepath,
                    EventCode::Failed,
                    None,
                    0.0,
                    format!("{code}: {message}"),
                );
                self.ledger.append_audit_records(&[record])?;
                Ok(DocumentReport::failed(&filepath, code, message))
            }
        }
    }

    fn unsupported_reason(&self, path: &Path) -> Option<String> {
        let accepted = self.config.pipeline.effective_accepted_extensions();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension {
            Some(ext) if accepted.contains(&ext) => None,
            Some(ext) => Some(format!("unsupported extension .{ext}")),
            None => Some("missing file extension".to_string()),
        }
    }

    fn run_stages(
        &self,
        path: &Path,
        filepath: &str,
        cancel: &dyn Cancellable,
    ) -> Result<ProcessedDocument, PipelineError> {
        let checkpoint = || {
            if cancel.is_cancelled() {
                Err(PipelineError::Cancelled)
            } else {
                Ok(())
            }
        };
        let mut records = Vec::new();

        checkpoint()?;
        let pages = self.extractor.extract_pages(path)?;

        checkpoint()?;
        let layout = {
            let _stage = comply_core::stage_span!("layout").entered();
            self.segmenter.segment_document(&pages)
        };
        for (idx, page) in layout.pages.iter().enumerate() {
            records.push(AuditRecord::new(
                filepath,
                EventCode::LayoutAnalysis,
                None,
                page.confidence,
                format!(
                    "page {}: strategy={} jumps={}",
                    idx + 1,
                    page.strategy,
                    page.jumps
                ),
            ));
        }
        if layout.pages.is_empty() {
            records.push(AuditRecord::new(
                filepath,
                EventCode::LayoutAnalysis,
                None,
                layout.confidence,
                "no pages",
            ));
        }
        let text = layout.content.as_str();

        checkpoint()?;
        let tier1 = {
            let _stage = comply_core::stage_span!("tier1").entered();
            self.scanner.scan(text)
        };
        let manual = self.manual.scan(text);

        checkpoint()?;
        let tier2 = self.run_tier2(text, filepath);
        let degraded = matches!(tier2, Tier2::Degraded(_));
        if let Tier2::Degraded(reason) = &tier2 {
            records.push(AuditRecord::new(
                filepath,
                EventCode::RecognizerDegraded,
                None,
                self.config.detection.effective_degraded_confidence_cap(),
                format!("tier-1 only: {reason}"),
            ));
        }

        // Insertion order breaks merge ties: manual, then Tier-1, then Tier-2.
        let mut hits = HitSet::new(text);
        for hit in manual.into_iter().chain(tier1) {
            hits.push(hit);
        }
        if let Tier2::Hits(found) = tier2 {
            for hit in found {
                hits.push(hit);
            }
        }

        checkpoint()?;
        let merged = {
            let _stage = comply_core::stage_span!("merge").entered();
            merge(text, hits)?
        };
        push_detection_records(&mut records, filepath, text, &merged);

        checkpoint()?;
        let redacted = self.actuator.redact(text, &merged.resolved)?;

        checkpoint()?;
        let neutralized = {
            let _stage = comply_core::stage_span!("tier3").entered();
            self.neutralizer.neutralize(&redacted, filepath)?
        };
        push_tier3_records(&mut records, filepath, &neutralized);

        checkpoint()?;
        Ok(ProcessedDocument {
            layout,
            merged,
            neutralized,
            degraded,
            records,
        })
    }

    fn run_tier2(&self, text: &str, filepath: &str) -> Tier2 {
        if !self.recognizer_enabled {
            return Tier2::Disabled;
        }
        let _stage = comply_core::stage_span!("tier2").entered();
        let result = match &self.recognizers {
            Some(pool) => pool.with_recognizer(|r| self.adapter.detect(r, text)),
            None => Err(DetectionError::RecognizerUnavailable {
                recognizer: RECOGNIZER_COMPONENT.to_string(),
                reason: "no recognizer configured".to_string(),
            }),
        };

        match result {
            Ok(hits) => {
                if let Ok(mut tracker) = self.degradation.lock() {
                    tracker.mark_recovered(RECOGNIZER_COMPONENT);
                }
                Tier2::Hits(hits)
            }
            Err(e) => {
                let failure = e.to_string();
                if let Ok(mut tracker) = self.degradation.lock() {
                    tracker.record(
                        DegradationEvent {
                            component: RECOGNIZER_COMPONENT.to_string(),
                            failure: failure.clone(),
                            fallback_used: "tier1_only".to_string(),
                            filepath: filepath.to_string(),
                            timestamp: Utc::now(),
                        },
                        self.config.detection.effective_degraded_confidence_cap(),
                    );
                }
                Tier2::Degraded(failure)
            }
        }
    }

    fn persist(&self, filepath: &str, doc: ProcessedDocument) -> Result<DocumentReport, PipelineError> {
        let score = self.scorer.score(&ScoreInputs {
            layout_confidence: doc.layout.confidence,
            detection_floor: doc.merged.resolved.min_confidence(),
            neutralization_floor: Some(doc.neutralized.confidence_floor()),
            recognizer_degraded: doc.degraded,
        });

        let review = PendingReview::new(filepath, doc.layout.content, doc.neutralized.text.as_str());
        let outcome = self.ledger.record_document(&doc.records, Some(&review))?;
        if outcome == Some(UpsertOutcome::Locked) {
            tracing::info!(filepath = %filepath, "document already approved; review row left unchanged");
        }

        let report = DocumentReport {
            filepath: filepath.to_string(),
            status: DocumentStatus::Processed,
            pii_count: doc.merged.resolved.len(),
            conflict_count: doc.merged.conflicts.len(),
            rewrite_count: doc.neutralized.rewrite_count(),
            flag_count: doc.neutralized.flag_count(),
            degraded: doc.degraded,
            score: Some(score),
            review: outcome,
            final_text: Some(doc.neutralized.text),
        };
        events::document_processed(
            filepath,
            report.pii_count,
            report.rewrite_count,
            score.trust_score,
            score.grade.as_str(),
        );
        Ok(report)
    }
}

fn detection_code(source: HitSource) -> EventCode {
    match source {
        HitSource::Regex => EventCode::RegexDetection,
        HitSource::Recognizer => EventCode::RecognizerDetection,
        HitSource::Manual => EventCode::ManualOverride,
    }
}

/// One record per accepted hit in text order, then one per conflict.
fn push_detection_records(
    records: &mut Vec<AuditRecord>,
    filepath: &str,
    text: &str,
    merged: &MergeOutcome,
) {
    for hit in merged.resolved.iter() {
        records.push(AuditRecord::new(
            filepath,
            detection_code(hit.source),
            hit.slice(text),
            hit.confidence,
            format!("{} at {}..{}", hit.label, hit.start, hit.end),
        ));
    }
    for conflict in &merged.conflicts {
        let loser = &conflict.loser;
        records.push(AuditRecord::new(
            filepath,
            EventCode::MergeConflict,
            loser.slice(text),
            loser.confidence,
            format!(
                "{} ({}) at {}..{} rejected for {} at {}..{}",
                loser.label,
                loser.source.as_str(),
                loser.start,
                loser.end,
                conflict.winner_label,
                conflict.winner_start,
                conflict.winner_end
            ),
        ));
    }
}

fn push_tier3_records(records: &mut Vec<AuditRecord>, filepath: &str, outcome: &NeutralizationOutcome) {
    for event in &outcome.events {
        let record = match event {
            Tier3Event::Neutralized(e) => AuditRecord::new(
                filepath,
                EventCode::Neutralization,
                Some(&e.matched_text),
                e.confidence,
                format!("{} -> {}", e.rule_kind.as_str(), e.replacement),
            ),
            Tier3Event::Flagged(f) => AuditRecord::new(
                filepath,
                EventCode::ComplianceFlag,
                Some(&f.term),
                f.confidence,
                format!("gendered term at {}..{}", f.start, f.end),
            ),
            Tier3Event::NoAction => {
                AuditRecord::new(filepath, EventCode::NoAction, None, 1.0, "no gendered terms")
            }
        };
        records.push(record);
    }
}
