//! Explicit construction of the per-worker pipeline context.

use std::sync::{Arc, Mutex};

use comply_core::config::ComplyConfig;
use comply_core::errors::{ConfigError, PipelineError};
use comply_core::models::NeutralTerm;
use comply_core::traits::{DocumentExtractor, LedgerStore, MorphAnalyzer, NeutralTermSource};
use comply_detection::{ManualOverrides, RecognizerAdapter, RecognizerPool, RedactionActuator, Tier1Scanner};
use comply_layout::LayoutSegmenter;
use comply_ledger::SqliteLedger;
use comply_neutralizer::Neutralizer;
use comply_scoring::TrustScorer;

use crate::degradation::DegradationTracker;
use crate::document::ComplyPipeline;

/// Collects collaborators and builds a [`ComplyPipeline`].
///
/// ```ignore
/// let pipeline = PipelineBuilder::new(config, Arc::new(extractor))
///     .recognizers(pool)
///     .analyzer(Arc::new(analyzer))
///     .term_source(&ledger)?
///     .ledger(Arc::new(ledger))
///     .build()?;
/// ```
pub struct PipelineBuilder {
    config: ComplyConfig,
    extractor: Arc<dyn DocumentExtractor>,
    ledger: Option<Arc<dyn LedgerStore>>,
    recognizers: Option<RecognizerPool>,
    analyzer: Option<Arc<dyn MorphAnalyzer>>,
    terms: Vec<NeutralTerm>,
}

impl PipelineBuilder {
    pub fn new(config: ComplyConfig, extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self {
            config,
            extractor,
            ledger: None,
            recognizers: None,
            analyzer: None,
            terms: Vec::new(),
        }
    }

    /// Ledger to write to. Without one, `build` opens the SQLite ledger
    /// named by `ledger.db_path`.
    pub fn ledger(mut self, ledger: Arc<dyn LedgerStore>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn recognizers(mut self, pool: RecognizerPool) -> Self {
        self.recognizers = Some(pool);
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn terms(mut self, terms: Vec<NeutralTerm>) -> Self {
        self.terms = terms;
        self
    }

    /// Load the neutral-term table now. Validation happens in `build`.
    pub fn term_source(mut self, source: &dyn NeutralTermSource) -> Result<Self, PipelineError> {
        self.terms = source.load_neutral_terms()?;
        Ok(self)
    }

    pub fn build(self) -> Result<ComplyPipeline, PipelineError> {
        let config = self.config;
        ComplyConfig::validate(&config)?;
        let scorer = TrustScorer::new(&config.scoring, &config.detection)?;
        let neutralizer = Neutralizer::new(&config.neutralizer, self.terms, self.analyzer)?;

        let ledger: Arc<dyn LedgerStore> = match self.ledger {
            Some(ledger) => ledger,
            None => Arc::new(SqliteLedger::open(&config.ledger)?),
        };

        let scanner = Tier1Scanner::new();
        for rule in scanner.unavailable_rules() {
            tracing::warn!(rule = rule, "tier-1 rule failed to compile and is disabled");
        }

        let recognizer_enabled = config.detection.effective_recognizer_enabled();
        if !recognizer_enabled {
            tracing::info!("recognizer disabled by configuration; tier-1 and manual hits only");
        } else if self.recognizers.is_none() {
            tracing::warn!("recognizer enabled but none supplied; every document will be degraded");
        }

        let workers = config.pipeline.effective_workers();
        let threads = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("comply-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "pipeline.workers".to_string(),
                message: e.to_string(),
            })?;

        Ok(ComplyPipeline {
            segmenter: LayoutSegmenter::new(config.layout.clone()),
            scanner,
            manual: ManualOverrides::from_config(&config.detection),
            adapter: RecognizerAdapter::from_config(&config.detection),
            recognizers: self.recognizers.filter(|_| recognizer_enabled),
            recognizer_enabled,
            actuator: RedactionActuator::new(config.redaction.effective_masking_mode()),
            neutralizer,
            scorer,
            extractor: self.extractor,
            ledger,
            degradation: Mutex::new(DegradationTracker::new()),
            threads,
            config,
        })
    }
}
