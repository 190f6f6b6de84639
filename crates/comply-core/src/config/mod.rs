//! Configuration: one `#[serde(default)]` struct per section, aggregated by
//! [`ComplyConfig`].

pub mod comply_config;
pub mod detection_config;
pub mod layout_config;
pub mod ledger_config;
pub mod neutralizer_config;
pub mod pipeline_config;
pub mod redaction_config;
pub mod scoring_config;

pub use comply_config::{ComplyConfig, ConfigOverrides};
pub use detection_config::DetectionConfig;
pub use layout_config::LayoutConfig;
pub use ledger_config::LedgerConfig;
pub use neutralizer_config::NeutralizerConfig;
pub use pipeline_config::PipelineConfig;
pub use redaction_config::RedactionConfig;
pub use scoring_config::ScoringConfig;

/// Copy every `Some`/non-empty field of `$other` over `$base`.
macro_rules! merge_fields {
    ($base:expr, $other:expr; opt: [$($opt:ident),* $(,)?]; coll: [$($coll:ident),* $(,)?]) => {
        $(
            if $other.$opt.is_some() {
                $base.$opt = $other.$opt.clone();
            }
        )*
        $(
            if !$other.$coll.is_empty() {
                $base.$coll = $other.$coll.clone();
            }
        )*
    };
}
pub(crate) use merge_fields;

/// Fail validation unless an optional ratio lies within [0.0, 1.0].
pub(crate) fn check_unit_interval(
    field: &str,
    value: Option<f64>,
) -> Result<(), crate::errors::ConfigError> {
    if let Some(v) = value {
        if !(0.0..=1.0).contains(&v) {
            return Err(crate::errors::ConfigError::ValidationFailed {
                field: field.to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
    }
    Ok(())
}

/// Fail validation unless an optional value is finite and non-negative.
pub(crate) fn check_non_negative(
    field: &str,
    value: Option<f64>,
) -> Result<(), crate::errors::ConfigError> {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            return Err(crate::errors::ConfigError::ValidationFailed {
                field: field.to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
    }
    Ok(())
}
