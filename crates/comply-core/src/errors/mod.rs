//! Error handling for Comply.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod extraction_error;
pub mod neutralizer_error;
pub mod pipeline_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::ComplyErrorCode;
pub use extraction_error::ExtractionError;
pub use neutralizer_error::NeutralizerError;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;
