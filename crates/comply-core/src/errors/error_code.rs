//! ComplyErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable error code string
/// that survives into audit descriptions and log fields.
pub trait ComplyErrorCode {
    /// Returns the error code string (e.g., "COORDINATE_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXTRACTION_FAILED: &str = "EXTRACTION_FAILED";
pub const INPUT_FORMAT: &str = "INPUT_FORMAT";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const COORDINATE_MISMATCH: &str = "COORDINATE_MISMATCH";
pub const RECOGNIZER_UNAVAILABLE: &str = "RECOGNIZER_UNAVAILABLE";
pub const NEUTRALIZER_ERROR: &str = "NEUTRALIZER_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CANCELLED: &str = "CANCELLED";
