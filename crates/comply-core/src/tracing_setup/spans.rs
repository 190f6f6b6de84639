//! Span definitions per operation: document, stage, batch, approval.

/// Create a per-document span.
#[macro_export]
macro_rules! document_span {
    ($filepath:expr) => {
        tracing::info_span!("comply.document", filepath = %$filepath)
    };
}

/// Create a pipeline stage span inside a document span.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr) => {
        tracing::debug_span!("comply.stage", stage = %$stage)
    };
}

/// Create a batch span.
#[macro_export]
macro_rules! batch_span {
    ($session_id:expr, $documents:expr) => {
        tracing::info_span!("comply.batch", session_id = %$session_id, documents = $documents)
    };
}

/// Create an approval span.
#[macro_export]
macro_rules! approval_span {
    ($filepath:expr) => {
        tracing::info_span!("comply.approval", filepath = %$filepath)
    };
}
