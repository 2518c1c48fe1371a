use thiserror::Error;

/// Pipeline-level error type.
///
/// The embedding server maps these onto HTTP responses; this crate only
/// guarantees a small stable set of machine-readable codes distinguishing
/// bad input from upstream extraction trouble from internal faults.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unsupported media tag. Rejected before any extraction call is issued.
    #[error("Unsupported source type: {0}")]
    InvalidSourceType(String),

    /// The referenced existing resume is absent or not owned by the caller.
    /// Rejected before any extraction call is issued.
    #[error("Source resume not found: {0}")]
    SourceNotFound(String),

    /// Provider error, timeout, or schema mismatch after provider retries.
    /// The whole invocation aborts; the caller may re-invoke from scratch.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// A transformer produced a patch that does not merge into a valid
    /// document. Programming-error class — logged and surfaced, never
    /// silently patched.
    #[error("Merge invariant violated: {0}")]
    MergeInvariant(String),

    /// Store failures and other faults with no user-actionable cause.
    #[error("Internal pipeline error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PipelineError {
    /// Stable error code for the embedding layer's response mapping.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InvalidSourceType(_) => "INVALID_SOURCE_TYPE",
            PipelineError::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            PipelineError::Extraction(_) => "EXTRACTION_FAILURE",
            PipelineError::MergeInvariant(_) => "MERGE_INVARIANT",
            PipelineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether re-invoking the same request can reasonably succeed.
    /// Extraction is non-deterministic and provider outages are transient;
    /// bad input and internal faults are not retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::Extraction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            PipelineError::InvalidSourceType("gif".into()).code(),
            "INVALID_SOURCE_TYPE"
        );
        assert_eq!(
            PipelineError::SourceNotFound("abc".into()).code(),
            "SOURCE_NOT_FOUND"
        );
        assert_eq!(
            PipelineError::Extraction("timeout".into()).code(),
            "EXTRACTION_FAILURE"
        );
        assert_eq!(
            PipelineError::MergeInvariant("bad patch".into()).code(),
            "MERGE_INVARIANT"
        );
        assert_eq!(
            PipelineError::Internal(anyhow::anyhow!("boom")).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_only_extraction_is_retryable() {
        assert!(PipelineError::Extraction("503".into()).is_retryable());
        assert!(!PipelineError::InvalidSourceType("gif".into()).is_retryable());
        assert!(!PipelineError::SourceNotFound("abc".into()).is_retryable());
        assert!(!PipelineError::MergeInvariant("x".into()).is_retryable());
        assert!(!PipelineError::Internal(anyhow::anyhow!("boom")).is_retryable());
    }
}
