use crate::{FormId, TemplateError};

/// Failure to load a form for an attempt. Fatal to that engine instance.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No form with this id exists in the catalog.
    #[error("Form {0} not found")]
    NotFound(FormId),

    /// The template exists but violates a structural invariant.
    #[error("Form {form_id} is malformed: {source}")]
    Malformed {
        form_id: FormId,
        #[source]
        source: TemplateError,
    },

    /// An earlier load of this engine already failed. The engine stays blocked.
    #[error("Form {0} failed to load earlier")]
    PreviouslyFailed(FormId),

    /// The catalog could not be reached (I/O, parse failure, etc.)
    #[error("Form catalog unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

impl LoadError {
    /// Create an unavailable error from any error type.
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(err.into())
    }

    /// Check if this error means the form does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Failure to hand a completed attempt to the submission sink.
///
/// Always recoverable: the attempt stays on its last section with answers
/// intact and can be retried.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The sink could not be reached or timed out.
    #[error("Submission service unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),

    /// The sink refused the submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

impl SubmissionError {
    /// Create an unavailable error from any error type.
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(err.into())
    }

    /// Check if this error is a rejection by the sink.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
