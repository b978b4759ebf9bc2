use thiserror::Error;

pub type HydrateResult<T> = Result<T, HydrateError>;

#[derive(Debug, Error)]
pub enum HydrateError {
    #[error("chart `{id}` has an unsupported kind")]
    UnsupportedKind { id: String },

    #[error("invalid inline options for chart `{id}`: {reason}")]
    InvalidOptions { id: String, reason: String },

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Non-fatal render-pass findings. Nothing in the pipeline escapes as an
/// error to the host; everything lands here (and in the trace log) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    ResolutionMiss,
    InvalidOptions,
    NestedPlaceholder,
    MountFailure,
    TeardownAnomaly,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub chart_id: String,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, chart_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            chart_id: chart_id.to_string(),
            message: message.into(),
        }
    }
}
