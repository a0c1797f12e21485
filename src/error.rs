use thiserror::Error;

/// Failures surfaced by the maintenance core. All of them propagate to the
/// caller unchanged; the core never retries and never substitutes defaults
/// for broken operational data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaintenanceError {
    #[error("unknown check type `{0}`, expected one of A, B, C, D")]
    UnknownCheckType(String),

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
