use thiserror::Error;

/// Domain errors for the review wizard and the persistence layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Unknown section key from the frontend. Should never happen with a
    /// correctly enumerated section list; fail fast.
    #[error("unknown review section '{0}'")]
    InvalidSection(String),

    /// Submit attempted before every sensory section was scored.
    /// Carries the missing section names in step order so the UI can
    /// highlight them.
    #[error("review is incomplete, missing sections: {}", .0.join(", "))]
    IncompleteReview(Vec<String>),

    /// Rejected by the persistence layer: out-of-range value, empty required
    /// field, or a reference to a coffee/cafe that does not exist.
    #[error("validation failed: {0}")]
    Validation(String),
}
