use thiserror::Error;

/// Why a gene set cannot be scored against a given matrix.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    #[error("no member of the set is present in the matrix")]
    NoMembers,
    #[error("every gene of the matrix is a member of the set")]
    AllMembers,
    #[error("member weights rank^alpha sum to zero or overflow")]
    NonFiniteWeights,
}

/// Errors raised by the enrichment engine.
///
/// Engine entry points return `anyhow::Result`; match on this type with
/// `err.downcast_ref::<EnrichmentError>()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnrichmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("gene set '{name}' is degenerate: {reason}")]
    DegenerateGeneSet {
        name: String,
        reason: DegenerateReason,
    },
    #[error("cannot normalize scores, every finite score equals {value}")]
    DegenerateNormalization { value: f64 },
}

impl EnrichmentError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EnrichmentError::InvalidInput(msg.into())
    }
}
