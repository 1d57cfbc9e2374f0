//! Structured error and warning values.
//!
//! Nothing in this crate unwinds past the orchestrator boundary: enumerator-level errors
//! surface through the stream and terminate it; orchestrator-level errors are collected and
//! returned alongside whatever partial results are meaningful.

/// Which construct count the caller expected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExpectedCount {
    Zero,
    ExactlyOne,
    AtLeastOne,
    Any,
}

impl ExpectedCount {
    pub fn is_satisfied_by(&self, found: usize) -> bool {
        match self {
            Self::Zero => found == 0,
            Self::ExactlyOne => found == 1,
            Self::AtLeastOne => found >= 1,
            Self::Any => true,
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("invalid input shape: {message}")]
    InvalidInputShape { message: String },

    #[error("digest failure: {message}")]
    DigestFailure { message: String },

    #[error("junction mismatch between consecutive fragments: {message}")]
    JunctionMismatch { message: String },

    #[error("expected {expected:?} constructs, found {found}")]
    ExpectedConstructCountViolation {
        expected: ExpectedCount,
        found: usize,
    },

    #[error("adapter ambiguity: {message}")]
    AdapterAmbiguity { message: String },

    #[error("randomization staled after {cutoff} consecutive duplicate cycles")]
    RandomizationStaled { cutoff: usize },

    #[error("empty assembly: no fragments were supplied")]
    EmptyAssembly,
}

/// A non-fatal observation surfaced alongside results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    MaxConstructsReached { cap: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_count_variants_match_found() {
        assert!(ExpectedCount::Zero.is_satisfied_by(0));
        assert!(!ExpectedCount::Zero.is_satisfied_by(1));
        assert!(ExpectedCount::ExactlyOne.is_satisfied_by(1));
        assert!(!ExpectedCount::ExactlyOne.is_satisfied_by(2));
        assert!(ExpectedCount::AtLeastOne.is_satisfied_by(5));
        assert!(!ExpectedCount::AtLeastOne.is_satisfied_by(0));
        assert!(ExpectedCount::Any.is_satisfied_by(0));
        assert!(ExpectedCount::Any.is_satisfied_by(100));
    }
}
