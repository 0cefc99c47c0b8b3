//! Error values reported by the automaton registry and lookahead engine.

use thiserror::Error;

/// Failures surfaced by automaton construction and lookahead queries.
///
/// Both kinds are fatal to the call that reports them: an `InvalidState`
/// means the caller supplied a bad index, and `Malformed` means the automaton
/// itself violates an invariant the runtime depends on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AtnError {
    /// A state number was outside `[0, count)` or named an emptied slot.
    #[error("invalid state number {number} (automaton has {count} state slots)")]
    InvalidState {
        /// The number that was requested.
        number: isize,
        /// Number of state slots in the automaton, holes included.
        count: usize,
    },

    /// The automaton's structure is inconsistent at the given state.
    #[error("malformed automaton at state {state}: {reason}")]
    Malformed {
        /// State at which the problem was detected.
        state: usize,
        /// Short description of the violated invariant.
        reason: &'static str,
    },
}

impl AtnError {
    pub(crate) fn invalid_state(number: usize, count: usize) -> Self {
        AtnError::InvalidState{number: isize::try_from(number).unwrap_or(isize::MAX), count: count}
    }

    pub(crate) fn malformed(state: usize, reason: &'static str) -> Self {
        AtnError::Malformed{state: state, reason: reason}
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AtnError>;
