//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on lifecycle statuses.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = ComplaintStatus::Pending.transition_to(ComplaintStatus::Assigned)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ticket {
        Open,
        Working,
        Closed,
    }

    impl StateMachine for Ticket {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Ticket::Open => vec![Ticket::Working, Ticket::Closed],
                Ticket::Working => vec![Ticket::Open, Ticket::Closed],
                Ticket::Closed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Ticket::Open.transition_to(Ticket::Working).unwrap(), Ticket::Working);
    }

    #[test]
    fn transition_to_fails_with_invalid_state_code() {
        let err = Ticket::Closed.transition_to(Ticket::Open).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains("Closed"));
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Ticket::Closed.is_terminal());
        assert!(!Ticket::Open.is_terminal());
        assert!(!Ticket::Working.is_terminal());
    }
}
