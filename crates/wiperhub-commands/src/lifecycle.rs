//! Command lifecycle state machine.
//!
//! Status transitions are monotonic: `pending` may move to `completed` or
//! `ignored`, and nothing ever leaves a terminal state. The gateway and the
//! store both funnel every mutation through [`advance`], so there is exactly
//! one place the transition table lives.

use crate::command::CommandStatus;

/// Terminal verdict reported by a bus controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The controller executed the command.
    Completed,
    /// The controller examined the command and declined to execute it.
    Ignored,
}

impl Outcome {
    /// Terminal status this outcome resolves to.
    pub fn terminal_status(&self) -> CommandStatus {
        match self {
            Outcome::Completed => CommandStatus::Completed,
            Outcome::Ignored => CommandStatus::Ignored,
        }
    }

    /// Parse an outcome from its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "completed" => Some(Outcome::Completed),
            "ignored" => Some(Outcome::Ignored),
            _ => None,
        }
    }
}

/// Rejected transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The record is already in a terminal state.
    ///
    /// Carries the existing status so callers can tell a benign repeat
    /// (same outcome reported twice) from a genuine conflict.
    #[error("command is already {status}, cannot apply a further transition")]
    AlreadyTerminal {
        /// The terminal status the record already holds.
        status: CommandStatus,
    },
}

/// Apply a reported outcome to a current status.
///
/// Returns the new status, or [`TransitionError::AlreadyTerminal`] if the
/// current status is terminal. The record itself is left to the caller;
/// this function is the pure transition table.
pub fn advance(current: CommandStatus, outcome: Outcome) -> Result<CommandStatus, TransitionError> {
    if current.is_terminal() {
        return Err(TransitionError::AlreadyTerminal { status: current });
    }
    Ok(outcome.terminal_status())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_to_completed() {
        assert_eq!(
            advance(CommandStatus::Pending, Outcome::Completed),
            Ok(CommandStatus::Completed)
        );
    }

    #[test]
    fn test_pending_to_ignored() {
        assert_eq!(
            advance(CommandStatus::Pending, Outcome::Ignored),
            Ok(CommandStatus::Ignored)
        );
    }

    #[test]
    fn test_terminal_states_reject_all_outcomes() {
        for terminal in [CommandStatus::Completed, CommandStatus::Ignored] {
            for outcome in [Outcome::Completed, Outcome::Ignored] {
                assert_eq!(
                    advance(terminal, outcome),
                    Err(TransitionError::AlreadyTerminal { status: terminal })
                );
            }
        }
    }

    #[test]
    fn test_error_carries_existing_status() {
        let err = advance(CommandStatus::Ignored, Outcome::Completed).unwrap_err();
        let TransitionError::AlreadyTerminal { status } = err;
        assert_eq!(status, CommandStatus::Ignored);
    }

    #[test]
    fn test_outcome_tokens() {
        assert_eq!(Outcome::from_token("completed"), Some(Outcome::Completed));
        assert_eq!(Outcome::from_token("ignored"), Some(Outcome::Ignored));
        assert_eq!(Outcome::from_token("done"), None);
    }
}
