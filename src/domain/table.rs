//! The editorial finite state machine
//!
//! One central table encodes which actions are legal in which state and what
//! each legal pair produces. Transitions are plain data, never stored
//! closures, so the table can be inspected and tested in isolation and the
//! dispatcher can wrap every transition uniformly with logging.
//!
//! Withdrawal is legal from every state, terminal ones included, and is
//! idempotent once there. That is a deliberate policy, not an oversight.

use crate::domain::{
    error::EngineError,
    state::{Action, State}
};

/// What a legal (state, action) pair produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move straight to the given state
    To(State),
    /// Append the payload referee to the ledger; the ledger derives the state
    AssignReferee,
    /// Remove the payload referee from the ledger; the ledger derives the state
    DeleteReferee
}

/// Look up the transition for a (state, action) pair
///
/// Fails with [`EngineError::ActionNotAllowed`] when the action is not in the
/// state's action set. There is no implicit fallback transition.
pub fn dispatch(state: State, action: Action) -> Result<Transition, EngineError> {
    use Action::*;
    use State::*;

    let transition = match (state, action) {
        // Withdrawal is available everywhere, including terminal states.
        (_, Withdraw) => Transition::To(Withdrawn),

        (Submitted, AssignReferee) => Transition::AssignReferee,
        (Submitted, Reject) => Transition::To(Rejected),

        (InRefereeReview, AssignReferee) => Transition::AssignReferee,
        (InRefereeReview, DeleteReferee) => Transition::DeleteReferee,
        (InRefereeReview, Accept) => Transition::To(CopyEdit),
        (InRefereeReview, AcceptWithRevisions) => Transition::To(AuthorRevision),

        (AuthorRevision, Done) => Transition::To(EditorReview),

        (EditorReview, Accept) => Transition::To(CopyEdit),

        (CopyEdit, Done) => Transition::To(AuthorReview),

        (AuthorReview, Done) => Transition::To(Formatting),

        (Formatting, Done) => Transition::To(Published),

        _ => return Err(EngineError::ActionNotAllowed { action, state })
    };

    Ok(transition)
}

/// Actions legal in the given state, in declared enumeration order
pub fn valid_actions(state: State) -> Vec<Action> {
    Action::ALL.into_iter().filter(|action| dispatch(state, *action).is_ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_transitions() {
        assert_eq!(dispatch(State::Submitted, Action::AssignReferee).unwrap(), Transition::AssignReferee);
        assert_eq!(dispatch(State::Submitted, Action::Reject).unwrap(), Transition::To(State::Rejected));
        assert_eq!(dispatch(State::Submitted, Action::Withdraw).unwrap(), Transition::To(State::Withdrawn));
    }

    #[test]
    fn referee_review_transitions() {
        assert_eq!(dispatch(State::InRefereeReview, Action::AssignReferee).unwrap(), Transition::AssignReferee);
        assert_eq!(dispatch(State::InRefereeReview, Action::DeleteReferee).unwrap(), Transition::DeleteReferee);
        assert_eq!(dispatch(State::InRefereeReview, Action::Accept).unwrap(), Transition::To(State::CopyEdit));
        assert_eq!(
            dispatch(State::InRefereeReview, Action::AcceptWithRevisions).unwrap(),
            Transition::To(State::AuthorRevision)
        );
    }

    #[test]
    fn production_chain_runs_to_published() {
        assert_eq!(dispatch(State::AuthorRevision, Action::Done).unwrap(), Transition::To(State::EditorReview));
        assert_eq!(dispatch(State::EditorReview, Action::Accept).unwrap(), Transition::To(State::CopyEdit));
        assert_eq!(dispatch(State::CopyEdit, Action::Done).unwrap(), Transition::To(State::AuthorReview));
        assert_eq!(dispatch(State::AuthorReview, Action::Done).unwrap(), Transition::To(State::Formatting));
        assert_eq!(dispatch(State::Formatting, Action::Done).unwrap(), Transition::To(State::Published));
    }

    #[test]
    fn withdraw_is_legal_from_every_state() {
        for state in State::ALL {
            assert_eq!(dispatch(state, Action::Withdraw).unwrap(), Transition::To(State::Withdrawn));
        }
    }

    #[test]
    fn illegal_pairs_fail_with_action_not_allowed() {
        let legal: Vec<(State, Action)> = State::ALL
            .into_iter()
            .flat_map(|state| valid_actions(state).into_iter().map(move |action| (state, action)))
            .collect();

        for state in State::ALL {
            for action in Action::ALL {
                let result = dispatch(state, action);
                if legal.contains(&(state, action)) {
                    assert!(result.is_ok(), "{state}/{action} should be legal");
                } else {
                    assert_eq!(result.unwrap_err(), EngineError::ActionNotAllowed { action, state });
                }
            }
        }
    }

    #[test]
    fn terminal_states_only_allow_withdraw() {
        for state in [State::Published, State::Rejected, State::Withdrawn] {
            assert_eq!(valid_actions(state), vec![Action::Withdraw]);
        }
    }

    #[test]
    fn valid_actions_follow_declared_order() {
        assert_eq!(
            valid_actions(State::InRefereeReview),
            vec![
                Action::AssignReferee,
                Action::DeleteReferee,
                Action::Accept,
                Action::AcceptWithRevisions,
                Action::Withdraw
            ]
        );
        assert_eq!(valid_actions(State::Submitted), vec![Action::AssignReferee, Action::Reject, Action::Withdraw]);
    }
}
