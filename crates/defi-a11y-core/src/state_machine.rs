use thiserror::Error;

use crate::domain::CloseReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    Open,
    Selecting,
    Closing(CloseReason),
}

impl DialogPhase {
    /// Keyboard capture and the focus trap only run in this phase.
    pub fn captures_input(self) -> bool {
        matches!(self, DialogPhase::Open)
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, DialogPhase::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Open,
    Select,
    Dismiss(CloseReason),
    Finish,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: DialogPhase,
    pub to: DialogPhase,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal dialog transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: DialogPhase,
    pub action: DialogAction,
}

pub fn dialog_transition(
    from: DialogPhase,
    action: DialogAction,
) -> Result<(DialogPhase, StateTransition), TransitionError> {
    use DialogAction as A;
    use DialogPhase as P;

    let (to, reason) = match (from, action) {
        (P::Closed, A::Open) => (P::Open, "opened"),
        (P::Open, A::Select) => (P::Selecting, "option chosen"),
        (P::Open, A::Dismiss(CloseReason::Selection)) => {
            return Err(TransitionError { from, action });
        }
        (P::Open, A::Dismiss(reason)) => (P::Closing(reason), "dismissed"),
        (P::Selecting, A::Finish) => (P::Closed, "selection committed"),
        (P::Closing(_), A::Finish) => (P::Closed, "closed"),
        (P::Selecting, A::Abort) | (P::Closing(_), A::Abort) => (P::Open, "callback failed"),
        _ => return Err(TransitionError { from, action }),
    };

    Ok((
        to,
        StateTransition {
            from,
            to,
            reason,
        },
    ))
}
