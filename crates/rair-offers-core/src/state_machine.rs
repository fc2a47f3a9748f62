use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorStatus {
    Empty,
    Editing,
    Submitting,
    Submitted,
    SubmitFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Contract data replaced the list.
    Load { count: usize },
    Add,
    Edit,
    Remove { remaining: usize },
    SubmitStart,
    SubmitSuccess,
    SubmitFailure,
    /// Failure acknowledged, back to editing.
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: EditorStatus,
    pub to: EditorStatus,
    pub reason: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal editor transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: EditorStatus,
    pub action: EditorAction,
}

fn status_for_count(count: usize) -> EditorStatus {
    if count == 0 {
        EditorStatus::Empty
    } else {
        EditorStatus::Editing
    }
}

pub fn editor_transition(
    from: EditorStatus,
    action: EditorAction,
) -> Result<(EditorStatus, StateTransition), TransitionError> {
    use EditorAction as A;
    use EditorStatus as S;

    let (to, reason) = match (from, action) {
        // Fresh contract data always wins, except mid-submission.
        (S::Submitting, A::Load { .. }) => return Err(TransitionError { from, action }),
        (_, A::Load { count }) => (status_for_count(count), "load"),

        (S::Empty | S::Editing | S::Submitted | S::SubmitFailed, A::Add) => {
            (S::Editing, "add")
        }
        (S::Editing | S::Submitted | S::SubmitFailed, A::Edit) => (S::Editing, "edit"),
        (S::Editing | S::Submitted | S::SubmitFailed, A::Remove { remaining }) => {
            (status_for_count(remaining), "remove")
        }
        // Edits during a pending submission are not guarded.
        (S::Submitting, A::Add | A::Edit | A::Remove { .. }) => (S::Submitting, "edit_pending"),

        (S::Editing | S::Submitted | S::SubmitFailed, A::SubmitStart) => {
            (S::Submitting, "submit_start")
        }
        (S::Submitting, A::SubmitSuccess) => (S::Submitted, "submit_success"),
        (S::Submitting, A::SubmitFailure) => (S::SubmitFailed, "submit_failure"),
        (S::SubmitFailed, A::Resume) => (S::Editing, "resume"),
        _ => return Err(TransitionError { from, action }),
    };

    Ok((to, StateTransition { from, to, reason }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_offers() {
        let err = editor_transition(EditorStatus::Empty, EditorAction::SubmitStart)
            .expect_err("empty cannot submit");
        assert!(err.to_string().contains("illegal editor transition"));
    }

    #[test]
    fn load_during_submission_is_rejected() {
        assert!(
            editor_transition(EditorStatus::Submitting, EditorAction::Load { count: 2 }).is_err()
        );
    }
}
