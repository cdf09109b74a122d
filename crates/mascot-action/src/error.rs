use mascot_script::VariableError;
use thiserror::Error;

/// Hard failures of a running action.
///
/// Losing the border is not an error; it is reported as
/// [`ActionStatus::LostGround`][crate::ActionStatus::LostGround].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    /// An expression with no sensible default (a `Condition`) failed.
    #[error("variable error: {0}")]
    Variable(#[from] VariableError),

    /// The action was declared without any animation clip.
    #[error("action `{0}` has no animation")]
    MissingAnimation(String),

    #[error("action `{0}` was ticked before init")]
    NotInitialized(String),
}

pub type ActionResult<T> = Result<T, ActionError>;
