use mascot_action::ActionError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BehaviorError {
    #[error("behavior `{behavior}`, action `{action}`: {source}")]
    Action {
        behavior: String,
        action:   String,
        #[source]
        source:   ActionError,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
