use thiserror::Error;

/// An expression could not produce a value of the requested type.
///
/// Most callers recover locally with a default; condition checks and
/// validation surface it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariableError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found:    &'static str,
    },

    #[error("syntax error in `{text}` at {pos}: {message}")]
    Syntax {
        text:    String,
        pos:     usize,
        message: String,
    },

    #[error("`{object}` has no member `{member}`")]
    UnknownMember {
        object: String,
        member: String,
    },

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{function}` takes {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: usize,
        got:      usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("variable `{0}` refers to itself too deeply")]
    RecursionLimit(String),
}

pub type VariableResult<T> = Result<T, VariableError>;
