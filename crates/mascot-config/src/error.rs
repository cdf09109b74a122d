use mascot_script::VariableError;
use thiserror::Error;

/// A configuration tree could not be loaded or failed validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("duplicate {kind} `{name}`")]
    Duplicate { kind: &'static str, name: String },

    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> attribute `{attribute}` has invalid value `{value}`")]
    InvalidAttribute {
        element:   String,
        attribute: String,
        value:     String,
    },

    #[error("unknown action type `{0}`")]
    UnknownActionType(String),

    #[error("`{referrer}`: {source}")]
    Variable {
        referrer: String,
        #[source]
        source:   VariableError,
    },

    #[error("`{referrer}` refers to undefined action `{name}`")]
    UndefinedAction { referrer: String, name: String },

    #[error("`{referrer}` refers to undefined behavior `{name}`")]
    UndefinedBehavior { referrer: String, name: String },

    #[error("action `{0}` refers back to itself")]
    CyclicAction(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A behavior or action could not be built from a loaded configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstantiationError {
    #[error("no behavior named `{0}`")]
    NoSuchBehavior(String),

    #[error("no action named `{0}`")]
    NoSuchAction(String),

    #[error("action references nest too deeply at `{0}`")]
    Cyclic(String),
}

pub type InstantiationResult<T> = Result<T, InstantiationError>;
