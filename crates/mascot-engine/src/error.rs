use mascot_behavior::BehaviorError;
use mascot_config::{ConfigError, InstantiationError};
use mascot_core::MascotId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// No behavior could be installed; the mascot has been disposed.
    #[error("{mascot} can't be alive: {source}")]
    CantBeAlive {
        mascot: MascotId,
        #[source]
        source: Box<EngineError>,
    },

    #[error("{0} has been disposed")]
    Disposed(MascotId),

    #[error("no configuration for image-set `{0}`")]
    UnknownImageSet(String),

    #[error("instantiation error: {0}")]
    Instantiation(#[from] InstantiationError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;
