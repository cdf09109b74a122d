//! Validated configurations keyed by image-set.

use mascot_config::{Configuration, Entry, Schema};
use tracing::info;

use crate::{EngineError, EngineResult};

#[cfg(feature = "fx-hash")]
type SetMap = rustc_hash::FxHashMap<String, Configuration>;
#[cfg(not(feature = "fx-hash"))]
type SetMap = std::collections::HashMap<String, Configuration>;

/// Every loaded image-set's configuration.  Only validated configurations
/// get in, so drivers never see a dangling reference.
#[derive(Debug, Default)]
pub struct Registry {
    sets: SetMap,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and register it under `image_set`, replacing any
    /// previous configuration for that set.
    pub fn insert(&mut self, image_set: impl Into<String>, config: Configuration) -> EngineResult<()> {
        let image_set = image_set.into();
        config.validate()?;
        info!(
            image_set = %image_set,
            behaviors = config.behavior_names().count(),
            "image-set registered"
        );
        self.sets.insert(image_set, config);
        Ok(())
    }

    /// Load one or more configuration trees (for example an actions file
    /// and a behaviors file) into a fresh configuration and register it.
    pub fn load(&mut self, image_set: impl Into<String>, schema: Schema, trees: &[Entry]) -> EngineResult<()> {
        let mut config = Configuration::new(schema);
        for tree in trees {
            config.load(tree)?;
        }
        self.insert(image_set, config)
    }

    pub fn get(&self, image_set: &str) -> Option<&Configuration> {
        self.sets.get(image_set)
    }

    /// Like [`get`](Self::get), as an error.
    pub fn config(&self, image_set: &str) -> EngineResult<&Configuration> {
        self.get(image_set)
            .ok_or_else(|| EngineError::UnknownImageSet(image_set.to_owned()))
    }

    pub fn contains(&self, image_set: &str) -> bool {
        self.sets.contains_key(image_set)
    }

    /// Registered image-set names, sorted.
    pub fn image_sets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
