//! Localized element and attribute names.
//!
//! Code looks names up by their canonical English key; a configuration
//! written in another language supplies a table mapping each key to the
//! word it uses instead.  Keys with no entry map to themselves.

use std::collections::HashMap;

use serde::Deserialize;

/// Canonical keys.
pub mod key {
    pub const ACTION_LIST:         &str = "ActionList";
    pub const ACTION:              &str = "Action";
    pub const ACTION_REFERENCE:    &str = "ActionReference";
    pub const ANIMATION:           &str = "Animation";
    pub const POSE:                &str = "Pose";
    pub const BEHAVIOR_LIST:       &str = "BehaviourList";
    pub const BEHAVIOR:            &str = "Behaviour";
    pub const BEHAVIOR_REFERENCE:  &str = "BehaviourReference";
    pub const NEXT_BEHAVIOR_LIST:  &str = "NextBehaviourList";
    pub const CONDITION:           &str = "Condition";
    pub const CONSTANT:            &str = "Constant";

    pub const NAME:        &str = "Name";
    pub const TYPE:        &str = "Type";
    pub const CLASS:       &str = "Class";
    pub const BORDER_TYPE: &str = "BorderType";
    pub const LOOP:        &str = "Loop";
    pub const IMAGE:       &str = "Image";
    pub const VELOCITY:    &str = "Velocity";
    pub const DURATION:    &str = "Duration";
    pub const FREQUENCY:   &str = "Frequency";
    pub const HIDDEN:      &str = "Hidden";
    pub const ADD:         &str = "Add";
    pub const VALUE:       &str = "Value";

    pub const EMBEDDED: &str = "Embedded";
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct Schema {
    localized: HashMap<String, String>,
    canonical: HashMap<String, String>,
}

impl Schema {
    /// The English schema: every key maps to itself.
    pub fn english() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, localized: &str) -> Self {
        self.localized.insert(key.to_owned(), localized.to_owned());
        self.canonical.insert(localized.to_owned(), key.to_owned());
        self
    }

    /// The configured word for `key`.
    pub fn name<'a>(&'a self, key: &'a str) -> &'a str {
        self.localized.get(key).map_or(key, String::as_str)
    }

    /// The canonical key for a configured word, or the word itself.
    pub fn canonical<'a>(&'a self, word: &'a str) -> &'a str {
        self.canonical.get(word).map_or(word, String::as_str)
    }
}

impl From<HashMap<String, String>> for Schema {
    fn from(table: HashMap<String, String>) -> Self {
        table
            .iter()
            .fold(Schema::default(), |s, (key, word)| s.with(key, word))
    }
}
