//! Global runtime properties.
//!
//! These are the user-facing toggles of the host application.  The engine
//! receives one immutable `Settings` value at construction and threads it
//! through every tick; nothing reads them from global state.
//!
//! # File format (TOML)
//!
//! ```toml
//! multiscreen    = true
//! throwing       = false
//! transformation = true
//! scaling        = 1.5
//! ```
//!
//! Missing keys take the documented defaults.

use std::path::Path;

use serde::Deserialize;

use crate::CoreResult;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Recovery placement spans the whole desktop (`true`) or only the
    /// current monitor's work area (`false`).
    pub multiscreen: bool,

    /// Whether mascots may throw the active window.
    pub throwing: bool,

    /// Whether transform actions may swap a mascot's image-set.
    pub transformation: bool,

    /// Display scaling factor applied to throw velocities.
    pub scaling: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            multiscreen:    true,
            throwing:       true,
            transformation: true,
            scaling:        1.0,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
