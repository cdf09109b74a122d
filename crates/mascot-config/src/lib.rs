//! `mascot-config` — turns a parsed configuration tree into action and
//! behavior templates, and picks the next behavior for a mascot.
//!
//! # Crate layout
//!
//! | Module               | Contents                                                  |
//! |----------------------|-----------------------------------------------------------|
//! | [`entry`]            | `Entry` — the format-neutral configuration tree           |
//! | [`schema`]           | `Schema` — localized element/attribute names              |
//! | [`action_builder`]   | `ActionBuilder`, `ActionRef`, `ActionType`, `Params`      |
//! | [`behavior_builder`] | `BehaviorBuilder`, `NextRef`                              |
//! | [`configuration`]    | `Configuration` — load, validate, build, `select_next`    |
//! | [`error`]            | `ConfigError`, `InstantiationError`                       |
//!
//! # Parameter layering
//!
//! An action reads a parameter from, in order: the reference that named it,
//! the parameters its compound parent was built with, and its own defaults.
//! Builders store parameters as ordered lists, so layering is concatenation
//! and the last entry wins.

pub mod action_builder;
pub mod behavior_builder;
pub mod configuration;
pub mod entry;
pub mod error;
pub mod schema;


pub use action_builder::{ActionBuilder, ActionChild, ActionRef, ActionType, Params};
pub use behavior_builder::{BehaviorBuilder, NextRef};
pub use configuration::{Configuration, FALL_BEHAVIOR, RECOVERY_DROP, drop_from_top};
pub use entry::Entry;
pub use error::{ConfigError, ConfigResult, InstantiationError, InstantiationResult};
pub use schema::Schema;
