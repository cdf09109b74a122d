//! `mascot-behavior` — behaviors as plans of actions, and weighted
//! selection between them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`behavior`] | `Behavior`, `BehaviorStatus`, `PlanMode`                   |
//! | [`select`]   | `select`, `total_weight` — pure weighted choice            |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Design notes
//!
//! A behavior ticks at most one action per call.  When the current action is
//! exhausted or loses its ground, the next one is initialised immediately
//! but only runs on the following tick.
//!
//! [`select`] takes the fully assembled candidate list and an externally
//! drawn number, so selection is deterministic given the draw and testable
//! without any random source.

pub mod behavior;
pub mod error;
pub mod select;


pub use behavior::{Behavior, BehaviorStatus, PlanMode};
pub use error::{BehaviorError, BehaviorResult};
pub use select::{select, total_weight};
