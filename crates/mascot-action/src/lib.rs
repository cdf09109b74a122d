//! `mascot-action` — the per-action state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`action`]    | `Action`, `ActionKind`, `ActionStatus`, parameter names         |
//! | [`animation`] | `Animation`, `Pose` — timed clips with optional conditions      |
//! | [`border`]    | `Border` — floor / ceiling / wall constraints                   |
//! | [`context`]   | `ActionCx<'a>` — mutable per-tick state handed to actions       |
//! | [`host`]      | `MascotHost` — resolves `mascot.*` expressions                  |
//! | [`intent`]    | `Intent` — behavior changes requested of the driver             |
//! | [`error`]     | `ActionError`, `ActionResult<T>`                                |
//!
//! # Design notes
//!
//! Losing the ground is an ordinary outcome of [`Action::tick`]
//! ([`ActionStatus::LostGround`]), not an error, so the owning behavior can
//! match on it alongside exhaustion.
//!
//! Interact and Transform need the configuration registry to build their
//! target behavior.  Rather than reach it, they push an [`Intent`]; the
//! engine driver applies intents after the tick, the same intent/apply split
//! the rest of the engine follows.

pub mod action;
pub mod animation;
pub mod border;
pub mod context;
pub mod error;
pub mod host;
pub mod intent;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind, ActionStatus, param, round_half_up};
pub use animation::{Animation, Pose};
pub use border::Border;
pub use context::ActionCx;
pub use error::{ActionError, ActionResult};
pub use host::{MASCOT_VAR, MascotHost};
pub use intent::Intent;
