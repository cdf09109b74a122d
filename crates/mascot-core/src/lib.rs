//! `mascot-core` — foundational types for the mascot behavior engine.
//!
//! This crate is a dependency of every other `mascot-*` crate.  It has no
//! `mascot-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `MascotId`                                              |
//! | [`geo`]         | `Point`, `Area`                                         |
//! | [`mascot`]      | `Mascot` — the per-mascot mutable state handle          |
//! | [`environment`] | `Environment` trait, `ActiveWindow`, `StaticEnvironment`|
//! | [`settings`]    | `Settings` — global runtime properties                  |
//! | [`rng`]         | `MascotRng` (per-mascot, deterministic)                 |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to geometry and `Mascot`.   |

pub mod environment;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mascot;
pub mod rng;
pub mod settings;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use environment::{ActiveWindow, Environment, Peer, StaticEnvironment};
pub use error::{CoreError, CoreResult};
pub use geo::{Area, Point};
pub use ids::MascotId;
pub use mascot::Mascot;
pub use rng::MascotRng;
pub use settings::Settings;
