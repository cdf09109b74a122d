//! `mascot-engine` — drives mascots tick by tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`driver`]   | `MascotDriver` — the per-mascot tick loop                  |
//! | [`builder`]  | `DriverBuilder`                                            |
//! | [`registry`] | `Registry` — validated configurations by image-set         |
//! | [`observer`] | `EngineObserver`, `NoopObserver`                           |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the image-set registry.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mascot_config::{Entry, Schema};
//! use mascot_core::{MascotId, StaticEnvironment};
//! use mascot_engine::{DriverBuilder, NoopObserver, Registry};
//!
//! let mut registry = Registry::new();
//! registry.load("shimeji", Schema::english(), &[actions, behaviors])?;
//! let mut env = StaticEnvironment::single_screen(1920, 1080);
//! let mut driver = DriverBuilder::new(MascotId(1), "shimeji").build(&registry, &env)?;
//! for _ in 0..1_000 {
//!     driver.tick(&registry, &mut env, &mut NoopObserver)?;
//! }
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod observer;
pub mod registry;


pub use builder::DriverBuilder;
pub use driver::MascotDriver;
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use registry::Registry;
