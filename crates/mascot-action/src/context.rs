//! Mutable per-tick state handed to every action callback.

use mascot_core::{Environment, Mascot, MascotRng, Settings};

use crate::{Intent, MascotHost};

/// Everything an action may read or mutate during `init`/`has_next`/`tick`.
///
/// Built by the engine driver once per tick.  Only the owning mascot is
/// reachable mutably; other mascots are visible through the environment's
/// read-only queries.
pub struct ActionCx<'a> {
    pub mascot:   &'a mut Mascot,
    pub env:      &'a mut dyn Environment,
    pub settings: &'a Settings,
    pub rng:      &'a mut MascotRng,
    /// Behavior changes requested this tick, applied by the driver.
    pub intents:  &'a mut Vec<Intent>,
}

impl<'a> ActionCx<'a> {
    pub fn new(
        mascot:   &'a mut Mascot,
        env:      &'a mut dyn Environment,
        settings: &'a Settings,
        rng:      &'a mut MascotRng,
        intents:  &'a mut Vec<Intent>,
    ) -> Self {
        Self { mascot, env, settings, rng, intents }
    }

    /// A scripting host over the current mascot state.
    #[inline]
    pub fn host(&mut self) -> MascotHost<'_> {
        MascotHost::new(&*self.mascot, &*self.env, &mut *self.rng)
    }
}
