//! The per-mascot tick loop.

use mascot_action::{ActionCx, Intent};
use mascot_behavior::{Behavior, BehaviorStatus};
use mascot_config::{FALL_BEHAVIOR, drop_from_top};
use mascot_core::{Environment, Mascot, MascotRng, Settings};
use tracing::{error, info, warn};

use crate::{EngineError, EngineObserver, EngineResult, Registry};

/// Drives one mascot: ticks its behavior, replaces the behavior when it is
/// used up, applies the intents its actions raise, and recovers the mascot
/// when it leaves the screen.
///
/// ```text
/// tick:
///   ① Behavior   — tick the current behavior once (one action).
///   ② Replace    — exhausted or failed → Configuration::select_next(previous).
///   ③ Recover    — anchor off-screen (left, right, below) → drop + "Fall".
///   ④ Intents    — SetBehavior / Transform requested by actions this tick.
/// ```
///
/// A failure to build a requested behavior is reported and the current one
/// keeps running.  A failure to build any successor disposes the mascot with
/// [`EngineError::CantBeAlive`].
///
/// Create via [`DriverBuilder`][crate::DriverBuilder] or [`MascotDriver::new`].
pub struct MascotDriver {
    mascot:   Mascot,
    behavior: Option<Behavior>,
    settings: Settings,
    rng:      MascotRng,
    intents:  Vec<Intent>,
    paused:   bool,
    disposed: bool,
    ticks:    u64,
}

impl MascotDriver {
    /// A driver with no behavior yet; call [`start`](Self::start) or just
    /// [`tick`](Self::tick).
    pub fn new(mascot: Mascot, settings: Settings, seed: u64) -> Self {
        let rng = MascotRng::new(seed, mascot.id);
        Self {
            mascot,
            behavior: None,
            settings,
            rng,
            intents:  Vec::new(),
            paused:   false,
            disposed: false,
            ticks:    0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn mascot(&self) -> &Mascot {
        &self.mascot
    }

    /// Mutable mascot access for the host application (dragging, spawning).
    pub fn mascot_mut(&mut self) -> &mut Mascot {
        &mut self.mascot
    }

    pub fn behavior(&self) -> Option<&Behavior> {
        self.behavior.as_ref()
    }

    pub fn behavior_name(&self) -> Option<&str> {
        self.behavior.as_ref().map(Behavior::name)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Ticks processed so far; paused ticks do not count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Select and install the first behavior.  If none can be installed the
    /// mascot is disposed.
    pub fn start<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        observer: &mut O,
    ) -> EngineResult<()> {
        self.ensure_alive()?;
        info!(
            mascot = %self.mascot.id,
            image_set = %self.mascot.image_set,
            anchor = %self.mascot.anchor,
            "mascot starting"
        );
        self.replace(registry, env, None, observer)
    }

    /// Advance the mascot by one frame.
    pub fn tick<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        observer: &mut O,
    ) -> EngineResult<()> {
        self.ensure_alive()?;
        if self.paused {
            return Ok(());
        }
        if self.behavior.is_none() {
            self.start(registry, env, observer)?;
        }

        // ── ① Behavior ────────────────────────────────────────────────────
        let Some(behavior) = self.behavior.as_mut() else {
            return Ok(());
        };
        let previous = behavior.name().to_owned();
        let outcome = {
            let mut cx = ActionCx::new(&mut self.mascot, &mut *env, &self.settings, &mut self.rng, &mut self.intents);
            behavior.tick(&mut cx)
        };

        // ── ② Replace / ③ Recover ─────────────────────────────────────────
        match outcome {
            Ok(BehaviorStatus::Running) => {
                if self.off_screen(&*env) {
                    self.recover(registry, env, observer)?;
                }
            }
            Ok(BehaviorStatus::Exhausted) => {
                self.replace(registry, env, Some(previous.as_str()), observer)?;
            }
            Err(e) => {
                error!(mascot = %self.mascot.id, error = %e, "behavior failed; selecting another");
                observer.on_error(&self.mascot, &EngineError::Behavior(e));
                self.replace(registry, env, Some(previous.as_str()), observer)?;
            }
        }

        // ── ④ Intents ─────────────────────────────────────────────────────
        self.apply_intents(registry, env, observer);

        self.ticks += 1;
        observer.on_tick(&self.mascot);
        Ok(())
    }

    /// Install the named behavior from the mascot's current image-set, as a
    /// menu pick would.  On failure the current behavior keeps running and
    /// the error is reported to `observer` as well as returned.
    pub fn set_behavior<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        name:     &str,
        observer: &mut O,
    ) -> EngineResult<()> {
        self.ensure_alive()?;
        let image_set = self.mascot.image_set.clone();
        self.request(registry, env, &image_set, name, observer)
    }

    /// Stop ticking for good and drop the behavior.  Idempotent.
    pub fn dispose<O: EngineObserver>(&mut self, observer: &mut O) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.behavior = None;
        self.intents.clear();
        info!(mascot = %self.mascot.id, ticks = self.ticks, "mascot disposed");
        observer.on_dispose(&self.mascot);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn ensure_alive(&self) -> EngineResult<()> {
        if self.disposed {
            Err(EngineError::Disposed(self.mascot.id))
        } else {
            Ok(())
        }
    }

    /// Left of, right of, or below the screen.  Above is where recovery
    /// drops mascots from, so it does not count.
    fn off_screen(&self, env: &dyn Environment) -> bool {
        let screen = env.screen();
        let p = self.mascot.anchor;
        p.x < screen.left || p.x > screen.right || p.y > screen.bottom
    }

    /// Select a successor of `previous`; dispose the mascot if that fails.
    fn replace<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        previous: Option<&str>,
        observer: &mut O,
    ) -> EngineResult<()> {
        match self.select_and_install(registry, env, previous, observer) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.die(e, observer)),
        }
    }

    fn select_and_install<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        previous: Option<&str>,
        observer: &mut O,
    ) -> EngineResult<()> {
        let config = registry.config(&self.mascot.image_set)?;
        let behavior = config.select_next(previous, &mut self.mascot, &*env, &self.settings, &mut self.rng)?;
        self.install(behavior, env, observer)
    }

    fn recover<O: EngineObserver>(
        &mut self,
        registry: &Registry,
        env:      &mut dyn Environment,
        observer: &mut O,
    ) -> EngineResult<()> {
        warn!(mascot = %self.mascot.id, anchor = %self.mascot.anchor, "out of the screen bounds; dropping back in");
        drop_from_top(&mut self.mascot, &*env, &self.settings, &mut self.rng);
        let image_set = self.mascot.image_set.clone();
        match self.build_and_install(registry, env, &image_set, FALL_BEHAVIOR, observer) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.die(e, observer)),
        }
    }

    fn apply_intents<O: EngineObserver>(&mut self, registry: &Registry, env: &mut dyn Environment, observer: &mut O) {
        for intent in std::mem::take(&mut self.intents) {
            // Failures are already reported through the observer.
            let _ = match intent {
                Intent::SetBehavior { name } => {
                    let image_set = self.mascot.image_set.clone();
                    self.request(registry, env, &image_set, &name, observer)
                }
                Intent::Transform { image_set, behavior } => self.transform(registry, env, image_set, &behavior, observer),
            };
        }
    }

    /// Switch image-set and install `behavior` from the new set.  An
    /// unknown or absent set keeps the current one.
    fn transform<O: EngineObserver>(
        &mut self,
        registry:  &Registry,
        env:       &mut dyn Environment,
        image_set: Option<String>,
        behavior:  &str,
        observer:  &mut O,
    ) -> EngineResult<()> {
        let current = self.mascot.image_set.clone();
        let target = match image_set {
            Some(set) if registry.contains(&set) => set,
            Some(set) => {
                warn!(mascot = %self.mascot.id, image_set = %set, "unknown transform target; keeping current image-set");
                current.clone()
            }
            None => current.clone(),
        };

        self.mascot.image_set = target.clone();
        let result = self.request(registry, env, &target, behavior, observer);
        match &result {
            Ok(()) if target != current => {
                info!(mascot = %self.mascot.id, from = %current, to = %target, "mascot transformed");
            }
            Ok(()) => {}
            Err(_) => self.mascot.image_set = current,
        }
        result
    }

    /// Build and install a requested behavior, reporting any failure.
    fn request<O: EngineObserver>(
        &mut self,
        registry:  &Registry,
        env:       &mut dyn Environment,
        image_set: &str,
        name:      &str,
        observer:  &mut O,
    ) -> EngineResult<()> {
        let result = self.build_and_install(registry, env, image_set, name, observer);
        if let Err(e) = &result {
            error!(mascot = %self.mascot.id, behavior = name, error = %e, "requested behavior unavailable");
            observer.on_error(&self.mascot, e);
        }
        result
    }

    fn build_and_install<O: EngineObserver>(
        &mut self,
        registry:  &Registry,
        env:       &mut dyn Environment,
        image_set: &str,
        name:      &str,
        observer:  &mut O,
    ) -> EngineResult<()> {
        let behavior = registry.config(image_set)?.build_behavior(name)?;
        self.install(behavior, env, observer)
    }

    /// Initialise `behavior` and make it current.  The old behavior stays
    /// in place if `init` fails.
    fn install<O: EngineObserver>(
        &mut self,
        mut behavior: Behavior,
        env:          &mut dyn Environment,
        observer:     &mut O,
    ) -> EngineResult<()> {
        {
            let mut cx = ActionCx::new(&mut self.mascot, &mut *env, &self.settings, &mut self.rng, &mut self.intents);
            behavior.init(&mut cx)?;
        }
        info!(mascot = %self.mascot.id, behavior = behavior.name(), "behavior installed");
        observer.on_behavior(&self.mascot, behavior.name());
        self.behavior = Some(behavior);
        Ok(())
    }

    /// Dispose after an unrecoverable failure and wrap the cause.
    fn die<O: EngineObserver>(&mut self, source: EngineError, observer: &mut O) -> EngineError {
        error!(mascot = %self.mascot.id, error = %source, "mascot can't be alive");
        let err = EngineError::CantBeAlive {
            mascot: self.mascot.id,
            source: Box::new(source),
        };
        observer.on_error(&self.mascot, &err);
        self.dispose(observer);
        err
    }
}
