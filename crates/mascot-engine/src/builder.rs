//! Fluent builder for constructing a [`MascotDriver`].

use mascot_config::drop_from_top;
use mascot_core::{Environment, Mascot, MascotId, MascotRng, Point, Settings};

use crate::{EngineResult, MascotDriver, Registry};

/// Fluent builder for [`MascotDriver`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                         |
/// |--------------------|-------------------------------------------------|
/// | `.anchor(p)`       | Random x, [`RECOVERY_DROP`] above the top       |
/// | `.look_right(b)`   | `false`                                         |
/// | `.affordances(v)`  | none                                            |
/// | `.settings(s)`     | `Settings::default()`                           |
/// | `.seed(n)`         | `0`                                             |
///
/// [`RECOVERY_DROP`]: mascot_config::RECOVERY_DROP
///
/// # Example
///
/// ```rust,ignore
/// let mut driver = DriverBuilder::new(MascotId(1), "shimeji")
///     .settings(settings)
///     .seed(42)
///     .build(&registry, &env)?;
/// driver.start(&registry, &mut env, &mut NoopObserver)?;
/// ```
pub struct DriverBuilder {
    id:          MascotId,
    image_set:   String,
    anchor:      Option<Point>,
    look_right:  bool,
    affordances: Vec<String>,
    settings:    Settings,
    seed:        u64,
}

impl DriverBuilder {
    pub fn new(id: MascotId, image_set: impl Into<String>) -> Self {
        Self {
            id,
            image_set:   image_set.into(),
            anchor:      None,
            look_right:  false,
            affordances: Vec::new(),
            settings:    Settings::default(),
            seed:        0,
        }
    }

    pub fn anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn look_right(mut self, look_right: bool) -> Self {
        self.look_right = look_right;
        self
    }

    pub fn affordances(mut self, affordances: Vec<String>) -> Self {
        self.affordances = affordances;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Global seed, mixed with the mascot id.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the image-set is registered and return an unstarted driver.
    pub fn build(self, registry: &Registry, env: &dyn Environment) -> EngineResult<MascotDriver> {
        registry.config(&self.image_set)?;

        let mut mascot = Mascot::new(self.id, self.image_set);
        mascot.look_right = self.look_right;
        mascot.affordances = self.affordances;
        match self.anchor {
            Some(anchor) => mascot.anchor = anchor,
            None => {
                // A separate stream so placement does not shift the driver's draws.
                let mut rng = MascotRng::new(!self.seed, self.id);
                drop_from_top(&mut mascot, env, &self.settings, &mut rng);
            }
        }
        Ok(MascotDriver::new(mascot, self.settings, self.seed))
    }
}
