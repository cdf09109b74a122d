//! The mascot state handle.
//!
//! `Mascot` is the part of a mascot the behavior engine reads and writes each
//! tick: where it stands, which way it faces, which image-set it belongs to,
//! and which pose image is currently displayed.  Windows, images, and sound
//! belong to the host application and never appear here.

use crate::{MascotId, Point};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mascot {
    pub id: MascotId,

    /// Ground coordinates: the feet when standing, the hand when hanging.
    pub anchor: Point,

    /// Source images face left; `true` means the renderer must mirror them.
    pub look_right: bool,

    /// Name of the image-set (and therefore configuration) in use.
    pub image_set: String,

    /// Image name of the pose shown this tick, `None` before the first frame.
    pub image: Option<String>,

    /// Capability tags other mascots may query (e.g. for interactions).
    pub affordances: Vec<String>,
}

impl Mascot {
    pub fn new(id: MascotId, image_set: impl Into<String>) -> Self {
        Self {
            id,
            anchor:      Point::default(),
            look_right:  false,
            image_set:   image_set.into(),
            image:       None,
            affordances: Vec::new(),
        }
    }

    /// Builder-style anchor setter, mostly for tests and spawning code.
    pub fn at(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    #[inline]
    pub fn has_affordance(&self, name: &str) -> bool {
        self.affordances.iter().any(|a| a == name)
    }
}
