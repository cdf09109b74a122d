//! Requests an action makes of the driver that owns its mascot.

/// Something an action wants done to its own mascot once the current tick
/// has finished.
///
/// Actions cannot reach the configuration registry, so behavior changes they
/// trigger are queued here and applied by the engine driver after the
/// behavior tick returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the current behavior with the named one from the mascot's
    /// own image-set (Interact).
    SetBehavior { name: String },

    /// Switch image-set and install `behavior` from the new set's catalog
    /// (Transform).  `None`, or an unknown set, keeps the current image-set.
    Transform {
        image_set: Option<String>,
        behavior:  String,
    },
}
