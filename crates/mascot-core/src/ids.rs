//! Strongly typed mascot identifier.

use std::fmt;

/// Identity of one mascot instance.  Assigned by the external manager when
/// the mascot is spawned; the engine only uses it for RNG seeding, log
/// fields, and to exclude a mascot from its own overlap queries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MascotId(pub u32);

impl MascotId {
    /// Sentinel meaning "no valid ID".
    pub const INVALID: MascotId = MascotId(u32::MAX);
}

impl Default for MascotId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for MascotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mascot{}", self.0)
    }
}
