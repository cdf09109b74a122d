//! The environment collaborator: desktop geometry, the active foreign
//! window, and read-only queries against the shared mascot registry.
//!
//! The engine never talks to a window system directly.  The host application
//! implements [`Environment`]; tests and headless runs use
//! [`StaticEnvironment`].

use crate::{Area, MascotId, Point};

/// Snapshot of the active foreign window (the one a mascot can sit on or
/// throw).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveWindow {
    pub area:    Area,
    pub visible: bool,
    pub title:   String,
}

/// Everything a running action may ask about or do to the outside world.
///
/// Query methods take `&self`; the single mutating operation,
/// [`move_active_window`][Self::move_active_window], is used by the throw
/// action.  Cross-mascot queries are read-only by contract: the engine never
/// mutates another mascot.
pub trait Environment {
    /// Bounds of the whole virtual desktop.
    fn screen(&self) -> Area;

    /// Usable area of the monitor the mascot is on (desktop minus task bars).
    fn work_area(&self) -> Area;

    /// The active foreign window, visible or not.
    fn active_window(&self) -> ActiveWindow;

    /// Move the active foreign window so its top-left corner is at `to`.
    fn move_active_window(&mut self, to: Point);

    /// Current mouse position.
    fn cursor(&self) -> Point;

    /// Number of mascots other than `except` whose bounds contain `at`.
    fn overlapping_mascots(&self, at: Point, except: MascotId) -> usize;

    /// Number of live mascots other than `except`, optionally restricted to
    /// one image-set.
    fn mascot_count(&self, image_set: Option<&str>, except: MascotId) -> usize;
}

// ── StaticEnvironment ─────────────────────────────────────────────────────────

/// Another mascot as seen through the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Peer {
    pub id:        MascotId,
    pub image_set: String,
    pub bounds:    Area,
}

/// An in-memory [`Environment`] with fixed geometry.
///
/// Useful for headless runs and tests: fields are public so a test can move
/// the active window or add overlapping peers between ticks.
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
    pub screen:        Area,
    pub work_area:     Area,
    pub active_window: ActiveWindow,
    pub cursor:        Point,
    pub peers:         Vec<Peer>,
}

impl StaticEnvironment {
    /// A single monitor of the given size whose work area is the full screen,
    /// with no active window.
    pub fn single_screen(width: i32, height: i32) -> Self {
        let screen = Area::new(0, 0, width, height);
        Self {
            screen,
            work_area: screen,
            ..Self::default()
        }
    }

    /// Replace the active window with a visible one covering `area`.
    pub fn with_window(mut self, area: Area, title: impl Into<String>) -> Self {
        self.active_window = ActiveWindow {
            area,
            visible: true,
            title: title.into(),
        };
        self
    }
}

impl Environment for StaticEnvironment {
    fn screen(&self) -> Area {
        self.screen
    }

    fn work_area(&self) -> Area {
        self.work_area
    }

    fn active_window(&self) -> ActiveWindow {
        self.active_window.clone()
    }

    fn move_active_window(&mut self, to: Point) {
        self.active_window.area = self.active_window.area.moved_to(to);
    }

    fn cursor(&self) -> Point {
        self.cursor
    }

    fn overlapping_mascots(&self, at: Point, except: MascotId) -> usize {
        self.peers
            .iter()
            .filter(|p| p.id != except && p.bounds.contains(at))
            .count()
    }

    fn mascot_count(&self, image_set: Option<&str>, except: MascotId) -> usize {
        self.peers
            .iter()
            .filter(|p| p.id != except && image_set.is_none_or(|set| p.image_set == set))
            .count()
    }
}
