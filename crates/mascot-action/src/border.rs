//! Ground constraints an action may require the mascot's anchor to satisfy.

use std::fmt;
use std::str::FromStr;

use mascot_core::{ActiveWindow, Area, Environment, Point};

/// Which surface an action's anchor must stay on.
///
/// Surfaces are the edges of the work area plus, when it is visible, the
/// edges of the active foreign window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// Bottom of the work area or top of the active window.
    Floor,
    /// Top of the work area or bottom of the active window.
    Ceiling,
    /// Left/right of the work area or of the active window.
    Wall,
}

impl Border {
    /// Is `p` currently standing on this border?
    pub fn is_on(self, env: &dyn Environment, p: Point) -> bool {
        let work = env.work_area();
        let window = env.active_window();
        let on_work = self.on_work_area(&work, p);
        on_work || (window.visible && self.on_window(&window.area, p))
    }

    /// Carry `p` along with the active window if it was standing on the
    /// window's edge in `before` and the window has since moved.
    ///
    /// Points on the work area pass through unchanged.
    pub fn move_point(self, before: &ActiveWindow, after: &ActiveWindow, p: Point) -> Point {
        if !before.visible || !after.visible || !self.on_window(&before.area, p) {
            return p;
        }
        let dx = after.area.left - before.area.left;
        let dy = after.area.top - before.area.top;
        p.offset(dx, dy)
    }

    fn on_work_area(self, area: &Area, p: Point) -> bool {
        match self {
            Border::Floor   => p.y == area.bottom && area.spans_x(p.x),
            Border::Ceiling => p.y == area.top && area.spans_x(p.x),
            Border::Wall    => (p.x == area.left || p.x == area.right) && area.spans_y(p.y),
        }
    }

    fn on_window(self, area: &Area, p: Point) -> bool {
        match self {
            Border::Floor   => p.y == area.top && area.spans_x(p.x),
            Border::Ceiling => p.y == area.bottom && area.spans_x(p.x),
            Border::Wall    => (p.x == area.left || p.x == area.right) && area.spans_y(p.y),
        }
    }
}

impl FromStr for Border {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Floor"   => Ok(Border::Floor),
            "Ceiling" => Ok(Border::Ceiling),
            "Wall"    => Ok(Border::Wall),
            other     => Err(format!("unknown border type `{other}`")),
        }
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Border::Floor   => "Floor",
            Border::Ceiling => "Ceiling",
            Border::Wall    => "Wall",
        };
        f.write_str(name)
    }
}
