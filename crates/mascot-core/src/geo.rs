//! Screen-space geometry.
//!
//! All coordinates are integer pixels with the origin at the top-left of the
//! virtual desktop and `y` growing downwards, matching the window system.

use std::fmt;

/// A pixel position.  Used for the mascot anchor (the point the mascot
/// stands on) and for window placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise translation.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle given by its four edges.
///
/// `right` and `bottom` are inclusive edge coordinates: a mascot standing on
/// the floor of a work area has `anchor.y == area.bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub left:   i32,
    pub top:    i32,
    pub right:  i32,
    pub bottom: i32,
}

impl Area {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build from a top-left corner and a size.
    #[inline]
    pub fn from_origin(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// `true` if `p` lies inside or on the edge of the rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// `true` if `x` lies within the horizontal span of the rectangle.
    #[inline]
    pub fn spans_x(&self, x: i32) -> bool {
        x >= self.left && x <= self.right
    }

    /// `true` if `y` lies within the vertical span of the rectangle.
    #[inline]
    pub fn spans_y(&self, y: i32) -> bool {
        y >= self.top && y <= self.bottom
    }

    /// The same rectangle moved so its top-left corner is `to`.
    #[inline]
    pub fn moved_to(&self, to: Point) -> Area {
        Area::from_origin(to, self.width(), self.height())
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {} → {}, {}]", self.left, self.top, self.right, self.bottom)
    }
}
