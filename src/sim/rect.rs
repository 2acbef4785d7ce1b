//! Axis-aligned rectangles in arena (pixel) coordinates
//!
//! Integer coordinates, raster conventions: `right = x + width` is the first
//! column outside the rectangle, and the center rounds toward the top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Build a rectangle of the given size centered on `(cx, cy)`
    pub const fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    /// Center as a continuous vector
    pub fn center_vec(&self) -> Vec2 {
        Vec2::new(self.center_x() as f32, self.center_y() as f32)
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn set_center_x(&mut self, cx: i32) {
        self.x = cx - self.width / 2;
    }

    pub fn set_center_y(&mut self, cy: i32) {
        self.y = cy - self.height / 2;
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    /// Empty rectangles never intersect anything.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open point test (`left <= x < right`)
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Grow (or shrink, with negative deltas) about the center
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect::new(self.x - dw / 2, self.y - dh / 2, self.width + dw, self.height + dh)
    }

    /// Move this rectangle the minimum distance needed to lie inside `bounds`.
    /// A rectangle larger than `bounds` is centered on it along that axis.
    pub fn clamp_inside(&self, bounds: &Rect) -> Rect {
        let x = if self.width >= bounds.width {
            bounds.center_x() - self.width / 2
        } else {
            self.x.clamp(bounds.left(), bounds.right() - self.width)
        };
        let y = if self.height >= bounds.height {
            bounds.center_y() - self.height / 2
        } else {
            self.y.clamp(bounds.top(), bounds.bottom() - self.height)
        };
        Rect::new(x, y, self.width, self.height)
    }
}
