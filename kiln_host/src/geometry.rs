// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangles and colours shared by the widget tree and the render sink.

use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle in virtual screen pixels.
///
/// Widgets describe their boxes with these in their parent's content space;
/// the tree converts them to screen space every tick with [`Rect::child_view`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width. Non-positive means empty.
    pub w: i32,
    /// Height. Non-positive means empty.
    pub h: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True if the rectangle has no area.
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment: `x <= px < x + w`, same for y.
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Intersection of two rectangles. The result may be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        Self::new(x, y, r - x, b - y)
    }

    /// Visible screen rectangle of `child` inside a parent.
    ///
    /// `parent` is the parent's visible screen rectangle and `scroll` its
    /// content offset. The child is placed at `child.x - scroll.0` (resp. y)
    /// inside the parent and clipped on both sides; a child scrolled past the
    /// near edge loses the hidden part of its width.
    pub fn child_view(parent: Self, scroll: (i32, i32), child: Self) -> Self {
        let dx = child.x - scroll.0;
        let dy = child.y - scroll.1;
        Self {
            x: parent.x + dx.max(0),
            y: parent.y + dy.max(0),
            w: child.w.min(parent.w - dx) + dx.min(0),
            h: child.h.min(parent.h - dy) + dy.min(0),
        }
    }

    /// Unclipped screen rectangle of `child` inside a parent, see [`Rect::child_view`].
    pub fn child_origin(parent: Self, scroll: (i32, i32), child: Self) -> Self {
        Self::new(
            parent.x + child.x - scroll.0,
            parent.y + child.y - scroll.1,
            child.w,
            child.h,
        )
    }

    /// Convert to a Kurbo rectangle for the render sink.
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        r.to_kurbo()
    }
}

/// 8-bit RGBA colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a colour from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True if nothing would be drawn with this colour.
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_half_open() {
        let r = Rect::new(10, 10, 20, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(29, 14));
        assert!(!r.contains(30, 10));
        assert!(!r.contains(10, 15));
        assert!(!Rect::ZERO.contains(0, 0));
    }

    #[test]
    fn child_view_clips_far_edge() {
        let parent = Rect::new(100, 100, 50, 50);
        let v = Rect::child_view(parent, (0, 0), Rect::new(30, 0, 50, 10));
        assert_eq!(v, Rect::new(130, 100, 20, 10));
    }

    #[test]
    fn child_view_clips_near_edge_when_scrolled() {
        let parent = Rect::new(0, 0, 100, 100);
        let v = Rect::child_view(parent, (0, 25), Rect::new(0, 10, 40, 40));
        assert_eq!(v, Rect::new(0, 0, 40, 25));
        let gone = Rect::child_view(parent, (0, 60), Rect::new(0, 10, 40, 40));
        assert!(gone.is_empty());
    }

    #[test]
    fn intersect_and_kurbo() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
        assert!(a.intersect(&Rect::new(20, 20, 1, 1)).is_empty());
        assert_eq!(b.to_kurbo(), kurbo::Rect::new(5.0, 5.0, 15.0, 15.0));
    }
}
