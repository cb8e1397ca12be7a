//! Plane geometry shared by both layout engines.
//!
//! Coordinates follow screen conventions: `x` grows to the right, `y` grows
//! downward, and a node's [`Position`] is its top-left corner.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_diagonal(&self) -> f64 {
        self.width.hypot(self.height) / 2.0
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Box of `size` centered on `center`.
    pub fn centered(center: Position, size: Size) -> Self {
        Self {
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow by `padding` on every side.
    pub fn padded(&self, padding: f64) -> Rect {
        Rect {
            x: self.x - padding,
            y: self.y - padding,
            width: self.width + 2.0 * padding,
            height: self.height + 2.0 * padding,
        }
    }

    /// Closed-interval overlap test: boxes that touch collide.
    pub fn touches(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Open-interval overlap test: boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the two boxes, each grown by `padding`, touch.
    pub fn collides_padded(&self, other: &Rect, padding: f64) -> bool {
        self.padded(padding).touches(&other.padded(padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes() {
        let a = Rect::new(Position::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Position::new(10.0, 0.0), Size::new(10.0, 10.0));
        assert!(a.touches(&b));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_padding_widens_collision() {
        let a = Rect::new(Position::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Position::new(0.0, 45.0), Size::new(10.0, 10.0));
        assert!(!a.collides_padded(&b, 15.0));
        assert!(a.collides_padded(&b, 20.0));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Position::new(100.0, 50.0), Size::new(40.0, 20.0));
        assert_eq!(r.x, 80.0);
        assert_eq!(r.y, 40.0);
        assert_eq!(r.center(), Position::new(100.0, 50.0));
    }
}
