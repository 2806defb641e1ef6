//! Rectangles and insets.

use cgmath::{Point2, Vector2};
use std::ops;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a rectangle from its four edges.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect {
            origin: Point2::new(left, top),
            size: Vector2::new(right - left, bottom - top),
        }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns true if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0. || self.size.y <= 0.
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The right and bottom edges are exclusive, so an empty rectangle contains nothing.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.x
            && point.y < self.origin.y + self.size.y
    }

    /// Returns a new rectangle shrunk by the given insets. The size never goes negative.
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect {
            origin: Point2::new(self.origin.x + insets.left, self.origin.y + insets.top),
            size: Vector2::new(
                (self.size.x - insets.horizontal()).max(0.),
                (self.size.y - insets.vertical()).max(0.),
            ),
        }
    }
}

impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

/// Insets on the four sides of a rectangle; used for padding and margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Insets {
        Insets {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every side.
    pub fn uniform(all: f64) -> Insets {
        Insets::new(all, all, all, all)
    }

    pub fn zero() -> Insets {
        Insets::default()
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::from_edges(10., 10., 20., 30.);
        assert!(rect.contains(Point2::new(10., 10.)));
        assert!(rect.contains(Point2::new(19.9, 29.9)));
        assert!(!rect.contains(Point2::new(20., 15.)));
        assert!(!rect.contains(Point2::new(15., 30.)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = Rect::new(Point2::new(3., 3.), Vector2::new(0., 10.));
        assert!(rect.is_empty());
        assert!(!rect.contains(Point2::new(0., 0.)));
    }

    #[test]
    fn inset_clamps_to_zero() {
        let rect = Rect::from_edges(0., 0., 10., 10.);
        let inner = rect.inset(Insets::new(4., 2., 8., 2.));
        assert_eq!(inner.origin, Point2::new(4., 2.));
        assert_eq!(inner.size, Vector2::new(0., 6.));
    }
}
