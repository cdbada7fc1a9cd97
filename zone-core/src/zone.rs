use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One axis-aligned cell of a [`crate::grid::ZoneGrid`].
///
/// Uses a top-left origin: `top < bottom`, `left < right`. The derived
/// `width`, `height` and `center` are computed once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
}

impl Zone {
    /// A `width` x `height` cell whose top-left corner is `(left, top)`.
    ///
    /// The stored size is the one given, so every cell built from the same
    /// size reports it identically; the far edges are `left + width` and
    /// `top + height`.
    pub fn cell(left: f32, top: f32, width: f32, height: f32) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self {
            left,
            right,
            top,
            bottom,
            width,
            height,
            center: Vec2::new((left + right) / 2.0, (top + bottom) / 2.0),
        }
    }

    /// A zone spanning `left..right` by `top..bottom`, with size and
    /// center derived from the edges.
    pub fn from_edges(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            width: right - left,
            height: bottom - top,
            center: Vec2::new((left + right) / 2.0, (top + bottom) / 2.0),
        }
    }

    /// Returns `true` if `pos` lies inside the zone, edges included.
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_derives_size_and_center() {
        let z = Zone::from_edges(10.0, 30.0, 5.0, 45.0);
        assert_eq!(z.width, 20.0);
        assert_eq!(z.height, 40.0);
        assert_eq!(z.center, Vec2::new(20.0, 25.0));
        assert_eq!(z.min(), Vec2::new(10.0, 5.0));
        assert_eq!(z.max(), Vec2::new(30.0, 45.0));
    }

    #[test]
    fn cell_keeps_the_given_size() {
        let z = Zone::cell(100.0, 50.0, 100.0, 50.0);
        assert_eq!(z, Zone::from_edges(100.0, 200.0, 50.0, 100.0));
    }

    #[test]
    fn contains_includes_edges_and_rejects_outside() {
        let z = Zone::from_edges(0.0, 100.0, 0.0, 100.0);
        assert!(z.contains(Vec2::new(50.0, 50.0)));
        assert!(z.contains(Vec2::new(0.0, 100.0)));
        assert!(!z.contains(Vec2::new(100.1, 50.0)));
        assert!(!z.contains(Vec2::new(50.0, -0.1)));
    }
}
