//! Pan/zoom transform between screen space and canvas space.
//!
//! `screen = canvas * scale + translation`, so the inverse is
//! `canvas = (screen - translation) / scale`.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Affine pan/zoom state of the visible canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    /// Horizontal translation in screen units
    pub x: f64,
    /// Vertical translation in screen units
    pub y: f64,
    /// Uniform zoom factor
    pub scale: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CanvasTransform {
    pub const IDENTITY: CanvasTransform = CanvasTransform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Transform with pan offset `(x, y)` and zoom `scale`
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// A transform is usable when every component is finite and the scale is non-zero
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite() && self.scale != 0.0
    }

    /// Convert screen coordinates to canvas coordinates
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.x) / self.scale,
            (screen.y - self.y) / self.scale,
        )
    }

    /// Convert canvas coordinates to screen coordinates
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.scale + self.x, canvas.y * self.scale + self.y)
    }

    /// Pan by a screen-space delta
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Multiply the zoom by `factor`, clamped to `[min_scale, max_scale]`,
    /// keeping the canvas point under `anchor` (screen space) stationary.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64, min_scale: f64, max_scale: f64) {
        let pinned = self.screen_to_canvas(anchor);
        self.scale = (self.scale * factor).clamp(min_scale, max_scale);
        self.x = anchor.x - pinned.x * self.scale;
        self.y = anchor.y - pinned.y * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn screen_to_canvas_undoes_pan_and_zoom() {
        let transform = CanvasTransform::new(50.0, 50.0, 2.0);
        assert_eq!(
            transform.screen_to_canvas(Point::new(100.0, 100.0)),
            Point::new(25.0, 25.0)
        );
    }

    #[test]
    fn identity_is_a_no_op() {
        let p = Point::new(12.5, -7.0);
        assert_eq!(CanvasTransform::default().screen_to_canvas(p), p);
        assert_eq!(CanvasTransform::default().canvas_to_screen(p), p);
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let mut transform = CanvasTransform::new(10.0, 20.0, 1.0);
        let anchor = Point::new(200.0, 100.0);
        let before = transform.screen_to_canvas(anchor);

        transform.zoom_about(anchor, 2.0, 0.1, 5.0);
        assert_eq!(transform.scale, 2.0);
        let after = transform.screen_to_canvas(anchor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);

        transform.zoom_about(anchor, 100.0, 0.1, 5.0);
        assert_eq!(transform.scale, 5.0);
        transform.zoom_about(anchor, 0.0001, 0.1, 5.0);
        assert_eq!(transform.scale, 0.1);
    }

    #[test]
    fn zero_scale_is_invalid() {
        assert!(!CanvasTransform::new(0.0, 0.0, 0.0).is_valid());
        assert!(!CanvasTransform::new(f64::NAN, 0.0, 1.0).is_valid());
        assert!(CanvasTransform::new(-3.0, 4.0, 0.5).is_valid());
    }

    proptest! {
        #[test]
        fn canvas_round_trips_through_screen(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            tx in -500.0f64..500.0,
            ty in -500.0f64..500.0,
            scale in 0.1f64..5.0,
        ) {
            let transform = CanvasTransform::new(tx, ty, scale);
            let canvas = Point::new(x, y);
            let back = transform.screen_to_canvas(transform.canvas_to_screen(canvas));
            prop_assert!((back.x - x).abs() < 1e-9);
            prop_assert!((back.y - y).abs() < 1e-9);
        }
    }
}
