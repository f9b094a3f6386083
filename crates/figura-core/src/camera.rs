//! View transform between screen pixels and canvas coordinates.

use kurbo::{Affine, Point, Vec2};

/// Zoom factor of an untouched view.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Pan and zoom of the canvas view.
///
/// A world point `w` is shown at `w * zoom + pan`. Zoom is not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen-space translation applied after scaling.
    pub pan: Vec2,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen affine.
    pub fn view_transform(&self) -> Affine {
        Affine::scale(self.zoom).then_translate(self.pan)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.view_transform().inverse() * screen
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.view_transform() * world
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity_view() {
        let camera = Camera::new();
        let p = Point::new(12.0, -3.0);
        assert_close(camera.screen_to_world(p), p);
        assert_close(camera.world_to_screen(p), p);
    }

    #[test]
    fn test_zoomed_view_shrinks_world_distances() {
        let camera = Camera {
            zoom: 2.0,
            ..Camera::default()
        };
        assert_close(camera.screen_to_world(Point::new(100.0, 200.0)), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_pan_applies_in_screen_space() {
        let mut camera = Camera {
            zoom: 0.5,
            ..Camera::default()
        };
        camera.pan_by(Vec2::new(10.0, 20.0));
        assert_close(camera.world_to_screen(Point::new(100.0, 100.0)), Point::new(60.0, 70.0));
        assert_close(camera.screen_to_world(Point::new(60.0, 70.0)), Point::new(100.0, 100.0));
    }
}
