//! Line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_segment_dist};
use kurbo::{Point, Size};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub(crate) parent: Option<ShapeId>,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
    /// Caller-supplied tag.
    pub data: Option<String>,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            start,
            end,
            style: ShapeStyle::default(),
            data: None,
        }
    }

    /// Create a line from `[x1, y1, x2, y2]`.
    pub fn from_coords(points: [f64; 4]) -> Self {
        Self::new(Point::new(points[0], points[1]), Point::new(points[2], points[3]))
    }

    /// Endpoints as `[x1, y1, x2, y2]`.
    pub fn coords(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<ShapeId>) {
        self.parent = parent;
    }

    fn top_left(&self) -> Point {
        Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    fn set_top_left(&mut self, point: Point) {
        let delta = point - self.top_left();
        self.start += delta;
        self.end += delta;
    }

    fn size(&self) -> Size {
        Size::new(
            (self.end.x - self.start.x).abs(),
            (self.end.y - self.start.y).abs(),
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end)
            <= tolerance + self.style.stroke_width / 2.0
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_keep_endpoint_order() {
        let line = Line::from_coords([250.0, 100.0, 200.0, 75.0]);
        assert_eq!(line.coords(), [250.0, 100.0, 200.0, 75.0]);
        assert!(line.parent().is_none());
    }

    #[test]
    fn test_bounds_of_reversed_line() {
        let line = Line::from_coords([250.0, 100.0, 200.0, 75.0]);
        assert_eq!(line.top_left(), Point::new(200.0, 75.0));
        let size = line.size();
        assert!((size.width - 50.0).abs() < f64::EPSILON);
        assert!((size.height - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_top_left_moves_both_endpoints() {
        let mut line = Line::from_coords([50.0, 10.0, 200.0, 150.0]);
        line.set_top_left(Point::new(170.0, 150.0));
        assert_eq!(line.start, Point::new(170.0, 150.0));
        assert_eq!(line.end, Point::new(320.0, 290.0));
    }

    #[test]
    fn test_hit_test_follows_the_segment() {
        let mut line = Line::from_coords([10.0, 10.0, 160.0, 10.0]);
        line.style.stroke_width = 20.0;
        // Half the stroke width counts as geometry
        assert!(line.hit_test(Point::new(80.0, 19.0), 0.0));
        assert!(!line.hit_test(Point::new(80.0, 25.0), 0.0));
        // Past the end cap
        assert!(!line.hit_test(Point::new(175.0, 10.0), 0.0));
    }
}
