//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Size};
use uuid::Uuid;

/// A circle positioned by the top-left corner of its bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub(crate) parent: Option<ShapeId>,
    /// Top-left corner of the bounding square.
    pub position: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
    /// Caller-supplied tag.
    pub data: Option<String>,
}

impl Circle {
    /// Create a new circle.
    pub fn new(position: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            position,
            radius,
            style: ShapeStyle::default(),
            data: None,
        }
    }

    /// Center point in parent coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.position.x + self.radius, self.position.y + self.radius)
    }
}

impl ShapeTrait for Circle {
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
        self.position
    }

    fn set_top_left(&mut self, point: Point) {
        self.position = point;
    }

    fn size(&self) -> Size {
        Size::new(self.radius * 2.0, self.radius * 2.0)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = self.radius + tolerance + self.style.stroke_width / 2.0;
        self.center().distance(point) <= reach
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
