//! Rectangle ("box") shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Size};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub(crate) parent: Option<ShapeId>,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub style: ShapeStyle,
    /// Caller-supplied tag.
    pub data: Option<String>,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            position,
            width,
            height,
            style: ShapeStyle::default(),
            data: None,
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl ShapeTrait for Rectangle {
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
        Size::new(self.width, self.height)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let grow = tolerance + self.style.stroke_width / 2.0;
        self.as_rect().inflate(grow, grow).contains(point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
