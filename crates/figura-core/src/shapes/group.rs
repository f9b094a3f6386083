//! Groups: shapes that own other shapes.

use super::{Shape, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Size};
use uuid::Uuid;

/// A union box owning its member shapes.
///
/// Members are stored relative to the group's center, so moving the group
/// moves them along. Each member's `parent` names the group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub(crate) id: ShapeId,
    pub(crate) parent: Option<ShapeId>,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    children: Vec<Shape>,
    // Groups are never painted themselves; this only backs `style()`.
    style: ShapeStyle,
}

impl Group {
    /// Empty group covering the given box.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            position,
            width,
            height,
            children: Vec::new(),
            style: ShapeStyle::default(),
        }
    }

    pub fn center(&self) -> Point {
        self.position + Size::new(self.width, self.height).to_vec2() / 2.0
    }

    /// Take ownership of `shape`, given its top-left in the same space as
    /// the group's own position.
    pub fn adopt(&mut self, mut shape: Shape, absolute_top_left: Point) {
        shape.set_top_left(absolute_top_left - self.center().to_vec2());
        shape.set_parent(Some(self.id));
        self.children.push(shape);
    }

    /// Members, in the order they were adopted.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    /// Depth-first search through members and nested groups.
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.children.iter().find_map(|child| {
            if child.id() == id {
                Some(child)
            } else {
                child.as_group().and_then(|group| group.find_shape(id))
            }
        })
    }

    pub fn find_group(&self, id: ShapeId) -> Option<&Group> {
        self.find_shape(id).and_then(Shape::as_group)
    }
}

impl ShapeTrait for Group {
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
        let local = point - self.center().to_vec2();
        self.children
            .iter()
            .any(|child| child.hit_test(local, tolerance))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
