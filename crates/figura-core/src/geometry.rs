//! Absolute positioning and union bounds for shapes inside nested groups.

use crate::error::{EditorError, Result};
use crate::shapes::{Group, Shape, ShapeId, ShapeTrait};
use kurbo::{Point, Rect, Vec2};

/// Resolves a shape's parent reference to the group that owns it.
pub trait GroupLookup {
    /// Find a group anywhere in the object graph.
    fn group(&self, id: ShapeId) -> Option<&Group>;
}

/// Axis-aligned box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Top-left corner of `shape` in top-level canvas coordinates.
///
/// Group members store their position relative to the group's center, so
/// the group's absolute center is added, recursing through nested groups.
/// A parent id that no longer resolves is treated as top-level.
pub fn absolute_top_left<L, S>(lookup: &L, shape: &S) -> Point
where
    L: GroupLookup + ?Sized,
    S: ShapeTrait + ?Sized,
{
    match shape.parent().and_then(|id| lookup.group(id)) {
        Some(group) => shape.top_left() + absolute_center(lookup, group).to_vec2(),
        None => shape.top_left(),
    }
}

/// Center point of `shape` in top-level canvas coordinates.
pub fn absolute_center<L, S>(lookup: &L, shape: &S) -> Point
where
    L: GroupLookup + ?Sized,
    S: ShapeTrait + ?Sized,
{
    let size = shape.size();
    absolute_top_left(lookup, shape) + Vec2::new(size.width / 2.0, size.height / 2.0)
}

/// Smallest box enclosing every shape, in top-level canvas coordinates.
///
/// Fails with [`EditorError::InvalidArgument`] when `shapes` is empty.
pub fn union_bounds<'a, L, I>(lookup: &L, shapes: I) -> Result<Bounds>
where
    L: GroupLookup + ?Sized,
    I: IntoIterator<Item = &'a Shape>,
{
    let mut left = f64::MAX;
    let mut top = f64::MAX;
    let mut right = f64::MIN;
    let mut bottom = f64::MIN;
    let mut count = 0usize;

    for shape in shapes {
        let tl = absolute_top_left(lookup, shape);
        let size = shape.size();
        left = left.min(tl.x);
        top = top.min(tl.y);
        right = right.max(tl.x + size.width);
        bottom = bottom.max(tl.y + size.height);
        count += 1;
    }

    if count == 0 {
        return Err(EditorError::InvalidArgument(
            "cannot compute bounds of an empty shape list".to_string(),
        ));
    }

    Ok(Bounds::new(left, top, right - left, bottom - top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle};

    /// Lookup over a fixed set of top-level groups.
    struct Groups(Vec<Group>);

    impl GroupLookup for Groups {
        fn group(&self, id: ShapeId) -> Option<&Group> {
            self.0
                .iter()
                .find_map(|g| if g.id() == id { Some(g) } else { g.find_group(id) })
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_union_of_two_shapes() {
        let shapes = [rect(0.0, 0.0, 20.0, 20.0), rect(30.0, 10.0, 10.0, 10.0)];
        let bounds = union_bounds(&Groups(vec![]), &shapes).unwrap();
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 40.0, 30.0));
    }

    #[test]
    fn test_union_of_one_shape_is_its_box() {
        let shapes = [Shape::Circle(Circle::new(Point::new(5.0, 7.0), 10.0))];
        let bounds = union_bounds(&Groups(vec![]), &shapes).unwrap();
        assert_eq!(bounds, Bounds::new(5.0, 7.0, 20.0, 20.0));
    }

    #[test]
    fn test_union_in_negative_space() {
        let shapes = [rect(-50.0, -40.0, 10.0, 10.0), rect(-20.0, -30.0, 5.0, 5.0)];
        let bounds = union_bounds(&Groups(vec![]), &shapes).unwrap();
        assert_eq!(bounds, Bounds::new(-50.0, -40.0, 35.0, 15.0));
    }

    #[test]
    fn test_union_of_empty_list_fails() {
        let shapes: [Shape; 0] = [];
        assert!(matches!(
            union_bounds(&Groups(vec![]), &shapes),
            Err(EditorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_absolute_position_of_group_member() {
        let mut group = Group::new(Point::new(100.0, 100.0), 40.0, 20.0);
        let member = rect(0.0, 0.0, 10.0, 10.0);
        let member_id = member.id();
        group.adopt(member, Point::new(110.0, 105.0));

        let lookup = Groups(vec![group]);
        let member = lookup.0[0].find_shape(member_id).unwrap();
        assert_eq!(member.top_left(), Point::new(-10.0, -5.0));
        assert_eq!(absolute_top_left(&lookup, member), Point::new(110.0, 105.0));
        assert_eq!(absolute_center(&lookup, member), Point::new(115.0, 110.0));
    }

    #[test]
    fn test_absolute_position_through_nested_groups() {
        let mut inner = Group::new(Point::new(10.0, 10.0), 20.0, 20.0);
        let member = rect(0.0, 0.0, 4.0, 4.0);
        let member_id = member.id();
        inner.adopt(member, Point::new(12.0, 14.0));

        let mut outer = Group::new(Point::new(0.0, 0.0), 100.0, 100.0);
        outer.adopt(Shape::Group(inner), Point::new(10.0, 10.0));

        let lookup = Groups(vec![outer]);
        let member = lookup.0[0].find_shape(member_id).unwrap();
        assert_eq!(absolute_top_left(&lookup, member), Point::new(12.0, 14.0));
    }

    #[test]
    fn test_bounds_rect_conversion() {
        let bounds = Bounds::from(Rect::new(30.0, 40.0, 10.0, 20.0));
        assert_eq!(bounds, Bounds::new(10.0, 20.0, 20.0, 20.0));
        assert_eq!(bounds.to_rect(), Rect::new(10.0, 20.0, 30.0, 40.0));
    }
}
