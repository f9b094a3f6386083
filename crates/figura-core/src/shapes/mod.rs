//! Shape definitions for the diagram canvas.

mod circle;
mod group;
mod line;
mod rectangle;
mod text;

pub use circle::Circle;
pub use group::Group;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::error::EditorError;
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Compact RGBA8 color as stored on shapes.
///
/// Parses and prints CSS-style strings, so it serializes as `"#rrggbb"`
/// (or `"#rrggbbaa"` when not fully opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when the color has transparency.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for ShapeColor {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidColor(s.to_string());
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(invalid)
            };
            return match hex.len() {
                // #rgb -> #rrggbb
                3 => Ok(Self::rgb(
                    channel(0..1)? * 17,
                    channel(1..2)? * 17,
                    channel(2..3)? * 17,
                )),
                6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
                8 => Ok(Self::new(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    channel(6..8)?,
                )),
                _ => Err(invalid()),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let args = args.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let alpha = if has_alpha {
            let a: f64 = parts[3].parse().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(invalid());
            }
            (a * 255.0).round() as u8
        } else {
            255
        };
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShapeColor> for String {
    fn from(color: ShapeColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Default fill: fully transparent white.
pub const FILL: ShapeColor = ShapeColor::new(255, 255, 255, 0);
/// Default stroke: opaque black.
pub const STROKE: ShapeColor = ShapeColor::black();

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill: ShapeColor,
    /// Stroke color.
    pub stroke: ShapeColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(fill: ShapeColor, stroke: ShapeColor, stroke_width: f64) -> Self {
        Self {
            fill,
            stroke,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(FILL, STROKE, 1.0)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Discriminant of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Text,
    Group,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
            ShapeKind::Group => "group",
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    let t = if len_sq > 0.0 {
        ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    point.distance(a + ab * t)
}

/// Common trait for all shapes.
///
/// Positions are expressed in the coordinate space of the shape's parent:
/// top-level canvas coordinates for ungrouped shapes, offsets from the
/// group's center point for group members.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Containing group, if any. Non-owning: the group owns this shape.
    fn parent(&self) -> Option<ShapeId>;

    /// Set or clear the containing group.
    fn set_parent(&mut self, parent: Option<ShapeId>);

    /// Top-left corner in parent coordinates.
    fn top_left(&self) -> Point;

    /// Move the shape so its top-left corner lands on `point`.
    fn set_top_left(&mut self, point: Point);

    /// Width and height of the shape's own bounding box.
    fn size(&self) -> Size;

    /// Bounding box in parent coordinates.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.top_left(), self.size())
    }

    /// Check if a point (in parent coordinates) hits the shape's geometry.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Translate by a delta in parent coordinates.
    fn translate(&mut self, delta: Vec2) {
        let origin = self.top_left();
        self.set_top_left(origin + delta);
    }
}

/// Tagged variant over every drawable object.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Text(Text),
    Group(Group),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Group(_) => ShapeKind::Group,
        }
    }

    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) => s,
            Shape::Text(s) => s,
            Shape::Group(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) => s,
            Shape::Text(s) => s,
            Shape::Group(s) => s,
        }
    }

    /// Caller-supplied tag (the originating event id for replicated shapes).
    pub fn data(&self) -> Option<&str> {
        match self {
            Shape::Rectangle(s) => s.data.as_deref(),
            Shape::Circle(s) => s.data.as_deref(),
            Shape::Line(s) => s.data.as_deref(),
            Shape::Text(s) => s.data.as_deref(),
            Shape::Group(_) => None,
        }
    }

    /// Center point in parent coordinates.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Hit test in parent coordinates.
    ///
    /// With `precise` set the shape's actual geometry is tested, otherwise
    /// only its bounding box.
    pub fn contains_point(&self, point: Point, tolerance: f64, precise: bool) -> bool {
        if precise {
            self.hit_test(point, tolerance)
        } else {
            self.bounds().inflate(tolerance, tolerance).contains(point)
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl ShapeTrait for Shape {
    fn id(&self) -> ShapeId {
        self.inner().id()
    }

    fn parent(&self) -> Option<ShapeId> {
        self.inner().parent()
    }

    fn set_parent(&mut self, parent: Option<ShapeId>) {
        self.inner_mut().set_parent(parent);
    }

    fn top_left(&self) -> Point {
        self.inner().top_left()
    }

    fn set_top_left(&mut self, point: Point) {
        self.inner_mut().set_top_left(point);
    }

    fn size(&self) -> Size {
        self.inner().size()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.inner().hit_test(point, tolerance)
    }

    fn style(&self) -> &ShapeStyle {
        self.inner().style()
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        self.inner_mut().style_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#ff0000".parse::<ShapeColor>().unwrap(), ShapeColor::rgb(255, 0, 0));
        assert_eq!("#FF0000".parse::<ShapeColor>().unwrap(), ShapeColor::rgb(255, 0, 0));
        assert_eq!("#0f0".parse::<ShapeColor>().unwrap(), ShapeColor::rgb(0, 255, 0));
        assert_eq!(
            "#00B2FF80".parse::<ShapeColor>().unwrap(),
            ShapeColor::new(0x00, 0xb2, 0xff, 0x80)
        );
    }

    #[test]
    fn test_parse_functional_colors() {
        assert_eq!("rgba(255, 255, 255, 0.0)".parse::<ShapeColor>().unwrap(), FILL);
        assert_eq!("rgb(1,2,3)".parse::<ShapeColor>().unwrap(), ShapeColor::rgb(1, 2, 3));
        assert_eq!("transparent".parse::<ShapeColor>().unwrap(), ShapeColor::transparent());
    }

    #[test]
    fn test_parse_invalid_colors() {
        for bad in ["", "red", "#12", "#gggggg", "rgb(1,2)", "rgba(1,2,3,2)", "rgb(300,0,0)"] {
            assert!(
                matches!(bad.parse::<ShapeColor>(), Err(EditorError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(ShapeColor::rgb(0, 178, 255).to_hex(), "#00b2ff");
        assert_eq!(FILL.to_hex(), "#ffffff00");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = ShapeColor::new(10, 20, 30, 40);
        let peniko: Color = color.into();
        assert_eq!(ShapeColor::from(peniko), color);
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < f64::EPSILON);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < f64::EPSILON);
        assert!((point_to_segment_dist(Point::new(0.0, 2.0), a, a) - 2.0).abs() < f64::EPSILON);
    }
}
