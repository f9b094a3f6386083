//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Size};
use uuid::Uuid;

/// A text box.
///
/// Text is painted with its fill color; the stroke is normally unused.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) id: ShapeId,
    pub(crate) parent: Option<ShapeId>,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Fixed box width. When `None` the width follows the content.
    pub width: Option<f64>,
    /// Style properties.
    pub style: ShapeStyle,
    /// Caller-supplied tag.
    pub data: Option<String>,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.16;
    /// Approximate glyph advance as a multiple of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.6;

    /// Create a new text shape.
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            position,
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: "Arial".to_string(),
            width: None,
            style: ShapeStyle::default(),
            data: None,
        }
    }

    /// Replace the text content, leaving every other attribute untouched.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }

    /// Approximate size from content metrics (no font shaping).
    fn approximate_size(&self) -> Size {
        let longest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = self
            .width
            .unwrap_or(longest as f64 * self.font_size * Self::CHAR_WIDTH_FACTOR);
        let height = self.line_count() as f64 * self.font_size * Self::LINE_HEIGHT;
        Size::new(width, height)
    }
}

impl ShapeTrait for Text {
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
        self.approximate_size()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        Rect::from_origin_size(self.position, self.size())
            .inflate(tolerance, tolerance)
            .contains(point)
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
    fn test_text_size_follows_content() {
        let text = Text::new(Point::new(0.0, 0.0), "hello\nworld!");
        let size = text.size();
        assert!((size.width - 6.0 * 16.0 * 0.6).abs() < 1e-9);
        assert!((size.height - 2.0 * 16.0 * Text::LINE_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_width() {
        let mut text = Text::new(Point::new(0.0, 0.0), "a");
        text.width = Some(200.0);
        assert!((text.size().width - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let text = Text::new(Point::new(0.0, 0.0), "");
        assert!((text.size().height - 16.0 * Text::LINE_HEIGHT).abs() < 1e-9);
        assert!(text.size().width.abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_content_keeps_style() {
        let mut text = Text::new(Point::new(5.0, 5.0), "old");
        let style = text.style.clone();
        text.set_content("hi");
        assert_eq!(text.content, "hi");
        assert_eq!(text.style, style);
        assert_eq!(text.position, Point::new(5.0, 5.0));
    }
}
