//! Per-kind shape options and their defaults.
//!
//! Every field is optional; unset fields fall back to the kind's defaults
//! listed on each struct. Caller values always win.

use crate::shapes::{
    Circle, FILL, Line, Rectangle, STROKE, ShapeColor, ShapeStyle, ShapeTrait, Text,
};
use kurbo::Point;

/// Stroke width used when none is given.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

fn style(fill: Option<ShapeColor>, stroke: Option<ShapeColor>, width: Option<f64>) -> ShapeStyle {
    ShapeStyle::new(
        fill.unwrap_or(FILL),
        stroke.unwrap_or(STROKE),
        width.unwrap_or(DEFAULT_STROKE_WIDTH),
    )
}

/// Options for a new circle.
///
/// Defaults: `left 100`, `top 100`, `radius 50`, transparent fill, black stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircleOptions {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub radius: Option<f64>,
    pub fill: Option<ShapeColor>,
    pub stroke: Option<ShapeColor>,
    pub stroke_width: Option<f64>,
    pub data: Option<String>,
}

impl CircleOptions {
    pub const DEFAULT_LEFT: f64 = 100.0;
    pub const DEFAULT_TOP: f64 = 100.0;
    pub const DEFAULT_RADIUS: f64 = 50.0;

    /// Merge over the defaults and build the shape.
    pub fn build(self) -> Circle {
        let position = Point::new(
            self.left.unwrap_or(Self::DEFAULT_LEFT),
            self.top.unwrap_or(Self::DEFAULT_TOP),
        );
        let mut circle = Circle::new(position, self.radius.unwrap_or(Self::DEFAULT_RADIUS));
        circle.style = style(self.fill, self.stroke, self.stroke_width);
        circle.data = self.data;
        circle
    }
}

/// Options for a new rectangle.
///
/// Defaults: `left 100`, `top 100`, `width 40`, `height 40`, transparent fill,
/// black stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectOptions {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<ShapeColor>,
    pub stroke: Option<ShapeColor>,
    pub stroke_width: Option<f64>,
    pub data: Option<String>,
}

impl RectOptions {
    pub const DEFAULT_LEFT: f64 = 100.0;
    pub const DEFAULT_TOP: f64 = 100.0;
    pub const DEFAULT_WIDTH: f64 = 40.0;
    pub const DEFAULT_HEIGHT: f64 = 40.0;

    /// Merge over the defaults and build the shape.
    pub fn build(self) -> Rectangle {
        let position = Point::new(
            self.left.unwrap_or(Self::DEFAULT_LEFT),
            self.top.unwrap_or(Self::DEFAULT_TOP),
        );
        let mut rect = Rectangle::new(
            position,
            self.width.unwrap_or(Self::DEFAULT_WIDTH),
            self.height.unwrap_or(Self::DEFAULT_HEIGHT),
        );
        rect.style = style(self.fill, self.stroke, self.stroke_width);
        rect.data = self.data;
        rect
    }
}

/// Options for a new line.
///
/// Defaults: points `[50, 10, 200, 150]` placed with its top-left at
/// `left 170`, `top 150`, black stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOptions {
    /// Endpoints as `[x1, y1, x2, y2]`.
    pub points: Option<[f64; 4]>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub fill: Option<ShapeColor>,
    pub stroke: Option<ShapeColor>,
    pub stroke_width: Option<f64>,
    pub data: Option<String>,
}

impl LineOptions {
    pub const DEFAULT_POINTS: [f64; 4] = [50.0, 10.0, 200.0, 150.0];
    pub const DEFAULT_LEFT: f64 = 170.0;
    pub const DEFAULT_TOP: f64 = 150.0;

    /// Merge over the defaults and build the shape.
    pub fn build(self) -> Line {
        let mut line = Line::from_coords(self.points.unwrap_or(Self::DEFAULT_POINTS));
        line.set_top_left(Point::new(
            self.left.unwrap_or(Self::DEFAULT_LEFT),
            self.top.unwrap_or(Self::DEFAULT_TOP),
        ));
        line.style = style(self.fill, self.stroke, self.stroke_width);
        line.data = self.data;
        line
    }
}

/// Options for a new text box.
///
/// Defaults: `left 100`, `top 100`, `font_size 16`, `font_family "Arial"`,
/// black fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub width: Option<f64>,
    pub fill: Option<ShapeColor>,
    pub stroke: Option<ShapeColor>,
    pub data: Option<String>,
}

impl TextOptions {
    pub const DEFAULT_LEFT: f64 = 100.0;
    pub const DEFAULT_TOP: f64 = 100.0;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Arial";

    /// Merge over the defaults and build the shape with `content`.
    pub fn build(self, content: impl Into<String>) -> Text {
        let position = Point::new(
            self.left.unwrap_or(Self::DEFAULT_LEFT),
            self.top.unwrap_or(Self::DEFAULT_TOP),
        );
        let mut text = Text::new(position, content);
        text.font_size = self.font_size.unwrap_or(Text::DEFAULT_FONT_SIZE);
        text.font_family = self
            .font_family
            .unwrap_or_else(|| Self::DEFAULT_FONT_FAMILY.to_string());
        text.width = self.width;
        // Text is painted with its fill, so the default fill is the stroke color.
        text.style = ShapeStyle::new(
            self.fill.unwrap_or(STROKE),
            self.stroke.unwrap_or(STROKE),
            DEFAULT_STROKE_WIDTH,
        );
        text.data = self.data;
        text
    }
}
