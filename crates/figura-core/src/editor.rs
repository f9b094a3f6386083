//! Editor facade: the single gateway for shape mutations on one canvas.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::options::{CircleOptions, LineOptions, RectOptions, TextOptions};
use crate::shapes::{Shape, ShapeColor, ShapeId, ShapeTrait};

/// Pending style applied to new and recolored shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorState {
    pub fill_color: ShapeColor,
    pub stroke_color: ShapeColor,
}

/// Imperative editing operations over a canvas.
///
/// All operations run synchronously against the canvas object graph.
#[derive(Debug)]
pub struct Editor {
    canvas: Canvas,
    state: EditorState,
    scale_step: f64,
}

impl Editor {
    /// Build an editor around a canvas.
    pub fn new(canvas: Canvas, config: &EditorConfig) -> Self {
        Self {
            canvas,
            state: EditorState {
                fill_color: config.default_fill_color,
                stroke_color: config.default_stroke_color,
            },
            scale_step: config.effective_scale_step(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Give the canvas back, e.g. for disposal.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn fill_color(&self) -> ShapeColor {
        self.state.fill_color
    }

    pub fn stroke_color(&self) -> ShapeColor {
        self.state.stroke_color
    }

    pub fn scale_step(&self) -> f64 {
        self.scale_step
    }

    pub fn zoom(&self) -> f64 {
        self.canvas.zoom()
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = self.canvas.add(shape);
        self.canvas.render_all();
        id
    }

    pub fn add_circle(&mut self, options: CircleOptions) -> ShapeId {
        self.insert(Shape::Circle(options.build()))
    }

    pub fn add_rectangle(&mut self, options: RectOptions) -> ShapeId {
        self.insert(Shape::Rectangle(options.build()))
    }

    pub fn add_line(&mut self, options: LineOptions) -> ShapeId {
        self.insert(Shape::Line(options.build()))
    }

    /// Add a text box painted with the current stroke color.
    pub fn add_text(&mut self, text: &str) -> ShapeId {
        let options = TextOptions {
            fill: Some(self.state.stroke_color),
            ..Default::default()
        };
        self.insert(Shape::Text(options.build(text)))
    }

    /// Replace the content of the first selected shape if it is text.
    ///
    /// Returns whether anything changed. Other shapes are left untouched.
    pub fn update_text(&mut self, text: &str) -> bool {
        let Some(&first) = self.canvas.active_objects().first() else {
            return false;
        };
        let Some(target) = self.canvas.get_mut(first).and_then(Shape::as_text_mut) else {
            return false;
        };
        target.set_content(text);
        self.canvas.render_all();
        true
    }

    /// Remove every shape and clear the selection.
    pub fn delete_all(&mut self) {
        let removed = self.canvas.len();
        self.canvas.clear();
        self.canvas.render_all();
        log::debug!("Deleted all {} objects", removed);
    }

    /// Remove every selected shape and clear the selection.
    pub fn delete_selected(&mut self) {
        let selected = self.canvas.active_objects().to_vec();
        for id in &selected {
            self.canvas.remove(*id);
        }
        self.canvas.discard_active_object();
        self.canvas.render_all();
        log::debug!("Deleted {} selected objects", selected.len());
    }

    /// Replace `shapes` with a single group sized to their union bounds.
    ///
    /// Fails on an empty list or an ID that is not a top-level shape.
    pub fn group_items(&mut self, shapes: &[ShapeId]) -> Result<ShapeId> {
        let group = self.canvas.group(shapes)?;
        self.canvas.render_all();
        Ok(group)
    }

    fn restyle_selection(&mut self, apply: impl Fn(&mut Shape)) {
        for id in self.canvas.active_objects().to_vec() {
            if let Some(shape) = self.canvas.get_mut(id) {
                restyle(shape, &apply);
            }
        }
        self.canvas.render_all();
    }

    /// Set the pending fill color and apply it to the selection.
    pub fn set_fill_color(&mut self, color: ShapeColor) {
        self.state.fill_color = color;
        self.restyle_selection(|shape| shape.style_mut().fill = color);
    }

    /// Set the pending stroke color and apply it to the selection.
    ///
    /// Text is painted with its fill, so text shapes receive the color as fill.
    pub fn set_stroke_color(&mut self, color: ShapeColor) {
        self.state.stroke_color = color;
        self.restyle_selection(|shape| match shape {
            Shape::Text(text) => text.style.fill = color,
            other => other.style_mut().stroke = color,
        });
    }

    /// Zoom in by `1 / scale_step`.
    pub fn zoom_in(&mut self) {
        let zoom = self.canvas.zoom() / self.scale_step;
        self.canvas.set_zoom(zoom);
        self.canvas.render_all();
    }

    /// Zoom out by `scale_step`.
    pub fn zoom_out(&mut self) {
        let zoom = self.canvas.zoom() * self.scale_step;
        self.canvas.set_zoom(zoom);
        self.canvas.render_all();
    }
}

/// Apply a style change to a shape and, for groups, to every member.
fn restyle(shape: &mut Shape, apply: &impl Fn(&mut Shape)) {
    if let Shape::Group(group) = shape {
        for child in group.children_mut() {
            restyle(child, apply);
        }
    }
    apply(shape);
}
