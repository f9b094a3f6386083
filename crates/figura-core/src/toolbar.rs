//! Toolbar actions and their mapping onto editor operations.

use crate::editor::Editor;
use crate::error::{EditorError, Result};
use crate::options::{CircleOptions, LineOptions, RectOptions};
use crate::shapes::{ShapeColor, ShapeId};

/// Fill of the toolbar's box preset.
pub const BOX_FILL: ShapeColor = ShapeColor::rgb(0xdd, 0x00, 0x00);
/// Stroke of the toolbar's box and line presets.
pub const PRESET_STROKE: ShapeColor = ShapeColor::rgb(0xff, 0x00, 0x00);
/// Endpoints of the toolbar's line preset.
pub const LINE_POINTS: [f64; 4] = [250.0, 100.0, 200.0, 75.0];

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    /// Add the box preset.
    AddBox,
    /// Add a circle with default options.
    AddCircle,
    /// Add the line preset.
    AddLine,
    /// Add a text box with the given content.
    AddText(String),
    /// Replace the content of the selected text box.
    UpdateText(String),
    /// Group the two selected shapes.
    Join,
    /// Delete the selected shapes.
    DeleteSelected,
    /// Remove every shape.
    DeleteAll,
    /// Set the fill color of the selection.
    SetFill(ShapeColor),
    /// Set the stroke color of the selection.
    SetStroke(ShapeColor),
    ZoomIn,
    ZoomOut,
}

impl ToolbarAction {
    /// Whether the action is available for a selection of this size.
    pub fn is_enabled(&self, selection_len: usize) -> bool {
        match self {
            ToolbarAction::Join => selection_len == 2,
            _ => true,
        }
    }

    /// Run the action against the editor.
    ///
    /// `selected` is the tracked selection. Returns the ID of the shape
    /// created, if any.
    pub fn apply(&self, editor: &mut Editor, selected: &[ShapeId]) -> Result<Option<ShapeId>> {
        if !self.is_enabled(selected.len()) {
            return Err(EditorError::InvalidArgument(format!(
                "{self:?} is not available for {} selected shapes",
                selected.len()
            )));
        }

        let created = match self {
            ToolbarAction::AddBox => Some(editor.add_rectangle(RectOptions {
                fill: Some(BOX_FILL),
                stroke: Some(PRESET_STROKE),
                ..Default::default()
            })),
            ToolbarAction::AddCircle => Some(editor.add_circle(CircleOptions::default())),
            ToolbarAction::AddLine => Some(editor.add_line(LineOptions {
                points: Some(LINE_POINTS),
                left: Some(LineOptions::DEFAULT_LEFT),
                top: Some(LineOptions::DEFAULT_TOP),
                stroke: Some(PRESET_STROKE),
                ..Default::default()
            })),
            ToolbarAction::AddText(content) => Some(editor.add_text(content)),
            ToolbarAction::UpdateText(content) => {
                if !editor.update_text(content) {
                    log::warn!("Update text ignored: no text box is selected");
                }
                None
            }
            ToolbarAction::Join => Some(editor.group_items(selected)?),
            ToolbarAction::DeleteSelected => {
                editor.delete_selected();
                None
            }
            ToolbarAction::DeleteAll => {
                editor.delete_all();
                None
            }
            ToolbarAction::SetFill(color) => {
                editor.set_fill_color(*color);
                None
            }
            ToolbarAction::SetStroke(color) => {
                editor.set_stroke_color(*color);
                None
            }
            ToolbarAction::ZoomIn => {
                editor.zoom_in();
                None
            }
            ToolbarAction::ZoomOut => {
                editor.zoom_out();
                None
            }
        };
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::config::EditorConfig;
    use crate::shapes::{Shape, ShapeTrait};
    use kurbo::Point;

    fn editor() -> Editor {
        Editor::new(Canvas::default(), &EditorConfig::default())
    }

    #[test]
    fn test_join_enabled_only_for_two() {
        assert!(!ToolbarAction::Join.is_enabled(0));
        assert!(!ToolbarAction::Join.is_enabled(1));
        assert!(ToolbarAction::Join.is_enabled(2));
        assert!(!ToolbarAction::Join.is_enabled(3));
        assert!(ToolbarAction::AddBox.is_enabled(0));
        assert!(ToolbarAction::DeleteSelected.is_enabled(5));
    }

    #[test]
    fn test_box_preset() {
        let mut editor = editor();
        let id = ToolbarAction::AddBox.apply(&mut editor, &[]).unwrap().unwrap();
        let shape = editor.canvas().get(id).unwrap();
        assert!(matches!(shape, Shape::Rectangle(_)));
        assert_eq!(shape.style().fill, BOX_FILL);
        assert_eq!(shape.style().stroke, PRESET_STROKE);
    }

    #[test]
    fn test_line_preset() {
        let mut editor = editor();
        let id = ToolbarAction::AddLine.apply(&mut editor, &[]).unwrap().unwrap();
        let shape = editor.canvas().get(id).unwrap();
        assert_eq!(shape.top_left(), Point::new(170.0, 150.0));
        assert_eq!(shape.style().stroke, PRESET_STROKE);
    }

    #[test]
    fn test_join_groups_selection() {
        let mut editor = editor();
        let a = ToolbarAction::AddBox.apply(&mut editor, &[]).unwrap().unwrap();
        let b = ToolbarAction::AddCircle.apply(&mut editor, &[]).unwrap().unwrap();

        let group = ToolbarAction::Join.apply(&mut editor, &[a, b]).unwrap().unwrap();
        assert!(editor.canvas().get(group).unwrap().is_group());
        assert_eq!(editor.canvas().len(), 1);
    }

    #[test]
    fn test_disabled_join_is_rejected() {
        let mut editor = editor();
        let a = ToolbarAction::AddBox.apply(&mut editor, &[]).unwrap().unwrap();

        let result = ToolbarAction::Join.apply(&mut editor, &[a]);
        assert!(matches!(result, Err(EditorError::InvalidArgument(_))));
        assert_eq!(editor.canvas().len(), 1);
    }

    #[test]
    fn test_zoom_actions() {
        let mut editor = editor();
        ToolbarAction::ZoomIn.apply(&mut editor, &[]).unwrap();
        assert!((editor.zoom() - 2.0).abs() < f64::EPSILON);
        ToolbarAction::ZoomOut.apply(&mut editor, &[]).unwrap();
        assert!((editor.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_all_action() {
        let mut editor = editor();
        ToolbarAction::AddBox.apply(&mut editor, &[]).unwrap();
        ToolbarAction::AddText("hi".into()).apply(&mut editor, &[]).unwrap();
        assert_eq!(ToolbarAction::DeleteAll.apply(&mut editor, &[]).unwrap(), None);
        assert!(editor.canvas().is_empty());
    }

    #[test]
    fn test_set_fill_updates_state() {
        let mut editor = editor();
        ToolbarAction::SetFill(BOX_FILL).apply(&mut editor, &[]).unwrap();
        assert_eq!(editor.fill_color(), BOX_FILL);
    }
}
