//! Replay scripts: JSON lists of event snapshots and toolbar actions.

use crate::headless::{HeadlessTarget, HeadlessWindow};
use figura_core::{
    CanvasHost, DomainEvent, EditorConfig, EditorError, ShapeColor, ShapeTrait, ToolbarAction,
};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the `figura` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// A toolbar action as written in a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptAction {
    AddBox,
    AddCircle,
    AddLine,
    AddText { content: String },
    UpdateText { content: String },
    Join,
    DeleteSelected,
    DeleteAll,
    SetFill { color: ShapeColor },
    SetStroke { color: ShapeColor },
    ZoomIn,
    ZoomOut,
}

impl From<ScriptAction> for ToolbarAction {
    fn from(action: ScriptAction) -> Self {
        match action {
            ScriptAction::AddBox => ToolbarAction::AddBox,
            ScriptAction::AddCircle => ToolbarAction::AddCircle,
            ScriptAction::AddLine => ToolbarAction::AddLine,
            ScriptAction::AddText { content } => ToolbarAction::AddText(content),
            ScriptAction::UpdateText { content } => ToolbarAction::UpdateText(content),
            ScriptAction::Join => ToolbarAction::Join,
            ScriptAction::DeleteSelected => ToolbarAction::DeleteSelected,
            ScriptAction::DeleteAll => ToolbarAction::DeleteAll,
            ScriptAction::SetFill { color } => ToolbarAction::SetFill(color),
            ScriptAction::SetStroke { color } => ToolbarAction::SetStroke(color),
            ScriptAction::ZoomIn => ToolbarAction::ZoomIn,
            ScriptAction::ZoomOut => ToolbarAction::ZoomOut,
        }
    }
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// The full external event list at this point in time.
    Events(Vec<DomainEvent>),
    /// A toolbar click.
    Action(ScriptAction),
    /// Select every top-level object.
    SelectAll,
    /// Select the objects at these z-order positions.
    Select(Vec<usize>),
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Mount a headless canvas, run every step, and unmount.
///
/// Returns the summary of the object graph taken just before unmounting.
pub fn run_script(script: &Script, config: &EditorConfig) -> Result<String, AppError> {
    run_script_in(&mut HeadlessWindow::default(), script, config)
}

/// Like [`run_script`], mounting into the given window.
///
/// The canvas is unmounted whether or not a step fails.
pub fn run_script_in(
    window: &mut HeadlessWindow,
    script: &Script,
    config: &EditorConfig,
) -> Result<String, AppError> {
    let mut host = CanvasHost::mount(HeadlessTarget::default(), window, config);
    let outcome = run_steps(&mut host, script);
    let summary = summarize(&host);
    host.unmount(window);
    outcome.map(|()| summary)
}

fn run_steps(host: &mut CanvasHost<HeadlessTarget>, script: &Script) -> Result<(), AppError> {
    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Events(events) => {
                let created = host.sync_events(events);
                log::info!(
                    "Step {}: {} new shapes from {} events",
                    index,
                    created.len(),
                    events.len()
                );
            }
            Step::Action(step_action) => {
                let action = ToolbarAction::from(step_action.clone());
                let created = host.dispatch(&action).inspect_err(|err| {
                    log::warn!("Step {}: {:?} failed: {}", index, action, err);
                })?;
                log::info!("Step {}: {:?} -> {:?}", index, action, created);
            }
            Step::SelectAll => {
                let canvas = host.editor_mut().canvas_mut();
                let ids = canvas.object_ids().to_vec();
                canvas.set_active_objects(&ids);
            }
            Step::Select(positions) => {
                let canvas = host.editor_mut().canvas_mut();
                let ids: Vec<_> = positions
                    .iter()
                    .filter_map(|&i| canvas.object_ids().get(i).copied())
                    .collect();
                if ids.len() != positions.len() {
                    log::warn!("Step {}: ignoring out of range positions", index);
                }
                canvas.set_active_objects(&ids);
            }
        }
    }
    Ok(())
}

/// One line per top-level object, back to front.
pub fn summarize(host: &CanvasHost<HeadlessTarget>) -> String {
    let editor = host.editor();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} objects, {} selected, zoom {}",
        editor.canvas().len(),
        host.selection().len(),
        editor.zoom()
    );
    for shape in editor.canvas().objects() {
        let bounds = shape.bounds();
        let _ = writeln!(
            out,
            "{} at ({}, {}) {}x{} fill {} stroke {}{}",
            shape.kind().name(),
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height(),
            shape.style().fill,
            shape.style().stroke,
            shape.data().map(|d| format!(" data {d}")).unwrap_or_default(),
        );
    }
    out
}
