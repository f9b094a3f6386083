//! Figura headless host
//!
//! Mounts a canvas without a window, replays scripted event-list
//! snapshots and toolbar actions, and reports the resulting object graph.

mod headless;
mod script;

pub use headless::{HeadlessTarget, HeadlessWindow};
pub use script::{AppError, Script, ScriptAction, Step, run_script, run_script_in, summarize};
