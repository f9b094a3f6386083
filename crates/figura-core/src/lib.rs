//! Figura Core Library
//!
//! Shape graph, editor facade and event replication for the Figura diagram editor.
//! Everything here is single-threaded: a host owns one [`Canvas`] and drives it
//! from its UI event loop.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod host;
pub mod options;
pub mod replicator;
pub mod selection;
pub mod shapes;
pub mod toolbar;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, CanvasNotification, ListenerId, NotificationKind};
pub use config::EditorConfig;
pub use editor::{Editor, EditorState};
pub use error::{EditorError, Result};
pub use geometry::{Bounds, GroupLookup, absolute_center, absolute_top_left, union_bounds};
pub use host::{CanvasHost, HostWindow, MountTarget, SubscriptionId};
pub use options::{CircleOptions, LineOptions, RectOptions, TextOptions};
pub use replicator::{DomainEvent, EventKind, EventReplicator, preset_event};
pub use selection::SelectionTracker;
pub use shapes::{Shape, ShapeColor, ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
pub use toolbar::ToolbarAction;
