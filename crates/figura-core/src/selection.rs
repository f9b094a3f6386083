//! Selection tracking driven by canvas notifications.

use crate::canvas::{Canvas, CanvasNotification, ListenerId, NotificationKind};
use crate::shapes::ShapeId;
use std::cell::RefCell;
use std::rc::Rc;

/// Mirrors the canvas selection as a plain list.
///
/// The list is replaced wholesale on every `selection:*` notification and
/// never edited in place.
#[derive(Debug)]
pub struct SelectionTracker {
    selected: Rc<RefCell<Vec<ShapeId>>>,
    listeners: Vec<ListenerId>,
}

impl SelectionTracker {
    /// Subscribe to the canvas selection notifications.
    pub fn attach(canvas: &mut Canvas) -> Self {
        let selected = Rc::new(RefCell::new(canvas.active_objects().to_vec()));
        let listeners = [
            NotificationKind::SelectionCreated,
            NotificationKind::SelectionUpdated,
            NotificationKind::SelectionCleared,
        ]
        .into_iter()
        .map(|kind| {
            let sink = Rc::clone(&selected);
            canvas.on(kind, move |notification| {
                let next = match notification {
                    CanvasNotification::SelectionCreated { selected }
                    | CanvasNotification::SelectionUpdated { selected } => selected.clone(),
                    _ => Vec::new(),
                };
                *sink.borrow_mut() = next;
            })
        })
        .collect();

        Self {
            selected,
            listeners,
        }
    }

    /// Snapshot of the current selection.
    pub fn selected(&self) -> Vec<ShapeId> {
        self.selected.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.selected.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.borrow().is_empty()
    }

    /// Joining is offered only for exactly two selected shapes.
    pub fn is_joinable(&self) -> bool {
        self.len() == 2
    }

    /// Unregister from the canvas.
    pub fn detach(self, canvas: &mut Canvas) {
        for id in self.listeners {
            canvas.off(id);
        }
    }
}
