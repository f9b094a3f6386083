//! Mount/unmount lifecycle of a canvas inside a hosting view.
//!
//! Every registration made on mount is released on unmount and the canvas
//! is disposed, so a torn-down view leaves no handlers behind.

use crate::canvas::{Canvas, CanvasNotification, ListenerId, NotificationKind};
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::Result;
use crate::replicator::{DomainEvent, EventReplicator};
use crate::selection::SelectionTracker;
use crate::shapes::ShapeId;
use crate::toolbar::ToolbarAction;
use kurbo::{Point, Size};

/// The element a canvas is mounted into.
pub trait MountTarget {
    /// Current client area in pixels.
    fn client_size(&self) -> Size;
}

/// Handle for a window resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The window delivering resize events to the host.
///
/// The window calls [`CanvasHost::on_resize`] for as long as the
/// subscription is live.
pub trait HostWindow {
    fn subscribe_resize(&mut self) -> SubscriptionId;
    fn unsubscribe_resize(&mut self, id: SubscriptionId);
}

/// A mounted canvas with its editor, selection tracker and event replicator.
#[derive(Debug)]
pub struct CanvasHost<T: MountTarget> {
    target: T,
    editor: Editor,
    selection: SelectionTracker,
    replicator: EventReplicator,
    resize_subscription: SubscriptionId,
    listeners: Vec<ListenerId>,
    hovered: Option<ShapeId>,
}

impl<T: MountTarget> CanvasHost<T> {
    /// Create a canvas sized to `target` and wire it up.
    pub fn mount(target: T, window: &mut impl HostWindow, config: &EditorConfig) -> Self {
        let size = target.client_size();
        let mut canvas = Canvas::new(size);
        canvas.render_all();

        let resize_subscription = window.subscribe_resize();

        let listeners = vec![
            canvas.on(NotificationKind::MouseMove, |notification| {
                if let CanvasNotification::MouseMove { pointer, target } = notification {
                    log::trace!(
                        "Pointer at ({:.1}, {:.1}) over {:?}",
                        pointer.x,
                        pointer.y,
                        target
                    );
                }
            }),
            canvas.on(NotificationKind::ObjectMoved, |notification| {
                if let CanvasNotification::ObjectMoved { id } = notification {
                    log::debug!("Object {} moved", id);
                }
            }),
        ];
        let selection = SelectionTracker::attach(&mut canvas);

        log::info!("Mounted canvas at {}x{}", size.width, size.height);
        Self {
            target,
            editor: Editor::new(canvas, config),
            selection,
            replicator: EventReplicator::new(),
            resize_subscription,
            listeners,
            hovered: None,
        }
    }

    /// Follow the mount target's size.
    pub fn on_resize(&mut self) {
        let size = self.target.client_size();
        let canvas = self.editor.canvas_mut();
        canvas.set_size(size.width, size.height);
        canvas.render_all();
        log::debug!("Resized canvas to {}x{}", size.width, size.height);
    }

    /// Forward a pointer move and remember the hovered object.
    pub fn on_pointer_move(&mut self, screen_point: Point) -> Option<ShapeId> {
        self.hovered = self.editor.canvas_mut().pointer_move(screen_point);
        self.hovered
    }

    /// Replicate the current external event list onto the canvas.
    pub fn sync_events(&mut self, events: &[DomainEvent]) -> Vec<ShapeId> {
        self.replicator.replicate(&mut self.editor, events)
    }

    /// Run a toolbar action against the tracked selection.
    pub fn dispatch(&mut self, action: &ToolbarAction) -> Result<Option<ShapeId>> {
        let selected = self.selection.selected();
        action.apply(&mut self.editor, &selected)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn replicator_mut(&mut self) -> &mut EventReplicator {
        &mut self.replicator
    }

    /// Object under the pointer at the last move.
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Release every registration and dispose the canvas.
    ///
    /// The disposed canvas is handed back for inspection.
    pub fn unmount(self, window: &mut impl HostWindow) -> Canvas {
        window.unsubscribe_resize(self.resize_subscription);

        let mut canvas = self.editor.into_canvas();
        self.selection.detach(&mut canvas);
        for id in self.listeners {
            canvas.off(id);
        }
        if canvas.listener_count() > 0 {
            log::warn!("{} foreign listeners still registered at unmount", canvas.listener_count());
        }
        canvas.dispose();
        log::info!("Unmounted canvas");
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replicator::{EventKind, preset_event};
    use std::cell::Cell;
    use std::rc::Rc;

    struct FixedTarget(Rc<Cell<Size>>);

    impl MountTarget for FixedTarget {
        fn client_size(&self) -> Size {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct FakeWindow {
        next: u64,
        live: Vec<SubscriptionId>,
    }

    impl HostWindow for FakeWindow {
        fn subscribe_resize(&mut self) -> SubscriptionId {
            let id = SubscriptionId(self.next);
            self.next += 1;
            self.live.push(id);
            id
        }

        fn unsubscribe_resize(&mut self, id: SubscriptionId) {
            self.live.retain(|live| *live != id);
        }
    }

    fn mount() -> (CanvasHost<FixedTarget>, FakeWindow, Rc<Cell<Size>>) {
        let size = Rc::new(Cell::new(Size::new(800.0, 600.0)));
        let mut window = FakeWindow::default();
        let host = CanvasHost::mount(
            FixedTarget(Rc::clone(&size)),
            &mut window,
            &EditorConfig::default(),
        );
        (host, window, size)
    }

    #[test]
    fn test_mount_sizes_and_renders() {
        let (host, window, _) = mount();
        let canvas = host.editor().canvas();
        assert_eq!(canvas.size(), Size::new(800.0, 600.0));
        assert_eq!(canvas.render_count(), 1);
        assert_eq!(window.live.len(), 1);
        // mouse:move, object:moved and three selection listeners
        assert_eq!(canvas.listener_count(), 5);
    }

    #[test]
    fn test_resize_follows_target() {
        let (mut host, _, size) = mount();
        size.set(Size::new(1024.0, 768.0));
        host.on_resize();
        assert_eq!(host.editor().canvas().size(), Size::new(1024.0, 768.0));
        assert!(!host.editor().canvas().needs_render());
    }

    #[test]
    fn test_unmount_releases_everything() {
        let (mut host, mut window, _) = mount();
        host.dispatch(&ToolbarAction::AddBox).unwrap();

        let canvas = host.unmount(&mut window);
        assert!(window.live.is_empty());
        assert_eq!(canvas.listener_count(), 0);
        assert!(canvas.is_disposed());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_pointer_move_records_hover() {
        let (mut host, _, _) = mount();
        let id = host.dispatch(&ToolbarAction::AddBox).unwrap().unwrap();

        // Box preset spans (100, 100) to (140, 140)
        assert_eq!(host.on_pointer_move(Point::new(120.0, 120.0)), Some(id));
        assert_eq!(host.hovered(), Some(id));
        assert_eq!(host.on_pointer_move(Point::new(5.0, 5.0)), None);
        assert_eq!(host.hovered(), None);
    }

    #[test]
    fn test_join_uses_tracked_selection() {
        let (mut host, _, _) = mount();
        let a = host.dispatch(&ToolbarAction::AddBox).unwrap().unwrap();
        let b = host.dispatch(&ToolbarAction::AddCircle).unwrap().unwrap();

        assert!(host.dispatch(&ToolbarAction::Join).is_err());

        host.editor_mut().canvas_mut().set_active_objects(&[a, b]);
        assert!(host.selection().is_joinable());
        let group = host.dispatch(&ToolbarAction::Join).unwrap().unwrap();
        assert_eq!(host.selection().selected(), vec![group]);
    }

    #[test]
    fn test_sync_events() {
        let (mut host, _, _) = mount();
        let e1 = preset_event(EventKind::Box, "1").unwrap();
        let e2 = preset_event(EventKind::Circle, "2").unwrap();

        assert_eq!(host.sync_events(&[e1.clone()]).len(), 1);
        assert_eq!(host.sync_events(&[e1.clone()]).len(), 0);
        assert_eq!(host.sync_events(&[e1, e2]).len(), 1);
        assert_eq!(host.editor().canvas().len(), 2);
    }
}
