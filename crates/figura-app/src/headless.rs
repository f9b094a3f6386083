//! Window and mount target stand-ins for running without a display.

use figura_core::{HostWindow, MountTarget, SubscriptionId};
use kurbo::Size;

/// Mount target with a fixed client size.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessTarget {
    pub size: Size,
}

impl HeadlessTarget {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

impl Default for HeadlessTarget {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl MountTarget for HeadlessTarget {
    fn client_size(&self) -> Size {
        self.size
    }
}

/// Window that never resizes but tracks its subscriptions.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    next_id: u64,
    subscriptions: Vec<SubscriptionId>,
}

impl HeadlessWindow {
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl HostWindow for HeadlessWindow {
    fn subscribe_resize(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: SubscriptionId) {
        self.subscriptions.retain(|s| *s != id);
    }
}
