//! Canvas document and the mutable canvas handle.

use crate::camera::Camera;
use crate::error::{EditorError, Result};
use crate::geometry::{GroupLookup, absolute_top_left, union_bounds};
use crate::shapes::{Group, Shape, ShapeId, ShapeTrait};
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;
use std::fmt;

/// Default canvas width when the host does not provide one.
pub const DEFAULT_WIDTH: f64 = 300.0;
/// Default canvas height when the host does not provide one.
pub const DEFAULT_HEIGHT: f64 = 150.0;

/// Hit tolerance for pointer targeting, in world units.
const TARGET_TOLERANCE: f64 = 0.0;

/// The object graph: top-level shapes in z-order.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All top-level shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the z-order.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
    }

    /// Remove a top-level shape.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Clear all shapes from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a top-level shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a top-level shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Find a shape anywhere in the graph, including inside groups.
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        if let Some(shape) = self.shapes.get(&id) {
            return Some(shape);
        }
        self.shapes
            .values()
            .filter_map(Shape::as_group)
            .find_map(|group| group.find_shape(id))
    }

    /// Whether `id` is a top-level shape.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Top-level shape IDs, back to front.
    pub fn z_order(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of top-level shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Find top-level shapes at a point (in world coordinates), front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64, precise: bool) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.contains_point(point, tolerance, precise))
                    .map(|_| id)
            })
            .collect()
    }

    /// Replace the given top-level shapes with one group sized to their union.
    ///
    /// Members keep their absolute placement: their positions are rebased
    /// onto the group's center. The group takes the z-slot of the frontmost
    /// member. Nothing is mutated if any ID is not a top-level shape.
    pub fn group_shapes(&mut self, shape_ids: &[ShapeId]) -> Result<ShapeId> {
        if shape_ids.is_empty() {
            return Err(EditorError::InvalidArgument(
                "cannot group an empty list of shapes".to_string(),
            ));
        }
        if let Some(&missing) = shape_ids.iter().find(|id| !self.shapes.contains_key(id)) {
            return Err(EditorError::UnknownShape(missing));
        }

        // Members in z-order, duplicates collapsed
        let members: Vec<ShapeId> = self
            .z_order
            .iter()
            .copied()
            .filter(|id| shape_ids.contains(id))
            .collect();

        let bounds = union_bounds(&*self, members.iter().filter_map(|id| self.shapes.get(id)))?;
        let mut group = Group::new(bounds.origin(), bounds.width, bounds.height);
        let group_id = group.id();

        let frontmost = self
            .z_order
            .iter()
            .rposition(|id| members.contains(id))
            .unwrap_or(self.z_order.len());
        let insert_pos = frontmost + 1 - members.len();

        for id in &members {
            if let Some(shape) = self.shapes.remove(id) {
                let absolute = absolute_top_left(&*self, &shape);
                group.adopt(shape, absolute);
            }
        }
        self.z_order.retain(|id| !members.contains(id));

        self.shapes.insert(group_id, Shape::Group(group));
        self.z_order.insert(insert_pos.min(self.z_order.len()), group_id);

        Ok(group_id)
    }
}

impl GroupLookup for CanvasDocument {
    fn group(&self, id: ShapeId) -> Option<&Group> {
        self.find_shape(id).and_then(Shape::as_group)
    }
}

/// Names of the notifications a canvas emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    SelectionCleared,
    SelectionCreated,
    SelectionUpdated,
    MouseMove,
    ObjectMoved,
}

impl NotificationKind {
    /// Event name as used by canvas hosts.
    pub fn name(&self) -> &'static str {
        match self {
            NotificationKind::SelectionCleared => "selection:cleared",
            NotificationKind::SelectionCreated => "selection:created",
            NotificationKind::SelectionUpdated => "selection:updated",
            NotificationKind::MouseMove => "mouse:move",
            NotificationKind::ObjectMoved => "object:moved",
        }
    }

    /// Parse an event name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "selection:cleared" => Some(NotificationKind::SelectionCleared),
            "selection:created" => Some(NotificationKind::SelectionCreated),
            "selection:updated" => Some(NotificationKind::SelectionUpdated),
            "mouse:move" => Some(NotificationKind::MouseMove),
            "object:moved" => Some(NotificationKind::ObjectMoved),
            _ => None,
        }
    }
}

/// A notification delivered to canvas listeners after the state change it describes.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasNotification {
    SelectionCleared { deselected: Vec<ShapeId> },
    SelectionCreated { selected: Vec<ShapeId> },
    SelectionUpdated { selected: Vec<ShapeId> },
    /// Pointer moved; `pointer` is in screen coordinates.
    MouseMove { pointer: Point, target: Option<ShapeId> },
    ObjectMoved { id: ShapeId },
}

impl CanvasNotification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            CanvasNotification::SelectionCleared { .. } => NotificationKind::SelectionCleared,
            CanvasNotification::SelectionCreated { .. } => NotificationKind::SelectionCreated,
            CanvasNotification::SelectionUpdated { .. } => NotificationKind::SelectionUpdated,
            CanvasNotification::MouseMove { .. } => NotificationKind::MouseMove,
            CanvasNotification::ObjectMoved { .. } => NotificationKind::ObjectMoved,
        }
    }
}

/// Handle returned by [`Canvas::on`], used to unregister the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&CanvasNotification)>;

struct Listener {
    id: ListenerId,
    kind: NotificationKind,
    callback: Callback,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The mutable canvas handle: object graph, active selection, view state
/// and notification listeners.
#[derive(Debug)]
pub struct Canvas {
    document: CanvasDocument,
    camera: Camera,
    size: Size,
    /// Active selection, top-level IDs only.
    active: Vec<ShapeId>,
    listeners: Vec<Listener>,
    next_listener: u64,
    needs_render: bool,
    render_count: u64,
    disposed: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
    }
}

impl Canvas {
    /// Create an empty canvas of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            document: CanvasDocument::new(),
            camera: Camera::new(),
            size,
            active: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            needs_render: true,
            render_count: 0,
            disposed: false,
        }
    }

    // --- listeners ---

    /// Register a callback for one notification kind.
    pub fn on(
        &mut self,
        kind: NotificationKind,
        callback: impl FnMut(&CanvasNotification) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn fire(&mut self, notification: CanvasNotification) {
        if self.disposed {
            return;
        }
        let kind = notification.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(&notification);
        }
    }

    // --- objects ---

    /// The underlying object graph.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Add a shape on top of the z-order.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        log::debug!("Adding {} {}", shape.kind().name(), id);
        self.document.add_shape(shape);
        self.needs_render = true;
        id
    }

    /// Remove a top-level shape, dropping it from the active selection.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.document.remove_shape(id)?;
        log::debug!("Removed {} {}", removed.kind().name(), id);
        self.needs_render = true;

        if self.active.contains(&id) {
            self.active.retain(|&active| active != id);
            if self.active.is_empty() {
                self.fire(CanvasNotification::SelectionCleared {
                    deselected: vec![id],
                });
            } else {
                let selected = self.active.clone();
                self.fire(CanvasNotification::SelectionUpdated { selected });
            }
        }
        Some(removed)
    }

    /// Remove every object and discard the selection.
    pub fn clear(&mut self) {
        self.document.clear();
        self.needs_render = true;
        self.discard_active_object();
    }

    /// Top-level objects, back to front.
    pub fn objects(&self) -> impl Iterator<Item = &Shape> {
        self.document.shapes_ordered()
    }

    /// Top-level object IDs, back to front.
    pub fn object_ids(&self) -> &[ShapeId] {
        self.document.z_order()
    }

    /// Get a top-level object.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.document.get_shape(id)
    }

    /// Get a top-level object for mutation; marks the canvas for re-render.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let shape = self.document.get_shape_mut(id)?;
        self.needs_render = true;
        Some(shape)
    }

    /// Find an object anywhere in the graph, including inside groups.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.document.find_shape(id)
    }

    /// Number of top-level objects.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Translate a top-level object and notify `object:moved` listeners.
    pub fn move_object(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.document.get_shape_mut(id) else {
            return false;
        };
        shape.translate(delta);
        self.needs_render = true;
        self.fire(CanvasNotification::ObjectMoved { id });
        true
    }

    /// Group top-level objects and make the group the active selection.
    pub fn group(&mut self, ids: &[ShapeId]) -> Result<ShapeId> {
        let group_id = self.document.group_shapes(ids)?;
        log::debug!("Grouped {} shapes into {}", ids.len(), group_id);
        self.needs_render = true;

        let had_selection = !self.active.is_empty();
        self.active = vec![group_id];
        let selected = self.active.clone();
        if had_selection {
            self.fire(CanvasNotification::SelectionUpdated { selected });
        } else {
            self.fire(CanvasNotification::SelectionCreated { selected });
        }
        Ok(group_id)
    }

    // --- selection ---

    /// Currently selected top-level objects.
    pub fn active_objects(&self) -> &[ShapeId] {
        &self.active
    }

    /// Replace the active selection.
    ///
    /// IDs that are not top-level objects are ignored. An empty result
    /// discards the selection.
    pub fn set_active_objects(&mut self, ids: &[ShapeId]) {
        let mut selected: Vec<ShapeId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.document.contains(id) && !selected.contains(&id) {
                selected.push(id);
            }
        }

        if selected.is_empty() {
            self.discard_active_object();
            return;
        }
        if selected == self.active {
            return;
        }

        let had_selection = !self.active.is_empty();
        self.active = selected.clone();
        self.needs_render = true;
        if had_selection {
            self.fire(CanvasNotification::SelectionUpdated { selected });
        } else {
            self.fire(CanvasNotification::SelectionCreated { selected });
        }
    }

    /// Clear the active selection.
    pub fn discard_active_object(&mut self) {
        if self.active.is_empty() {
            return;
        }
        let deselected = std::mem::take(&mut self.active);
        self.needs_render = true;
        self.fire(CanvasNotification::SelectionCleared { deselected });
    }

    // --- view ---

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.needs_render = true;
        &mut self.camera
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.zoom = zoom;
        self.needs_render = true;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.needs_render = true;
    }

    /// Topmost object under a screen-space point.
    ///
    /// With `precise` the shape geometry is tested, otherwise bounding boxes.
    pub fn find_target(&self, screen_point: Point, precise: bool) -> Option<ShapeId> {
        let world = self.camera.screen_to_world(screen_point);
        self.document
            .shapes_at_point(world, TARGET_TOLERANCE, precise)
            .first()
            .copied()
    }

    /// Dispatch a pointer move: hit-test and notify `mouse:move` listeners.
    pub fn pointer_move(&mut self, screen_point: Point) -> Option<ShapeId> {
        let target = self.find_target(screen_point, true);
        self.fire(CanvasNotification::MouseMove {
            pointer: screen_point,
            target,
        });
        target
    }

    // --- lifecycle ---

    /// Flush pending changes to the screen.
    pub fn render_all(&mut self) {
        if self.disposed {
            return;
        }
        self.needs_render = false;
        self.render_count += 1;
    }

    /// Whether anything changed since the last [`Canvas::render_all`].
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Release every listener and object. The canvas stays inert afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!(
            "Disposing canvas with {} objects and {} listeners",
            self.document.len(),
            self.listeners.len()
        );
        self.listeners.clear();
        self.document.clear();
        self.active.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
