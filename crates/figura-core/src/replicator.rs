//! Replays an externally owned list of domain events onto the canvas.

use crate::editor::Editor;
use crate::options::{CircleOptions, LineOptions, RectOptions};
use crate::shapes::{ShapeColor, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Horizontal extent of lines materialized from events.
pub const EVENT_LINE_LENGTH: f64 = 150.0;

/// Kind of shape an event asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Arrow,
    Line,
    Box,
    Circle,
}

/// An immutable request to place a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub position: Point,
    pub color: ShapeColor,
    pub size: f64,
}

/// Default event for a toolbar kind: placed at (10, 10), `#00B2FF`, size 20.
///
/// Returns `None` for kinds the toolbar cannot create.
pub fn preset_event(kind: EventKind, id: impl Into<String>) -> Option<DomainEvent> {
    match kind {
        EventKind::Box | EventKind::Circle | EventKind::Line => Some(DomainEvent {
            id: id.into(),
            kind,
            position: Point::new(10.0, 10.0),
            color: ShapeColor::rgb(0x00, 0xb2, 0xff),
            size: 20.0,
        }),
        EventKind::Arrow => None,
    }
}

/// Events of `current` with no structurally equal event in `previous`.
///
/// Duplicates inside `current` are reported once.
pub fn difference<'a>(
    current: &'a [DomainEvent],
    previous: &[DomainEvent],
) -> Vec<&'a DomainEvent> {
    let mut fresh: Vec<&DomainEvent> = Vec::new();
    for event in current {
        if !previous.contains(event) && !fresh.contains(&event) {
            fresh.push(event);
        }
    }
    fresh
}

/// Builds and inserts the shape for one event.
pub type Materializer = Box<dyn Fn(&mut Editor, &DomainEvent) -> ShapeId>;

/// Keeps the canvas in sync with an append-only event list.
///
/// An event is new when no structurally equal event has been observed
/// before, so an unchanged resubmission adds nothing and an event whose
/// fields changed under the same id is materialized again as a new shape.
///
/// Every distinct event version is remembered until [`Self::reset`], so
/// memory grows with the session. Lookups only scan the versions sharing
/// an event's id.
pub struct EventReplicator {
    materializers: HashMap<EventKind, Materializer>,
    /// Distinct versions observed, keyed by event id.
    seen: HashMap<String, Vec<DomainEvent>>,
}

impl fmt::Debug for EventReplicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventReplicator")
            .field("kinds", &self.materializers.keys().collect::<Vec<_>>())
            .field("seen", &self.seen_len())
            .finish()
    }
}

impl Default for EventReplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl EventReplicator {
    /// Replicator with the box, circle and line materializers.
    pub fn new() -> Self {
        let mut replicator = Self::empty();
        replicator.register(EventKind::Box, |editor, event| {
            editor.add_rectangle(RectOptions {
                left: Some(event.position.x),
                top: Some(event.position.y),
                width: Some(event.size),
                height: Some(event.size),
                fill: Some(event.color),
                data: Some(event.id.clone()),
                ..Default::default()
            })
        });
        replicator.register(EventKind::Circle, |editor, event| {
            editor.add_circle(CircleOptions {
                left: Some(event.position.x),
                top: Some(event.position.y),
                radius: Some(event.size),
                fill: Some(event.color),
                data: Some(event.id.clone()),
                ..Default::default()
            })
        });
        replicator.register(EventKind::Line, |editor, event| {
            let Point { x, y } = event.position;
            editor.add_line(LineOptions {
                points: Some([x, y, x + EVENT_LINE_LENGTH, y]),
                left: Some(x),
                top: Some(y),
                fill: Some(event.color),
                stroke: Some(event.color),
                stroke_width: Some(event.size),
                data: Some(event.id.clone()),
            })
        });
        replicator
    }

    /// Replicator with no materializers registered.
    pub fn empty() -> Self {
        Self {
            materializers: HashMap::new(),
            seen: HashMap::new(),
        }
    }

    /// Register or replace the materializer for a kind.
    pub fn register(
        &mut self,
        kind: EventKind,
        materializer: impl Fn(&mut Editor, &DomainEvent) -> ShapeId + 'static,
    ) {
        self.materializers.insert(kind, Box::new(materializer));
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.materializers.contains_key(&kind)
    }

    fn has_seen(&self, event: &DomainEvent) -> bool {
        self.seen
            .get(&event.id)
            .is_some_and(|versions| versions.contains(event))
    }

    /// Number of distinct event versions remembered.
    pub fn seen_len(&self) -> usize {
        self.seen.values().map(Vec::len).sum()
    }

    /// Events of `current` that would be materialized by [`Self::replicate`].
    ///
    /// Same result as [`difference`] against every event observed so far.
    pub fn new_events<'a>(&self, current: &'a [DomainEvent]) -> Vec<&'a DomainEvent> {
        let mut fresh: HashMap<&str, Vec<&DomainEvent>> = HashMap::new();
        current
            .iter()
            .filter(|&event| {
                if self.has_seen(event) {
                    return false;
                }
                let versions = fresh.entry(event.id.as_str()).or_default();
                if versions.contains(&event) {
                    return false;
                }
                versions.push(event);
                true
            })
            .collect()
    }

    /// Materialize every new event of `current`, in order.
    ///
    /// Events without a registered materializer are dropped. Returns the
    /// IDs of the shapes created.
    pub fn replicate(&mut self, editor: &mut Editor, current: &[DomainEvent]) -> Vec<ShapeId> {
        let fresh: Vec<DomainEvent> = self.new_events(current).into_iter().cloned().collect();
        let mut created = Vec::with_capacity(fresh.len());

        for event in fresh {
            match self.materializers.get(&event.kind) {
                Some(materialize) => {
                    let id = materialize(editor, &event);
                    log::debug!("Replicated {:?} event {} as {}", event.kind, event.id, id);
                    created.push(id);
                }
                None => log::debug!("No materializer for {:?} event {}", event.kind, event.id),
            }
            self.seen.entry(event.id.clone()).or_default().push(event);
        }
        created
    }

    /// Forget every observed event, e.g. after the canvas was cleared.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::config::EditorConfig;
    use crate::shapes::{Shape, ShapeTrait};
    use kurbo::Size;

    fn editor() -> Editor {
        Editor::new(Canvas::default(), &EditorConfig::default())
    }

    fn event(id: &str, kind: EventKind) -> DomainEvent {
        preset_event(kind, id).unwrap()
    }

    #[test]
    fn test_unchanged_list_is_idempotent() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let list = vec![event("1", EventKind::Box)];

        assert_eq!(replicator.replicate(&mut editor, &list).len(), 1);
        assert!(replicator.replicate(&mut editor, &list).is_empty());
        assert_eq!(editor.canvas().len(), 1);
    }

    #[test]
    fn test_appended_event_adds_one_shape() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let e1 = event("1", EventKind::Box);
        let e2 = event("2", EventKind::Circle);

        replicator.replicate(&mut editor, &[e1.clone()]);
        let created = replicator.replicate(&mut editor, &[e1, e2]);

        assert_eq!(created.len(), 1);
        assert_eq!(editor.canvas().len(), 2);
        let circle = editor.canvas().get(created[0]).unwrap();
        assert!(matches!(circle, Shape::Circle(_)));
        assert_eq!(circle.data(), Some("2"));
    }

    #[test]
    fn test_removed_and_readded_event_is_not_replicated() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let e1 = event("1", EventKind::Line);

        replicator.replicate(&mut editor, &[e1.clone()]);
        replicator.replicate(&mut editor, &[]);
        replicator.replicate(&mut editor, &[e1]);

        assert_eq!(editor.canvas().len(), 1);
    }

    #[test]
    fn test_changed_fields_under_same_id_add_a_shape() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let e1 = event("1", EventKind::Box);
        let mut moved = e1.clone();
        moved.position = Point::new(50.0, 50.0);

        replicator.replicate(&mut editor, &[e1]);
        replicator.replicate(&mut editor, &[moved]);

        assert_eq!(editor.canvas().len(), 2);
    }

    #[test]
    fn test_history_holds_one_entry_per_distinct_version() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let e1 = event("1", EventKind::Box);
        let mut recolored = e1.clone();
        recolored.color = ShapeColor::rgb(0xff, 0, 0);

        replicator.replicate(&mut editor, &[e1.clone()]);
        replicator.replicate(&mut editor, &[e1.clone()]);
        assert_eq!(replicator.seen_len(), 1);

        replicator.replicate(&mut editor, &[e1.clone(), recolored.clone()]);
        assert_eq!(replicator.seen_len(), 2);
        assert!(replicator.new_events(&[e1, recolored]).is_empty());

        replicator.reset();
        assert_eq!(replicator.seen_len(), 0);
    }

    #[test]
    fn test_duplicates_within_list_materialize_once() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let e1 = event("1", EventKind::Box);

        replicator.replicate(&mut editor, &[e1.clone(), e1]);
        assert_eq!(editor.canvas().len(), 1);
    }

    #[test]
    fn test_unknown_kind_is_dropped() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let arrow = DomainEvent {
            kind: EventKind::Arrow,
            ..event("a", EventKind::Line)
        };

        assert!(!replicator.handles(EventKind::Arrow));
        assert!(replicator.replicate(&mut editor, &[arrow.clone()]).is_empty());
        assert!(editor.canvas().is_empty());

        // Registering later does not resurrect events already observed
        replicator.register(EventKind::Arrow, |editor, _| {
            editor.add_line(LineOptions::default())
        });
        assert!(replicator.replicate(&mut editor, &[arrow]).is_empty());
    }

    #[test]
    fn test_registered_materializer_is_used() {
        let mut editor = editor();
        let mut replicator = EventReplicator::empty();
        replicator.register(EventKind::Arrow, |editor, event| {
            editor.add_line(LineOptions {
                left: Some(event.position.x),
                top: Some(event.position.y),
                ..Default::default()
            })
        });
        let arrow = DomainEvent {
            kind: EventKind::Arrow,
            ..event("a", EventKind::Line)
        };

        assert_eq!(replicator.replicate(&mut editor, &[arrow]).len(), 1);
        // Empty replicator has no defaults
        assert!(replicator.replicate(&mut editor, &[event("b", EventKind::Box)]).is_empty());
    }

    #[test]
    fn test_box_materializer() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let created = replicator.replicate(&mut editor, &[event("1", EventKind::Box)]);

        let shape = editor.canvas().get(created[0]).unwrap();
        assert_eq!(shape.top_left(), Point::new(10.0, 10.0));
        assert_eq!(shape.size(), Size::new(20.0, 20.0));
        assert_eq!(shape.style().fill, ShapeColor::rgb(0x00, 0xb2, 0xff));
        assert_eq!(shape.data(), Some("1"));
    }

    #[test]
    fn test_line_materializer() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let created = replicator.replicate(&mut editor, &[event("1", EventKind::Line)]);

        let Some(Shape::Line(line)) = editor.canvas().get(created[0]) else {
            panic!("expected a line");
        };
        assert_eq!(line.start, Point::new(10.0, 10.0));
        assert_eq!(line.end, Point::new(160.0, 10.0));
        assert!((line.style.stroke_width - 20.0).abs() < f64::EPSILON);
        assert_eq!(line.style.stroke, line.style.fill);
    }

    #[test]
    fn test_circle_materializer() {
        let mut editor = editor();
        let mut replicator = EventReplicator::new();
        let created = replicator.replicate(&mut editor, &[event("1", EventKind::Circle)]);

        let Some(Shape::Circle(circle)) = editor.canvas().get(created[0]) else {
            panic!("expected a circle");
        };
        assert!((circle.radius - 20.0).abs() < f64::EPSILON);
        assert_eq!(circle.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_pure_difference() {
        let e1 = event("1", EventKind::Box);
        let e2 = event("2", EventKind::Box);
        let current = [e1.clone(), e2.clone()];
        assert_eq!(difference(&current, &[e1]), vec![&e2]);
        assert!(difference(&[], &[e2]).is_empty());
    }

    #[test]
    fn test_event_json() {
        let json = r##"[{"id": "7", "type": "circle", "position": {"x": 1.5, "y": 2}, "color": "#00B2FF", "size": 20}]"##;
        let events: Vec<DomainEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].kind, EventKind::Circle);
        assert_eq!(events[0].position, Point::new(1.5, 2.0));
        assert_eq!(events[0].color, ShapeColor::rgb(0x00, 0xb2, 0xff));
    }

    #[test]
    fn test_preset_events() {
        assert!(preset_event(EventKind::Arrow, "x").is_none());
        let line = preset_event(EventKind::Line, "x").unwrap();
        assert!((line.size - 20.0).abs() < f64::EPSILON);
    }
}
