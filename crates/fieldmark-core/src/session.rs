//! Single-gesture drag session.
//!
//! A [`DragSession`] tracks exactly one active drag: the grabbed field, the
//! pointer-to-field offset captured at grab time, and the canvas metrics
//! frozen for the gesture. The owner holds an `Option<DragSession>` and
//! replaces it on each transition; dropping the value ends the session.

use crate::field::Field;
use crate::geometry::{clamp_position, CanvasMetrics};

/// State of one active drag gesture.
///
/// The grab offset is the pointer position minus the field's top-left at
/// grab time, in percent. Subtracting it on every move makes the field
/// track pointer deltas instead of jumping to center on the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    field_id: String,
    offset: (f64, f64),
    /// Field position before the drag started, for compensating rollback
    /// when the position commit fails.
    origin: (f64, f64),
    metrics: CanvasMetrics,
}

impl DragSession {
    /// Start a session from a pointer-down on `field` at the given screen
    /// position. Metrics are captured here and never re-read.
    pub fn grab(field: &Field, screen_x: f64, screen_y: f64, metrics: CanvasMetrics) -> Self {
        let (pointer_x, pointer_y) = metrics.to_percent(screen_x, screen_y);
        Self {
            field_id: field.id.clone(),
            offset: (pointer_x - field.x, pointer_y - field.y),
            origin: (field.x, field.y),
            metrics,
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Position the grabbed field held before the gesture began.
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn metrics(&self) -> &CanvasMetrics {
        &self.metrics
    }

    /// Compute the clamped field position for the current pointer position.
    ///
    /// Synchronous and allocation-free; called on every pointer-move while
    /// the session is active.
    pub fn track(&self, screen_x: f64, screen_y: f64, field_width: f64, field_height: f64) -> (f64, f64) {
        let (pointer_x, pointer_y) = self.metrics.to_percent(screen_x, screen_y);
        clamp_position(
            pointer_x - self.offset.0,
            pointer_y - self.offset.1,
            field_width,
            field_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldKind};

    const EPS: f64 = 1e-9;

    /// Letter-size page at 96dpi, the editor's render target.
    fn metrics() -> CanvasMetrics {
        CanvasMetrics::from_rect(0.0, 0.0, 816.0, 1056.0, 1.0)
    }

    fn field_at(x: f64, y: f64) -> Field {
        Field {
            id: "f-1".to_string(),
            kind: FieldKind::Signature,
            signer_role: "executive".to_string(),
            page: 1,
            x,
            y,
            width: 24.0,
            height: 12.0,
            label: None,
            required: true,
        }
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < EPS && (actual.1 - expected.1).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_grab_captures_offset_and_origin() {
        let field = field_at(40.0, 70.0);
        // Grab 10% right and 5% below the field's top-left
        let session = DragSession::grab(&field, 816.0 * 0.50, 1056.0 * 0.75, metrics());
        assert_eq!(session.field_id(), "f-1");
        assert_close(session.origin(), (40.0, 70.0));

        // Without moving the pointer, the tracked position is unchanged
        let pos = session.track(816.0 * 0.50, 1056.0 * 0.75, 24.0, 12.0);
        assert_close(pos, (40.0, 70.0));
    }

    #[test]
    fn test_field_tracks_pointer_delta_not_absolute_position() {
        let field = field_at(40.0, 70.0);
        let grab = (816.0 * 0.45, 1056.0 * 0.72);
        let session = DragSession::grab(&field, grab.0, grab.1, metrics());

        // Move the pointer by (+10%, -20%) of the page
        let moved = (grab.0 + 81.6, grab.1 - 211.2);
        let pos = session.track(moved.0, moved.1, 24.0, 12.0);
        assert_close(pos, (50.0, 50.0));
    }

    #[test]
    fn test_drag_to_page_origin_clamps_at_zero() {
        // Scenario: 816x1056 canvas, zoom 1, field at (40, 70, 24x12),
        // grabbed at its exact top-left (offset 0), pointer to (0, 0).
        let field = field_at(40.0, 70.0);
        let session = DragSession::grab(&field, 326.4, 739.2, metrics());
        let pos = session.track(0.0, 0.0, 24.0, 12.0);
        assert_close(pos, (0.0, 0.0));
    }

    #[test]
    fn test_drag_beyond_page_edges_clamps_to_far_corner() {
        let field = field_at(40.0, 70.0);
        let session = DragSession::grab(&field, 326.4, 739.2, metrics());
        let pos = session.track(900.0, 1100.0, 24.0, 12.0);
        assert_close(pos, (76.0, 88.0));
    }

    #[test]
    fn test_same_canvas_delta_is_zoom_invariant() {
        // The same canvas-space delta must land the field on the same
        // clamped percentage at zoom 1 and zoom 2.
        let field = field_at(40.0, 70.0);
        let canvas_delta = (100.0, -150.0);

        let m1 = CanvasMetrics::from_rect(0.0, 0.0, 816.0, 1056.0, 1.0);
        let s1 = DragSession::grab(&field, 326.4, 739.2, m1);
        let p1 = s1.track(326.4 + canvas_delta.0, 739.2 + canvas_delta.1, 24.0, 12.0);

        let m2 = CanvasMetrics::from_rect(0.0, 0.0, 1632.0, 2112.0, 2.0);
        let s2 = DragSession::grab(&field, 652.8, 1478.4, m2);
        let p2 = s2.track(
            652.8 + canvas_delta.0 * 2.0,
            1478.4 + canvas_delta.1 * 2.0,
            24.0,
            12.0,
        );

        assert_close(p1, p2);
    }

    #[test]
    fn test_metrics_stay_frozen_for_the_gesture() {
        let field = field_at(10.0, 10.0);
        let session = DragSession::grab(&field, 81.6, 105.6, metrics());
        // The session keeps its own copy; the caller re-measuring the rect
        // has no effect on an active gesture.
        assert_eq!(session.metrics().zoom, 1.0);
        assert_eq!(session.metrics().width, 816.0);
    }
}
