//! Coordinate transforms and bounds clamping.
//!
//! The editor works in two coordinate systems: screen pixels (pointer
//! events, affected by zoom and scroll) and canvas-space percentages
//! (persisted field positions). [`CanvasMetrics`] converts between them;
//! [`clamp_position`] keeps a field fully inside the page.

use serde::{Deserialize, Serialize};

/// Zoom slider lower bound.
pub const MIN_ZOOM: f64 = 0.5;
/// Zoom slider upper bound.
pub const MAX_ZOOM: f64 = 2.0;
/// Zoom slider increment.
pub const ZOOM_STEP: f64 = 0.1;

/// Minimum field width in percent, so a field never collapses to invisibility.
pub const MIN_WIDTH: f64 = 5.0;
/// Minimum field height in percent.
pub const MIN_HEIGHT: f64 = 4.0;

/// On-screen canvas measurements frozen for the duration of one gesture.
///
/// `width`/`height` are the unscaled page extent in device pixels. The
/// metrics must not be re-read mid-drag: a zoom change or reflow during an
/// active gesture would shift every subsequent conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasMetrics {
    /// Unscaled page width in px.
    pub width: f64,
    /// Unscaled page height in px.
    pub height: f64,
    /// Zoom factor applied on screen.
    pub zoom: f64,
    /// Left edge of the on-screen bounding rect.
    pub left: f64,
    /// Top edge of the on-screen bounding rect.
    pub top: f64,
}

impl CanvasMetrics {
    /// Build metrics from a bounding rect as reported by the browser.
    ///
    /// The rect is measured after the zoom transform, so the unscaled
    /// extent is the rect extent divided by zoom.
    pub fn from_rect(rect_left: f64, rect_top: f64, rect_width: f64, rect_height: f64, zoom: f64) -> Self {
        Self {
            width: rect_width / zoom,
            height: rect_height / zoom,
            zoom,
            left: rect_left,
            top: rect_top,
        }
    }

    /// Convert a pointer's screen position to canvas-space percentages.
    ///
    /// Canvas-space px = `(screen − rect origin) / zoom`, then scaled to
    /// percent of the unscaled page extent.
    pub fn to_percent(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        let canvas_x = (screen_x - self.left) / self.zoom;
        let canvas_y = (screen_y - self.top) / self.zoom;
        (
            canvas_x / self.width * 100.0,
            canvas_y / self.height * 100.0,
        )
    }
}

/// Clamp a proposed top-left position so the field stays fully on the page.
///
/// Saturates at `[0, 100 − extent]` on each axis. If the extent itself
/// exceeds 100 the upper bound floors at 0 instead of inverting, leaving
/// the field pinned to the origin.
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let max_x = (100.0 - width).max(0.0);
    let max_y = (100.0 - height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Snap a zoom value to the slider's step and bounds.
pub fn snap_zoom(zoom: f64) -> f64 {
    let stepped = (zoom / ZOOM_STEP).round() * ZOOM_STEP;
    // Round to two decimals to shed accumulated float error
    ((stepped * 100.0).round() / 100.0).clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < EPS && (actual.1 - expected.1).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_to_percent_identity_zoom() {
        let metrics = CanvasMetrics::from_rect(0.0, 0.0, 816.0, 1056.0, 1.0);
        assert_close(metrics.to_percent(408.0, 528.0), (50.0, 50.0));
        assert_close(metrics.to_percent(0.0, 0.0), (0.0, 0.0));
        assert_close(metrics.to_percent(816.0, 1056.0), (100.0, 100.0));
    }

    #[test]
    fn test_to_percent_respects_rect_origin() {
        let metrics = CanvasMetrics::from_rect(100.0, 40.0, 816.0, 1056.0, 1.0);
        assert_close(metrics.to_percent(100.0, 40.0), (0.0, 0.0));
        assert_close(metrics.to_percent(508.0, 568.0), (50.0, 50.0));
    }

    #[test]
    fn test_to_percent_divides_out_zoom() {
        // At zoom 2 the rect is measured twice as large; the same screen
        // delta maps to half the canvas-space distance.
        let metrics = CanvasMetrics::from_rect(0.0, 0.0, 1632.0, 2112.0, 2.0);
        assert!((metrics.width - 816.0).abs() < EPS);
        assert_close(metrics.to_percent(816.0, 1056.0), (50.0, 50.0));
    }

    #[test]
    fn test_zoom_invariance_of_canvas_space_delta() {
        // Holding the canvas-space delta constant, zoom must not change
        // the resulting percentage position.
        let at_1 = CanvasMetrics::from_rect(0.0, 0.0, 816.0, 1056.0, 1.0);
        let at_2 = CanvasMetrics::from_rect(0.0, 0.0, 1632.0, 2112.0, 2.0);

        let canvas_delta = (120.0, 90.0);
        let p1 = at_1.to_percent(canvas_delta.0 * 1.0, canvas_delta.1 * 1.0);
        let p2 = at_2.to_percent(canvas_delta.0 * 2.0, canvas_delta.1 * 2.0);
        assert_close(p1, p2);
    }

    #[test]
    fn test_clamp_within_bounds() {
        assert_close(clamp_position(40.0, 70.0, 24.0, 12.0), (40.0, 70.0));
    }

    #[test]
    fn test_clamp_saturates_at_edges() {
        assert_close(clamp_position(-15.0, -3.0, 24.0, 12.0), (0.0, 0.0));
        assert_close(clamp_position(95.0, 99.0, 24.0, 12.0), (76.0, 88.0));
    }

    #[test]
    fn test_clamp_invariant_over_range() {
        // For any proposed position the clamped result stays inside
        // [0, 100 - extent].
        let mut proposed = -1000.0;
        while proposed <= 1000.0 {
            for extent in [0.0, 5.0, 24.0, 50.0, 100.0] {
                let (cx, cy) = clamp_position(proposed, proposed, extent, extent);
                assert!(cx >= 0.0 && cx <= 100.0 - extent, "x={cx} extent={extent}");
                assert!(cy >= 0.0 && cy <= 100.0 - extent, "y={cy} extent={extent}");
            }
            proposed += 7.3;
        }
    }

    #[test]
    fn test_clamp_degenerate_oversized_field() {
        // Extent beyond 100 pins the field at the origin rather than
        // inverting the clamp range.
        assert_close(clamp_position(50.0, 50.0, 120.0, 130.0), (0.0, 0.0));
        assert_close(clamp_position(-20.0, 300.0, 150.0, 101.0), (0.0, 0.0));
    }

    #[test]
    fn test_snap_zoom() {
        assert!((snap_zoom(1.0) - 1.0).abs() < EPS);
        assert!((snap_zoom(0.44) - 0.5).abs() < EPS);
        assert!((snap_zoom(2.3) - 2.0).abs() < EPS);
        assert!((snap_zoom(1.249) - 1.2).abs() < EPS);
        // Repeated stepping does not drift
        let mut zoom = 1.0;
        for _ in 0..5 {
            zoom = snap_zoom(zoom + ZOOM_STEP);
        }
        assert!((zoom - 1.5).abs() < EPS);
    }
}
