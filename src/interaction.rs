//! Pointer dragging of vector tips.

use tracing::debug;

use crate::chart::{cell_distance, RenderAdapter};
use crate::geometry::Vector;
use crate::layout::{Segment, SegmentKind};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { column: u16, row: u16 },
    Move { column: u16, row: u16 },
    Up,
    Leave,
}

/// Index of the vector whose drawn tip is nearest to the cell, within
/// `tolerance` cells. Only active vector segments are candidates.
pub fn pick_tip(
    segments: &[Segment],
    adapter: &dyn RenderAdapter,
    active: usize,
    cell: (u16, u16),
    tolerance: f64,
) -> Option<usize> {
    segments
        .iter()
        .filter_map(|segment| match segment.kind {
            SegmentKind::Vector(i) if i < active => {
                let tip = adapter.data_to_cell(segment.end)?;
                Some((i, cell_distance(tip, cell)))
            }
            _ => None,
        })
        .filter(|&(_, distance)| distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Apply a pointer event. Returns true when the vector set changed.
pub fn handle_pointer(
    state: &mut AppState,
    segments: &[Segment],
    adapter: &dyn RenderAdapter,
    event: PointerEvent,
    tolerance: f64,
) -> bool {
    match event {
        PointerEvent::Down { column, row } => {
            let active = state.render.count.get();
            state.dragging = pick_tip(segments, adapter, active, (column, row), tolerance);
            if let Some(i) = state.dragging {
                debug!("Dragging vector {}", i + 1);
            }
            false
        }
        PointerEvent::Move { column, row } => {
            let Some(index) = state.dragging else {
                return false;
            };
            match adapter.cell_to_data(column, row) {
                Some(p) => {
                    state.vectors.set(index, Vector::from_point(p));
                    true
                }
                None => {
                    // Pointer left the chart
                    state.dragging = None;
                    false
                }
            }
        }
        PointerEvent::Up | PointerEvent::Leave => {
            state.dragging = None;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisConfig, ChartMapping};
    use crate::color::ColorScheme;
    use crate::geometry::Point;
    use crate::layout::compute_layout;
    use crate::state::VectorCount;
    use ratatui::prelude::*;

    /// Headless adapter over a fixed 60x30 cell area.
    struct FixedChart(ChartMapping);

    impl FixedChart {
        fn new() -> Self {
            Self(ChartMapping::new(Rect::new(0, 0, 60, 30), AxisConfig::default()))
        }
    }

    impl RenderAdapter for FixedChart {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn render(&mut self, _: &mut Frame, _: Rect, _: &[Segment], _: &AxisConfig, _: &ColorScheme) {}

        fn cell_to_data(&self, column: u16, row: u16) -> Option<Point> {
            self.0.cell_to_data(column, row)
        }

        fn data_to_cell(&self, point: Point) -> Option<(u16, u16)> {
            self.0.data_to_cell(point)
        }
    }

    fn setup() -> (AppState, Vec<Segment>, FixedChart) {
        let state = AppState::default();
        let segments = compute_layout(&state.vectors, &state.render).segments;
        (state, segments, FixedChart::new())
    }

    #[test]
    fn press_on_tip_starts_drag() {
        let (mut state, segments, chart) = setup();
        // Vector 1 ends at (80, 0): column 38, row 15
        let down = PointerEvent::Down { column: 38, row: 15 };
        handle_pointer(&mut state, &segments, &chart, down, 1.5);
        assert_eq!(state.dragging, Some(0));
    }

    #[test]
    fn press_far_from_tips_does_nothing() {
        let (mut state, segments, chart) = setup();
        let down = PointerEvent::Down { column: 5, row: 5 };
        handle_pointer(&mut state, &segments, &chart, down, 1.5);
        assert_eq!(state.dragging, None);
    }

    #[test]
    fn nearest_tip_wins() {
        let (_, segments, chart) = setup();
        // Vector 2 tip (60.6, 35) sits at column 36, row 13
        assert_eq!(pick_tip(&segments, &chart, 2, (36, 13), 3.0), Some(1));
        assert_eq!(pick_tip(&segments, &chart, 2, (38, 15), 3.0), Some(0));
    }

    #[test]
    fn inactive_vectors_cannot_be_grabbed() {
        let (_, segments, chart) = setup();
        assert_eq!(pick_tip(&segments, &chart, 1, (36, 13), 1.0), None);
    }

    #[test]
    fn moving_recomputes_polar_values() {
        let (mut state, segments, chart) = setup();
        state.dragging = Some(1);
        // Centre of column 30, row 5 is (5, 190)
        let changed = handle_pointer(&mut state, &segments, &chart, PointerEvent::Move { column: 30, row: 5 }, 1.5);
        assert!(changed);
        let v = state.vectors.get(1).copied().unwrap();
        assert!((v.magnitude - 5.0_f64.hypot(190.0)).abs() < 1e-9);
        assert!((v.angle - 190.0_f64.atan2(5.0).to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let (mut state, segments, chart) = setup();
        let before = state.vectors;
        let changed = handle_pointer(&mut state, &segments, &chart, PointerEvent::Move { column: 30, row: 5 }, 1.5);
        assert!(!changed);
        assert_eq!(state.vectors, before);
    }

    #[test]
    fn release_and_leave_end_drag() {
        let (mut state, segments, chart) = setup();
        for event in [PointerEvent::Up, PointerEvent::Leave] {
            state.dragging = Some(0);
            handle_pointer(&mut state, &segments, &chart, event, 1.5);
            assert_eq!(state.dragging, None);
        }
    }

    #[test]
    fn moving_off_chart_ends_drag() {
        let (mut state, segments, chart) = setup();
        state.dragging = Some(0);
        handle_pointer(&mut state, &segments, &chart, PointerEvent::Move { column: 70, row: 5 }, 1.5);
        assert_eq!(state.dragging, None);
        assert_eq!(state.vectors.get(0).map(|v| v.magnitude), Some(80.0));
    }

    #[test]
    fn three_vector_tips_are_found_by_kind() {
        let mut state = AppState::default();
        state.set_count(VectorCount::Three);
        state.animate();
        let segments = compute_layout(&state.vectors, &state.render).segments;
        let chart = FixedChart::new();
        let tip = chart.data_to_cell(segments[3].end).unwrap();
        assert_eq!(pick_tip(&segments, &chart, 3, tip, 0.5), Some(2));
    }
}
