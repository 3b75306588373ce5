//! Human-readable resultant and coordinate text.

use crate::geometry::{resultant_magnitude_angle, Point};
use crate::layout::Segment;

pub const PLACEHOLDER: &str = "Magnitude: --, Angle: --";

/// Format a number to two decimals, printing a negative zero as "0.00".
pub fn fixed2(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Resultant text, or the placeholder when no resultant is shown.
pub fn format_resultant(resultant: Option<Point>) -> String {
    match resultant {
        None => PLACEHOLDER.to_string(),
        Some(p) => {
            let polar = resultant_magnitude_angle(p);
            format!(
                "Magnitude: {}, Angle: {}°",
                fixed2(polar.magnitude),
                fixed2(polar.angle)
            )
        }
    }
}

/// Tooltip-style text for one endpoint of a segment.
pub fn format_endpoint(label: &str, p: Point) -> String {
    format!("{}: ({}, {})", label, fixed2(p.x), fixed2(p.y))
}

/// Both endpoints of a segment, tail first
pub fn describe_segment(segment: &Segment) -> String {
    format!(
        "{} -> ({}, {})",
        format_endpoint(&segment.label, segment.start),
        fixed2(segment.end.x),
        fixed2(segment.end.y)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_resultant_is_placeholder() {
        assert_eq!(format_resultant(None), "Magnitude: --, Angle: --");
    }

    #[test]
    fn resultant_rounds_to_two_places() {
        let p = Point::new(140.621_778_264_910_7, 35.0);
        assert_eq!(format_resultant(Some(p)), "Magnitude: 144.91, Angle: 13.98°");
    }

    #[test]
    fn zero_resultant_is_numeric() {
        assert_eq!(format_resultant(Some(Point::ORIGIN)), "Magnitude: 0.00, Angle: 0.00°");
    }

    #[test]
    fn negative_zero_is_normalised() {
        assert_eq!(fixed2(-0.001), "0.00");
        assert_eq!(fixed2(-0.005_1), "-0.01");
    }

    #[test]
    fn straight_left_reports_180() {
        assert_eq!(
            format_resultant(Some(Point::new(-10.0, -0.0))),
            "Magnitude: 10.00, Angle: 180.00°"
        );
    }

    #[test]
    fn endpoint_text() {
        assert_eq!(
            format_endpoint("Vector 1", Point::new(80.0, 0.0)),
            "Vector 1: (80.00, 0.00)"
        );
    }

    #[test]
    fn segment_text_has_both_endpoints() {
        let state = crate::state::AppState::default();
        let mut render = state.render;
        render.phase = crate::state::Phase::Resolved;
        let layout = crate::layout::compute_layout(&state.vectors, &render);
        assert_eq!(
            describe_segment(&layout.segments[1]),
            "Vector 2: (80.00, 0.00) -> (140.62, 35.00)"
        );
    }
}
