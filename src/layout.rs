//! Segment layouts for the four (count, method) combinations.
//!
//! Everything here is a pure function of the vector set and render state: the
//! same inputs always produce the same ordered segment list.

use crate::geometry::{Point, Vector};
use crate::state::{Method, Phase, RenderState, VectorCount, VectorSet};

/// Dash pattern for completion lines, in screen dots (on, off).
pub const DASH_PATTERN: [f64; 2] = [6.0, 4.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentColor {
    /// Entry of the per-vector palette, cycled by index
    Vector(usize),
    Resultant,
    Intermediate,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Vector(usize),
    Resultant,
    IntermediateResultant,
    Completion(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Solid,
    Dashed { on: f64, off: f64 },
}

/// A single drawable line with its styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub start: Point,
    pub end: Point,
    pub color: SegmentColor,
    pub kind: SegmentKind,
    pub stroke: Stroke,
    /// Endpoint marker radius; 0 hides markers
    pub marker_radius: f64,
    pub line_width: f64,
}

impl Segment {
    fn vector(index: usize, start: Point, component: Point) -> Self {
        Self {
            label: format!("Vector {}", index + 1),
            start,
            end: start + component,
            color: SegmentColor::Vector(index),
            kind: SegmentKind::Vector(index),
            stroke: Stroke::Solid,
            marker_radius: 4.0,
            line_width: 3.0,
        }
    }

    fn resultant(label: &str, end: Point) -> Self {
        Self {
            label: label.to_string(),
            start: Point::ORIGIN,
            end,
            color: SegmentColor::Resultant,
            kind: SegmentKind::Resultant,
            stroke: Stroke::Solid,
            marker_radius: 4.0,
            line_width: 3.0,
        }
    }

    fn intermediate(label: &str, end: Point) -> Self {
        Self {
            color: SegmentColor::Intermediate,
            kind: SegmentKind::IntermediateResultant,
            ..Self::resultant(label, end)
        }
    }

    fn completion(label: String, index: usize, start: Point, end: Point) -> Self {
        Self {
            label,
            start,
            end,
            color: SegmentColor::Completion,
            kind: SegmentKind::Completion(index),
            stroke: Stroke::Dashed {
                on: DASH_PATTERN[0],
                off: DASH_PATTERN[1],
            },
            marker_radius: 0.0,
            line_width: 2.0,
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self.stroke, Stroke::Dashed { .. })
    }
}

/// Which of the four layout algorithms applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCase {
    TwoTriangle,
    TwoParallelogram,
    ThreeTriangle,
    ThreeParallelogram,
}

impl LayoutCase {
    pub fn select(count: VectorCount, method: Method) -> Self {
        match (count, method) {
            (VectorCount::Two, Method::Triangle) => LayoutCase::TwoTriangle,
            (VectorCount::Two, Method::Parallelogram) => LayoutCase::TwoParallelogram,
            (VectorCount::Three, Method::Triangle) => LayoutCase::ThreeTriangle,
            (VectorCount::Three, Method::Parallelogram) => LayoutCase::ThreeParallelogram,
        }
    }
}

/// Output of a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub segments: Vec<Segment>,
    /// Resultant to report, `None` when it should be hidden
    pub resultant: Option<Point>,
}

/// The resultant is reported for parallelogram in any phase, and for
/// triangle once resolved.
pub fn shows_resultant(render: &RenderState) -> bool {
    render.method == Method::Parallelogram || render.phase == Phase::Resolved
}

pub fn compute_layout(vectors: &VectorSet, render: &RenderState) -> Layout {
    let active = vectors.active(render.count);
    let components: Vec<Point> = active.iter().map(Vector::component).collect();
    let resolved = render.phase == Phase::Resolved;

    let segments = match LayoutCase::select(render.count, render.method) {
        LayoutCase::TwoTriangle => two_triangle(&components, resolved),
        LayoutCase::TwoParallelogram => two_parallelogram(&components, resolved),
        LayoutCase::ThreeTriangle => three_triangle(&components, resolved),
        LayoutCase::ThreeParallelogram => three_parallelogram(&components, resolved),
    };

    let sum = components.iter().fold(Point::ORIGIN, |acc, &c| acc + c);

    Layout {
        segments,
        resultant: shows_resultant(render).then_some(sum),
    }
}

fn two_triangle(components: &[Point], resolved: bool) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(3);
    let mut cur = Point::ORIGIN;

    for (i, &comp) in components.iter().enumerate() {
        let start = if resolved && i == 1 { cur } else { Point::ORIGIN };
        let segment = Segment::vector(i, start, comp);
        cur = segment.end;
        segments.push(segment);
    }

    if resolved {
        segments.push(Segment::resultant("Resultant = V1 + V2", cur));
    }
    segments
}

fn two_parallelogram(components: &[Point], resolved: bool) -> Vec<Segment> {
    let (v1, v2) = (components[0], components[1]);
    let sum = v1 + v2;

    let mut segments = vec![
        Segment::vector(0, Point::ORIGIN, v1),
        Segment::vector(1, Point::ORIGIN, v2),
    ];

    if resolved {
        segments.push(Segment::resultant("Resultant = V1 + V2", sum));
        segments.push(Segment::completion("Dashed V1".to_string(), 0, v2, sum));
        segments.push(Segment::completion("Dashed V2".to_string(), 1, v1, sum));
    }
    segments
}

fn three_triangle(components: &[Point], resolved: bool) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(5);
    let mut cur = Point::ORIGIN;

    // The chain is drawn tail-to-tip in both phases
    for (i, &comp) in components.iter().enumerate() {
        let segment = Segment::vector(i, cur, comp);
        cur = segment.end;
        segments.push(segment);

        if resolved && i == 1 {
            segments.push(Segment::intermediate("Resultant 1 = V1 + V2", cur));
        }
    }

    if resolved {
        segments.push(Segment::resultant("Resultant 2 = R1 + V3", cur));
    }
    segments
}

fn three_parallelogram(components: &[Point], resolved: bool) -> Vec<Segment> {
    if !resolved {
        return components
            .iter()
            .enumerate()
            .map(|(i, &comp)| Segment::vector(i, Point::ORIGIN, comp))
            .collect();
    }

    let mut segments = Vec::with_capacity(7);
    let mut cur = Point::ORIGIN;
    for (i, &comp) in components.iter().enumerate() {
        let segment = Segment::vector(i, cur, comp);
        cur = segment.end;
        segments.push(segment);
    }

    segments.push(Segment::resultant("Resultant = V1 + V2 + V3", cur));

    // Second chain in reverse index order closes the figure at the resultant
    let mut dash_start = Point::ORIGIN;
    for (i, &comp) in components.iter().enumerate().rev() {
        let end = dash_start + comp;
        segments.push(Segment::completion(
            format!("Dashed Vector {}", i + 1),
            i,
            dash_start,
            end,
        ));
        dash_start = end;
    }
    segments
}
