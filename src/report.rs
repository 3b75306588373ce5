//! Plain-text scene dump used by `--mode print`.

use std::io::{self, Write};

use crate::layout::{Layout, SegmentKind, Stroke};
use crate::readout::{fixed2, format_endpoint, format_resultant};
use crate::state::AppState;

pub fn write_report(out: &mut impl Write, state: &AppState, layout: &Layout) -> io::Result<()> {
    let render = &state.render;
    writeln!(
        out,
        "Method: {} | Vectors: {} | Phase: {}",
        render.method.name(),
        render.count.get(),
        render.phase
    )?;

    for (i, v) in state.vectors.active(render.count).iter().enumerate() {
        writeln!(
            out,
            "  V{}: magnitude {}, angle {}°",
            i + 1,
            fixed2(v.magnitude),
            fixed2(v.angle)
        )?;
    }

    writeln!(out, "Segments:")?;
    for segment in &layout.segments {
        let stroke = match segment.stroke {
            Stroke::Solid => "solid".to_string(),
            Stroke::Dashed { on, off } => format!("dashed {}/{}", on, off),
        };
        let parallel = match segment.kind {
            SegmentKind::Completion(i) => format!(", parallel to V{}", i + 1),
            _ => String::new(),
        };
        writeln!(
            out,
            "  {} -> {} [{}, width {}{}]",
            format_endpoint(&segment.label, segment.start),
            format_endpoint("tip", segment.end),
            stroke,
            segment.line_width,
            parallel
        )?;
    }

    writeln!(out, "{}", format_resultant(layout.resultant))
}
