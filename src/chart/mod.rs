//! Chart surface: fixed-bound axes, grid and the vector segments.
//!
//! The layout code never talks to ratatui directly. It hands an ordered list
//! of [`Segment`]s to a [`RenderAdapter`], and the interaction code asks the
//! same adapter to translate between terminal cells and data coordinates.

mod dash;
mod mapping;

pub use dash::dash_pieces;
pub use mapping::{cell_distance, ChartMapping};

use clap::ValueEnum;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;
use crate::geometry::Point;
use crate::layout::{Segment, Stroke};
use crate::readout::fixed2;

/// Upper bound on grid lines per axis
pub const MAX_TICKS: usize = 1000;

/// Bounds and tick spacing of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Tick positions: multiples of `step` inside the bounds. Empty when
    /// the step would produce more than [`MAX_TICKS`] ticks.
    pub fn ticks(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.span() <= 0.0 || self.span() / self.step > MAX_TICKS as f64 {
            return Vec::new();
        }
        let first = (self.min / self.step).ceil() as i64;
        let last = (self.max / self.step).floor() as i64;
        (first..=last).map(|k| k as f64 * self.step).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Default for AxisConfig {
    fn default() -> Self {
        let range = AxisRange {
            min: -300.0,
            max: 300.0,
            step: 30.0,
        };
        Self { x: range, y: range }
    }
}

/// Canvas marker used to draw lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    #[default]
    Braille,
    #[value(name = "halfblock")]
    HalfBlock,
    Dot,
    Block,
}

impl MarkerStyle {
    pub fn all() -> &'static [MarkerStyle] {
        &[
            MarkerStyle::Braille,
            MarkerStyle::HalfBlock,
            MarkerStyle::Dot,
            MarkerStyle::Block,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|m| m == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerStyle::Braille => "Braille",
            MarkerStyle::HalfBlock => "Half Block",
            MarkerStyle::Dot => "Dot",
            MarkerStyle::Block => "Block",
        }
    }

    /// Canvas resolution per terminal cell (columns, rows)
    pub fn dots_per_cell(&self) -> (u16, u16) {
        match self {
            MarkerStyle::Braille => (2, 4),
            MarkerStyle::HalfBlock => (1, 2),
            MarkerStyle::Dot | MarkerStyle::Block => (1, 1),
        }
    }

    fn marker(&self) -> Marker {
        match self {
            MarkerStyle::Braille => Marker::Braille,
            MarkerStyle::HalfBlock => Marker::HalfBlock,
            MarkerStyle::Dot => Marker::Dot,
            MarkerStyle::Block => Marker::Block,
        }
    }
}

/// Surface that draws segments and maps between cells and data space.
pub trait RenderAdapter {
    fn name(&self) -> &'static str;

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        segments: &[Segment],
        axes: &AxisConfig,
        color_scheme: &ColorScheme,
    );

    /// Data point under a terminal cell, `None` outside the drawn chart.
    fn cell_to_data(&self, column: u16, row: u16) -> Option<Point>;

    /// Terminal cell showing a data point, `None` when not visible.
    fn data_to_cell(&self, point: Point) -> Option<(u16, u16)>;
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// ratatui canvas implementation of [`RenderAdapter`].
pub struct CanvasChart {
    pub marker: MarkerStyle,
    pub show_grid: bool,
    pub show_tick_labels: bool,
    pub title: String,
    mapping: Option<ChartMapping>,
}

impl CanvasChart {
    pub fn new(marker: MarkerStyle, show_grid: bool, show_tick_labels: bool) -> Self {
        Self {
            marker,
            show_grid,
            show_tick_labels,
            title: String::new(),
            mapping: None,
        }
    }

    pub fn next_marker(&mut self) {
        self.marker = self.marker.next();
    }

    fn paint_grid(&self, ctx: &mut Context, axes: &AxisConfig, color_scheme: &ColorScheme) {
        let grid = rgb(color_scheme.grid_color());
        if self.show_grid {
            for x in axes.x.ticks() {
                ctx.draw(&CanvasLine::new(x, axes.y.min, x, axes.y.max, grid));
            }
            for y in axes.y.ticks() {
                ctx.draw(&CanvasLine::new(axes.x.min, y, axes.x.max, y, grid));
            }
        }
        ctx.layer();

        let axis = rgb(color_scheme.axis_color());
        ctx.draw(&CanvasLine::new(0.0, axes.y.min, 0.0, axes.y.max, axis));
        ctx.draw(&CanvasLine::new(axes.x.min, 0.0, axes.x.max, 0.0, axis));
    }

    fn paint_tick_labels(&self, ctx: &mut Context, axes: &AxisConfig, inner: Rect) {
        let style = Style::default().fg(Color::DarkGray);

        // Keep roughly six cells between labels
        let x_ticks = axes.x.ticks();
        let every = label_stride(x_ticks.len(), inner.width as usize / 6);
        for x in x_ticks.iter().step_by(every) {
            ctx.print(*x, axes.y.min, Span::styled(fixed_label(*x), style));
        }

        let y_ticks = axes.y.ticks();
        let every = label_stride(y_ticks.len(), inner.height as usize / 2);
        for y in y_ticks.iter().step_by(every) {
            ctx.print(axes.x.min, *y, Span::styled(fixed_label(*y), style));
        }
    }

    fn paint_segments(&self, ctx: &mut Context, segments: &[Segment], color_scheme: &ColorScheme, dot: f64) {
        for segment in segments {
            let color = rgb(color_scheme.segment_color(segment.color));
            let pieces = match segment.stroke {
                Stroke::Solid => vec![(segment.start, segment.end)],
                Stroke::Dashed { on, off } => dash_pieces(segment.start, segment.end, on * dot, off * dot),
            };
            for (a, b) in pieces {
                ctx.draw(&CanvasLine::new(a.x, a.y, b.x, b.y, color));
            }
        }
        ctx.layer();

        for segment in segments.iter().filter(|s| s.marker_radius > 0.0) {
            let color = rgb(color_scheme.segment_color(segment.color));
            for p in [segment.start, segment.end] {
                ctx.draw(&Circle {
                    x: p.x,
                    y: p.y,
                    radius: segment.marker_radius * dot / 2.0,
                    color,
                });
            }
        }
    }
}

fn label_stride(ticks: usize, room: usize) -> usize {
    if room == 0 {
        return ticks.max(1);
    }
    ticks.div_ceil(room).max(1)
}

fn fixed_label(value: f64) -> String {
    let text = fixed2(value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl RenderAdapter for CanvasChart {
    fn name(&self) -> &'static str {
        self.marker.name()
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        segments: &[Segment],
        axes: &AxisConfig,
        color_scheme: &ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title.clone());
        let inner = block.inner(area);
        if inner.width == 0 || inner.height == 0 {
            self.mapping = None;
            return;
        }

        let mapping = ChartMapping::new(inner, *axes);
        let dot = mapping.dot_size(self.marker);
        self.mapping = Some(mapping);

        let canvas = Canvas::default()
            .block(block)
            .marker(self.marker.marker())
            .x_bounds([axes.x.min, axes.x.max])
            .y_bounds([axes.y.min, axes.y.max])
            .paint(|ctx| {
                self.paint_grid(ctx, axes, color_scheme);
                if self.show_tick_labels {
                    self.paint_tick_labels(ctx, axes, inner);
                }
                ctx.layer();
                self.paint_segments(ctx, segments, color_scheme, dot);
            });
        frame.render_widget(canvas, area);
    }

    fn cell_to_data(&self, column: u16, row: u16) -> Option<Point> {
        self.mapping.as_ref()?.cell_to_data(column, row)
    }

    fn data_to_cell(&self, point: Point) -> Option<(u16, u16)> {
        self.mapping.as_ref()?.data_to_cell(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::state::{AppState, Method, VectorCount};
    use ratatui::backend::TestBackend;

    #[test]
    fn default_axes_tick_every_thirty() {
        let ticks = AxisConfig::default().x.ticks();
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks.first(), Some(&-300.0));
        assert_eq!(ticks.last(), Some(&300.0));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn dense_ticks_are_dropped() {
        let range = AxisRange {
            min: 0.0,
            max: 1e9,
            step: 1e-6,
        };
        assert!(range.ticks().is_empty());
    }

    #[test]
    fn marker_cycle_wraps() {
        assert_eq!(MarkerStyle::Block.next(), MarkerStyle::Braille);
    }

    #[test]
    fn tick_labels_drop_trailing_zeros() {
        assert_eq!(fixed_label(-300.0), "-300");
        assert_eq!(fixed_label(0.0), "0");
        assert_eq!(fixed_label(12.5), "12.5");
    }

    #[test]
    fn label_stride_fits_room() {
        assert_eq!(label_stride(21, 10), 3);
        assert_eq!(label_stride(21, 40), 1);
        assert_eq!(label_stride(21, 0), 21);
    }

    #[test]
    fn mapping_is_unknown_until_rendered() {
        let chart = CanvasChart::new(MarkerStyle::Braille, true, true);
        assert_eq!(chart.cell_to_data(10, 10), None);
        assert_eq!(chart.data_to_cell(Point::ORIGIN), None);
    }

    #[test]
    fn render_records_inner_mapping() {
        let mut state = AppState::new(Default::default(), Method::Parallelogram, VectorCount::Three);
        state.animate();
        let layout = compute_layout(&state.vectors, &state.render);

        let mut chart = CanvasChart::new(MarkerStyle::Braille, true, true);
        let mut terminal = Terminal::new(TestBackend::new(62, 32)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                chart.render(frame, area, &layout.segments, &AxisConfig::default(), &ColorScheme::Classic);
            })
            .unwrap();

        // Border takes one cell on each side
        assert_eq!(chart.data_to_cell(Point::ORIGIN), Some((31, 16)));
        let p = chart.cell_to_data(1, 1).unwrap();
        assert!((p.x + 295.0).abs() < 1e-9);
        assert_eq!(chart.cell_to_data(0, 0), None);
    }
}
