//! Side panel: vector fields, render state, resultant readout and legend.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::layout::SegmentColor;
use crate::readout::{describe_segment, format_resultant};
use crate::state::Phase;

pub fn render_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.state.render.count.get() as u16 * 2 + 2),
            Constraint::Length(5),
            Constraint::Min(4),
        ])
        .split(area);

    render_fields(frame, chunks[0], app);
    render_summary(frame, chunks[1], app);
    render_legend(frame, chunks[2], app);
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

fn render_fields(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .form
        .rows(&app.state)
        .into_iter()
        .map(|row| {
            let (r, g, b) = app.color_scheme.segment_color(SegmentColor::Vector(row.index));
            let value_style = match (row.focused, row.editing) {
                (true, true) => Style::default().fg(Color::Black).bg(Color::Yellow),
                (true, false) => Style::default().add_modifier(Modifier::REVERSED),
                _ => Style::default(),
            };
            Line::from(vec![
                Span::styled(format!("V{} ", row.index + 1), Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(format!("{:<10}", row.field.label())),
                Span::styled(format!(" {:>9} ", row.text), value_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(titled(" Vectors ")), area);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let render = &app.state.render;
    let phase = match render.phase {
        Phase::Initial => "before",
        Phase::Resolved => "after",
    };
    let lines = vec![
        Line::from(format!(
            "{} | {} vectors | {}",
            render.method.name(),
            render.count.get(),
            phase
        )),
        Line::from(""),
        Line::from(Span::styled(
            format_resultant(app.layout.resultant),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(titled(" Result ")), area);
}

fn render_legend(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .layout
        .segments
        .iter()
        .map(|segment| {
            let (r, g, b) = app.color_scheme.segment_color(segment.color);
            let swatch = if segment.is_dashed() { "╌╌ " } else { "── " };
            Line::from(vec![
                Span::styled(swatch, Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(describe_segment(segment)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(titled(" Legend ")),
        area,
    );
}

/// Key help on the bottom line
pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.form.is_editing() {
        " type a number | [enter] apply | [esc] cancel ".to_string()
    } else {
        format!(
            " [a]nimate [r]eset [m]ethod [2]/[3] vectors | [tab] field [←/→] adjust [enter] edit | [s]tyle: {} [c]olor: {} | [q]uit ",
            app.chart.marker.name(),
            app.color_scheme.name()
        )
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
