use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::info;

use super::panel::{render_panel, render_status};
use crate::app::{Action, App};
use crate::chart::RenderAdapter;
use crate::config::Config;
use crate::interaction::PointerEvent;
use crate::state::{Method, VectorCount};

/// Width of the side panel in cells
const PANEL_WIDTH: u16 = 44;

/// Field adjustment per key press, and with SHIFT on the arrow keys
const NUDGE_STEP: f64 = 5.0;
const FINE_NUDGE_STEP: f64 = 1.0;

/// Poll timeout while nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(250);

pub fn run(config: Config, animate: bool) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, animate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config, animate: bool) -> Result<()> {
    let mut app = App::new(&config);
    if animate {
        app.apply(Action::Animate);
    }

    let mut last_frame = Instant::now();
    let target_fps = Duration::from_secs_f64(1.0 / config.display.fps.max(1) as f64);

    info!("Terminal UI started");

    while !app.should_quit {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        app.update(dt);

        terminal.draw(|frame| draw(frame, &mut app))?;

        let timeout = if app.is_animating() { target_fps } else { IDLE_POLL };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_action(key, app.form.is_editing()) {
                        app.apply(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(mouse) {
                        app.pointer(pointer);
                    }
                }
                Event::FocusLost => app.pointer(PointerEvent::Leave),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
        .split(rows[0]);

    let segments = app.visible_segments();
    app.chart.title = format!(
        " Vector Addition | {} ",
        app.state.render.method.name()
    );
    let axes = app.axes;
    let color_scheme = app.color_scheme;
    app.chart
        .render(frame, columns[0], &segments, &axes, &color_scheme);

    render_panel(frame, columns[1], app);
    render_status(frame, rows[1], app);
}

/// Map a key press to an action. While a field is being edited, keys go to the field.
pub fn key_action(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if editing {
        return match key.code {
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::Char(ch) => Some(Action::EditChar(ch)),
            _ => None,
        };
    }

    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        FINE_NUDGE_STEP
    } else {
        NUDGE_STEP
    };

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('a') | KeyCode::Char('p') => Some(Action::Animate),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('m') => Some(Action::ToggleMethod),
        KeyCode::Char('t') => Some(Action::SetMethod(Method::Triangle)),
        KeyCode::Char('g') => Some(Action::SetMethod(Method::Parallelogram)),
        KeyCode::Char('2') => Some(Action::SetCount(VectorCount::Two)),
        KeyCode::Char('3') => Some(Action::SetCount(VectorCount::Three)),
        KeyCode::Char('s') => Some(Action::NextMarker),
        KeyCode::Char('c') => Some(Action::NextColors),
        KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
        KeyCode::Right => Some(Action::Nudge(step)),
        KeyCode::Left => Some(Action::Nudge(-step)),
        // Character keys ignore SHIFT
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Nudge(NUDGE_STEP)),
        KeyCode::Char('-') => Some(Action::Nudge(-NUDGE_STEP)),
        KeyCode::Enter => Some(Action::BeginEdit),
        _ => None,
    }
}

/// Left-button mouse events become pointer events
pub fn pointer_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn control_keys_map_to_actions() {
        assert_eq!(key_action(press(KeyCode::Char('a')), false), Some(Action::Animate));
        assert_eq!(key_action(press(KeyCode::Char('r')), false), Some(Action::Reset));
        assert_eq!(
            key_action(press(KeyCode::Char('3')), false),
            Some(Action::SetCount(VectorCount::Three))
        );
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT), false),
            Some(Action::Nudge(1.0))
        );
    }

    #[test]
    fn plus_and_minus_nudge_symmetrically() {
        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(key_action(plus, false), Some(Action::Nudge(5.0)));
        assert_eq!(key_action(press(KeyCode::Char('=')), false), Some(Action::Nudge(5.0)));
        assert_eq!(key_action(press(KeyCode::Char('-')), false), Some(Action::Nudge(-5.0)));
    }

    #[test]
    fn editing_captures_characters() {
        assert_eq!(key_action(press(KeyCode::Char('3')), true), Some(Action::EditChar('3')));
        assert_eq!(key_action(press(KeyCode::Char('q')), true), Some(Action::EditChar('q')));
        assert_eq!(key_action(press(KeyCode::Esc), true), Some(Action::CancelEdit));
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), true),
            Some(Action::Quit)
        );
    }

    #[test]
    fn only_left_button_drags() {
        let mouse = |kind| MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(PointerEvent::Down { column: 4, row: 7 })
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(PointerEvent::Move { column: 4, row: 7 })
        );
        assert_eq!(pointer_event(mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(pointer_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn drawn_frame_supports_dragging_a_tip() {
        let mut app = App::new(&Config::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let tip = app.layout.segments[0].end;
        let (column, row) = app.chart.data_to_cell(tip).unwrap();
        app.pointer(PointerEvent::Down { column, row });
        assert_eq!(app.state.dragging, Some(0));

        let target = app.chart.data_to_cell(crate::geometry::Point::new(0.0, 150.0)).unwrap();
        app.pointer(PointerEvent::Move { column: target.0, row: target.1 });
        let v = app.state.vectors.get(0).copied().unwrap();
        assert!((v.angle - 90.0).abs() < 10.0);
        assert!((v.magnitude - 150.0).abs() < 15.0);

        app.pointer(PointerEvent::Up);
        assert_eq!(app.state.dragging, None);
    }
}
