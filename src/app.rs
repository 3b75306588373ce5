use std::time::Duration;
use tracing::{debug, info};

use crate::chart::{AxisConfig, CanvasChart, RenderAdapter};
use crate::color::ColorScheme;
use crate::config::Config;
use crate::form::Form;
use crate::interaction::{handle_pointer, PointerEvent};
use crate::layout::{compute_layout, Layout, Segment};
use crate::state::{AppState, Method, VectorCount};
use crate::transition::Transition;

/// User-level commands produced by the terminal loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Animate,
    Reset,
    ToggleMethod,
    SetMethod(Method),
    SetCount(VectorCount),
    NextMarker,
    NextColors,
    FocusNext,
    FocusPrev,
    Nudge(f64),
    BeginEdit,
    EditChar(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,
    Quit,
}

/// Combined application state
pub struct App {
    pub state: AppState,
    pub form: Form,
    pub chart: CanvasChart,
    pub color_scheme: ColorScheme,
    pub axes: AxisConfig,
    pub layout: Layout,
    pub should_quit: bool,
    transition: Option<Transition>,
    transition_duration: Duration,
    drag_tolerance: f64,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let state = AppState::new(
            config.vectors.vector_set(),
            config.vectors.method,
            config.vectors.count,
        );
        let layout = compute_layout(&state.vectors, &state.render);
        Self {
            state,
            form: Form::default(),
            chart: CanvasChart::new(
                config.display.marker,
                config.chart.show_grid,
                config.chart.show_tick_labels,
            ),
            color_scheme: config.display.color_scheme,
            axes: config.chart.axes(),
            layout,
            should_quit: false,
            transition: None,
            transition_duration: Duration::from_millis(config.display.transition_ms),
            drag_tolerance: config.chart.drag_tolerance,
        }
    }

    /// Rebuild the layout from scratch.
    fn recompute(&mut self) {
        self.layout = compute_layout(&self.state.vectors, &self.state.render);
    }

    /// Rebuild the layout and animate from what is currently on screen.
    fn recompute_animated(&mut self) {
        let shown = self.visible_segments();
        self.recompute();
        self.transition = (!self.transition_duration.is_zero())
            .then(|| Transition::new(shown, self.transition_duration));
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Segments to draw this frame
    pub fn visible_segments(&self) -> Vec<Segment> {
        match &self.transition {
            Some(transition) => transition.frame(&self.layout.segments),
            None => self.layout.segments.clone(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(transition) = self.transition.as_mut() {
            transition.update(dt);
            if transition.is_finished() {
                self.transition = None;
            }
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Animate => {
                self.state.animate();
                info!("Animating {} method", self.state.render.method.name());
                self.recompute_animated();
            }
            Action::Reset => {
                self.state.reset();
                info!("Reset to initial layout");
                self.recompute_animated();
            }
            Action::ToggleMethod => {
                self.state.set_method(self.state.render.method.toggle());
                self.recompute_animated();
            }
            Action::SetMethod(method) => {
                self.state.set_method(method);
                self.recompute_animated();
            }
            Action::SetCount(count) => {
                self.state.set_count(count);
                self.form.sync(&self.state);
                self.recompute_animated();
            }
            Action::NextMarker => {
                self.chart.next_marker();
                debug!("Chart marker: {}", self.chart.name());
            }
            Action::NextColors => {
                self.color_scheme = self.color_scheme.next();
                debug!("Color scheme: {}", self.color_scheme.name());
            }
            Action::FocusNext => self.form.focus_next(&self.state),
            Action::FocusPrev => self.form.focus_prev(&self.state),
            Action::Nudge(delta) => {
                self.form.nudge(&mut self.state, delta);
                self.recompute();
            }
            Action::BeginEdit => self.form.begin_edit(&self.state),
            Action::EditChar(ch) => self.form.push_char(ch),
            Action::EditBackspace => self.form.backspace(),
            Action::CommitEdit => {
                if self.form.commit(&mut self.state) {
                    self.recompute();
                }
            }
            Action::CancelEdit => self.form.cancel(),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        // Hit-test against what is on screen, mid-transition included
        let shown = self.visible_segments();
        let changed = handle_pointer(
            &mut self.state,
            &shown,
            &self.chart,
            event,
            self.drag_tolerance,
        );
        if changed {
            // Dragging follows the pointer directly
            self.transition = None;
            self.recompute();
        }
    }
}
