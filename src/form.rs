//! Keyboard form for the magnitude/angle fields of the active vectors.

use tracing::warn;

use crate::readout::fixed2;
use crate::state::{AppState, VectorField};

/// Parse typed field text. Anything that is not a finite number becomes 0.
pub fn parse_field_input(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("Could not parse {:?} as a number, using 0", text);
            0.0
        }
    }
}

/// One row of the rendered form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub index: usize,
    pub field: VectorField,
    pub text: String,
    pub focused: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    focus: usize,
    buffer: Option<String>,
}

impl Form {
    fn field_at(slot: usize) -> (usize, VectorField) {
        let field = if slot % 2 == 0 {
            VectorField::Magnitude
        } else {
            VectorField::Angle
        };
        (slot / 2, field)
    }

    fn slots(state: &AppState) -> usize {
        state.render.count.get() * 2
    }

    fn value(state: &AppState, index: usize, field: VectorField) -> f64 {
        state
            .vectors
            .get(index)
            .map(|v| match field {
                VectorField::Magnitude => v.magnitude,
                VectorField::Angle => v.angle,
            })
            .unwrap_or(0.0)
    }

    /// Focused (vector index, field)
    pub fn focused(&self) -> (usize, VectorField) {
        Self::field_at(self.focus)
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    /// Keep focus on an existing field after the vector count changed.
    pub fn sync(&mut self, state: &AppState) {
        let slots = Self::slots(state);
        if self.focus >= slots {
            self.focus = slots - 1;
            self.buffer = None;
        }
    }

    pub fn focus_next(&mut self, state: &AppState) {
        self.buffer = None;
        self.focus = (self.focus + 1) % Self::slots(state);
    }

    pub fn focus_prev(&mut self, state: &AppState) {
        self.buffer = None;
        let slots = Self::slots(state);
        self.focus = (self.focus + slots - 1) % slots;
    }

    /// Add `delta` to the focused field.
    pub fn nudge(&mut self, state: &mut AppState, delta: f64) {
        let (index, field) = self.focused();
        let value = Self::value(state, index, field) + delta;
        state.set_vector_field(index, field, value);
    }

    pub fn begin_edit(&mut self, state: &AppState) {
        let (index, field) = self.focused();
        self.buffer = Some(fixed2(Self::value(state, index, field)));
    }

    /// Accept a typed character while editing. Only numeric characters are kept.
    pub fn push_char(&mut self, ch: char) {
        if let Some(buffer) = self.buffer.as_mut() {
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E') {
                buffer.push(ch);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Write the edit buffer into the focused field. Returns true if a value was committed.
    pub fn commit(&mut self, state: &mut AppState) -> bool {
        let Some(text) = self.buffer.take() else {
            return false;
        };
        let (index, field) = self.focused();
        state.set_vector_field(index, field, parse_field_input(&text));
        true
    }

    pub fn cancel(&mut self) {
        self.buffer = None;
    }

    /// Rows for the active vectors only
    pub fn rows(&self, state: &AppState) -> Vec<FieldRow> {
        (0..Self::slots(state))
            .map(|slot| {
                let (index, field) = Self::field_at(slot);
                let focused = slot == self.focus;
                let editing = focused && self.buffer.is_some();
                let text = match (&self.buffer, editing) {
                    (Some(buffer), true) => buffer.clone(),
                    _ => fixed2(Self::value(state, index, field)),
                };
                FieldRow {
                    index,
                    field,
                    text,
                    focused,
                    editing,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VectorCount;

    #[test]
    fn parse_accepts_numbers() {
        assert_eq!(parse_field_input(" 42.5 "), 42.5);
        assert_eq!(parse_field_input("-45"), -45.0);
        assert_eq!(parse_field_input("1e2"), 100.0);
    }

    #[test]
    fn parse_coerces_garbage_to_zero() {
        assert_eq!(parse_field_input(""), 0.0);
        assert_eq!(parse_field_input("--5"), 0.0);
        assert_eq!(parse_field_input("inf"), 0.0);
        assert_eq!(parse_field_input("NaN"), 0.0);
    }

    #[test]
    fn rows_follow_vector_count() {
        let mut state = AppState::default();
        let form = Form::default();
        assert_eq!(form.rows(&state).len(), 4);
        state.set_count(VectorCount::Three);
        let rows = form.rows(&state);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].index, 2);
        assert_eq!(rows[5].field, VectorField::Angle);
        assert_eq!(rows[5].text, "-45.00");
    }

    #[test]
    fn focus_wraps_over_active_fields() {
        let state = AppState::default();
        let mut form = Form::default();
        form.focus_prev(&state);
        assert_eq!(form.focused(), (1, VectorField::Angle));
        form.focus_next(&state);
        assert_eq!(form.focused(), (0, VectorField::Magnitude));
    }

    #[test]
    fn shrinking_count_moves_focus_back() {
        let mut state = AppState::default();
        state.set_count(VectorCount::Three);
        let mut form = Form::default();
        form.focus_prev(&state);
        assert_eq!(form.focused(), (2, VectorField::Angle));
        state.set_count(VectorCount::Two);
        form.sync(&state);
        assert_eq!(form.focused(), (1, VectorField::Angle));
    }

    #[test]
    fn typed_value_is_committed() {
        let mut state = AppState::default();
        let mut form = Form::default();
        form.focus_next(&state);
        form.begin_edit(&state);
        for _ in 0..5 {
            form.backspace();
        }
        "12x5".chars().for_each(|c| form.push_char(c));
        assert_eq!(form.rows(&state)[1].text, "125");
        assert!(form.commit(&mut state));
        assert_eq!(state.vectors.get(0).map(|v| v.angle), Some(125.0));
        assert!(!form.is_editing());
    }

    #[test]
    fn bad_text_commits_zero() {
        let mut state = AppState::default();
        let mut form = Form::default();
        form.begin_edit(&state);
        form.push_char('-');
        form.push_char('-');
        form.commit(&mut state);
        // "80.00--" does not parse
        assert_eq!(state.vectors.get(0).map(|v| v.magnitude), Some(0.0));
    }

    #[test]
    fn cancel_keeps_value() {
        let mut state = AppState::default();
        let mut form = Form::default();
        form.begin_edit(&state);
        form.backspace();
        form.cancel();
        assert!(!form.commit(&mut state));
        assert_eq!(state.vectors.get(0).map(|v| v.magnitude), Some(80.0));
    }

    #[test]
    fn nudge_adds_to_focused_field() {
        let mut state = AppState::default();
        let mut form = Form::default();
        form.nudge(&mut state, -5.0);
        assert_eq!(state.vectors.get(0).map(|v| v.magnitude), Some(75.0));
    }
}
