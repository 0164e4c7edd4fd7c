//! Calculator controller: expression buffer, cursor and live preview
//!
//! Every mutating operation leaves the buffer non-empty and the cursor within
//! `[0, chars(buffer)]`, then recomputes the preview synchronously.
//!
//! Error results (`"Math Error"`, `"Syntax Error: ..."`) are shown in the
//! buffer itself. They are display states, not expressions: the next insert
//! overwrites them and `DEL` leaves them alone.

use tracing::{debug, info};

use crate::core::cursor::byte_offset;
use crate::core::evaluator::Evaluator;
use crate::core::format::format_result;
use crate::core::{Evaluation, ExpressionEngine};

/// Reset state of the buffer
pub const SENTINEL: &str = "0";
/// Buffer text after an undefined result
pub const MATH_ERROR: &str = "Math Error";
/// Prefix of the buffer text after a syntax error
pub const SYNTAX_ERROR_PREFIX: &str = "Syntax Error: ";

/// Labels routed to the scientific insert path
pub const SCIENTIFIC_LABELS: [&str; 8] = ["sin", "cos", "tan", "log", "sqrt", "(", ")", "^"];

/// Content class of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Ordinary expression text
    Editable,
    /// An error message occupies the buffer
    ErrorDisplayed,
}

impl BufferState {
    /// Classifies buffer text
    #[must_use]
    pub fn of(buffer: &str) -> Self {
        if buffer.starts_with(MATH_ERROR) || buffer.starts_with(SYNTAX_ERROR_PREFIX.trim_end_matches(": ")) {
            Self::ErrorDisplayed
        } else {
            Self::Editable
        }
    }
}

/// Text inserted for a scientific key label
#[must_use]
pub fn scientific_insert_text(label: &str) -> String {
    match label {
        "sin" | "cos" | "tan" | "sqrt" => format!("{label}("),
        "log" => "log10(".to_string(),
        other => other.to_string(),
    }
}

/// Preview for `buffer`, or `None` when there is nothing worth showing
///
/// No preview for error displays, unparsable or undefined expressions, or
/// when the result reads exactly like the buffer.
#[must_use]
pub fn compute_preview<E: ExpressionEngine + ?Sized>(engine: &E, buffer: &str) -> Option<String> {
    if BufferState::of(buffer) == BufferState::ErrorDisplayed {
        return None;
    }
    match engine.evaluate(buffer) {
        Evaluation::Value(value) => {
            let text = format_result(value);
            (text != buffer).then_some(text)
        }
        Evaluation::Undefined | Evaluation::SyntaxError(_) => None,
    }
}

/// Owns the expression buffer and translates key presses into edits
#[derive(Debug, Clone)]
pub struct CalculatorController<E = Evaluator> {
    engine: E,
    buffer: String,
    cursor: usize,
    preview: String,
    scientific: bool,
}

impl Default for CalculatorController<Evaluator> {
    fn default() -> Self {
        Self::new(Evaluator::new())
    }
}

impl<E: ExpressionEngine> CalculatorController<E> {
    /// Creates a controller in the reset state `("0", 1)`
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            buffer: SENTINEL.to_string(),
            cursor: SENTINEL.len(),
            preview: String::new(),
            scientific: false,
        }
    }

    /// Current buffer text
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor offset in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Live preview text (empty when there is none)
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Whether the scientific rows are shown
    #[must_use]
    pub const fn is_scientific(&self) -> bool {
        self.scientific
    }

    /// Content class of the buffer
    #[must_use]
    pub fn state(&self) -> BufferState {
        BufferState::of(&self.buffer)
    }

    /// The engine used for evaluation and preview
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    fn buffer_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Replaces the buffer with `text` and puts the cursor at its end
    ///
    /// Empty text resets to the sentinel.
    pub fn load(&mut self, text: &str) {
        if text.is_empty() {
            self.reset();
        } else {
            self.buffer = text.to_string();
            self.cursor = self.buffer_len();
        }
        self.refresh_preview();
    }

    /// Handles a digit, operator, `.` or parenthesis key
    pub fn on_button_click(&mut self, label: &str) {
        self.insert(label);
    }

    /// Handles a scientific key (`sin`, `cos`, `tan`, `log`, `sqrt`, `(`, `)`, `^`)
    pub fn on_scientific_button_click(&mut self, label: &str) {
        let text = scientific_insert_text(label);
        self.insert(&text);
    }

    /// Dispatches a keypad label to the matching operation
    pub fn press(&mut self, label: &str) {
        match label {
            "=" => self.evaluate(),
            "DEL" => self.delete(),
            "C" => self.clear(),
            l if SCIENTIFIC_LABELS.contains(&l) => self.on_scientific_button_click(l),
            l => self.on_button_click(l),
        }
    }

    fn fresh_start(&self, text: &str) -> bool {
        self.state() == BufferState::ErrorDisplayed
            || (self.buffer == SENTINEL && !text.starts_with('.'))
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.fresh_start(text) {
            self.buffer = text.to_string();
            self.cursor = text.chars().count();
        } else {
            let at = byte_offset(&self.buffer, self.cursor);
            self.buffer.insert_str(at, text);
            self.cursor += text.chars().count();
        }
        debug!(buffer = %self.buffer, cursor = self.cursor, "insert {text:?}");
        self.refresh_preview();
    }

    /// Evaluates the buffer and replaces it with the result or an error
    pub fn evaluate(&mut self) {
        let outcome = self.engine.evaluate(&self.buffer);
        info!(expression = %self.buffer, ?outcome, "evaluate");
        self.buffer = match outcome {
            Evaluation::Value(value) => format_result(value),
            Evaluation::Undefined => MATH_ERROR.to_string(),
            Evaluation::SyntaxError(message) => format!("{SYNTAX_ERROR_PREFIX}{message}"),
        };
        self.cursor = self.buffer_len();
        self.preview.clear();
    }

    /// Removes the character before the cursor
    ///
    /// No-op at offset 0. An error display is edited like any other text,
    /// so it stops being one after the first delete. Emptying the buffer
    /// resets it to the sentinel.
    pub fn delete(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = byte_offset(&self.buffer, self.cursor - 1);
        let end = byte_offset(&self.buffer, self.cursor);
        self.buffer.replace_range(start..end, "");
        self.cursor -= 1;
        if self.buffer.is_empty() {
            self.reset();
        }
        debug!(buffer = %self.buffer, cursor = self.cursor, "delete");
        self.refresh_preview();
    }

    /// Resets to `("0", 1)`
    pub fn clear(&mut self) {
        self.reset();
        debug!("clear");
        self.refresh_preview();
    }

    fn reset(&mut self) {
        self.buffer = SENTINEL.to_string();
        self.cursor = SENTINEL.len();
    }

    /// Moves the cursor to `offset`, clamped to the buffer
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer_len());
    }

    /// Moves the cursor one character left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one character right
    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    /// Moves the cursor before the first character
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor after the last character
    pub fn move_end(&mut self) {
        self.cursor = self.buffer_len();
    }

    /// Flips scientific mode
    pub fn toggle_scientific(&mut self) {
        self.scientific = !self.scientific;
    }

    /// Sets scientific mode
    pub fn set_scientific(&mut self, on: bool) {
        self.scientific = on;
    }

    fn refresh_preview(&mut self) {
        self.preview = compute_preview(&self.engine, &self.buffer).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with(text: &str) -> CalculatorController {
        let mut c = CalculatorController::default();
        c.load(text);
        c
    }

    // ===== Construction =====

    #[test]
    fn test_new_is_reset_state() {
        let c = CalculatorController::default();
        assert_eq!(c.buffer(), "0");
        assert_eq!(c.cursor(), 1);
        assert_eq!(c.preview(), "");
        assert!(!c.is_scientific());
        assert_eq!(c.state(), BufferState::Editable);
    }

    #[test]
    fn test_load_puts_cursor_at_end() {
        let c = controller_with("12+3");
        assert_eq!(c.cursor(), 4);
        assert_eq!(c.preview(), "15");
    }

    #[test]
    fn test_load_empty_resets() {
        let c = controller_with("");
        assert_eq!((c.buffer(), c.cursor()), ("0", 1));
    }

    // ===== Insert =====

    #[test]
    fn test_fresh_start_overwrites_sentinel() {
        let mut c = CalculatorController::default();
        c.on_button_click("7");
        assert_eq!(c.buffer(), "7");
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_decimal_appends_to_sentinel() {
        let mut c = CalculatorController::default();
        c.on_button_click(".");
        assert_eq!(c.buffer(), "0.");
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_operator_overwrites_sentinel() {
        let mut c = CalculatorController::default();
        c.on_button_click("+");
        assert_eq!(c.buffer(), "+");
    }

    #[test]
    fn test_insert_splices_at_cursor() {
        let mut c = controller_with("12");
        c.set_cursor(1);
        c.on_button_click("+");
        assert_eq!(c.buffer(), "1+2");
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_insert_at_start() {
        let mut c = controller_with("5");
        c.move_home();
        c.on_button_click("-");
        assert_eq!(c.buffer(), "-5");
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_insert_after_error_overwrites() {
        let mut c = controller_with("1/0");
        c.evaluate();
        assert_eq!(c.buffer(), MATH_ERROR);
        c.on_button_click("3");
        assert_eq!(c.buffer(), "3");
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_decimal_after_error_overwrites() {
        let mut c = controller_with("2+");
        c.evaluate();
        c.on_button_click(".");
        assert_eq!(c.buffer(), ".");
    }

    // ===== Scientific insert =====

    #[test]
    fn test_scientific_insert_text() {
        assert_eq!(scientific_insert_text("sin"), "sin(");
        assert_eq!(scientific_insert_text("cos"), "cos(");
        assert_eq!(scientific_insert_text("tan"), "tan(");
        assert_eq!(scientific_insert_text("sqrt"), "sqrt(");
        assert_eq!(scientific_insert_text("log"), "log10(");
        assert_eq!(scientific_insert_text("("), "(");
        assert_eq!(scientific_insert_text("^"), "^");
    }

    #[test]
    fn test_scientific_fresh_start() {
        let mut c = CalculatorController::default();
        c.on_scientific_button_click("sin");
        assert_eq!(c.buffer(), "sin(");
        assert_eq!(c.cursor(), 4);
    }

    #[test]
    fn test_scientific_splice() {
        let mut c = controller_with("2*");
        c.on_scientific_button_click("log");
        assert_eq!(c.buffer(), "2*log10(");
        assert_eq!(c.cursor(), 8);
    }

    #[test]
    fn test_scientific_sequence_evaluates_in_degrees() {
        let mut c = CalculatorController::default();
        c.on_scientific_button_click("sin");
        c.on_button_click("3");
        c.on_button_click("0");
        c.on_scientific_button_click(")");
        assert_eq!(c.buffer(), "sin(30)");
        assert_eq!(c.preview(), "0.5");
        c.evaluate();
        assert_eq!(c.buffer(), "0.5");
    }

    // ===== Evaluate =====

    #[test]
    fn test_evaluate_value() {
        let mut c = controller_with("2+2");
        c.evaluate();
        assert_eq!(c.buffer(), "4");
        assert_eq!(c.cursor(), 1);
        assert_eq!(c.preview(), "");
    }

    #[test]
    fn test_evaluate_math_error() {
        let mut c = controller_with("1/0");
        c.evaluate();
        assert_eq!(c.buffer(), "Math Error");
        assert_eq!(c.cursor(), 10);
        assert_eq!(c.state(), BufferState::ErrorDisplayed);
    }

    #[test]
    fn test_evaluate_syntax_error() {
        let mut c = controller_with("2+");
        c.evaluate();
        assert!(c.buffer().starts_with("Syntax Error: "));
        assert_eq!(c.cursor(), c.buffer().chars().count());
        assert_eq!(c.state(), BufferState::ErrorDisplayed);
    }

    #[test]
    fn test_evaluate_decimal_result() {
        let mut c = controller_with("1/4");
        c.evaluate();
        assert_eq!(c.buffer(), "0.25");
    }

    #[test]
    fn test_evaluate_error_display_is_syntax_error() {
        let mut c = controller_with("1/0");
        c.evaluate();
        c.evaluate();
        assert!(c.buffer().starts_with(SYNTAX_ERROR_PREFIX));
    }

    // ===== Delete =====

    #[test]
    fn test_delete_before_cursor() {
        let mut c = controller_with("123");
        c.set_cursor(2);
        c.delete();
        assert_eq!(c.buffer(), "13");
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_delete_at_zero_is_noop() {
        let mut c = controller_with("123");
        c.move_home();
        c.delete();
        assert_eq!(c.buffer(), "123");
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_delete_last_char_resets() {
        let mut c = controller_with("7");
        c.delete();
        assert_eq!((c.buffer(), c.cursor()), ("0", 1));
    }

    #[test]
    fn test_delete_sentinel_stays_sentinel() {
        let mut c = CalculatorController::default();
        c.delete();
        assert_eq!((c.buffer(), c.cursor()), ("0", 1));
    }

    #[test]
    fn test_delete_edits_error_display() {
        let mut c = controller_with("1/0");
        c.evaluate();
        c.delete();
        assert_eq!((c.buffer(), c.cursor()), ("Math Erro", 9));
        assert_eq!(c.state(), BufferState::Editable);
        assert_eq!(c.preview(), "");

        // No longer an error display, so the next key appends
        c.on_button_click("7");
        assert_eq!(c.buffer(), "Math Erro7");
    }

    #[test]
    fn test_delete_edits_syntax_error_display() {
        let mut c = controller_with("2+");
        c.evaluate();
        let before = c.buffer().chars().count();
        c.move_home();
        c.delete();
        assert!(c.buffer().starts_with(SYNTAX_ERROR_PREFIX));
        c.move_end();
        c.delete();
        assert_eq!(c.buffer().chars().count(), before - 1);
        assert_eq!(c.cursor(), before - 1);
    }

    // ===== Clear =====

    #[test]
    fn test_clear_from_any_state() {
        for text in ["123", "Math Error", "Syntax Error: oops", "0"] {
            let mut c = controller_with(text);
            c.clear();
            assert_eq!((c.buffer(), c.cursor()), ("0", 1));
            assert_eq!(c.preview(), "");
        }
    }

    // ===== Preview =====

    #[test]
    fn test_preview_shows_result() {
        let c = controller_with("2+2");
        assert_eq!(c.preview(), "4");
    }

    #[test]
    fn test_preview_hidden_when_equal_to_buffer() {
        let c = controller_with("4");
        assert_eq!(c.preview(), "");
    }

    #[test]
    fn test_preview_hidden_for_incomplete_expression() {
        let c = controller_with("2+");
        assert_eq!(c.preview(), "");
    }

    #[test]
    fn test_preview_hidden_for_undefined() {
        let c = controller_with("1/0");
        assert_eq!(c.preview(), "");
    }

    #[test]
    fn test_compute_preview_pure() {
        let engine = Evaluator::new();
        assert_eq!(compute_preview(&engine, "2+2"), Some("4".into()));
        assert_eq!(compute_preview(&engine, "4"), None);
        assert_eq!(compute_preview(&engine, "Math Error"), None);
        assert_eq!(compute_preview(&engine, "Syntax Error: x"), None);
        assert_eq!(compute_preview(&engine, "0."), Some("0".into()));
    }

    #[test]
    fn test_preview_tracks_every_edit() {
        let mut c = CalculatorController::default();
        c.on_button_click("9");
        assert_eq!(c.preview(), "");
        c.on_button_click("*");
        assert_eq!(c.preview(), "");
        c.on_button_click("3");
        assert_eq!(c.preview(), "27");
        c.delete();
        assert_eq!(c.preview(), "");
    }

    // ===== Cursor movement =====

    #[test]
    fn test_set_cursor_clamps() {
        let mut c = controller_with("12");
        c.set_cursor(99);
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_move_left_right() {
        let mut c = controller_with("12");
        c.move_left();
        assert_eq!(c.cursor(), 1);
        c.move_left();
        c.move_left();
        assert_eq!(c.cursor(), 0);
        c.move_right();
        c.move_right();
        c.move_right();
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_move_home_end() {
        let mut c = controller_with("123");
        c.move_home();
        assert_eq!(c.cursor(), 0);
        c.move_end();
        assert_eq!(c.cursor(), 3);
    }

    // ===== Dispatch and mode =====

    #[test]
    fn test_press_dispatch() {
        let mut c = CalculatorController::default();
        for label in ["1", "2", "+", "3", "DEL", "4", "="] {
            c.press(label);
        }
        assert_eq!(c.buffer(), "16");
        c.press("C");
        assert_eq!(c.buffer(), "0");
        c.press("sqrt");
        assert_eq!(c.buffer(), "sqrt(");
    }

    #[test]
    fn test_toggle_scientific_keeps_buffer() {
        let mut c = controller_with("1+1");
        c.toggle_scientific();
        assert!(c.is_scientific());
        assert_eq!(c.buffer(), "1+1");
        c.set_scientific(false);
        assert!(!c.is_scientific());
    }

    #[test]
    fn test_buffer_state_of() {
        assert_eq!(BufferState::of("Math Error"), BufferState::ErrorDisplayed);
        assert_eq!(BufferState::of("Syntax Error: x"), BufferState::ErrorDisplayed);
        assert_eq!(BufferState::of("1+1"), BufferState::Editable);
        assert_eq!(BufferState::of("0"), BufferState::Editable);
    }
}
