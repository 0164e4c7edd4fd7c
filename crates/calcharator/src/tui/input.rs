//! Keyboard input handling
//!
//! Keys map to screen-independent actions; the app decides what an action
//! means on the current screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press the keypad button with this label
    Press(&'static str),
    /// Evaluate on the calculator, open the selected entry on the menu
    Submit,
    /// Move cursor left
    CursorLeft,
    /// Move cursor right
    CursorRight,
    /// Move cursor to start
    CursorHome,
    /// Move cursor to end
    CursorEnd,
    /// Show or hide the scientific rows
    ToggleScientific,
    /// Menu selection or scroll up
    Up,
    /// Menu selection or scroll down
    Down,
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Return to the previous screen
    Back,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('a') => KeyAction::CursorHome,
                KeyCode::Char('e') => KeyAction::CursorEnd,
                KeyCode::Char('u') => KeyAction::Press("C"),
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::label_for_char(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Backspace => KeyAction::Press("DEL"),
            KeyCode::Delete => KeyAction::Press("C"),
            KeyCode::Left => KeyAction::CursorLeft,
            KeyCode::Right => KeyAction::CursorRight,
            KeyCode::Home => KeyAction::CursorHome,
            KeyCode::End => KeyAction::CursorEnd,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Tab => KeyAction::ToggleScientific,
            KeyCode::Up => KeyAction::Up,
            KeyCode::Down => KeyAction::Down,
            KeyCode::PageUp => KeyAction::PageUp,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::Esc => KeyAction::Back,
            _ => KeyAction::None,
        }
    }

    /// Keypad label typed by `c`, if any
    ///
    /// Letters are shortcuts for the scientific functions: `s` sin, `c` cos,
    /// `t` tan, `l` log, `r` sqrt.
    #[must_use]
    pub fn label_for_char(c: char) -> Option<&'static str> {
        let label = match c {
            '0' => "0",
            '1' => "1",
            '2' => "2",
            '3' => "3",
            '4' => "4",
            '5' => "5",
            '6' => "6",
            '7' => "7",
            '8' => "8",
            '9' => "9",
            '.' => ".",
            '+' => "+",
            '-' => "-",
            '*' => "*",
            '/' => "/",
            '%' => "%",
            '^' => "^",
            '(' => "(",
            ')' => ")",
            '=' => "=",
            's' => "sin",
            'c' => "cos",
            't' => "tan",
            'l' => "log",
            'r' => "sqrt",
            _ => return None,
        };
        Some(label)
    }
}
