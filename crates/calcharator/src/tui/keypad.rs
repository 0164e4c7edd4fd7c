//! Calculator keypad
//!
//! The keypad can be:
//! - Clicked with the mouse (hit-tested against its render area)
//! - Highlighted when the matching key is typed
//! - Extended with the scientific rows, which render above the normal rows

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

/// Normal rows, top to bottom
pub const NORMAL_ROWS: [&[&str]; 5] = [
    &["7", "8", "9", "/"],
    &["4", "5", "6", "*"],
    &["1", "2", "3", "-"],
    &["0", ".", "+", "DEL"],
    &["C", "="],
];

/// Scientific rows, shown above the normal rows
pub const SCIENTIFIC_ROWS: [&[&str]; 2] = [&["sin", "cos", "tan", "log"], &["(", ")", "^", "sqrt"]];

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Inserts a digit
    Digit,
    /// Inserts a decimal point
    Decimal,
    /// Inserts an arithmetic operator
    Operator,
    /// Inserts a function, parenthesis or power
    Scientific,
    /// Deletes before the cursor
    Delete,
    /// Resets the buffer
    Clear,
    /// Evaluates the buffer
    Equals,
}

impl ButtonKind {
    /// Classifies a keypad label
    #[must_use]
    pub fn of(label: &str) -> Self {
        match label {
            "." => Self::Decimal,
            "+" | "-" | "*" | "/" => Self::Operator,
            "DEL" => Self::Delete,
            "C" => Self::Clear,
            "=" => Self::Equals,
            l if l.chars().all(|c| c.is_ascii_digit()) => Self::Digit,
            _ => Self::Scientific,
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Digit | Self::Decimal => Style::default().fg(Color::White),
            Self::Operator => Style::default().fg(Color::Yellow),
            Self::Scientific => Style::default().fg(Color::Cyan),
            Self::Equals => Style::default().fg(Color::Green),
            Self::Delete | Self::Clear => Style::default().fg(Color::Red),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button, also the label passed to the controller
    pub label: &'static str,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// What the button does
    pub kind: ButtonKind,
}

impl KeypadButton {
    /// Creates an unpressed button
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            pressed: false,
            kind: ButtonKind::of(label),
        }
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout
/// ```text
/// [sin] [cos] [tan] [log]    scientific mode only
/// [ ( ] [ ) ] [ ^ ] [sqrt]   scientific mode only
/// [ 7 ] [ 8 ] [ 9 ] [ / ]
/// [ 4 ] [ 5 ] [ 6 ] [ * ]
/// [ 1 ] [ 2 ] [ 3 ] [ - ]
/// [ 0 ] [ . ] [ + ] [DEL]
/// [   C   ] [   =   ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    scientific_rows: Vec<Vec<KeypadButton>>,
    normal_rows: Vec<Vec<KeypadButton>>,
    scientific: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

fn build_rows(rows: &[&[&'static str]]) -> Vec<Vec<KeypadButton>> {
    rows.iter()
        .map(|row| row.iter().map(|&label| KeypadButton::new(label)).collect())
        .collect()
}

impl Keypad {
    /// Creates the keypad with the scientific rows hidden
    #[must_use]
    pub fn new() -> Self {
        Self {
            scientific_rows: build_rows(&SCIENTIFIC_ROWS),
            normal_rows: build_rows(&NORMAL_ROWS),
            scientific: false,
        }
    }

    /// Whether the scientific rows are visible
    #[must_use]
    pub fn is_scientific(&self) -> bool {
        self.scientific
    }

    /// Shows or hides the scientific rows
    pub fn set_scientific(&mut self, on: bool) {
        if self.scientific != on {
            self.release_all();
        }
        self.scientific = on;
    }

    fn hidden_rows(&self) -> usize {
        if self.scientific {
            0
        } else {
            self.scientific_rows.len()
        }
    }

    /// Visible rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[KeypadButton]> {
        self.scientific_rows
            .iter()
            .chain(self.normal_rows.iter())
            .skip(self.hidden_rows())
            .map(Vec::as_slice)
    }

    /// Number of visible rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Number of visible buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.rows().map(<[KeypadButton]>::len).sum()
    }

    /// Gets a visible button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.rows().nth(row).and_then(|r| r.get(col))
    }

    /// Finds a visible button by label
    #[must_use]
    pub fn find_button(&self, label: &str) -> Option<(usize, usize)> {
        self.buttons_with_positions()
            .find(|(_, btn)| btn.label == label)
            .map(|(pos, _)| pos)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in self
            .scientific_rows
            .iter_mut()
            .chain(self.normal_rows.iter_mut())
            .flatten()
        {
            btn.set_pressed(false);
        }
    }

    /// Highlights the visible button with `label`, releasing all others
    pub fn highlight(&mut self, label: &str) {
        self.release_all();
        let hidden = self.hidden_rows();
        let visible = self
            .scientific_rows
            .iter_mut()
            .chain(self.normal_rows.iter_mut())
            .skip(hidden)
            .flatten();
        for btn in visible {
            if btn.label == label {
                btn.set_pressed(true);
                return;
            }
        }
    }

    /// Label of the highlighted button, if any
    #[must_use]
    pub fn pressed_label(&self) -> Option<&'static str> {
        self.rows().flatten().find(|b| b.pressed).map(|b| b.label)
    }

    /// Iterates visible buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.rows().enumerate().flat_map(|(row, buttons)| {
            buttons
                .iter()
                .enumerate()
                .map(move |(col, btn)| ((row, col), btn))
        })
    }

    /// Maps a click inside the bordered `area` to a button label
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<&'static str> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let inner_x = rel_x - 1;
        let inner_y = rel_y - 1;

        let rows = self.row_count() as u16;
        let btn_height = (area.height - 2) / rows.max(1);
        if btn_height == 0 {
            return None;
        }

        let row = self.rows().nth((inner_y / btn_height) as usize)?;
        let btn_width = (area.width - 2) / (row.len() as u16).max(1);
        if btn_width == 0 {
            return None;
        }
        row.get((inner_x / btn_width) as usize).map(|b| b.label)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.keypad.is_scientific() {
            " Keypad [SCI] "
        } else {
            " Keypad "
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let rows = self.keypad.row_count() as u16;
        if inner.width < 4 || inner.height < rows {
            return;
        }

        let btn_height = inner.height / rows;

        for (row, buttons) in self.keypad.rows().enumerate() {
            let btn_width = inner.width / buttons.len().max(1) as u16;
            let y = inner.y + row as u16 * btn_height + btn_height / 2;

            for (col, btn) in buttons.iter().enumerate() {
                let x = inner.x + col as u16 * btn_width;

                let style = if btn.pressed {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    btn.kind.style()
                };

                let label = format!("[{}]", btn.label);
                let label_width = label.chars().count() as u16;
                if label_width > btn_width {
                    continue;
                }
                let label_x = x + (btn_width - label_width) / 2;
                if y < inner.y + inner.height {
                    buf.set_span(label_x, y, &Span::styled(label, style), btn_width);
                }
            }
        }
    }
}
