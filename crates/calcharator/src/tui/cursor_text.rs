//! Single-line text with a click-to-position caret
//!
//! Units (characters and the caret) are laid out one column each and aligned
//! to the right edge of the area. When the text is wider than the area only a
//! window of units is shown, always including the caret.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::core::cursor::{CursorTarget, SplitText};

/// Symbol drawn for the caret
pub const CARET: &str = "│";

/// Placement of the visible units inside an area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitWindow {
    /// Index of the first visible unit
    pub first: usize,
    /// Number of visible units
    pub len: usize,
    /// Column of the first visible unit
    pub x: u16,
}

/// Computes which units are visible in `area` and where they start
#[must_use]
pub fn unit_window(split: &SplitText<'_>, area: Rect) -> UnitWindow {
    let width = usize::from(area.width);
    let count = split.unit_count();
    if count <= width {
        return UnitWindow {
            first: 0,
            len: count,
            x: area.x + (width - count) as u16,
        };
    }
    let caret = split.left_len();
    // Prefer showing the tail; slide left only when the caret would be cut off
    let first = (count - width).min(caret);
    UnitWindow {
        first,
        len: width,
        x: area.x,
    }
}

/// Maps a click at `(x, y)` to the unit under it
///
/// Returns `None` for clicks outside `area`, on another row, or left of the
/// text.
#[must_use]
pub fn hit_test(split: &SplitText<'_>, area: Rect, x: u16, y: u16) -> Option<CursorTarget> {
    if area.width == 0 || y != area.y || x >= area.x + area.width {
        return None;
    }
    let window = unit_window(split, area);
    let column = usize::from(x.checked_sub(window.x)?);
    if column >= window.len {
        return None;
    }
    split.unit_at(window.first + column)
}

/// Renders text with its caret
#[derive(Debug, Clone)]
pub struct CursorTextWidget<'a> {
    split: SplitText<'a>,
    caret_visible: bool,
    style: Style,
}

impl<'a> CursorTextWidget<'a> {
    /// Creates a widget showing `text` with the caret at `cursor`
    #[must_use]
    pub fn new(text: &'a str, cursor: usize) -> Self {
        Self {
            split: SplitText::new(text, cursor),
            caret_visible: true,
            style: Style::default(),
        }
    }

    /// Shows or hides the caret (blink phase)
    #[must_use]
    pub fn caret_visible(mut self, visible: bool) -> Self {
        self.caret_visible = visible;
        self
    }

    /// Style for the text characters
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for CursorTextWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let window = unit_window(&self.split, area);
        let caret_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let units = self.split.units().skip(window.first).take(window.len);
        for (column, (_, ch)) in units.enumerate() {
            let x = window.x + column as u16;
            let cell = &mut buf[(x, area.y)];
            match ch {
                Some(c) => {
                    cell.set_char(c).set_style(self.style);
                }
                None if self.caret_visible => {
                    cell.set_symbol(CARET).set_style(caret_style);
                }
                None => {
                    cell.set_char(' ');
                }
            }
        }
    }
}
