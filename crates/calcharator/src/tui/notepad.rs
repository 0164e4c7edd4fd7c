//! Read-only scratch text screen
//!
//! Paragraphs are word-wrapped to the viewport width; the scroll offset is
//! counted in wrapped lines and clamped whenever the viewport changes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Scratch text shown on the editor screen
pub const PARAGRAPHS: [&str; 3] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Donec iaculis risus eget \
     tortor viverra, rhoncus bibendum dolor ultricies. Quisque ac dolor dictum, consectetur \
     leo non, pretium dui. Phasellus mollis sapien nec nulla tincidunt, in mollis augue \
     commodo. Nullam accumsan tellus eu purus imperdiet, ut vestibulum eros imperdiet. Ut \
     eget finibus lorem. Proin commodo dolor ut ultrices dapibus. Nam volutpat, felis ornare \
     varius efficitur, est turpis cursus neque, ac imperdiet lectus lacus id risus.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Donec iaculis risus eget \
     tortor viverra, rhoncus bibendum dolor ultricies. Quisque ac dolor dictum, consectetur \
     leo non, pretium dui. Phasellus mollis sapien nec nulla tincidunt, in mollis augue \
     commodo. Nullam accumsan tellus eu purus imperdiet, ut vestibulum eros imperdiet. Ut \
     eget finibus lorem. Proin commodo dolor ut ultrices dapibus. Nam volutpat, felis ornare \
     varius efficitur, est turpis cursus neque, ac imperdiet lectus lacus id risus.",
    "Ut dictum rutrum tellus nec facilisis. Nunc pharetra molestie odio. Sed commodo, quam \
     efficitur posuere sagittis, elit turpis dapibus est, ac luctus tellus nulla in justo. \
     Praesent dignissim tincidunt diam, et suscipit elit interdum vitae. Fusce ex lorem, \
     pretium eget sapien vel, ullamcorper dapibus mauris. Nunc aliquet, justo at ornare \
     feugiat, purus diam varius mi, id vulputate massa arcu id elit. Proin ex orci, tincidunt \
     a augue id, pretium ornare mi. Aenean suscipit non sapien malesuada commodo. Integer \
     velit nisl, bibendum non interdum vel, feugiat a elit. Aliquam in lacinia ante. Aenean \
     sapien augue, fringilla sed justo nec, tincidunt tristique est. Donec ullamcorper sem \
     mauris, eu tristique risus laoreet ut. Duis et mollis diam, id sollicitudin ipsum. \
     Vivamus ac molestie augue, at dapibus nisi.",
];

/// Greedy word wrap; words longer than `width` are split
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let extra = if line_len == 0 { word.len() } else { word.len() + 1 };
        if line_len + extra > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// All paragraphs wrapped to `width`, with a blank line between paragraphs
#[must_use]
pub fn wrapped_lines(width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (i, paragraph) in PARAGRAPHS.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        out.extend(wrap(paragraph, width));
    }
    out
}

/// Number of wrapped lines at `width`
#[must_use]
pub fn wrapped_line_count(width: usize) -> usize {
    wrapped_lines(width).len()
}

/// Scroll state of the scratch text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notepad {
    scroll: usize,
    viewport: (u16, u16),
}

impl Notepad {
    /// Creates a notepad scrolled to the top
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible wrapped line
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Largest scroll offset for the current viewport
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        let (width, height) = self.viewport;
        wrapped_line_count(usize::from(width)).saturating_sub(usize::from(height))
    }

    /// Records the text area size and re-clamps the scroll offset
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Text area size last recorded
    #[must_use]
    pub const fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Scrolls up by `lines`
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scrolls down by `lines`, stopping at the end of the text
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    /// Scrolls up one viewport
    pub fn page_up(&mut self) {
        self.scroll_up(self.page());
    }

    /// Scrolls down one viewport
    pub fn page_down(&mut self) {
        self.scroll_down(self.page());
    }

    fn page(&self) -> usize {
        usize::from(self.viewport.1.max(1))
    }
}

/// Text area of the notepad inside its bordered `area`
#[must_use]
pub fn text_area(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Notepad widget for rendering
#[derive(Debug)]
pub struct NotepadWidget<'a> {
    notepad: &'a Notepad,
}

impl<'a> NotepadWidget<'a> {
    /// Creates a new notepad widget
    #[must_use]
    pub fn new(notepad: &'a Notepad) -> Self {
        Self { notepad }
    }
}

impl Widget for NotepadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = text_area(area);
        let lines: Vec<Line> = wrapped_lines(usize::from(inner.width))
            .into_iter()
            .skip(self.notepad.scroll())
            .take(usize::from(inner.height))
            .map(Line::from)
            .collect();

        let max = self.notepad.max_scroll();
        let title = if max == 0 {
            " Scratch ".to_string()
        } else {
            format!(" Scratch {}/{} ", self.notepad.scroll(), max)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }
}
