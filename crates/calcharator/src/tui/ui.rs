//! TUI rendering
//!
//! Layout functions are shared with the app so mouse hit-testing sees the
//! same rectangles that were drawn.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::App;
use super::cursor_text::CursorTextWidget;
use super::keypad::KeypadWidget;
use super::notepad::NotepadWidget;
use super::router::Route;
use crate::core::controller::BufferState;

/// Application title shown on the outer border
pub const APP_TITLE: &str = " calcharator ";

/// Key help for the home menu
pub const HOME_HELP: &str = "↑/↓ select · Enter open · 1-2 jump · Ctrl+Q quit";

/// Key help for the calculator
pub const CALCULATOR_HELP: &str =
    "Enter/= eval · Bksp DEL · Del C · Tab sci · s c t l r fn · ←/→ cursor · Esc back";

/// Key help for the scratch text
pub const EDITOR_HELP: &str = "↑/↓ scroll · PgUp/PgDn page · Esc back";

/// Label of the back button in the screen header
pub const BACK_LABEL: &str = "[ Home ]";

/// Areas of the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLayout {
    /// Screen header
    pub header: Rect,
    /// Bordered menu list
    pub menu: Rect,
    /// Key help line
    pub help: Rect,
}

/// Areas of the calculator screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorLayout {
    /// Screen header
    pub header: Rect,
    /// Bordered expression box
    pub expression: Rect,
    /// Bordered preview box
    pub preview: Rect,
    /// Bordered keypad
    pub keypad: Rect,
    /// Key help line
    pub help: Rect,
}

impl CalculatorLayout {
    /// The single text row inside the expression box
    #[must_use]
    pub fn expression_row(&self) -> Rect {
        Rect {
            x: self.expression.x + 1,
            y: self.expression.y + 1,
            width: self.expression.width.saturating_sub(2),
            height: self.expression.height.saturating_sub(2).min(1),
        }
    }
}

/// Areas of the scratch text screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    /// Screen header
    pub header: Rect,
    /// Bordered notepad
    pub notepad: Rect,
    /// Key help line
    pub help: Rect,
}

fn split(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

/// Home screen layout for the whole frame `area`
#[must_use]
pub fn home_layout(area: Rect) -> HomeLayout {
    let chunks = split(
        area,
        &[
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ],
    );
    HomeLayout {
        header: chunks[0],
        menu: chunks[1],
        help: chunks[2],
    }
}

/// Calculator screen layout for the whole frame `area`
#[must_use]
pub fn calculator_layout(area: Rect) -> CalculatorLayout {
    let chunks = split(
        area,
        &[
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
        ],
    );
    CalculatorLayout {
        header: chunks[0],
        expression: chunks[1],
        preview: chunks[2],
        keypad: chunks[3],
        help: chunks[4],
    }
}

/// Scratch text screen layout for the whole frame `area`
#[must_use]
pub fn editor_layout(area: Rect) -> EditorLayout {
    let chunks = split(
        area,
        &[
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ],
    );
    EditorLayout {
        header: chunks[0],
        notepad: chunks[1],
        help: chunks[2],
    }
}

/// Area of the back button inside a screen header
#[must_use]
pub fn back_button(header: Rect) -> Rect {
    let width = (BACK_LABEL.chars().count() as u16).min(header.width.saturating_sub(2));
    Rect {
        x: (header.x + header.width).saturating_sub(width + 1),
        y: header.y + 1,
        width,
        height: header.height.saturating_sub(2).min(1),
    }
}

/// Row of menu entry `index` inside the bordered menu
#[must_use]
pub fn menu_row(menu: Rect, index: usize) -> Rect {
    Rect {
        x: menu.x + 1,
        y: menu.y + 1 + index as u16,
        width: menu.width.saturating_sub(2),
        height: 1,
    }
}

/// Renders the current screen of `app` to the frame
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(AppUI::new(app), area);
}

/// Whole-frame widget for the current screen
#[derive(Debug)]
pub struct AppUI<'a> {
    app: &'a App,
}

impl<'a> AppUI<'a> {
    /// Creates the widget
    #[must_use]
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn render_header(&self, route: Route, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            route.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(area, buf);

        let button = back_button(area);
        if route != Route::Home && !button.is_empty() {
            buf.set_span(
                button.x,
                button.y,
                &Span::styled(BACK_LABEL, Style::default().fg(Color::Cyan)),
                button.width,
            );
        }
    }

    fn render_help(text: &str, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))).render(area, buf);
    }

    fn render_home(&self, area: Rect, buf: &mut Buffer) {
        let layout = home_layout(area);
        self.render_header(Route::Home, layout.header, buf);

        let items: Vec<ListItem> = Route::DESTINATIONS
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let selected = i == self.app.menu_index();
                let marker = if selected { "▸" } else { " " };
                let style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![Span::styled(
                    format!("{marker} {}. {}", i + 1, route.title()),
                    style,
                )]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Go to ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(layout.menu, buf);

        Self::render_help(HOME_HELP, layout.help, buf);
    }

    fn render_calculator(&self, area: Rect, buf: &mut Buffer) {
        let layout = calculator_layout(area);
        let controller = self.app.controller();
        self.render_header(Route::Calculator, layout.header, buf);

        let text_style = match controller.state() {
            BufferState::Editable => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            BufferState::ErrorDisplayed => Style::default().fg(Color::Red),
        };
        Block::default()
            .title(format!(
                " Expression [{}] ",
                controller.engine().config().angle_mode.label()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(layout.expression, buf);
        CursorTextWidget::new(controller.buffer(), controller.cursor())
            .caret_visible(self.app.caret_visible())
            .style(text_style)
            .render(layout.expression_row(), buf);

        Paragraph::new(Span::styled(
            controller.preview(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(layout.preview, buf);

        KeypadWidget::new(self.app.keypad()).render(layout.keypad, buf);
        Self::render_help(CALCULATOR_HELP, layout.help, buf);
    }

    fn render_editor(&self, area: Rect, buf: &mut Buffer) {
        let layout = editor_layout(area);
        self.render_header(Route::Editor, layout.header, buf);
        NotepadWidget::new(self.app.notepad()).render(layout.notepad, buf);
        Self::render_help(EDITOR_HELP, layout.help, buf);
    }
}

impl Widget for AppUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        match self.app.route() {
            Route::Home => self.render_home(area, buf),
            Route::Calculator => self.render_calculator(area, buf),
            Route::Editor => self.render_editor(area, buf),
        }
    }
}
