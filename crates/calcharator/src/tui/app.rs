//! TUI application state
//!
//! Owns the router and the per-screen state. The calculator controller is
//! rebuilt every time the calculator screen is entered.

use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use super::cursor_text;
use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::notepad::{self, Notepad};
use super::router::{Route, Router};
use super::ui;
use crate::core::controller::CalculatorController;
use crate::core::cursor::{caret_visible, SplitText};
use crate::core::evaluator::Evaluator;

/// Calculator application state
#[derive(Debug)]
pub struct App {
    router: Router,
    engine: Evaluator,
    controller: CalculatorController,
    keypad: Keypad,
    notepad: Notepad,
    input: InputHandler,
    menu_index: usize,
    scientific_on_entry: bool,
    blink_epoch: Instant,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Evaluator::new(), Route::Home, false)
    }
}

impl App {
    /// Creates the app on `start`
    ///
    /// `scientific` is the keypad mode each calculator session starts in.
    #[must_use]
    pub fn new(engine: Evaluator, start: Route, scientific: bool) -> Self {
        let mut app = Self {
            router: Router::new(start),
            engine,
            controller: CalculatorController::new(engine),
            keypad: Keypad::new(),
            notepad: Notepad::new(),
            input: InputHandler::new(),
            menu_index: 0,
            scientific_on_entry: scientific,
            blink_epoch: Instant::now(),
            should_quit: false,
        };
        app.enter(start);
        app
    }

    /// Current screen
    #[must_use]
    pub fn route(&self) -> Route {
        self.router.current()
    }

    /// Navigation stack
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Calculator state for the current session
    #[must_use]
    pub fn controller(&self) -> &CalculatorController {
        &self.controller
    }

    /// Keypad with its highlight state
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Scratch text scroll state
    #[must_use]
    pub fn notepad(&self) -> &Notepad {
        &self.notepad
    }

    /// Selected home menu entry
    #[must_use]
    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether the caret is drawn right now
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        caret_visible(self.blink_epoch.elapsed())
    }

    /// Time until the caret next changes phase
    #[must_use]
    pub fn until_blink(&self) -> Duration {
        let half = crate::core::cursor::BLINK_PERIOD.as_millis() / 2;
        let phase = self.blink_epoch.elapsed().as_millis() % half;
        Duration::from_millis((half - phase) as u64)
    }

    /// Pushes `route` and prepares its state
    pub fn open(&mut self, route: Route) {
        self.router.navigate(route);
        self.enter(route);
    }

    /// Pops back to the previous screen
    pub fn back(&mut self) {
        if self.router.back() {
            self.enter(self.router.current());
        }
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::Calculator => {
                self.controller = CalculatorController::new(self.engine);
                self.controller.set_scientific(self.scientific_on_entry);
                self.keypad.set_scientific(self.scientific_on_entry);
                self.keypad.release_all();
                self.restart_blink();
            }
            Route::Editor => self.notepad = Notepad::new(),
            Route::Home => {}
        }
    }

    fn restart_blink(&mut self) {
        self.blink_epoch = Instant::now();
    }

    /// Presses a keypad label on the calculator
    pub fn press(&mut self, label: &'static str) {
        self.controller.press(label);
        self.keypad.highlight(label);
        self.restart_blink();
    }

    /// Records the terminal size so scroll limits match what is drawn
    pub fn sync_viewport(&mut self, area: Rect) {
        let text = notepad::text_area(ui::editor_layout(area).notepad);
        self.notepad.set_viewport(text.width, text.height);
    }

    /// Handles one terminal event; `area` is the full frame
    pub fn handle_event(&mut self, event: &Event, area: Rect) {
        self.keypad.release_all();
        match event {
            Event::Key(key) => {
                let action = self.input.handle_key(*key);
                self.handle_action(action);
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse, area),
            Event::Resize(width, height) => self.sync_viewport(Rect::new(0, 0, *width, *height)),
            _ => {}
        }
    }

    /// Applies a key action to the current screen
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => return self.quit(),
            KeyAction::Back => return self.back(),
            KeyAction::None => return,
            _ => {}
        }
        match self.route() {
            Route::Home => self.home_action(action),
            Route::Calculator => self.calculator_action(action),
            Route::Editor => self.editor_action(action),
        }
    }

    fn home_action(&mut self, action: KeyAction) {
        let entries = Route::DESTINATIONS.len();
        match action {
            KeyAction::Up => self.menu_index = (self.menu_index + entries - 1) % entries,
            KeyAction::Down => self.menu_index = (self.menu_index + 1) % entries,
            KeyAction::Submit => self.open(Route::DESTINATIONS[self.menu_index]),
            KeyAction::Press(label) => {
                let chosen = label
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| Route::DESTINATIONS.get(i).copied());
                if let Some(route) = chosen {
                    self.open(route);
                }
            }
            _ => {}
        }
    }

    fn calculator_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(label) => self.press(label),
            KeyAction::Submit => self.press("="),
            KeyAction::CursorLeft => self.controller.move_left(),
            KeyAction::CursorRight => self.controller.move_right(),
            KeyAction::CursorHome => self.controller.move_home(),
            KeyAction::CursorEnd => self.controller.move_end(),
            KeyAction::ToggleScientific => {
                self.controller.toggle_scientific();
                self.keypad.set_scientific(self.controller.is_scientific());
            }
            _ => return,
        }
        self.restart_blink();
    }

    fn editor_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Up => self.notepad.scroll_up(1),
            KeyAction::Down => self.notepad.scroll_down(1),
            KeyAction::PageUp => self.notepad.page_up(),
            KeyAction::PageDown => self.notepad.page_down(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        let (x, y) = (mouse.column, mouse.row);
        match (self.route(), mouse.kind) {
            (_, MouseEventKind::Down(MouseButton::Left)) => self.click(x, y, area),
            (Route::Editor, MouseEventKind::ScrollUp) => self.notepad.scroll_up(1),
            (Route::Editor, MouseEventKind::ScrollDown) => self.notepad.scroll_down(1),
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16, area: Rect) {
        let at = Position::new(x, y);
        match self.route() {
            Route::Home => {
                let menu = ui::home_layout(area).menu;
                let hit = (0..Route::DESTINATIONS.len())
                    .find(|&i| ui::menu_row(menu, i).contains(at));
                if let Some(i) = hit {
                    self.menu_index = i;
                    self.open(Route::DESTINATIONS[i]);
                }
            }
            Route::Calculator => {
                let layout = ui::calculator_layout(area);
                if ui::back_button(layout.header).contains(at) {
                    return self.back();
                }
                let row = layout.expression_row();
                let split = SplitText::new(self.controller.buffer(), self.controller.cursor());
                if let Some(target) = cursor_text::hit_test(&split, row, x, y) {
                    let offset = split.offset_for(target);
                    debug!(?target, offset, "caret click");
                    self.controller.set_cursor(offset);
                    self.restart_blink();
                } else if let Some(label) = self.keypad.hit_test(layout.keypad, x, y) {
                    self.press(label);
                }
            }
            Route::Editor => {
                if ui::back_button(ui::editor_layout(area).header).contains(at) {
                    self.back();
                }
            }
        }
    }
}
