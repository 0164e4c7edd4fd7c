//! Screen navigation
//!
//! A stack of routes rooted at the start screen. Navigation never carries
//! parameters; each screen rebuilds what it needs on entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StartScreen;

/// A navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Menu listing the other screens
    #[default]
    Home,
    /// Calculator with keypad and preview
    Calculator,
    /// Read-only scratch text
    Editor,
}

impl Route {
    /// Routes reachable from the home menu, in menu order
    pub const DESTINATIONS: [Self; 2] = [Self::Calculator, Self::Editor];

    /// Stable route name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Calculator => "calculator",
            Self::Editor => "text-editor",
        }
    }

    /// Title shown in the menu and screen header
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Calculator => "Calculator",
            Self::Editor => "Text Editor",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "calculator" => Ok(Self::Calculator),
            "editor" | "text-editor" => Ok(Self::Editor),
            other => Err(format!("unknown route '{other}'")),
        }
    }
}

impl From<StartScreen> for Route {
    fn from(start: StartScreen) -> Self {
        match start {
            StartScreen::Home => Self::Home,
            StartScreen::Calculator => Self::Calculator,
            StartScreen::Editor => Self::Editor,
        }
    }
}

/// Push/pop navigation stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    /// Creates a router whose root is `start`
    #[must_use]
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    /// The route on top of the stack
    #[must_use]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Stack depth (1 at the root)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether `back` would pop
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Pushes `route`
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.current(), to = %route, "navigate");
        self.stack.push(route);
    }

    /// Pops the current route; no-op at the root
    ///
    /// Returns whether a route was popped.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        let left = self.stack.pop();
        info!(from = ?left, to = %self.current(), "back");
        true
    }
}
