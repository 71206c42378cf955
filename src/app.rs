// App state and main event loop.
// Manages the chart tabs and keyboard input handling.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;

use crate::report::Report;
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Lines,
    Authors,
    Stars,
    Activity,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Lines, Tab::Authors, Tab::Stars, Tab::Activity];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Lines => "Lines",
            Tab::Authors => "Authors",
            Tab::Stars => "Stars",
            Tab::Activity => "Activity",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Lines => Tab::Authors,
            Tab::Authors => Tab::Stars,
            Tab::Stars => Tab::Activity,
            Tab::Activity => Tab::Lines,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Lines => Tab::Activity,
            Tab::Authors => Tab::Lines,
            Tab::Stars => Tab::Authors,
            Tab::Activity => Tab::Stars,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Series being displayed.
    pub report: Report,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(report: Report) -> Self {
        Self {
            active_tab: Tab::default(),
            report,
            should_quit: false,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.active_tab = self.active_tab.prev(),
            KeyCode::Char(c) => {
                if let Some(tab) = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(|i| Tab::ALL.get(i))
                {
                    self.active_tab = *tab;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ActivityGrid, IssueCounts, StarHistory};

    fn empty_report() -> Report {
        Report {
            title: "octo/demo".to_string(),
            description: None,
            forks: 0,
            lines: Vec::new(),
            authors: Vec::new(),
            stars: StarHistory::default(),
            activity: ActivityGrid::default(),
            issues: IssueCounts::default(),
        }
    }

    #[test]
    fn test_tab_cycle() {
        let mut tab = Tab::default();
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Lines);
        assert_eq!(Tab::Lines.prev(), Tab::Activity);
    }

    #[test]
    fn test_key_handling() {
        let mut app = App::new(empty_report());

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Authors);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Activity);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Stars);
        app.handle_key(KeyCode::Char('9'));
        app.handle_key(KeyCode::Char('0'));
        assert_eq!(app.active_tab, Tab::Stars);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
