// UI module for rendering the TUI.
// Lays out the tab bar, the active chart, and the status bar.

mod charts;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &App, area: Rect) {
    let report = &app.report;
    match app.active_tab {
        Tab::Lines => charts::draw_lines(frame, &report.lines, area),
        Tab::Authors => charts::draw_authors(frame, &report.authors, area),
        Tab::Stars => charts::draw_stars(frame, &report.stars, area),
        Tab::Activity => charts::draw_activity(frame, &report.activity, area),
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let issues = app.report.issues;
    let status = Line::from(vec![
        Span::styled(
            format!(" {} open", issues.open),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" · "),
        Span::styled(
            format!("{} closed", issues.closed),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("★ {}", app.report.stars.total()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" · "),
        Span::styled(
            format!("{} forks", app.report.forks),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            " │ Tab/←→ switch · 1-4 jump · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ActivityGrid, IssueCounts, Report, StarHistory};
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_shows_repository_summary() {
        let report = Report {
            title: "octo/demo".to_string(),
            description: Some("Demo repository".to_string()),
            forks: 7,
            lines: Vec::new(),
            authors: Vec::new(),
            stars: StarHistory::default(),
            activity: ActivityGrid::default(),
            issues: IssueCounts {
                open: 2,
                closed: 1,
                other: 0,
            },
        };
        let mut app = App::new(report);

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("octo/demo · Demo repository"));
        assert!(text.contains("7 forks"));
        assert!(text.contains("2 open"));
    }
}
