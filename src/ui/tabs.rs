// Tab bar rendering.
// Highlights the active chart and shows the repository name as the title.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(format!("{} {}", i + 1, tab.title()), style))
        })
        .collect();

    let selected_index = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" hubstats · {} ", app.report.headline()))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
