// Chart widgets for each tab.
// Line charts, contributor bars, and the weekday heatmap.

use ratatui::{prelude::*, widgets::*};

use crate::report::{ActivityGrid, AuthorShare, LinesPoint, StarHistory, WEEKDAY_LABELS};

/// Render an empty state message.
fn render_empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(text, area);
}

/// Split an area into two stacked halves.
fn halves(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Lower and upper bounds over all series, padded so flat lines stay visible.
fn y_bounds<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let (min, max) = series
        .into_iter()
        .flatten()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if min == max { [min, min + 1.0] } else { [min, max] }
}

/// First, middle, and last labels of a series.
fn edge_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[(&str, Color, &[(f64, f64)])],
    x_labels: &[String],
) {
    let x_max = series
        .iter()
        .map(|(_, _, data)| data.len())
        .max()
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1) as f64;
    let y = y_bounds(series.iter().map(|(_, _, data)| *data));

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(name, color, data)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(*data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(edge_labels(x_labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(y)
                .labels(vec![format!("{:.0}", y[0]), format!("{:.0}", y[1])]),
        );

    frame.render_widget(chart, area);
}

/// Total lines of code over time, then additions and deletions.
pub fn draw_lines(frame: &mut Frame, lines: &[LinesPoint], area: Rect) {
    if lines.is_empty() {
        render_empty(frame, area, " Lines ", "No code frequency data");
        return;
    }

    let labels: Vec<String> = lines.iter().map(|p| p.date.to_string()).collect();
    let total: Vec<(f64, f64)> = lines
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.total as f64))
        .collect();
    let additions: Vec<(f64, f64)> = lines
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.additions as f64))
        .collect();
    let deletions: Vec<(f64, f64)> = lines
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.deletions as f64))
        .collect();

    let (top, bottom) = halves(area);
    render_line_chart(
        frame,
        top,
        " Total lines of code over time ",
        &[("lines", Color::Cyan, total.as_slice())],
        &labels,
    );
    render_line_chart(
        frame,
        bottom,
        " Additions and deletions over time ",
        &[
            ("additions", Color::Green, additions.as_slice()),
            ("deletions", Color::Red, deletions.as_slice()),
        ],
        &labels,
    );
}

/// Commit share per contributor as horizontal bars.
pub fn draw_authors(frame: &mut Frame, authors: &[AuthorShare], area: Rect) {
    if authors.is_empty() {
        render_empty(frame, area, " Commits by author ", "No contributor statistics");
        return;
    }

    let bars: Vec<Bar> = authors
        .iter()
        .map(|share| {
            Bar::default()
                .value(share.commits)
                .label(Line::from(share.label.clone()))
                .text_value(format!("{} ({:.1}%)", share.commits, share.percent))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Commits by author "),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Cumulative stars per day, then new stars per month.
pub fn draw_stars(frame: &mut Frame, stars: &StarHistory, area: Rect) {
    if stars.daily.is_empty() {
        render_empty(frame, area, " Stars ", "No stargazers yet");
        return;
    }

    let daily_labels: Vec<String> = stars.daily.iter().map(|d| d.date.to_string()).collect();
    let cumulative: Vec<(f64, f64)> = stars
        .daily
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.cumulative as f64))
        .collect();

    let monthly_labels: Vec<String> = stars.monthly.iter().map(|m| m.label()).collect();
    let monthly: Vec<(f64, f64)> = stars
        .monthly
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.count as f64))
        .collect();

    let (top, bottom) = halves(area);
    render_line_chart(
        frame,
        top,
        " Number of stars over time ",
        &[("stars", Color::Yellow, cumulative.as_slice())],
        &daily_labels,
    );
    render_line_chart(
        frame,
        bottom,
        " New stars aggregated by months ",
        &[("new stars", Color::Yellow, monthly.as_slice())],
        &monthly_labels,
    );
}

/// Background color for a heatmap cell, from light to dark blue.
fn heat_color(value: u32, max: u32) -> Color {
    if value == 0 {
        return Color::Rgb(235, 237, 240);
    }
    let ratio = value as f64 / max.max(1) as f64;
    let shade = |light: f64, dark: f64| (light + (dark - light) * ratio).round() as u8;
    Color::Rgb(shade(198.0, 8.0), shade(219.0, 48.0), shade(239.0, 107.0))
}

/// Commits per weekday and week over the last year.
pub fn draw_activity(frame: &mut Frame, grid: &ActivityGrid, area: Rect) {
    if grid.weeks.is_empty() {
        render_empty(frame, area, " Commit activity ", "No commit activity in the last year");
        return;
    }

    let mut lines: Vec<Line> = grid
        .rows
        .iter()
        .zip(WEEKDAY_LABELS)
        .map(|(row, label)| {
            let mut spans = vec![Span::styled(
                format!("{:<4}", label),
                Style::default().fg(Color::DarkGray),
            )];
            spans.extend(
                row.iter()
                    .map(|&value| Span::styled(" ", Style::default().bg(heat_color(value, grid.max)))),
            );
            Line::from(spans)
        })
        .collect();

    if let (Some(first), Some(last)) = (grid.weeks.first(), grid.weeks.last()) {
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("    {} → {} · busiest day: {} commits", first, last, grid.max),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Commit activity in the last year "),
    );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DailyStars, MonthlyStars};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_edge_labels() {
        let labels: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
        assert_eq!(edge_labels(&labels), vec!["1", "3", "5"]);
        assert_eq!(edge_labels(&labels[..2]), vec!["1", "2"]);
        assert!(edge_labels(&[]).is_empty());
    }

    #[test]
    fn test_y_bounds() {
        let a = [(0.0, -5.0), (1.0, 10.0)];
        let b = [(0.0, 20.0)];
        assert_eq!(y_bounds([&a[..], &b[..]]), [-5.0, 20.0]);

        let flat = [(0.0, 0.0), (1.0, 0.0)];
        assert_eq!(y_bounds([&flat[..]]), [0.0, 1.0]);
    }

    #[test]
    fn test_heat_color_scale() {
        assert_eq!(heat_color(0, 10), Color::Rgb(235, 237, 240));
        assert_eq!(heat_color(10, 10), Color::Rgb(8, 48, 107));
        assert_ne!(heat_color(1, 10), heat_color(9, 10));
    }

    #[test]
    fn test_charts_render_without_panicking() {
        let day = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        let lines = vec![LinesPoint {
            date: day,
            additions: 10,
            deletions: -2,
            total: 8,
        }];
        let authors = vec![AuthorShare {
            label: "alice".to_string(),
            commits: 3,
            percent: 100.0,
        }];
        let stars = StarHistory {
            daily: vec![DailyStars {
                date: day,
                count: 1,
                cumulative: 1,
            }],
            monthly: vec![MonthlyStars {
                year: 2021,
                month: 1,
                count: 1,
            }],
        };
        let mut grid = ActivityGrid {
            weeks: vec![day],
            max: 4,
            ..ActivityGrid::default()
        };
        for row in grid.rows.iter_mut() {
            row.push(4);
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_lines(frame, &lines, area);
                draw_authors(frame, &authors, area);
                draw_stars(frame, &stars, area);
                draw_activity(frame, &grid, area);
                draw_lines(frame, &[], area);
                draw_activity(frame, &ActivityGrid::default(), area);
            })
            .unwrap();
    }
}
