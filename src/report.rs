// Chart series derived from cached datasets.
// Cumulative lines of code, contributor shares, star history, and the weekday heatmap.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::github::Transport;
use crate::records::{CodeFrequencyPoint, CommitActivityWeek, ContributorTotal, Issue, Stargazer};
use crate::repo_client::RepoClient;

/// Contributors shown individually before the rest are grouped.
pub const DEFAULT_AUTHOR_LIMIT: usize = 12;
pub const OTHERS_LABEL: &str = "Others";
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One week of code changes with the running line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinesPoint {
    pub date: NaiveDate,
    pub additions: i64,
    pub deletions: i64,
    /// Sum of additions and deletions up to and including this week.
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorShare {
    pub label: String,
    pub commits: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyStars {
    pub date: NaiveDate,
    pub count: u64,
    pub cumulative: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyStars {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

impl MonthlyStars {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarHistory {
    pub daily: Vec<DailyStars>,
    pub monthly: Vec<MonthlyStars>,
}

impl StarHistory {
    pub fn total(&self) -> u64 {
        self.daily.last().map(|d| d.cumulative).unwrap_or(0)
    }
}

/// Weekday by week commit counts, rows Monday through Sunday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityGrid {
    pub weeks: Vec<NaiveDate>,
    pub rows: [Vec<u32>; 7],
    /// Largest cell value, never below 1.
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub open: usize,
    pub closed: usize,
    pub other: usize,
}

/// Everything the terminal UI draws for one repository.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub description: Option<String>,
    pub forks: u64,
    pub lines: Vec<LinesPoint>,
    pub authors: Vec<AuthorShare>,
    pub stars: StarHistory,
    pub activity: ActivityGrid,
    pub issues: IssueCounts,
}

impl Report {
    /// Load every dataset through `client` (cache first) and build the series.
    pub async fn collect<T: Transport>(
        client: &mut RepoClient<T>,
        author_limit: usize,
    ) -> Result<Self> {
        let (title, description, forks) = match client.repository() {
            Some(summary) => (
                summary.full_name.clone(),
                summary.description.clone().filter(|d| !d.trim().is_empty()),
                summary.forks_count,
            ),
            None => (format!("{}/{}", client.owner(), client.repo()), None, 0),
        };
        let frequency = client.code_frequency().await?;
        let contributions = client.contributors().await?;
        let stargazers = client.stargazers().await?;
        let activity = client.commit_activity().await?;
        let issues = client.issues().await?;

        Ok(Self {
            title,
            description,
            forks,
            lines: lines_over_time(&frequency),
            authors: commits_by_author(&contributions.totals, author_limit),
            stars: star_history(&stargazers),
            activity: activity_grid(&activity),
            issues: issue_counts(&issues),
        })
    }

    /// Repository name followed by its description, for the tab bar.
    pub fn headline(&self) -> String {
        match &self.description {
            Some(description) => format!("{} · {}", self.title, description),
            None => self.title.clone(),
        }
    }
}

pub fn lines_over_time(points: &[CodeFrequencyPoint]) -> Vec<LinesPoint> {
    let mut total = 0;
    points
        .iter()
        .map(|p| {
            total += p.additions + p.deletions;
            LinesPoint {
                date: p.date,
                additions: p.additions,
                deletions: p.deletions,
                total,
            }
        })
        .collect()
}

/// Top `limit` contributors by commits, plus an "Others" bucket for the rest.
pub fn commits_by_author(totals: &[ContributorTotal], limit: usize) -> Vec<AuthorShare> {
    let mut ranked: Vec<&ContributorTotal> = totals.iter().collect();
    ranked.sort_by(|a, b| b.commits.cmp(&a.commits));

    let limit = (if limit == 0 { DEFAULT_AUTHOR_LIMIT } else { limit }).min(ranked.len());
    let grand_total: u64 = ranked.iter().map(|t| t.commits).sum();
    let percent = |commits: u64| {
        if grand_total == 0 {
            0.0
        } else {
            commits as f64 * 100.0 / grand_total as f64
        }
    };

    let mut shares: Vec<AuthorShare> = ranked[..limit]
        .iter()
        .map(|t| AuthorShare {
            label: t.user.clone(),
            commits: t.commits,
            percent: percent(t.commits),
        })
        .collect();

    let rest = &ranked[limit..];
    if !rest.is_empty() {
        let commits: u64 = rest.iter().map(|t| t.commits).sum();
        shares.push(AuthorShare {
            label: OTHERS_LABEL.to_string(),
            commits,
            percent: percent(commits),
        });
    }
    shares
}

/// Stars per day with running totals, and per calendar month without gaps.
pub fn star_history(stargazers: &[Stargazer]) -> StarHistory {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for star in stargazers {
        *by_day.entry(star.starred_at).or_default() += 1;
    }

    let mut cumulative = 0;
    let daily: Vec<DailyStars> = by_day
        .iter()
        .map(|(&date, &count)| {
            cumulative += count;
            DailyStars {
                date,
                count,
                cumulative,
            }
        })
        .collect();

    let mut by_month: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for (date, count) in &by_day {
        *by_month.entry((date.year(), date.month())).or_default() += count;
    }

    let mut monthly = Vec::new();
    if let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back()) {
        let (mut year, mut month) = first;
        while (year, month) <= last {
            monthly.push(MonthlyStars {
                year,
                month,
                count: by_month.get(&(year, month)).copied().unwrap_or(0),
            });
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
    }

    StarHistory { daily, monthly }
}

pub fn activity_grid(weeks: &[CommitActivityWeek]) -> ActivityGrid {
    let mut grid = ActivityGrid {
        max: 1,
        ..ActivityGrid::default()
    };

    for week in weeks {
        grid.weeks.push(week.week);
        for (row, count) in grid.rows.iter_mut().zip(week.monday_first()) {
            row.push(count);
            grid.max = grid.max.max(count);
        }
    }
    grid
}

pub fn issue_counts(issues: &[Issue]) -> IssueCounts {
    issues
        .iter()
        .fold(IssueCounts::default(), |mut counts, issue| {
            match issue.state.as_str() {
                "open" => counts.open += 1,
                "closed" => counts.closed += 1,
                _ => counts.other += 1,
            }
            counts
        })
}
