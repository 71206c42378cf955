// Tabular records produced from GitHub statistics endpoints.
// Each record type maps to one cached dataset file with a fixed column order.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{HubError, Result};

/// Named, independently cached dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    TotalContributions,
    WeeklyContributions,
    CodeFrequency,
    Issues,
    Stargazers,
    CommitActivity,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::TotalContributions,
        Dataset::WeeklyContributions,
        Dataset::CodeFrequency,
        Dataset::Issues,
        Dataset::Stargazers,
        Dataset::CommitActivity,
    ];

    /// Base name of the cache file.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Dataset::TotalContributions => "total_contributions",
            Dataset::WeeklyContributions => "weekly_contributions",
            Dataset::CodeFrequency => "code_frequency",
            Dataset::Issues => "issues",
            Dataset::Stargazers => "stargazers",
            Dataset::CommitActivity => "commit_activity",
        }
    }

    /// Human-readable name for progress output.
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::TotalContributions => "contributor totals",
            Dataset::WeeklyContributions => "weekly contributions",
            Dataset::CodeFrequency => "code frequency",
            Dataset::Issues => "repository issues",
            Dataset::Stargazers => "stargazers",
            Dataset::CommitActivity => "commit activity",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A row type stored in a dataset file.
pub trait Record: Serialize + DeserializeOwned {
    const DATASET: Dataset;
    /// Column names in on-disk order, excluding the index column.
    const COLUMNS: &'static [&'static str];
}

/// Calendar date (UTC) of an epoch-seconds timestamp.
pub fn date_from_unix(ts: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.date_naive())
        .ok_or(HubError::InvalidTimestamp(ts))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorTotal {
    pub user: String,
    pub commits: u64,
}

impl Record for ContributorTotal {
    const DATASET: Dataset = Dataset::TotalContributions;
    const COLUMNS: &'static [&'static str] = &["user", "commits"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyContribution {
    pub user: String,
    pub week_unix_ts: i64,
    pub date: NaiveDate,
    pub additions: i64,
    pub deletions: i64,
    pub commits: i64,
}

impl Record for WeeklyContribution {
    const DATASET: Dataset = Dataset::WeeklyContributions;
    const COLUMNS: &'static [&'static str] = &[
        "user",
        "week_unix_ts",
        "date",
        "additions",
        "deletions",
        "commits",
    ];
}

/// Weekly additions and deletions. Deletions keep the API's negative sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFrequencyPoint {
    pub week_unix_ts: i64,
    pub date: NaiveDate,
    pub additions: i64,
    pub deletions: i64,
}

impl Record for CodeFrequencyPoint {
    const DATASET: Dataset = Dataset::CodeFrequency;
    const COLUMNS: &'static [&'static str] = &["week_unix_ts", "date", "additions", "deletions"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    /// "open", "closed", or whatever the API reports.
    pub state: String,
    pub created_at: NaiveDate,
}

impl Record for Issue {
    const DATASET: Dataset = Dataset::Issues;
    const COLUMNS: &'static [&'static str] = &["id", "state", "created_at"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    pub user: String,
    pub starred_at: NaiveDate,
}

impl Record for Stargazer {
    const DATASET: Dataset = Dataset::Stargazers;
    const COLUMNS: &'static [&'static str] = &["user", "starred_at"];
}

/// Commits per weekday for one week, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitActivityWeek {
    pub week_unix_ts: i64,
    pub week: NaiveDate,
    pub mon: u32,
    pub tue: u32,
    pub wed: u32,
    pub thu: u32,
    pub fri: u32,
    pub sat: u32,
    pub sun: u32,
}

impl CommitActivityWeek {
    /// Build from the API's Sunday-first day array.
    pub fn from_sunday_first(week_unix_ts: i64, days: [u32; 7]) -> Result<Self> {
        let [sun, mon, tue, wed, thu, fri, sat] = days;
        Ok(Self {
            week_unix_ts,
            week: date_from_unix(week_unix_ts)?,
            mon,
            tue,
            wed,
            thu,
            fri,
            sat,
            sun,
        })
    }

    /// Counts ordered Monday..Sunday.
    pub fn monday_first(&self) -> [u32; 7] {
        [
            self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun,
        ]
    }

    pub fn total(&self) -> u32 {
        self.monday_first().iter().sum()
    }
}

impl Record for CommitActivityWeek {
    const DATASET: Dataset = Dataset::CommitActivity;
    const COLUMNS: &'static [&'static str] = &[
        "week_unix_ts",
        "week",
        "mon",
        "tue",
        "wed",
        "thu",
        "fri",
        "sat",
        "sun",
    ];
}
