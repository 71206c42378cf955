// Cache-aware statistics client for a single repository.
// Fetches each dataset once, normalizes it into records, and persists it to disk.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::cache;
use crate::config::ClientConfig;
use crate::error::{HubError, Result};
use crate::github::client::update_rate_limit;
use crate::github::endpoints::{self, STAR_MEDIA_TYPE};
use crate::github::{
    ApiRequest, ApiResponse, CodeFrequencyRow, CommitActivityEntry, ContributorStats,
    HttpTransport, IssueItem, RateLimit, RepositorySummary, StarEvent, Transport, UserProfile,
    check_response,
};
use crate::progress::{self, Progress, ProgressSink};
use crate::records::{
    CodeFrequencyPoint, CommitActivityWeek, ContributorTotal, Dataset, Issue, Record, Stargazer,
    WeeklyContribution, date_from_unix,
};

/// Contributor statistics flattened into two aligned tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contributions {
    pub totals: Vec<ContributorTotal>,
    pub weekly: Vec<WeeklyContribution>,
}

/// Client for one `(owner, repo)` pair and its cache directory.
pub struct RepoClient<T: Transport = HttpTransport> {
    owner: String,
    repo: String,
    config: ClientConfig,
    transport: T,
    sink: Box<dyn ProgressSink>,
    cache_dir: PathBuf,
    rate_limit: RateLimit,
    repository: Option<RepositorySummary>,
}

impl RepoClient<HttpTransport> {
    /// Connect over HTTP, reporting progress through `tracing` when verbose.
    pub async fn new(owner: &str, repo: &str, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let sink = progress::sink_for(config.verbose);
        Self::connect(owner, repo, config, transport, sink).await
    }
}

impl<T: Transport> RepoClient<T> {
    /// Create the cache directory and probe the repository.
    ///
    /// The probe fails with the same classification every later request
    /// uses: 401, 403, 404, or a generic API error.
    pub async fn connect(
        owner: &str,
        repo: &str,
        config: ClientConfig,
        transport: T,
        sink: Box<dyn ProgressSink>,
    ) -> Result<Self> {
        let cache_dir = cache::repo_dir(&config.cache_root, owner, repo);
        fs::create_dir_all(&cache_dir)?;

        let mut client = Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            config,
            transport,
            sink,
            cache_dir,
            rate_limit: RateLimit::default(),
            repository: None,
        };

        let path = endpoints::repository(owner, repo);
        let response = client.request(ApiRequest::get(&path)).await?;
        client.repository = Some(response.json(&path)?);

        client.report(Progress::Message(format!(
            "The maximum number of requests you are permitted to make per hour: {}",
            client.rate_limit.limit
        )));
        client.report(Progress::Message(format!(
            "The number of requests remaining in the current rate limit window: {}",
            client.rate_limit.remaining
        )));

        Ok(client)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Directory holding this repository's dataset files.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Rate limit as of the last response.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
    }

    /// Metadata returned by the construction probe.
    pub fn repository(&self) -> Option<&RepositorySummary> {
        self.repository.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Remove every cached dataset, leaving an empty cache directory.
    pub fn delete_cache(&self) -> Result<()> {
        cache::reset_dir(&self.cache_dir)?;
        tracing::info!(dir = %self.cache_dir.display(), "cache cleared");
        Ok(())
    }

    /// Per-contributor commit totals and their weekly breakdown.
    pub async fn contributors(&mut self) -> Result<Contributions> {
        let totals_path = self.table_path(Dataset::TotalContributions);
        let weekly_path = self.table_path(Dataset::WeeklyContributions);
        if self.config.use_cache && cache::exists(&totals_path) && cache::exists(&weekly_path) {
            if let (Some(totals), Some(weekly)) = (
                cache::read_table(&totals_path)?,
                cache::read_table(&weekly_path)?,
            ) {
                tracing::info!(dataset = "contributors", "serving from cache");
                return Ok(Contributions { totals, weekly });
            }
        }

        let path = endpoints::contributor_stats(&self.owner, &self.repo);
        let stats: Vec<ContributorStats> = self.fetch_stats(&path).await?;

        let mut contributions = Contributions::default();
        for entry in &stats {
            let user = entry.login();
            contributions.totals.push(ContributorTotal {
                user: user.to_string(),
                commits: entry.total,
            });
            for week in &entry.weeks {
                contributions.weekly.push(WeeklyContribution {
                    user: user.to_string(),
                    week_unix_ts: week.w,
                    date: date_from_unix(week.w)?,
                    additions: week.a,
                    deletions: week.d,
                    commits: week.c,
                });
            }
        }

        self.store(&contributions.totals)?;
        self.store(&contributions.weekly)?;
        Ok(contributions)
    }

    /// Weekly additions and deletions for the whole history.
    pub async fn code_frequency(&mut self) -> Result<Vec<CodeFrequencyPoint>> {
        if let Some(rows) = self.cached()? {
            return Ok(rows);
        }

        let path = endpoints::code_frequency(&self.owner, &self.repo);
        let data: Vec<CodeFrequencyRow> = self.fetch_stats(&path).await?;

        let rows = data
            .into_iter()
            .map(|(week_unix_ts, additions, deletions)| {
                Ok(CodeFrequencyPoint {
                    week_unix_ts,
                    date: date_from_unix(week_unix_ts)?,
                    additions,
                    deletions,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.store(&rows)?;
        Ok(rows)
    }

    /// Commits per weekday for the last 52 weeks.
    pub async fn commit_activity(&mut self) -> Result<Vec<CommitActivityWeek>> {
        if let Some(rows) = self.cached()? {
            return Ok(rows);
        }

        let path = endpoints::commit_activity(&self.owner, &self.repo);
        let data: Vec<CommitActivityEntry> = self.fetch_stats(&path).await?;

        let rows = data
            .into_iter()
            .map(|entry| CommitActivityWeek::from_sunday_first(entry.week, entry.days))
            .collect::<Result<Vec<_>>>()?;

        self.store(&rows)?;
        Ok(rows)
    }

    /// Every issue (pull requests included, as the API lists them).
    pub async fn issues(&mut self) -> Result<Vec<Issue>> {
        if let Some(rows) = self.cached()? {
            return Ok(rows);
        }

        let path = endpoints::issues(&self.owner, &self.repo);
        let rows = self
            .paginate(Dataset::Issues, &path, None, |item: IssueItem| Issue {
                id: item.id,
                state: item.state,
                created_at: item.created_at.date_naive(),
            })
            .await?;

        self.store(&rows)?;
        Ok(rows)
    }

    /// Every star event, oldest first as the API returns them.
    pub async fn stargazers(&mut self) -> Result<Vec<Stargazer>> {
        if let Some(rows) = self.cached()? {
            return Ok(rows);
        }

        let path = endpoints::stargazers(&self.owner, &self.repo);
        let rows = self
            .paginate(
                Dataset::Stargazers,
                &path,
                Some(STAR_MEDIA_TYPE),
                |event: StarEvent| Stargazer {
                    user: event.login().to_string(),
                    starred_at: event.starred_at.date_naive(),
                },
            )
            .await?;

        self.store(&rows)?;
        Ok(rows)
    }

    /// Public profile of a GitHub user. Not cached.
    pub async fn user_profile(&mut self, login: &str) -> Result<UserProfile> {
        let path = endpoints::user(login);
        self.request(ApiRequest::get(&path)).await?.json(&path)
    }

    /// Send a request, track rate limits, and classify failures.
    async fn request(&mut self, request: ApiRequest) -> Result<ApiResponse> {
        tracing::debug!(path = %request.path, query = ?request.query, "GitHub API request");

        let response = self.transport.send(&request).await?;
        update_rate_limit(&mut self.rate_limit, &response);
        check_response(response, &self.owner, &self.repo)
    }

    /// Fetch a statistics endpoint.
    ///
    /// `202 Accepted` means the API is still computing and is reported as
    /// [`HubError::StatsPending`]; `204 No Content` is an empty result.
    async fn fetch_stats<S>(&mut self, path: &str) -> Result<Vec<S>>
    where
        S: DeserializeOwned,
    {
        let response = self.request(ApiRequest::get(path)).await?;
        match response.status {
            StatusCode::ACCEPTED => {
                tracing::warn!(endpoint = path, "statistics not ready yet");
                Err(HubError::StatsPending {
                    endpoint: path.to_string(),
                })
            }
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            _ if response.body.trim().is_empty() => Ok(Vec::new()),
            _ => response.json(path),
        }
    }

    /// Request successive pages until one comes back empty.
    async fn paginate<I, R>(
        &mut self,
        dataset: Dataset,
        path: &str,
        accept: Option<&'static str>,
        project: impl Fn(I) -> R,
    ) -> Result<Vec<R>>
    where
        I: DeserializeOwned,
    {
        self.report(Progress::Started(dataset));

        let mut rows = Vec::new();
        for page in 1..=self.config.max_pages {
            self.report(Progress::Page { dataset, page });

            let mut request = ApiRequest::get(path).page(self.config.per_page, page);
            if let Some(media_type) = accept {
                request = request.accept(media_type);
            }

            let items: Vec<I> = self.request(request).await?.json(path)?;
            if items.is_empty() {
                self.report(Progress::Finished {
                    dataset,
                    records: rows.len(),
                });
                return Ok(rows);
            }
            rows.extend(items.into_iter().map(&project));
        }

        Err(HubError::PageLimitExceeded {
            dataset: dataset.to_string(),
            max_pages: self.config.max_pages,
        })
    }

    fn table_path(&self, dataset: Dataset) -> PathBuf {
        cache::dataset_path(&self.cache_dir, dataset)
    }

    /// Cached rows for `R`, if caching is enabled and the file exists.
    fn cached<R: Record>(&self) -> Result<Option<Vec<R>>> {
        if !self.config.use_cache {
            return Ok(None);
        }

        let rows = cache::read_table(&self.table_path(R::DATASET))?;
        if rows.is_some() {
            tracing::info!(dataset = %R::DATASET, "serving from cache");
        }
        Ok(rows)
    }

    fn store<R: Record>(&self, rows: &[R]) -> Result<()> {
        cache::write_table(&self.table_path(R::DATASET), rows)
    }

    fn report(&self, event: Progress) {
        if self.config.verbose {
            self.sink.emit(event);
        }
    }
}
