// GitHub API endpoint paths.
// Repository-scoped paths used by the statistics client.

/// Media type that adds `starred_at` to stargazer listings.
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

pub fn repository(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}", owner, repo)
}

pub fn contributor_stats(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/stats/contributors", owner, repo)
}

pub fn code_frequency(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/stats/code_frequency", owner, repo)
}

pub fn commit_activity(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/stats/commit_activity", owner, repo)
}

pub fn issues(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/issues", owner, repo)
}

pub fn stargazers(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/stargazers", owner, repo)
}

pub fn user(login: &str) -> String {
    format!("/users/{}", login)
}
