// Scripted transport for tests.
// Answers by request path and records every request it receives.

use std::collections::HashMap;

use reqwest::StatusCode;

use crate::error::Result;

use super::client::{ApiRequest, ApiResponse, Transport};

enum Route {
    Fixed(ApiResponse),
    /// Body per page number, starting at page 1; later pages are empty.
    Pages(Vec<String>),
}

pub struct FakeTransport {
    routes: HashMap<String, Route>,
    requests: Vec<ApiRequest>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Vec::new(),
        }
    }

    /// Transport whose repository probe for `owner/repo` succeeds.
    pub fn for_repo(owner: &str, repo: &str) -> Self {
        let probe = ApiResponse::new(
            StatusCode::OK,
            format!(
                r#"{{"full_name": "{}/{}", "description": "Demo repository", "forks_count": 2}}"#,
                owner, repo
            ),
        )
        .with_header("X-RateLimit-Limit", "60")
        .with_header("X-RateLimit-Remaining", "59");

        Self::new().respond(&format!("/repos/{}/{}", owner, repo), probe)
    }

    pub fn respond(mut self, path: &str, response: ApiResponse) -> Self {
        self.routes.insert(path.to_string(), Route::Fixed(response));
        self
    }

    pub fn json(self, path: &str, body: impl Into<String>) -> Self {
        self.respond(path, ApiResponse::new(StatusCode::OK, body))
    }

    pub fn pages(mut self, path: &str, pages: Vec<String>) -> Self {
        self.routes.insert(path.to_string(), Route::Pages(pages));
        self
    }

    pub fn requests(&self) -> &[ApiRequest] {
        &self.requests
    }

    /// Number of requests made for `path`.
    pub fn count(&self, path: &str) -> usize {
        self.requests.iter().filter(|r| r.path == path).count()
    }
}

impl Transport for FakeTransport {
    async fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.push(request.clone());

        let response = match self.routes.get(&request.path) {
            Some(Route::Fixed(response)) => response.clone(),
            Some(Route::Pages(pages)) => {
                let page: usize = request
                    .query_param("page")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(1);
                let body = pages
                    .get(page.saturating_sub(1))
                    .cloned()
                    .unwrap_or_else(|| "[]".to_string());
                ApiResponse::new(StatusCode::OK, body)
            }
            None => ApiResponse::new(StatusCode::NOT_FOUND, r#"{"message": "Not Found"}"#),
        };
        Ok(response)
    }
}
