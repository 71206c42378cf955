// GitHub API HTTP transport.
// Handles authentication headers, rate limit parsing, and status classification.

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{HubError, Result};

use super::types::{ApiErrorBody, RateLimit};

const DEFAULT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// A GET request relative to the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Overrides the default `Accept` header.
    pub accept: Option<&'static str>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            accept: None,
        }
    }

    /// Add `per_page` and `page` query parameters.
    pub fn page(mut self, per_page: u32, page: u32) -> Self {
        self.query.push(("per_page".to_string(), per_page.to_string()));
        self.query.push(("page".to_string(), page.to_string()));
        self
    }

    pub fn accept(mut self, media_type: &'static str) -> Self {
        self.accept = Some(media_type);
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Decode the body, reporting shape mismatches against `endpoint`.
    pub fn json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| HubError::Payload {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Rate limit values present in the headers; missing ones are `None`.
    pub fn rate_limit_headers(&self) -> (Option<u64>, Option<u64>, Option<u64>) {
        let header = |name: &str| {
            self.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };
        (
            header("x-ratelimit-limit"),
            header("x-ratelimit-remaining"),
            header("x-ratelimit-reset"),
        )
    }
}

/// Sends API requests. Implemented over HTTP and by test doubles.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let headers = default_headers(config.token.as_deref(), &config.user_agent)?;
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(HubError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.get(&url).query(&request.query);
        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }

        let response = builder.send().await.map_err(HubError::Http)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(HubError::Http)?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Headers sent with every request.
pub fn default_headers(token: Option<&str>, user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("token {}", token))
            .map_err(|e| HubError::Other(format!("Invalid access token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_MEDIA_TYPE));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|e| HubError::Other(e.to_string()))?,
    );

    Ok(headers)
}

/// Merge rate limit headers of `response` into `rate_limit`.
pub fn update_rate_limit(rate_limit: &mut RateLimit, response: &ApiResponse) {
    let (limit, remaining, reset) = response.rate_limit_headers();
    if let Some(limit) = limit {
        rate_limit.limit = limit;
    }
    if let Some(remaining) = remaining {
        rate_limit.remaining = remaining;
    }
    if let Some(reset) = reset {
        rate_limit.reset = reset;
    }
}

/// Check response status and convert errors.
/// Every request for a repository goes through this mapping.
pub fn check_response(response: ApiResponse, owner: &str, repo: &str) -> Result<ApiResponse> {
    match response.status {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(HubError::BadCredentials),
        StatusCode::FORBIDDEN => Err(HubError::RateLimitExceeded),
        StatusCode::NOT_FOUND => Err(HubError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        status => Err(HubError::Api {
            status: status.as_u16(),
            message: error_message(&response.body),
        }),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
