//! HTTP client for the upstream site.
//!
//! Fetches listing HTML, retreat feeds, and the form-POST JSON API. All
//! requests carry a fixed identifying client tag; any non-success status is
//! a hard failure for the operation (retry is the caller's business).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::UpstreamError;
use super::{TalkItem, TeacherItem, Upstream};

/// Default base URL for the upstream site.
const DEFAULT_BASE_URL: &str = "https://www.dharmaseed.org";

/// Fixed client tag sent on every outbound request.
const CLIENT_TAG: &str = "DharmaSeedPlayer/1.0";

/// Listing pages are requested 25 talks at a time, newest first.
const PAGE_ITEMS: &str = "25";
const SORT: &str = "-rec_date";

/// Envelope for `detail=1` responses: a map of id → item.
#[derive(Deserialize)]
struct DetailResponse<T> {
    #[serde(default)]
    items: HashMap<u64, T>,
}

/// Envelope for `detail=0` responses: a bare id list.
#[derive(Deserialize)]
struct IdListResponse {
    #[serde(default)]
    items: Vec<u64>,
}

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct DharmaConfig {
    /// Base URL for the site
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DharmaConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DharmaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the upstream site.
#[derive(Debug, Clone)]
pub struct DharmaClient {
    http: reqwest::Client,
    base_url: String,
}

impl DharmaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DharmaConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_TAG));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// GET a document, failing on any non-success status.
    async fn get_document(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, UpstreamError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    /// POST a form to the JSON API and decode the response envelope.
    async fn post_api<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).form(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
        })
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl Upstream for DharmaClient {
    async fn search_page(&self, query: &str, page: u32) -> Result<String, UpstreamError> {
        let url = format!("{}/talks/", self.base_url);
        let page = page.to_string();
        self.get_document(
            &url,
            &[
                ("search", query),
                ("sort", SORT),
                ("page", &page),
                ("page_items", PAGE_ITEMS),
            ],
        )
        .await
    }

    async fn teacher_page(
        &self,
        teacher_id: u64,
        page: u32,
        query: Option<&str>,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/teacher/{}/", self.base_url, teacher_id);
        let page = page.to_string();

        let mut params = vec![("sort", SORT), ("page", page.as_str()), ("page_items", PAGE_ITEMS)];
        if let Some(q) = query {
            params.push(("search", q));
        }

        self.get_document(&url, &params).await
    }

    async fn retreat_feed(&self, retreat_id: u64) -> Result<String, UpstreamError> {
        let url = format!("{}/feeds/retreat/{}/", self.base_url, retreat_id);
        self.get_document(&url, &[]).await
    }

    async fn talk_items(&self, ids: &[u64]) -> Result<HashMap<u64, TalkItem>, UpstreamError> {
        let items = join_ids(ids);
        let response: DetailResponse<TalkItem> = self
            .post_api("/api/1/talks/", &[("detail", "1"), ("items", &items)])
            .await?;
        Ok(response.items)
    }

    async fn teacher_ids(&self) -> Result<Vec<u64>, UpstreamError> {
        let response: IdListResponse = self
            .post_api("/api/1/teachers/", &[("detail", "0")])
            .await?;
        Ok(response.items)
    }

    async fn teacher_items(&self, ids: &[u64]) -> Result<HashMap<u64, TeacherItem>, UpstreamError> {
        let items = join_ids(ids);
        let response: DetailResponse<TeacherItem> = self
            .post_api("/api/1/teachers/", &[("detail", "1"), ("items", &items)])
            .await?;
        Ok(response.items)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
