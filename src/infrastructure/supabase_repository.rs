// Supabase (PostgREST) repository implementation
use crate::application::complaint_store::{ComplaintStore, StoreError};
use crate::domain::complaint::{ComplaintRecord, COMPLAINTS_TABLE};
use crate::domain::dashboard::ComplaintSummary;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Rows requested per page. The server may return fewer if its
/// `max-rows` setting is lower, so paging stops on an empty page.
const PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct SupabaseRepository {
    base_url: String,
    api_key: String,
    table: String,
    client: reqwest::Client,
}

impl SupabaseRepository {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Supabase")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: COMPLAINTS_TABLE.to_string(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn summaries_url(&self, offset: usize) -> String {
        format!(
            "{}?select={}&order={}&limit={}&offset={}",
            self.table_url(),
            urlencoding::encode("location,status"),
            urlencoding::encode("id.asc"),
            PAGE_SIZE,
            offset
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }

    async fn read_rows<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, StoreError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<failed to read response body: {}>", e),
            };
            return Err(StoreError::rejected(format!(
                "Supabase responded with status {}: {}",
                status, body
            )));
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::unreachable(e)
            } else {
                StoreError::rejected(anyhow::Error::new(e).context("Failed to parse Supabase response"))
            }
        })
    }
}

/// Total row count from a PostgREST `Content-Range` header such as
/// `0-999/2500` or `*/0`. `None` when the count is absent or unknown.
fn content_range_total(headers: &reqwest::header::HeaderMap) -> Option<usize> {
    headers
        .get(reqwest::header::CONTENT_RANGE)?
        .to_str()
        .ok()?
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

#[async_trait]
impl ComplaintStore for SupabaseRepository {
    async fn insert_complaint(&self, record: &ComplaintRecord) -> Result<Vec<Value>, StoreError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(record);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(StoreError::unreachable)?;

        Self::read_rows(response).await
    }

    async fn list_summaries(&self) -> Result<Vec<ComplaintSummary>, StoreError> {
        let mut summaries = Vec::new();
        let mut expected = None;

        loop {
            let url = self.summaries_url(summaries.len());
            tracing::debug!("Fetching complaint summaries: {}", url);

            let mut request = self.authorize(self.client.get(&url));
            if summaries.is_empty() {
                request = request.header("Prefer", "count=exact");
            }
            let response = request.send().await.map_err(StoreError::unreachable)?;

            if summaries.is_empty() {
                expected = content_range_total(response.headers());
            }

            let page: Vec<ComplaintSummary> = Self::read_rows(response).await?;
            if page.is_empty() {
                break;
            }
            summaries.extend(page);

            if expected.is_some_and(|total| summaries.len() >= total) {
                break;
            }
        }

        match expected {
            Some(total) if total != summaries.len() => Err(StoreError::rejected(format!(
                "Supabase reported {} complaints but {} were read",
                total,
                summaries.len()
            ))),
            _ => Ok(summaries),
        }
    }
}
