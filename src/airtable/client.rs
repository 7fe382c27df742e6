use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::Duration;

use super::config::Config;
use super::pacer::RequestPacer;
use super::records::{HoursFields, Record, RecordPage, SiteFields};

const AIRTABLE_URL: &str = "https://api.airtable.com/v0";
const SITES_TABLE: &str = "mutual_aid_locations";
const HOURS_TABLE: &str = "hours_periods";
// Airtable allows 5 requests per second per base; one per second keeps
// us well clear of the 30-second lockout.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("airtable request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("airtable rate limit exceeded; the API locks for 30 seconds")]
    RateLimited,
}

/// REST client for the mutual-aid Airtable base. All calls pass through
/// the request pacer.
pub struct AirtableClient {
    client: Client,
    base_url: String,
    api_key: String,
    pacer: RequestPacer,
}

impl AirtableClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/{}", AIRTABLE_URL, config.base_name),
            api_key: config.api_key.clone(),
            pacer: RequestPacer::new(MIN_REQUEST_INTERVAL),
        }
    }

    /// Every site row, sorted by organization name like the upstream
    /// base view.
    pub async fn fetch_sites(&self) -> Result<Vec<Record<SiteFields>>, AirtableError> {
        self.fetch_all(
            SITES_TABLE,
            &[
                ("sort[0][field]", "org_name"),
                ("sort[0][direction]", "asc"),
            ],
        )
        .await
    }

    /// Every hours row; sites link into these by record id.
    pub async fn fetch_hours(&self) -> Result<Vec<Record<HoursFields>>, AirtableError> {
        self.fetch_all(HOURS_TABLE, &[]).await
    }

    /// Follows Airtable's offset token until the table is exhausted.
    /// Pages hold at most 100 records.
    async fn fetch_all<F: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Record<F>>, AirtableError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut request = self
                .client
                .request(Method::GET, format!("{}/{}", self.base_url, table))
                .bearer_auth(&self.api_key)
                .query(query);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            let page: RecordPage<F> = self.send(request).await?;
            debug!("Fetched {} records from {}", page.records.len(), table);
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(records)
    }

    async fn send<P: DeserializeOwned>(&self, request: RequestBuilder) -> Result<P, AirtableError> {
        self.pacer.wait_turn().await;
        let response = request.send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(AirtableError::RateLimited);
        }
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}
