use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::auth::ServiceAccountAuth;
use super::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Body of a successful `values.get` call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Vec<Value>>>,
}

/// Outcome of a values request that reached the service.
#[derive(Debug)]
pub enum ValuesResponse {
    Values(ValueRange),
    Rejected { status: StatusCode, body: String },
}

/// Minimal Sheets v4 client covering `spreadsheets.values.get`.
pub struct SheetsApi {
    client: Client,
    base_url: String,
    auth: ServiceAccountAuth,
}

impl SheetsApi {
    pub fn with_base_url(auth: ServiceAccountAuth, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Reads one A1-notation range. Transport and auth failures are errors;
    /// a non-success status from the service is returned as `Rejected`.
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ValuesResponse, FetchError> {
        let url = self.values_url(spreadsheet_id, range)?;
        let token = self.auth.access_token().await?;

        debug!("Sending request to {}", url);
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(ValuesResponse::Rejected { status, body });
        }

        let text = response.text().await?;
        let value_range: ValueRange = serde_json::from_str(&text)?;
        debug!(
            "Received {} rows for {}",
            value_range.values.as_ref().map_or(0, Vec::len),
            range
        );

        Ok(ValuesResponse::Values(value_range))
    }

    // Each part is pushed as its own percent-encoded segment, so a sheet name
    // containing `/`, `#` or `?` stays inside the range segment.
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, FetchError> {
        let invalid =
            |reason: String| FetchError::InvalidBaseUrl(format!("{}: {}", self.base_url, reason));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
        Ok(url)
    }
}
