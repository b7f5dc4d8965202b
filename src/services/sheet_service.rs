use tracing::{debug, error};

use crate::api::auth::{ServiceAccountAuth, ServiceAccountKey, SHEETS_READONLY_SCOPE};
use crate::api::sheets::{SheetsApi, ValuesResponse};
use crate::api::FetchError;
use crate::config::Config;
use crate::models::Record;
use crate::services::cache_service::RecordSource;

/// Fetches one fixed range of one spreadsheet and shapes it into records.
pub struct SheetFetcher {
    api: SheetsApi,
    sheet_id: String,
    range: String,
}

impl SheetFetcher {
    pub fn new(api: SheetsApi, sheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            api,
            sheet_id: sheet_id.into(),
            range: range.into(),
        }
    }

    /// Builds a fetcher from configuration. Fails only if the credential blob
    /// is not JSON; an empty sheet ID is reported on each fetch instead.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let key = ServiceAccountKey::from_json(&config.service_account_json)?;
        let auth = ServiceAccountAuth::new(key, SHEETS_READONLY_SCOPE);
        let api = SheetsApi::with_base_url(auth, &config.sheets_base_url);
        Ok(Self::new(api, config.sheet_id.clone(), config.sheet_range.clone()))
    }

    pub async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        if self.sheet_id.is_empty() {
            return Err(FetchError::MissingSheetId);
        }

        debug!("Fetching {} from sheet {}", self.range, self.sheet_id);
        match self.api.get_values(&self.sheet_id, &self.range).await? {
            ValuesResponse::Values(value_range) => {
                let rows = value_range
                    .values
                    .ok_or_else(|| FetchError::MissingValues(self.range.clone()))?;
                Ok(rows.iter().map(|row| Record::from_row(row)).collect())
            }
            ValuesResponse::Rejected { status, body } => {
                error!(
                    status = status.as_u16(),
                    body = %body,
                    "Sheets API rejected values request, returning no records"
                );
                Ok(Vec::new())
            }
        }
    }
}

impl RecordSource for SheetFetcher {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        self.fetch_records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::tests::{mount_token_endpoint, test_key};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_with_mock(mock_uri: &str, sheet_id: &str) -> SheetFetcher {
        let auth = ServiceAccountAuth::new(test_key(mock_uri), SHEETS_READONLY_SCOPE);
        let api = SheetsApi::with_base_url(auth, mock_uri);
        SheetFetcher::new(api, sheet_id, "Sheet1!A1:E4")
    }

    async fn mount_values(mock_server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1!A1:E4"))
            .respond_with(response)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_rows_become_records_in_order() {
        let mock_server = MockServer::start().await;
        mount_token_endpoint(&mock_server, 1).await;
        mount_values(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(json!({
                "values": [
                    ["Name", "Email", "Phone", "Address", "Notes"],
                    ["Alice", "a@x.com"],
                    ["Bob", "b@x.com", "555", "Elm St", "vip"]
                ]
            })),
        )
        .await;

        let records = fetcher_with_mock(&mock_server.uri(), "sheet-123")
            .fetch_records()
            .await
            .expect("Fetch should succeed");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name.as_deref(), Some("Name"));
        assert_eq!(
            records[1],
            Record {
                name: Some("Alice".to_string()),
                email: Some("a@x.com".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(records[2].notes.as_deref(), Some("vip"));
    }

    #[tokio::test]
    async fn test_upstream_rejection_yields_empty_records() {
        let mock_server = MockServer::start().await;
        mount_token_endpoint(&mock_server, 1).await;
        mount_values(
            &mock_server,
            ResponseTemplate::new(404).set_body_string("Requested entity was not found."),
        )
        .await;

        let records = fetcher_with_mock(&mock_server.uri(), "sheet-123")
            .fetch_records()
            .await
            .expect("Rejection should not be an error");

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_success_without_values_is_an_error() {
        let mock_server = MockServer::start().await;
        mount_token_endpoint(&mock_server, 1).await;
        mount_values(
            &mock_server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "range": "Sheet1!A1:E4", "majorDimension": "ROWS" })),
        )
        .await;

        let result = fetcher_with_mock(&mock_server.uri(), "sheet-123")
            .fetch_records()
            .await;

        assert!(
            matches!(result, Err(FetchError::MissingValues(ref range)) if range == "Sheet1!A1:E4"),
            "{:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_missing_sheet_id_fails_before_any_request() {
        let mock_server = MockServer::start().await;
        mount_token_endpoint(&mock_server, 0).await;

        let result = fetcher_with_mock(&mock_server.uri(), "").fetch_records().await;

        assert!(matches!(result, Err(FetchError::MissingSheetId)));
    }

    #[tokio::test]
    async fn test_auth_failure_propagates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized_client"))
            .mount(&mock_server)
            .await;

        let result = fetcher_with_mock(&mock_server.uri(), "sheet-123")
            .fetch_records()
            .await;

        assert!(matches!(result, Err(FetchError::Auth(_))));
    }

    #[test]
    fn test_from_config_rejects_malformed_credentials() {
        let config = Config {
            service_account_json: "{not json".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            SheetFetcher::from_config(&config),
            Err(FetchError::Credentials(_))
        ));
    }

    #[test]
    fn test_from_config_accepts_empty_credentials() {
        let config = Config::default();
        let fetcher = SheetFetcher::from_config(&config).expect("Empty object should be accepted");
        assert_eq!(fetcher.range, "Sheet1!A1:E4");
    }
}
