use thiserror::Error;

/// Errors that can occur while fetching sheet data
#[derive(Debug, Error)]
pub enum FetchError {
    /// No spreadsheet ID was configured
    #[error("Missing SHEET_ID")]
    MissingSheetId,

    /// The service account credential is not valid JSON
    #[error("Invalid service account credential: {0}")]
    Credentials(#[source] serde_json::Error),

    /// Signing the assertion or exchanging it for a token failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The configured API base URL cannot carry path segments
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// A successful values response carried no `values` array
    #[error("Response for {0} has no values")]
    MissingValues(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}
