use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl ScrapeError {
    /// Human-readable reason for a failed product record.
    ///
    /// 403 and 503 get a dedicated text: marketplaces answer those when
    /// they suspect automated access, and the operator reading the record
    /// should know the page itself may be fine.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        match self {
            ScrapeError::Http(e) if e.is_timeout() => {
                format!("page fetch timed out: {e}")
            }
            ScrapeError::Http(e) => format!("page fetch failed: {e}"),
            ScrapeError::UnexpectedStatus { status, .. } if *status == 403 || *status == 503 => {
                format!("page fetch rejected with HTTP {status}: the marketplace appears to be blocking automated access")
            }
            ScrapeError::UnexpectedStatus { status, .. } => {
                format!("page fetch failed with HTTP {status}")
            }
        }
    }
}
