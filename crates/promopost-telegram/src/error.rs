use thiserror::Error;

/// Errors returned by the Bot API notifier.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered without `"ok": true`, with its description.
    #[error("Telegram API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
