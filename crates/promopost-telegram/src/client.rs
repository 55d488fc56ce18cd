//! Notifier for the Telegram Bot API `sendMessage` endpoint.
//!
//! Wraps `reqwest` with the Bot API's envelope handling: every answer is
//! parsed for its `"ok"` acknowledgement and the HTTP status alone is
//! never trusted. While the configured credentials still carry their
//! placeholder values the notifier runs in dry-run mode, logging the
//! message instead of calling out.

use std::time::Duration;

use promopost_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::TelegramError;
use crate::types::{SendMessageRequest, SendMessageResponse};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Bot API calls answer quickly; this ceiling only guards against a hung
/// connection.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for posting promotional messages to a Telegram channel.
///
/// Use [`TelegramNotifier::from_config`] in binaries (it picks dry-run
/// mode from the config placeholders) or
/// [`TelegramNotifier::with_base_url`] to point at a mock server in tests.
pub struct TelegramNotifier {
    transport: Transport,
    chat_id: String,
    disable_preview: bool,
}

enum Transport {
    /// Placeholder credentials: log the message, skip the network.
    DryRun,
    Live {
        client: Client,
        base_url: Url,
        bot_token: String,
    },
}

impl TelegramNotifier {
    /// Builds a notifier from the application config, selecting dry-run
    /// mode when either Telegram credential is still a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TelegramError::ApiError`] if the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, TelegramError> {
        if config.telegram_dry_run() {
            tracing::warn!(
                "telegram credentials are placeholders; notifier running in dry-run mode"
            );
            return Ok(Self::dry_run(&config.telegram_chat_id, config.telegram_disable_preview));
        }
        Self::with_base_url(
            &config.telegram_bot_token,
            &config.telegram_chat_id,
            config.telegram_disable_preview,
            &config.telegram_api_base,
        )
    }

    /// Creates a live notifier against the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        bot_token: &str,
        chat_id: &str,
        disable_preview: bool,
    ) -> Result<Self, TelegramError> {
        Self::with_base_url(bot_token, chat_id, disable_preview, DEFAULT_BASE_URL)
    }

    /// Creates a live notifier with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TelegramError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        bot_token: &str,
        chat_id: &str,
        disable_preview: bool,
        base_url: &str,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Normalise to exactly one trailing slash so bare hosts and
        // slash-suffixed bases produce the same parsed URL.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| TelegramError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            transport: Transport::Live {
                client,
                base_url,
                bot_token: bot_token.to_owned(),
            },
            chat_id: chat_id.to_owned(),
            disable_preview,
        })
    }

    /// Creates a notifier that never touches the network: messages are
    /// logged at info level and reported as delivered.
    #[must_use]
    pub fn dry_run(chat_id: &str, disable_preview: bool) -> Self {
        Self {
            transport: Transport::DryRun,
            chat_id: chat_id.to_owned(),
            disable_preview,
        }
    }

    /// True when the notifier skips network calls.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        matches!(self.transport, Transport::DryRun)
    }

    /// Posts `text` to the configured channel in Markdown parse mode.
    ///
    /// Delivery is acknowledged only by `"ok": true` in the response
    /// envelope. In dry-run mode the message is logged and reported
    /// as delivered without any network call.
    ///
    /// # Errors
    ///
    /// - [`TelegramError::ApiError`] — the API answered without `ok`,
    ///   carrying the upstream `description` when one was given.
    /// - [`TelegramError::Http`] — network or TLS failure.
    /// - [`TelegramError::Deserialize`] — the response body is not the
    ///   expected envelope.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let Transport::Live {
            client,
            base_url,
            bot_token,
        } = &self.transport
        else {
            tracing::info!(chat_id = %self.chat_id, message = %text, "dry-run: message not sent");
            return Ok(());
        };

        let url = Self::send_message_url(base_url, bot_token)?;
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: self.disable_preview,
        };

        let response = client.post(url).json(&body).send().await?;
        let status = response.status();
        let payload = response.text().await?;

        // The Bot API reports failures both via HTTP status and in the JSON
        // envelope; the envelope is the authoritative one.
        let ack: SendMessageResponse =
            serde_json::from_str(&payload).map_err(|e| TelegramError::Deserialize {
                context: format!("sendMessage acknowledgement (HTTP {status})"),
                source: e,
            })?;

        if ack.ok {
            tracing::info!(chat_id = %self.chat_id, "message delivered to channel");
            Ok(())
        } else {
            let description = ack
                .description
                .unwrap_or_else(|| format!("unknown error (HTTP {status})"));
            Err(TelegramError::ApiError(description))
        }
    }

    /// Builds `<base>/bot<token>/sendMessage`.
    ///
    /// Uses path-segment pushing rather than `Url::join`: bot tokens
    /// contain a colon, which a relative-reference join would read as a
    /// URL scheme.
    fn send_message_url(base_url: &Url, bot_token: &str) -> Result<Url, TelegramError> {
        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TelegramError::ApiError(format!("base URL '{base_url}' cannot carry a path"))
            })?
            .pop_if_empty()
            .push(&format!("bot{bot_token}"))
            .push("sendMessage");
        Ok(url)
    }
}
