use std::net::SocketAddr;

/// Sentinel value shipped as the bot token default. While the token still
/// equals this value the notifier must run in dry-run mode.
pub const BOT_TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";

/// Sentinel value shipped as the chat id default, same dry-run rule as
/// [`BOT_TOKEN_PLACEHOLDER`].
pub const CHAT_ID_PLACEHOLDER: &str = "-YOUR_CHAT_ID_HERE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    pub telegram_api_base: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_disable_preview: bool,
}

impl AppConfig {
    /// True while either Telegram credential still carries its placeholder
    /// value, meaning no real channel is configured.
    #[must_use]
    pub fn telegram_dry_run(&self) -> bool {
        self.telegram_bot_token == BOT_TOKEN_PLACEHOLDER
            || self.telegram_chat_id == CHAT_ID_PLACEHOLDER
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("accept_language", &self.accept_language)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("telegram_bot_token", &"[redacted]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_disable_preview", &self.telegram_disable_preview)
            .finish()
    }
}
