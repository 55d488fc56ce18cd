use crate::app_config::{
    AppConfig, Environment, BOT_TOKEN_PLACEHOLDER, CHAT_ID_PLACEHOLDER,
};
use crate::ConfigError;

/// Browser-like user agent sent to product pages. Marketplace frontends
/// answer a stripped-down page (or a 503) to obvious bot agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept-Language preferring Brazilian Portuguese, so prices come back in
/// the domestic format the extractor expects.
const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values fail to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values fail to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every variable has a default; the Telegram credentials default to their
/// placeholder sentinels, which leaves the notifier in dry-run mode.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false or 1/0, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("PROMOPOST_ENV", "development"));

    let bind_addr = parse("PROMOPOST_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("PROMOPOST_LOG_LEVEL", "info");

    let fetch_timeout_secs = parse_u64("PROMOPOST_FETCH_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("PROMOPOST_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("PROMOPOST_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);

    let telegram_api_base = or_default("PROMOPOST_TELEGRAM_API_BASE", "https://api.telegram.org");
    let telegram_bot_token = or_default("TELEGRAM_BOT_TOKEN", BOT_TOKEN_PLACEHOLDER);
    let telegram_chat_id = or_default("TELEGRAM_CHAT_ID", CHAT_ID_PLACEHOLDER);
    let telegram_disable_preview = parse_bool("PROMOPOST_TELEGRAM_DISABLE_PREVIEW", "false")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch_timeout_secs,
        user_agent,
        accept_language,
        telegram_api_base,
        telegram_bot_token,
        telegram_chat_id,
        telegram_disable_preview,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
