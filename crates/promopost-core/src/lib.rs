pub mod affiliate;
mod app_config;
mod config;
pub mod product;
pub mod promo;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, BOT_TOKEN_PLACEHOLDER, CHAT_ID_PLACEHOLDER};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::ProductRecord;
pub use promo::PromotionMessage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
