pub mod client;
pub mod error;
pub mod types;

pub use client::TelegramNotifier;
pub use error::TelegramError;
pub use types::{SendMessageRequest, SendMessageResponse};
