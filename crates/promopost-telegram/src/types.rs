//! Request and response payloads for the Bot API `sendMessage` endpoint.

use serde::{Deserialize, Serialize};

/// JSON body posted to `sendMessage`.
///
/// Borrowed fields: the request is assembled and sent in one call, no
/// reason to own the text.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
}

/// Envelope the Bot API wraps every answer in.
///
/// `ok` is the delivery acknowledgement; when it is `false`,
/// `description` carries the human-readable reason.
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
