use serde::{Deserialize, Serialize};

/// Structured result of one product-page extraction.
///
/// Extraction is considered successful when a title was found; prices and
/// the image are best-effort and may be absent on a successful record.
/// Failed records carry a human-readable reason in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub current_price: Option<String>,
    pub original_price: Option<String>,
    pub image_url: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductRecord {
    /// Assembles a record from extracted fields.
    ///
    /// `success` is derived from the title alone; a record without a title
    /// is a failure even when prices or an image were found.
    #[must_use]
    pub fn from_fields(
        title: Option<String>,
        current_price: Option<String>,
        original_price: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let success = title.is_some();
        let error = if success {
            None
        } else {
            Some("product title not found in the page".to_string())
        };
        Self {
            title,
            current_price,
            original_price,
            image_url,
            success,
            error,
        }
    }

    /// A failed record carrying `reason`, for fetch errors that never
    /// produced a page to extract from.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            title: None,
            current_price: None,
            original_price: None,
            image_url: None,
            success: false,
            error: Some(reason.into()),
        }
    }

    /// True when both a current and a struck-through original price were
    /// located, i.e. the page advertises a discount.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.current_price.is_some() && self.original_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_with_title_is_success() {
        let record = ProductRecord::from_fields(
            Some("Fone Bluetooth X".to_string()),
            Some("R$ 349,99".to_string()),
            None,
            None,
        );
        assert!(record.success);
        assert!(record.error.is_none());
    }

    #[test]
    fn from_fields_without_title_is_failure() {
        let record = ProductRecord::from_fields(None, Some("R$ 349,99".to_string()), None, None);
        assert!(!record.success);
        assert_eq!(
            record.error.as_deref(),
            Some("product title not found in the page")
        );
    }

    #[test]
    fn failed_keeps_reason() {
        let record = ProductRecord::failed("page fetch timed out");
        assert!(!record.success);
        assert!(record.title.is_none());
        assert_eq!(record.error.as_deref(), Some("page fetch timed out"));
    }

    #[test]
    fn has_discount_requires_both_prices() {
        let both = ProductRecord::from_fields(
            Some("Fone".to_string()),
            Some("R$ 349,99".to_string()),
            Some("R$ 499,90".to_string()),
            None,
        );
        assert!(both.has_discount());

        let current_only = ProductRecord::from_fields(
            Some("Fone".to_string()),
            Some("R$ 349,99".to_string()),
            None,
            None,
        );
        assert!(!current_only.has_discount());
    }

    #[test]
    fn successful_record_serializes_without_error_field() {
        let record = ProductRecord::from_fields(Some("Fone".to_string()), None, None, None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("error").is_none(), "got: {json}");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn failed_record_serializes_error_field() {
        let record = ProductRecord::failed("boom");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["success"], false);
    }
}
