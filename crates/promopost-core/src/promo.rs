use serde::{Deserialize, Serialize};

/// Input for one promotional post.
///
/// `product_name` and `affiliate_link` are mandatory; the remaining fields
/// only show up in the rendered message when present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionMessage {
    pub product_name: String,
    pub affiliate_link: String,
    pub original_price: Option<String>,
    pub sale_price: Option<String>,
    pub coupon: Option<String>,
    pub description: Option<String>,
}

impl PromotionMessage {
    /// Renders the channel post in Telegram Markdown.
    ///
    /// The layout is fixed: header, product name, optional price pair,
    /// optional coupon and description, link line. Field values are
    /// interpolated verbatim, markup characters included.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("🚨 *OFERTA EXCLUSIVA* 🚨\n\n");
        out.push_str(&format!("🎁 *{}*\n\n", self.product_name));

        if let Some(original) = non_empty(&self.original_price) {
            out.push_str(&format!("❌ DE: ~{original}~\n"));
        }
        if let Some(sale) = non_empty(&self.sale_price) {
            out.push_str(&format!("🔥 POR: *{sale}*\n"));
        }
        if let Some(coupon) = non_empty(&self.coupon) {
            out.push_str(&format!("\n🏷️ *Cupom*: `{coupon}`\n"));
        }
        if let Some(description) = non_empty(&self.description) {
            out.push_str(&format!("\n📝 _{description}_\n"));
        }

        out.push_str(&format!("\n🔗 [Link para Amazon]({})", self.affiliate_link));
        out
    }
}

/// Trimmed field value, or `None` when absent or whitespace-only.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
