//! Field extraction from marketplace product-page HTML.
//!
//! Every field runs through an ordered list of selector strategies and
//! keeps the first hit, so a markup change in one placement does not take
//! the whole extraction down. Selectors target the marketplace's stable
//! element ids and accessibility classes.

use std::sync::LazyLock;

use promopost_core::ProductRecord;
use regex::Regex;
use scraper::{ElementRef, Html};

/// Currency prefix expected on domestic price strings. Used to tell real
/// prices apart from other offscreen accessibility text.
const CURRENCY_MARKER: &str = "R$";

/// Selectors for product detail pages.
mod selectors {
    use scraper::Selector;
    use std::sync::LazyLock;

    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#productTitle").expect("valid title selector"));

    pub static PRICE_OFFSCREEN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-offscreen").expect("valid offscreen selector"));

    pub static PRICE_WHOLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-price-whole").expect("valid whole-part selector"));

    pub static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(".a-price-fraction").expect("valid fraction-part selector")
    });

    pub static PRICE_SYMBOL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-price-symbol").expect("valid symbol selector"));

    pub static PRICE_STRIKE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-text-strike").expect("valid strike selector"));

    pub static PRICE_WAS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(".a-text-price .a-offscreen").expect("valid was-price selector")
    });

    pub static IMAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#landingImage").expect("valid image selector"));
}

/// Matches a price in the shape `R$ 499,90` or `R$ 499.90`. The word
/// boundary keeps longer digit runs (thousands separators, product codes)
/// from half-matching.
static WAS_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*(\d+)[.,](\d{2})\b").expect("valid was-price regex"));

/// Extracts the product fields from a page's HTML.
///
/// The record is successful when a title was found; prices and image are
/// filled in best-effort and may be `None` on success.
#[must_use]
pub fn extract_product(html: &str) -> ProductRecord {
    let doc = Html::parse_document(html);
    ProductRecord::from_fields(
        extract_title(&doc),
        extract_current_price(&doc),
        extract_original_price(&doc),
        extract_image_url(&doc),
    )
}

fn extract_title(doc: &Html) -> Option<String> {
    doc.select(&selectors::TITLE)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty())
}

/// Current price: first the offscreen accessible string, then the visible
/// split-element rendering recomposed by hand.
fn extract_current_price(doc: &Html) -> Option<String> {
    offscreen_price(doc).or_else(|| composed_price(doc))
}

/// First offscreen price string carrying the currency marker. Offscreen
/// spans also hold unrelated accessibility text, hence the filter.
fn offscreen_price(doc: &Html) -> Option<String> {
    doc.select(&selectors::PRICE_OFFSCREEN)
        .map(element_text)
        .find(|text| text.contains(CURRENCY_MARKER))
}

/// Recomposes `R$ 349,99` from the visible whole/fraction/symbol elements.
///
/// The whole-part element nests the decimal separator in its own child
/// span, so its text ends with a stray separator that must be stripped
/// before joining.
fn composed_price(doc: &Html) -> Option<String> {
    let whole_raw = element_text(doc.select(&selectors::PRICE_WHOLE).next()?);
    let whole = whole_raw.trim_end_matches([',', '.']);
    if whole.is_empty() {
        return None;
    }

    let symbol = doc
        .select(&selectors::PRICE_SYMBOL)
        .next()
        .map(element_text)
        .filter(|symbol| !symbol.is_empty());
    let fraction = doc
        .select(&selectors::PRICE_FRACTION)
        .next()
        .map(element_text)
        .filter(|fraction| !fraction.is_empty());

    let mut price = String::new();
    if let Some(symbol) = symbol {
        price.push_str(&symbol);
        price.push(' ');
    }
    price.push_str(whole);
    if let Some(fraction) = fraction {
        price.push(',');
        price.push_str(&fraction);
    }
    Some(price)
}

/// Struck-through "was" price, re-emitted in the canonical `R$ D,DD`
/// shape. Each strategy is selector plus pattern; a located element whose
/// text does not fit the pattern yields nothing and the next strategy runs.
fn extract_original_price(doc: &Html) -> Option<String> {
    doc.select(&selectors::PRICE_STRIKE)
        .next()
        .map(element_text)
        .and_then(|text| normalize_was_price(&text))
        .or_else(|| {
            doc.select(&selectors::PRICE_WAS)
                .next()
                .map(element_text)
                .and_then(|text| normalize_was_price(&text))
        })
}

fn normalize_was_price(text: &str) -> Option<String> {
    let caps = WAS_PRICE_RE.captures(text)?;
    Some(format!("{CURRENCY_MARKER} {},{}", &caps[1], &caps[2]))
}

fn extract_image_url(doc: &Html) -> Option<String> {
    doc.select(&selectors::IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

/// Collects and trims the text content of an element, children included.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
