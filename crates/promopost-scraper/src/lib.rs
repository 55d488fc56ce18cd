pub mod client;
pub mod error;
pub mod extract;

pub use client::ProductPageClient;
pub use error::ScrapeError;
pub use extract::extract_product;
