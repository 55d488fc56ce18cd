use anyhow::Context;
use clap::{Parser, Subcommand};

use promopost_core::{affiliate, load_app_config, PromotionMessage};
use promopost_scraper::ProductPageClient;
use promopost_telegram::TelegramNotifier;

#[derive(Debug, Parser)]
#[command(name = "promopost-cli")]
#[command(about = "Promopost command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product page and print the extracted record as JSON.
    Fetch {
        /// Product page URL.
        #[arg(long)]
        url: String,
    },
    /// Render a promotion and send it to the configured Telegram chat.
    Promote {
        /// Product name shown in the post.
        #[arg(long)]
        name: String,
        /// Product page URL, rewritten into an affiliate link.
        #[arg(long)]
        link: String,
        /// Affiliate tag.
        #[arg(long)]
        tag: String,
        /// Price before the discount.
        #[arg(long)]
        price_before: Option<String>,
        /// Price after the discount.
        #[arg(long)]
        price_after: Option<String>,
        /// Coupon code.
        #[arg(long)]
        coupon: Option<String>,
        /// Short free-text description.
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = load_app_config()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch { url } => {
            let client =
                ProductPageClient::from_config(&config).context("failed to build page client")?;
            let record = client.fetch_product(url.trim()).await;

            println!(
                "{}",
                serde_json::to_string_pretty(&record).context("failed to serialize record")?
            );
            if !record.success {
                anyhow::bail!("product extraction failed");
            }
        }
        Commands::Promote {
            name,
            link,
            tag,
            price_before,
            price_after,
            coupon,
            description,
        } => {
            let notifier =
                TelegramNotifier::from_config(&config).context("failed to build notifier")?;

            let affiliate_link = build_affiliate_link(link.trim(), tag.trim());
            let promotion = PromotionMessage {
                product_name: name,
                affiliate_link: affiliate_link.clone(),
                original_price: price_before,
                sale_price: price_after,
                coupon,
                description,
            };

            notifier
                .send_message(&promotion.render())
                .await
                .context("failed to deliver promotion")?;

            if notifier.is_dry_run() {
                println!("dry-run: promotion rendered but not delivered");
            } else {
                println!("promotion delivered");
            }
            println!("affiliate link: {affiliate_link}");
        }
    }

    Ok(())
}

/// Affiliate link for the post. A link without a recognizable product id
/// cannot carry the tag and goes out unmodified, with a warning logged.
fn build_affiliate_link(link: &str, tag: &str) -> String {
    if affiliate::extract_product_id(link).is_none() {
        tracing::warn!(link, "no product id in the link; posting it unmodified");
    }
    affiliate::format_affiliate_link(link, tag)
}
