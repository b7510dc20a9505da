use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use price_log::cli::{brands, record, search};
use price_log::form::MatchDecision;

#[derive(Parser, Debug)]
#[command(name = "plog", version, about = "Upscale price log admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Record a new sale (registers the brand's price level when new)
    RecordSale {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        category: String,
        /// Raw price entry (stray currency symbols/commas are cleaned)
        #[arg(long)]
        price: String,
        /// Mark the sale as discounted
        #[arg(long, default_value_t = false)]
        on_sale: bool,
        #[arg(long)]
        notes: Option<String>,
        /// Price level for a new brand (must be one of the configured levels)
        #[arg(long)]
        price_level: Option<String>,
        /// Reuse this existing brand instead of registering a new one
        #[arg(long, conflicts_with = "brand_keep_new")]
        brand_use_existing: Option<String>,
        /// Register the brand as entered despite near-duplicate suggestions
        #[arg(long, default_value_t = false)]
        brand_keep_new: bool,
        /// Reuse this existing category instead of creating a new one
        #[arg(long, conflicts_with = "category_keep_new")]
        category_use_existing: Option<String>,
        /// Create the category as entered despite near-duplicate suggestions
        #[arg(long, default_value_t = false)]
        category_keep_new: bool,
    },
    /// Aggregate price statistics for a brand/category pair
    Search {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        category: String,
        /// Emit JSON instead of the text block
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List registered brands with their price levels
    Brands {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        /// Optional row limit override
        #[arg(long)]
        limit: Option<i64>,
        /// Emit JSON instead of the text listing
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn decision(use_existing: Option<String>, keep_new: bool) -> Result<Option<MatchDecision>> {
    match (use_existing, keep_new) {
        (Some(name), false) => {
            if name.trim().is_empty() {
                bail!("--use-existing requires a non-empty label");
            }
            Ok(Some(MatchDecision::UseExisting(name)))
        }
        (None, true) => Ok(Some(MatchDecision::KeepNew)),
        (None, false) => Ok(None),
        // clap's conflicts_with already rejects the (Some, true) combination.
        (Some(_), true) => bail!("choose either use-existing or keep-new, not both"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    price_log::trace::init_tracing("warn")?;

    let cli = Cli::parse();
    match cli.command {
        Commands::RecordSale {
            db_url,
            brand,
            category,
            price,
            on_sale,
            notes,
            price_level,
            brand_use_existing,
            brand_keep_new,
            category_use_existing,
            category_keep_new,
        } => {
            record::run(record::RecordSaleConfig {
                database_url: db_url,
                brand,
                category,
                price,
                on_sale,
                notes,
                price_level,
                brand_decision: decision(brand_use_existing, brand_keep_new)?,
                category_decision: decision(category_use_existing, category_keep_new)?,
            })
            .await
        }
        Commands::Search {
            db_url,
            brand,
            category,
            json,
        } => {
            search::run(search::SearchConfig {
                database_url: db_url,
                brand,
                category,
                json,
            })
            .await
        }
        Commands::Brands { db_url, limit, json } => {
            brands::run(brands::BrandsConfig {
                database_url: db_url,
                limit,
                json,
            })
            .await
        }
    }
}
