use anyhow::{bail, Result};

use crate::normalization::normalize;
use crate::report::PriceStats;
use crate::store;

#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Optional override for the Postgres connection string.
    pub database_url: Option<String>,
    pub brand: String,
    pub category: String,
    /// Emit the stats block as JSON instead of text.
    pub json: bool,
}

pub async fn run(cfg: SearchConfig) -> Result<()> {
    let brand = normalize(&cfg.brand);
    let category = normalize(&cfg.category);
    if brand.is_empty() || category.is_empty() {
        bail!("both --brand and --category are required");
    }

    let db = super::connect(cfg.database_url.as_deref()).await?;
    let sales = store::fetch_sales(&db, &brand, &category).await?;

    match PriceStats::from_sales(&sales) {
        None => println!("No matching sales found."),
        Some(stats) if cfg.json => println!("{}", serde_json::to_string_pretty(&stats)?),
        Some(stats) => println!("{}", stats.render()),
    }
    Ok(())
}
