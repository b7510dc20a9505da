use anyhow::Result;

use crate::form::BRAND_POOL_LIMIT;
use crate::store;
use crate::util::env as env_util;

#[derive(Debug, Clone, Default)]
pub struct BrandsConfig {
    /// Optional override for the Postgres connection string.
    pub database_url: Option<String>,
    /// Override the row limit (defaults to env BRAND_LEVELS_LIMIT or 5000).
    pub limit: Option<i64>,
    pub json: bool,
}

pub async fn run(cfg: BrandsConfig) -> Result<()> {
    let db = super::connect(cfg.database_url.as_deref()).await?;
    let limit = cfg
        .limit
        .unwrap_or_else(|| env_util::env_parse("BRAND_LEVELS_LIMIT", BRAND_POOL_LIMIT));

    let brands = store::load_brand_levels(&db, limit).await?;
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&brands)?);
        return Ok(());
    }
    if brands.is_empty() {
        println!("No brands registered.");
        return Ok(());
    }
    for b in &brands {
        println!("{:<30} {}", b.brand, b.price_level);
    }
    Ok(())
}
