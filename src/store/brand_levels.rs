use anyhow::Result;
use serde::Serialize;
use sqlx::Row;
use tracing::debug;

use super::db::Db;
use crate::normalization::{normalize, normalize_opt};

/// One row of the brand -> price-level mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandLevel {
    pub brand: String,
    pub price_level: String,
}

/// Load the registered brands with their price levels, normalized and sorted
/// by brand. Rows whose brand normalizes to empty are dropped.
pub async fn load_brand_levels(db: &Db, limit: i64) -> Result<Vec<BrandLevel>> {
    let rows = sqlx::query(
        "SELECT brand, price_level FROM brand_price_levels ORDER BY brand LIMIT $1",
    )
    .bind(limit.max(0))
    .persistent(false)
    .fetch_all(&db.pool)
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let brand: Option<String> = row.try_get("brand")?;
        let price_level: Option<String> = row.try_get("price_level")?;
        let brand = normalize_opt(brand.as_deref());
        if brand.is_empty() {
            continue;
        }
        out.push(BrandLevel {
            brand,
            price_level: normalize_opt(price_level.as_deref()),
        });
    }
    // Normalization can reorder relative to the DB collation.
    out.sort_by(|a, b| a.brand.cmp(&b.brand));
    debug!(count = out.len(), "loaded brand price levels");
    Ok(out)
}

/// Create or overwrite the price-level mapping for one brand.
/// `brand` must already be normalized; the store never sees raw input.
pub async fn upsert_brand_level(db: &Db, brand: &str, price_level: &str) -> Result<()> {
    debug_assert_eq!(brand, normalize(brand));
    sqlx::query(
        "INSERT INTO brand_price_levels (brand, price_level) VALUES ($1, $2)
         ON CONFLICT (brand) DO UPDATE SET price_level = EXCLUDED.price_level",
    )
    .bind(brand)
    .bind(price_level)
    .persistent(false)
    .execute(&db.pool)
    .await?;
    debug!(brand, price_level, "upserted brand price level");
    Ok(())
}
