use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::Row;
use std::collections::BTreeSet;
use tracing::debug;

use super::db::Db;
use crate::normalization::{normalize, normalize_opt};

/// A persisted sale row. Rows are immutable after insert; there is no
/// update or delete path.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub brand: String,
    pub category: String,
    pub price: Option<f64>,
    pub on_sale: bool,
    pub notes: String,
    pub price_level: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated sale ready to insert. Brand, category, and price level carry
/// normalizer output only; the form layer enforces that before it gets here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub on_sale: bool,
    pub notes: String,
    pub price_level: String,
}

pub async fn insert_sale(db: &Db, sale: &NewSale) -> Result<()> {
    debug_assert_eq!(sale.brand, normalize(&sale.brand));
    debug_assert_eq!(sale.category, normalize(&sale.category));
    sqlx::query(
        "INSERT INTO sales (brand, category, price, on_sale, notes, price_level)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&sale.brand)
    .bind(&sale.category)
    .bind(sale.price)
    .bind(sale.on_sale)
    .bind(&sale.notes)
    .bind(&sale.price_level)
    .persistent(false)
    .execute(&db.pool)
    .await?;
    debug!(brand = %sale.brand, category = %sale.category, "inserted sale");
    Ok(())
}

/// Distinct categories already recorded for one brand, normalized, deduped,
/// sorted. Used to populate the category picker and to scope duplicate
/// matching per brand.
pub async fn load_categories_for_brand(db: &Db, brand: &str, limit: i64) -> Result<Vec<String>> {
    debug_assert_eq!(brand, normalize(brand));
    let rows = sqlx::query("SELECT category FROM sales WHERE brand = $1 LIMIT $2")
        .bind(brand)
        .bind(limit.max(0))
        .persistent(false)
        .fetch_all(&db.pool)
        .await?;

    let mut categories = BTreeSet::new();
    for row in rows {
        let category: Option<String> = row.try_get("category")?;
        let category = normalize_opt(category.as_deref());
        if !category.is_empty() {
            categories.insert(category);
        }
    }
    Ok(categories.into_iter().collect())
}

/// All sale rows for one brand/category pair. Prices come back as `f64`
/// regardless of the column's declared type.
pub async fn fetch_sales(db: &Db, brand: &str, category: &str) -> Result<Vec<Sale>> {
    let rows = sqlx::query(
        "SELECT brand, category, price::float8 AS price, on_sale, notes, price_level, created_at
         FROM sales WHERE brand = $1 AND category = $2",
    )
    .bind(brand)
    .bind(category)
    .persistent(false)
    .fetch_all(&db.pool)
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let notes: Option<String> = row.try_get("notes")?;
        let price_level: Option<String> = row.try_get("price_level")?;
        let on_sale: Option<bool> = row.try_get("on_sale")?;
        out.push(Sale {
            brand: row.try_get::<Option<String>, _>("brand")?.unwrap_or_default(),
            category: row
                .try_get::<Option<String>, _>("category")?
                .unwrap_or_default(),
            price: row.try_get("price")?,
            on_sale: on_sale.unwrap_or(false),
            notes: notes.unwrap_or_default(),
            price_level: price_level.unwrap_or_default(),
            created_at: row.try_get("created_at")?,
        });
    }
    debug!(brand, category, count = out.len(), "fetched sales");
    Ok(out)
}
