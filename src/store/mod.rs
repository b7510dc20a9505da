//! Thin client over the hosted Postgres store. Two tables, treated as black
//! boxes: `sales` (insert + filtered select, rows immutable once written) and
//! `brand_price_levels` (upsert keyed on brand). Schema and indexing belong to
//! the hosted service; nothing here runs migrations.

pub mod brand_levels;
pub mod db;
pub mod sales;

pub use brand_levels::{load_brand_levels, upsert_brand_level, BrandLevel};
pub use db::Db;
pub use sales::{fetch_sales, insert_sale, load_categories_for_brand, NewSale, Sale};
