use anyhow::{bail, Result};

use crate::form::{self, MatchDecision, Prepared, SaleDraft};
use crate::levels::PriceLevelSet;
use crate::normalization::MatchOptions;

#[derive(Debug, Clone, Default)]
pub struct RecordSaleConfig {
    /// Optional override for the Postgres connection string.
    pub database_url: Option<String>,
    pub brand: String,
    pub category: String,
    /// Raw price entry; cleaned and validated by the form layer.
    pub price: String,
    pub on_sale: bool,
    pub notes: Option<String>,
    /// Price level for a new brand; must be one of the configured levels.
    pub price_level: Option<String>,
    pub brand_decision: Option<MatchDecision>,
    pub category_decision: Option<MatchDecision>,
}

pub async fn run(cfg: RecordSaleConfig) -> Result<()> {
    let db = super::connect(cfg.database_url.as_deref()).await?;
    let levels = PriceLevelSet::from_env();

    let draft = SaleDraft {
        brand: cfg.brand,
        category: cfg.category,
        price: cfg.price,
        on_sale: cfg.on_sale,
        notes: cfg.notes.unwrap_or_default(),
        price_level: cfg.price_level,
    };

    let prepared = form::prepare_sale(
        &db,
        &levels,
        &draft,
        cfg.brand_decision.as_ref(),
        cfg.category_decision.as_ref(),
        &MatchOptions::default(),
    )
    .await?;

    match prepared {
        Prepared::NeedsDecision { field, suggestions } => {
            println!("Possible existing {field} matches:");
            for s in &suggestions {
                println!("  {s}");
            }
            println!(
                "Re-run with --{field}-use-existing <NAME> to reuse one, \
                 or --{field}-keep-new to register the new {field}."
            );
            bail!("explicit keep-new/use-existing decision required for {field}");
        }
        Prepared::Ready(ready) => {
            form::save_sale(&db, &ready).await?;
            println!(
                "Sale saved: {} / {} at {}",
                ready.sale.brand,
                ready.sale.category,
                crate::report::format_price(ready.sale.price)
            );
            if ready.register_brand {
                println!(
                    "Registered new brand {} at price level {}",
                    ready.sale.brand, ready.sale.price_level
                );
            }
            Ok(())
        }
    }
}
