//! Form-flow layer: input cleaning, validation, the keep-new/use-existing
//! protocol over duplicate suggestions, and the save orchestration. The store
//! only ever sees labels that passed through here.

use anyhow::{anyhow, bail, Result};
use tracing::info;

use crate::levels::PriceLevelSet;
use crate::normalization::{find_similar, normalize, MatchOptions};
use crate::store::{self, Db, NewSale};

/// How many rows to pull when populating brand/category pools.
pub const BRAND_POOL_LIMIT: i64 = 5_000;
pub const CATEGORY_POOL_LIMIT: i64 = 10_000;

/// Keep only digits and dots, folding any extra dots into the fractional
/// part (`"1.2.3"` -> `"1.23"`). None when nothing survives.
pub fn clean_price_input(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.matches('.').count() > 1 {
        let mut parts = cleaned.split('.');
        let head = parts.next().unwrap_or_default();
        let tail: String = parts.collect();
        return Some(format!("{head}.{tail}"));
    }
    Some(cleaned)
}

/// Clean and parse a raw price entry; must resolve to a decimal > 0.
pub fn parse_price(raw: &str) -> Result<f64> {
    let cleaned =
        clean_price_input(raw).ok_or_else(|| anyhow!("price is required (got {raw:?})"))?;
    let value: f64 = cleaned
        .parse()
        .map_err(|_| anyhow!("could not interpret {cleaned:?} as a price"))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("price must be greater than zero (got {value})");
    }
    Ok(value)
}

/// Caller's answer to a nonempty duplicate-suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDecision {
    /// Register the new label as entered (post-normalization).
    KeepNew,
    /// Use the named existing label instead of creating a new one.
    UseExisting(String),
}

/// Outcome of resolving one raw label against the existing pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelResolution {
    /// The label matched (or was pointed at) an existing entry.
    Existing(String),
    /// The label is genuinely new.
    New(String),
    /// Near-duplicates were found and no decision was supplied; the caller
    /// must come back with an explicit [`MatchDecision`].
    NeedsDecision(Vec<String>),
}

/// Resolve a raw label against the existing pool. Exact normalized matches
/// short-circuit; otherwise near-duplicates are surfaced and an explicit
/// decision is required before the label counts as new. Suggestions are
/// advisory: nothing is ever merged without a `UseExisting` answer.
pub fn resolve_label(
    raw: &str,
    existing: &[String],
    decision: Option<&MatchDecision>,
    opts: &MatchOptions,
) -> Result<LabelResolution> {
    let label = normalize(raw);
    if label.is_empty() {
        bail!("label {raw:?} resolves to empty after normalization");
    }
    if existing.iter().any(|e| normalize(e) == label) {
        return Ok(LabelResolution::Existing(label));
    }
    match decision {
        Some(MatchDecision::UseExisting(name)) => {
            let wanted = normalize(name);
            if existing.iter().any(|e| normalize(e) == wanted) {
                Ok(LabelResolution::Existing(wanted))
            } else {
                bail!("{name:?} does not match any existing label");
            }
        }
        Some(MatchDecision::KeepNew) => Ok(LabelResolution::New(label)),
        None => {
            let suggestions = find_similar(raw, existing, opts);
            if suggestions.is_empty() {
                Ok(LabelResolution::New(label))
            } else {
                Ok(LabelResolution::NeedsDecision(suggestions))
            }
        }
    }
}

/// Raw form input for one sale.
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    pub brand: String,
    pub category: String,
    pub price: String,
    pub on_sale: bool,
    pub notes: String,
    /// Required when the brand is new; ignored for known brands, whose level
    /// comes from the stored mapping.
    pub price_level: Option<String>,
}

/// A draft that passed validation and label resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSale {
    pub sale: NewSale,
    /// Set when the brand is new and its price-level mapping must be
    /// upserted before the sale row is inserted.
    pub register_brand: bool,
}

/// Result of [`prepare_sale`]: either ready to save, or blocked on a
/// keep-new/use-existing decision for the named field.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Ready(PreparedSale),
    NeedsDecision {
        field: &'static str,
        suggestions: Vec<String>,
    },
}

/// Validate a draft against the store: resolve brand and category (with the
/// duplicate-suggestion protocol), check the price and the price level, and
/// produce an insertable sale. Persists nothing itself.
pub async fn prepare_sale(
    db: &Db,
    levels: &PriceLevelSet,
    draft: &SaleDraft,
    brand_decision: Option<&MatchDecision>,
    category_decision: Option<&MatchDecision>,
    opts: &MatchOptions,
) -> Result<Prepared> {
    let price = parse_price(&draft.price)?;

    let known = store::load_brand_levels(db, BRAND_POOL_LIMIT).await?;
    let brand_pool: Vec<String> = known.iter().map(|b| b.brand.clone()).collect();

    let (brand, register_brand, price_level) =
        match resolve_label(&draft.brand, &brand_pool, brand_decision, opts)? {
            LabelResolution::NeedsDecision(suggestions) => {
                return Ok(Prepared::NeedsDecision {
                    field: "brand",
                    suggestions,
                });
            }
            LabelResolution::Existing(brand) => {
                let level = known
                    .iter()
                    .find(|b| b.brand == brand)
                    .map(|b| b.price_level.clone())
                    .unwrap_or_default();
                (brand, false, level)
            }
            LabelResolution::New(brand) => {
                let level = normalize(draft.price_level.as_deref().unwrap_or_default());
                if level.is_empty() {
                    bail!("a price level is required when registering a new brand");
                }
                if !levels.contains(&level) {
                    bail!(
                        "price level {level:?} is not one of the configured levels ({})",
                        levels.as_slice().join(", ")
                    );
                }
                (brand, true, level)
            }
        };

    let category_pool = store::load_categories_for_brand(db, &brand, CATEGORY_POOL_LIMIT).await?;
    let category = match resolve_label(&draft.category, &category_pool, category_decision, opts)? {
        LabelResolution::NeedsDecision(suggestions) => {
            return Ok(Prepared::NeedsDecision {
                field: "category",
                suggestions,
            });
        }
        LabelResolution::Existing(category) | LabelResolution::New(category) => category,
    };

    Ok(Prepared::Ready(PreparedSale {
        sale: NewSale {
            brand,
            category,
            price,
            on_sale: draft.on_sale,
            notes: draft.notes.trim().to_string(),
            price_level,
        },
        register_brand,
    }))
}

/// Persist a prepared sale: upsert the brand mapping first when the brand is
/// new, then insert the immutable sale row.
pub async fn save_sale(db: &Db, prepared: &PreparedSale) -> Result<()> {
    if prepared.register_brand {
        store::upsert_brand_level(db, &prepared.sale.brand, &prepared.sale.price_level).await?;
    }
    store::insert_sale(db, &prepared.sale).await?;
    info!(
        brand = %prepared.sale.brand,
        category = %prepared.sale.category,
        "sale saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_price_input() {
        assert_eq!(clean_price_input("$1,234.56"), Some("1234.56".into()));
        assert_eq!(clean_price_input("1.2.3"), Some("1.23".into()));
        assert_eq!(clean_price_input("abc"), None);
        assert_eq!(clean_price_input(""), None);
    }

    #[test]
    fn parses_and_rejects_prices() {
        assert_eq!(parse_price(" $120 ").unwrap(), 120.0);
        assert_eq!(parse_price("1,099.99").unwrap(), 1099.99);
        assert!(parse_price("").is_err());
        assert!(parse_price("free").is_err());
        assert!(parse_price("0").is_err());
        assert!(parse_price(".").is_err());
    }

    fn pool(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn exact_normalized_match_needs_no_decision() {
        let existing = pool(&["LULULEMON", "NIKE"]);
        let res = resolve_label("  nike ", &existing, None, &MatchOptions::default()).unwrap();
        assert_eq!(res, LabelResolution::Existing("NIKE".into()));
    }

    #[test]
    fn near_duplicate_blocks_until_decided() {
        let existing = pool(&["LULULEMON", "NIKE"]);
        let opts = MatchOptions::default();

        let res = resolve_label("Lulu Lemon", &existing, None, &opts).unwrap();
        assert_eq!(
            res,
            LabelResolution::NeedsDecision(vec!["LULULEMON".into()])
        );

        let kept =
            resolve_label("Lulu Lemon", &existing, Some(&MatchDecision::KeepNew), &opts).unwrap();
        assert_eq!(kept, LabelResolution::New("LULU LEMON".into()));

        let merged = resolve_label(
            "Lulu Lemon",
            &existing,
            Some(&MatchDecision::UseExisting("lululemon".into())),
            &opts,
        )
        .unwrap();
        assert_eq!(merged, LabelResolution::Existing("LULULEMON".into()));
    }

    #[test]
    fn use_existing_must_name_a_known_label() {
        let existing = pool(&["NIKE"]);
        let res = resolve_label(
            "Adidas",
            &existing,
            Some(&MatchDecision::UseExisting("Reebok".into())),
            &MatchOptions::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn unmatched_label_is_simply_new() {
        let existing = pool(&["NIKE"]);
        let res = resolve_label("Zara", &existing, None, &MatchOptions::default()).unwrap();
        assert_eq!(res, LabelResolution::New("ZARA".into()));
    }

    #[test]
    fn blank_label_is_rejected() {
        assert!(resolve_label("  !!", &[], None, &MatchOptions::default()).is_err());
    }
}
