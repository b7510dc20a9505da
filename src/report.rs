//! Aggregate price statistics over a fetched result set. Pure; the store
//! query that produced the rows is the caller's concern.

use serde::Serialize;

use crate::store::Sale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    /// Number of sales carrying a price.
    pub count: usize,
    /// Number of sales recorded with the discount flag set.
    pub discounted: usize,
    /// First non-empty price level seen in the result set, if any.
    pub price_level: Option<String>,
    pub average: f64,
    pub lowest: f64,
    pub highest: f64,
}

impl PriceStats {
    /// None when no row carries a price (callers report "no matching sales").
    pub fn from_sales(sales: &[Sale]) -> Option<Self> {
        let prices: Vec<f64> = sales.iter().filter_map(|s| s.price).collect();
        if prices.is_empty() {
            return None;
        }
        let sum: f64 = prices.iter().sum();
        let lowest = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count: prices.len(),
            discounted: sales.iter().filter(|s| s.on_sale).count(),
            price_level: sales
                .iter()
                .find(|s| !s.price_level.is_empty())
                .map(|s| s.price_level.clone()),
            average: sum / prices.len() as f64,
            lowest,
            highest,
        })
    }

    /// Human-readable block in the shape the reporting screen prints.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("{} SALE(S) FOUND.", self.count),
            format!("{} SALE(S) WITH DISCOUNTS APPLIED.", self.discounted),
        ];
        if let Some(level) = &self.price_level {
            lines.push(format!("PRICE LEVEL: {level}"));
        }
        lines.push(format!("AVERAGE PRICE SOLD: {}", format_price(self.average)));
        lines.push(format!("LOWEST PRICE SOLD: {}", format_price(self.lowest)));
        lines.push(format!("HIGHEST PRICE SOLD: {}", format_price(self.highest)));
        lines.join("\n")
    }
}

/// `$1,234.56` style: two decimals, comma thousands grouping.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(price: Option<f64>, on_sale: bool, price_level: &str) -> Sale {
        Sale {
            brand: "NIKE".into(),
            category: "SHOES".into(),
            price,
            on_sale,
            notes: String::new(),
            price_level: price_level.into(),
            created_at: None,
        }
    }

    #[test]
    fn aggregates_over_priced_rows_only() {
        let sales = vec![
            sale(Some(120.0), false, ""),
            sale(Some(80.0), true, "HIGH END"),
            sale(None, true, ""),
            sale(Some(100.0), false, ""),
        ];
        let stats = PriceStats::from_sales(&sales).expect("stats");
        assert_eq!(stats.count, 3);
        assert_eq!(stats.discounted, 2);
        assert_eq!(stats.price_level.as_deref(), Some("HIGH END"));
        assert_eq!(stats.average, 100.0);
        assert_eq!(stats.lowest, 80.0);
        assert_eq!(stats.highest, 120.0);
    }

    #[test]
    fn empty_or_priceless_result_sets_yield_none() {
        assert!(PriceStats::from_sales(&[]).is_none());
        assert!(PriceStats::from_sales(&[sale(None, true, "MID HIGH")]).is_none());
    }

    #[test]
    fn render_includes_level_only_when_present() {
        let stats = PriceStats::from_sales(&[sale(Some(50.0), false, "")]).expect("stats");
        let block = stats.render();
        assert!(block.contains("1 SALE(S) FOUND."));
        assert!(!block.contains("PRICE LEVEL:"));
        assert!(block.contains("AVERAGE PRICE SOLD: $50.00"));
    }

    #[test]
    fn formats_prices_with_grouping() {
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(999.999), "$1,000.00");
    }
}
