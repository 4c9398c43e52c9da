//! Sales tax lookup by zip prefix

use super::money::Money;
use serde::{Deserialize, Serialize};

/// A run of three-digit zip prefixes sharing one rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub from_prefix: u16,
    pub to_prefix: u16,
    pub state: String,
    pub rate: f64,
}

impl TaxBracket {
    fn new(from_prefix: u16, to_prefix: u16, state: &str, rate: f64) -> Self {
        Self {
            from_prefix,
            to_prefix,
            state: state.to_string(),
            rate,
        }
    }

    fn covers(&self, prefix: u16) -> bool {
        (self.from_prefix..=self.to_prefix).contains(&prefix)
    }
}

/// Tax section of the pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub brackets: Vec<TaxBracket>,

    /// Rate for prefixes no bracket covers
    #[serde(default)]
    pub default_rate: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(100, 149, "NY", 0.04),
                TaxBracket::new(150, 196, "PA", 0.06),
                TaxBracket::new(220, 246, "VA", 0.053),
                TaxBracket::new(270, 289, "NC", 0.0475),
                TaxBracket::new(320, 349, "FL", 0.06),
                TaxBracket::new(370, 385, "TN", 0.07),
                TaxBracket::new(400, 427, "KY", 0.06),
                TaxBracket::new(430, 459, "OH", 0.0575),
                TaxBracket::new(750, 799, "TX", 0.0625),
                TaxBracket::new(800, 816, "CO", 0.029),
                TaxBracket::new(900, 961, "CA", 0.0725),
                TaxBracket::new(980, 994, "WA", 0.065),
            ],
            default_rate: 0.0,
        }
    }
}

/// Tax owed on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxQuote {
    /// State the zip resolved to, if any bracket matched
    pub state: Option<String>,
    pub rate: f64,
    pub taxable: Money,
    pub amount: Money,
}

impl TaxConfig {
    /// State and rate for a zip; callers validate the zip first
    pub fn rate_for_zip(&self, zip: &str) -> (Option<&str>, f64) {
        let prefix = zip.get(..3).and_then(|p| p.parse::<u16>().ok());
        match prefix.and_then(|p| self.brackets.iter().find(|b| b.covers(p))) {
            Some(bracket) => (Some(bracket.state.as_str()), bracket.rate),
            None => (None, self.default_rate),
        }
    }

    /// Tax on `taxable` (subtotal plus shipping) for a zip
    pub fn quote(&self, zip: &str, taxable: Money) -> TaxQuote {
        let (state, rate) = self.rate_for_zip(zip);
        TaxQuote {
            state: state.map(str::to_string),
            rate,
            taxable,
            amount: taxable.apply_rate(rate),
        }
    }

    /// Rates must be fractions and brackets well-formed
    pub fn check(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.default_rate) {
            return Err(format!("default rate {} is not a fraction", self.default_rate));
        }
        for bracket in &self.brackets {
            if bracket.from_prefix > bracket.to_prefix || bracket.to_prefix > 999 {
                return Err(format!(
                    "bracket {}-{} for {} is malformed",
                    bracket.from_prefix, bracket.to_prefix, bracket.state
                ));
            }
            if !(0.0..1.0).contains(&bracket.rate) {
                return Err(format!(
                    "rate {} for {} is not a fraction",
                    bracket.rate, bracket.state
                ));
            }
        }
        Ok(())
    }
}
