//! Hardware shipping quotes

use super::money::Money;
use crate::core::error::PricingError;
use crate::core::field::FieldFormat;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier service level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Expedited,
    Overnight,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Expedited => "expedited",
            ShippingMethod::Overnight => "overnight",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ShippingMethod::Standard),
            "expedited" => Ok(ShippingMethod::Expedited),
            "overnight" => Ok(ShippingMethod::Overnight),
            other => Err(PricingError::UnknownShippingMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Configured rate for one service level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub method: ShippingMethod,
    pub label: String,
    #[serde(rename = "cost_cents")]
    pub cost: Money,
    pub min_days: u32,
    pub max_days: u32,
}

/// Shipping section of the pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    pub rates: Vec<ShippingRate>,

    /// Added to every method for remote zip prefixes
    #[serde(rename = "remote_surcharge_cents", default)]
    pub remote_surcharge: Money,

    /// Three-digit zip prefixes that take the surcharge
    #[serde(default)]
    pub remote_zip_prefixes: Vec<String>,

    pub zip_pattern: String,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            rates: vec![
                ShippingRate {
                    method: ShippingMethod::Standard,
                    label: "Standard Shipping".to_string(),
                    cost: Money::from_cents(2999),
                    min_days: 5,
                    max_days: 7,
                },
                ShippingRate {
                    method: ShippingMethod::Expedited,
                    label: "Expedited Shipping".to_string(),
                    cost: Money::from_cents(5999),
                    min_days: 2,
                    max_days: 3,
                },
                ShippingRate {
                    method: ShippingMethod::Overnight,
                    label: "Overnight Shipping".to_string(),
                    cost: Money::from_cents(11999),
                    min_days: 1,
                    max_days: 1,
                },
            ],
            remote_surcharge: Money::from_dollars(40),
            // Alaska and Hawaii
            remote_zip_prefixes: ["995", "996", "997", "998", "999", "967", "968"]
                .into_iter()
                .map(String::from)
                .collect(),
            zip_pattern: FieldFormat::Zip.pattern().to_string(),
        }
    }
}

/// Price and delivery estimate for one method to one zip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub method: ShippingMethod,
    pub label: String,
    pub cost: Money,
    pub min_days: u32,
    pub max_days: u32,
    pub estimated_delivery: String,
    pub remote: bool,
}

impl ShippingQuote {
    /// Earliest and latest arrival when shipped on `ship_date`
    pub fn delivery_window(&self, ship_date: NaiveDate) -> (NaiveDate, NaiveDate) {
        (
            add_business_days(ship_date, self.min_days),
            add_business_days(ship_date, self.max_days),
        )
    }
}

/// Zip-gated shipping calculator
#[derive(Debug, Clone)]
pub struct ShippingCalculator {
    config: ShippingConfig,
    zip_regex: Regex,
}

impl ShippingCalculator {
    pub fn new(config: ShippingConfig) -> Result<Self, regex::Error> {
        let zip_regex = Regex::new(&config.zip_pattern)?;
        Ok(Self { config, zip_regex })
    }

    /// The configured pattern must match and the three-digit prefix that
    /// tax and remote-zone lookups key on must be ASCII digits
    pub fn is_valid_zip(&self, zip: &str) -> bool {
        let zip = zip.trim();
        self.zip_regex.is_match(zip)
            && zip
                .as_bytes()
                .get(..3)
                .is_some_and(|prefix| prefix.iter().all(u8::is_ascii_digit))
    }

    fn is_remote(&self, zip: &str) -> bool {
        self.config
            .remote_zip_prefixes
            .iter()
            .any(|prefix| zip.starts_with(prefix.as_str()))
    }

    /// Quotes for every configured method, or `InvalidZip`
    pub fn quote_all(&self, zip: &str) -> Result<Vec<ShippingQuote>, PricingError> {
        let zip = zip.trim();
        if !self.is_valid_zip(zip) {
            return Err(PricingError::InvalidZip {
                zip: zip.to_string(),
            });
        }
        let remote = self.is_remote(zip);
        let surcharge = if remote {
            self.config.remote_surcharge
        } else {
            Money::ZERO
        };

        Ok(self
            .config
            .rates
            .iter()
            .map(|rate| ShippingQuote {
                method: rate.method,
                label: rate.label.clone(),
                cost: rate.cost + surcharge,
                min_days: rate.min_days,
                max_days: rate.max_days,
                estimated_delivery: describe_days(rate.min_days, rate.max_days),
                remote,
            })
            .collect())
    }

    /// Quote for a single method
    pub fn quote(&self, zip: &str, method: ShippingMethod) -> Result<ShippingQuote, PricingError> {
        self.quote_all(zip)?
            .into_iter()
            .find(|q| q.method == method)
            .ok_or_else(|| PricingError::UnknownShippingMethod {
                method: method.to_string(),
            })
    }
}

fn describe_days(min: u32, max: u32) -> String {
    match (min, max) {
        (1, 1) => "1 business day".to_string(),
        (a, b) if a == b => format!("{} business days", a),
        (a, b) => format!("{}-{} business days", a, b),
    }
}

/// Skip Saturdays and Sundays
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut date = start;
    let mut remaining = days;
    while remaining > 0 {
        date += Duration::days(1);
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }
    date
}
