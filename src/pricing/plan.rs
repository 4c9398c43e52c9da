//! Subscription plans and billing cycles

use super::money::Money;
use crate::core::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Largest herd the self-serve checkout prices
pub const MAX_SELF_SERVE_HORSES: u32 = 5;

/// Plan tier identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanId {
    OneHorse,
    TwoHorses,
    SmallHerd,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::OneHorse => "oneHorse",
            PlanId::TwoHorses => "twoHorses",
            PlanId::SmallHerd => "smallHerd",
        }
    }

    /// Horse counts this tier covers
    pub fn horse_range(&self) -> RangeInclusive<u32> {
        match self {
            PlanId::OneHorse => 1..=1,
            PlanId::TwoHorses => 2..=2,
            PlanId::SmallHerd => 3..=MAX_SELF_SERVE_HORSES,
        }
    }

    /// Pick the tier for a horse count
    pub fn for_horse_count(count: u32) -> Result<PlanId, PricingError> {
        match count {
            0 => Err(PricingError::NoHorses),
            1 => Ok(PlanId::OneHorse),
            2 => Ok(PlanId::TwoHorses),
            n if n <= MAX_SELF_SERVE_HORSES => Ok(PlanId::SmallHerd),
            n => Err(PricingError::TooManyHorses { count: n }),
        }
    }

    /// Check that this tier covers `count` horses
    pub fn ensure_covers(&self, count: u32) -> Result<(), PricingError> {
        if self.horse_range().contains(&count) {
            Ok(())
        } else {
            Err(PricingError::PlanMismatch {
                plan: self.as_str().to_string(),
                count,
            })
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oneHorse" => Ok(PlanId::OneHorse),
            "twoHorses" => Ok(PlanId::TwoHorses),
            "smallHerd" => Ok(PlanId::SmallHerd),
            other => Err(PricingError::UnknownPlan {
                plan: other.to_string(),
            }),
        }
    }
}

/// Subscription period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

/// Catalogue entry for one plan tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub id: PlanId,
    pub name: String,

    /// Monthly price; per horse when `per_horse` is set
    #[serde(rename = "monthly_cents")]
    pub monthly: Money,

    /// Yearly price; per horse when `per_horse` is set
    #[serde(rename = "yearly_cents")]
    pub yearly: Money,

    #[serde(default)]
    pub per_horse: bool,

    /// One-time fee charged with the first invoice
    #[serde(rename = "setup_fee_cents", default)]
    pub setup_fee: Money,

    #[serde(default)]
    pub features: Vec<String>,
}

impl PricingPlan {
    /// Recurring price for one billing period
    pub fn price(&self, cycle: BillingCycle, horses: u32) -> Money {
        let unit = match cycle {
            BillingCycle::Monthly => self.monthly,
            BillingCycle::Yearly => self.yearly,
        };
        self.scale(unit, horses)
    }

    /// What paying yearly saves over twelve monthly payments
    pub fn yearly_savings(&self, horses: u32) -> Money {
        self.scale(self.monthly.times(12) - self.yearly, horses)
    }

    fn scale(&self, amount: Money, horses: u32) -> Money {
        if self.per_horse {
            amount.times(horses)
        } else {
            amount
        }
    }

    /// The built-in plan catalogue
    pub fn default_plans() -> Vec<PricingPlan> {
        vec![
            PricingPlan {
                id: PlanId::OneHorse,
                name: "Single Horse".to_string(),
                monthly: Money::from_dollars(149),
                yearly: Money::from_dollars(1490),
                per_horse: false,
                setup_fee: Money::ZERO,
                features: vec![
                    "24/7 AI stall monitoring".to_string(),
                    "Colic and cast-horse alerts".to_string(),
                ],
            },
            PricingPlan {
                id: PlanId::TwoHorses,
                name: "Two Horses".to_string(),
                monthly: Money::from_dollars(249),
                yearly: Money::from_dollars(2490),
                per_horse: false,
                setup_fee: Money::ZERO,
                features: vec![
                    "Everything in Single Horse".to_string(),
                    "Shared barn dashboard".to_string(),
                ],
            },
            PricingPlan {
                id: PlanId::SmallHerd,
                name: "Small Herd".to_string(),
                monthly: Money::from_dollars(99),
                yearly: Money::from_dollars(990),
                per_horse: true,
                setup_fee: Money::from_dollars(299),
                features: vec![
                    "Everything in Two Horses".to_string(),
                    "Veterinarian sharing".to_string(),
                    "Priority support".to_string(),
                ],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: PlanId) -> PricingPlan {
        PricingPlan::default_plans()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    #[test]
    fn test_for_horse_count() {
        assert_eq!(PlanId::for_horse_count(0), Err(PricingError::NoHorses));
        assert_eq!(PlanId::for_horse_count(1), Ok(PlanId::OneHorse));
        assert_eq!(PlanId::for_horse_count(2), Ok(PlanId::TwoHorses));
        assert_eq!(PlanId::for_horse_count(3), Ok(PlanId::SmallHerd));
        assert_eq!(PlanId::for_horse_count(5), Ok(PlanId::SmallHerd));
        assert_eq!(
            PlanId::for_horse_count(6),
            Err(PricingError::TooManyHorses { count: 6 })
        );
    }

    #[test]
    fn test_ensure_covers() {
        assert!(PlanId::SmallHerd.ensure_covers(4).is_ok());
        assert!(matches!(
            PlanId::OneHorse.ensure_covers(2),
            Err(PricingError::PlanMismatch { .. })
        ));
    }

    #[test]
    fn test_plan_id_parse() {
        assert_eq!("twoHorses".parse::<PlanId>(), Ok(PlanId::TwoHorses));
        assert!("herd".parse::<PlanId>().is_err());
        assert_eq!(serde_json::to_value(PlanId::OneHorse).unwrap(), "oneHorse");
    }

    #[test]
    fn test_flat_plan_ignores_horse_count() {
        let p = plan(PlanId::TwoHorses);
        assert_eq!(p.price(BillingCycle::Monthly, 2), Money::from_dollars(249));
    }

    #[test]
    fn test_per_horse_plan_scales() {
        let p = plan(PlanId::SmallHerd);
        assert_eq!(p.price(BillingCycle::Monthly, 4), Money::from_dollars(396));
        assert_eq!(p.price(BillingCycle::Yearly, 4), Money::from_dollars(3960));
        assert_eq!(p.yearly_savings(4), Money::from_dollars(792));
    }

    #[test]
    fn test_yearly_never_exceeds_twelve_months() {
        for p in PricingPlan::default_plans() {
            let monthly = p.price(BillingCycle::Monthly, 1);
            let yearly = p.price(BillingCycle::Yearly, 1);
            assert!(yearly <= monthly.times(12), "{} yearly too high", p.id);
            assert_eq!(p.yearly_savings(1), monthly.times(12) - yearly);
        }
    }

    #[test]
    fn test_plan_from_yaml() {
        let yaml = r#"
id: oneHorse
name: Single Horse
monthly_cents: 14900
yearly_cents: 149000
"#;
        let p: PricingPlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.monthly, Money::from_dollars(149));
        assert!(!p.per_horse);
        assert_eq!(p.setup_fee, Money::ZERO);
    }
}
