//! Plan, installation, shipping and tax pricing
//!
//! [`PricingConfig`] is the serialisable catalogue; [`PriceBook`] is the
//! checked, ready-to-use form of it that calculators share behind an `Arc`.

pub mod checkout;
pub mod installation;
pub mod money;
pub mod plan;
pub mod shipping;
pub mod tax;

pub use checkout::{Checkout, OrderRequest, OrderSummaryData, quote};
pub use installation::{InstallationPricing, InstallationTier, InstallationType};
pub use money::Money;
pub use plan::{BillingCycle, PlanId, PricingPlan};
pub use shipping::{ShippingCalculator, ShippingConfig, ShippingMethod, ShippingQuote, ShippingRate};
pub use tax::{TaxBracket, TaxConfig, TaxQuote};

use crate::core::error::{ConfigError, PricingError};
use serde::{Deserialize, Serialize};

/// Pricing section of the application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "PricingPlan::default_plans")]
    pub plans: Vec<PricingPlan>,

    #[serde(default)]
    pub installation: InstallationPricing,

    #[serde(default)]
    pub shipping: ShippingConfig,

    #[serde(default)]
    pub tax: TaxConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            plans: PricingPlan::default_plans(),
            installation: InstallationPricing::default(),
            shipping: ShippingConfig::default(),
            tax: TaxConfig::default(),
        }
    }
}

/// Checked pricing catalogue
#[derive(Debug, Clone)]
pub struct PriceBook {
    plans: Vec<PricingPlan>,
    installation: InstallationPricing,
    shipping: ShippingCalculator,
    tax: TaxConfig,
}

impl PriceBook {
    /// Check a catalogue and compile its zip pattern
    pub fn from_config(config: &PricingConfig) -> Result<Self, ConfigError> {
        let invalid = |field: &str, value: String, message: String| ConfigError::InvalidValue {
            field: field.to_string(),
            value,
            message,
        };

        for id in [PlanId::OneHorse, PlanId::TwoHorses, PlanId::SmallHerd] {
            let count = config.plans.iter().filter(|p| p.id == id).count();
            if count != 1 {
                return Err(invalid(
                    "pricing.plans",
                    id.to_string(),
                    format!("expected exactly one plan, found {}", count),
                ));
            }
        }
        for plan in &config.plans {
            if plan.yearly > plan.monthly.times(12) {
                return Err(invalid(
                    "pricing.plans.yearly_cents",
                    plan.yearly.cents().to_string(),
                    format!("yearly price of {} exceeds twelve monthly payments", plan.id),
                ));
            }
        }

        config
            .installation
            .check()
            .map_err(|msg| invalid("pricing.installation", "tiers".to_string(), msg))?;
        config
            .tax
            .check()
            .map_err(|msg| invalid("pricing.tax", "brackets".to_string(), msg))?;

        let shipping = ShippingCalculator::new(config.shipping.clone()).map_err(|e| {
            invalid(
                "pricing.shipping.zip_pattern",
                config.shipping.zip_pattern.clone(),
                e.to_string(),
            )
        })?;

        Ok(Self {
            plans: config.plans.clone(),
            installation: config.installation.clone(),
            shipping,
            tax: config.tax.clone(),
        })
    }

    pub fn plans(&self) -> &[PricingPlan] {
        &self.plans
    }

    pub fn plan(&self, id: PlanId) -> Result<&PricingPlan, PricingError> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PricingError::UnknownPlan {
                plan: id.to_string(),
            })
    }

    pub fn installation(&self) -> &InstallationPricing {
        &self.installation
    }

    pub fn shipping(&self) -> &ShippingCalculator {
        &self.shipping
    }

    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }
}

impl Default for PriceBook {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
            .expect("built-in pricing catalogue is coherent")
    }
}
