//! Order summaries for the checkout step
//!
//! [`Checkout`] follows one wizard session: each setter updates one input
//! and [`Checkout::summary`] recomputes the totals from scratch. Shipping and
//! tax stay unset until a well-formed zip arrives, and a malformed zip never
//! clears a previously accepted one.

use super::installation::InstallationType;
use super::money::Money;
use super::plan::{BillingCycle, PlanId, PricingPlan};
use super::shipping::{ShippingMethod, ShippingQuote};
use super::tax::TaxQuote;
use super::PriceBook;
use crate::core::error::PricingError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inputs for a one-shot quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Explicit plan; derived from `horses` when absent
    #[serde(default)]
    pub plan: Option<PlanId>,
    pub horses: u32,
    #[serde(default)]
    pub cameras: u32,
    #[serde(default)]
    pub billing: BillingCycle,
    #[serde(default)]
    pub installation: InstallationType,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Computed cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryData {
    pub plan: PlanId,
    pub plan_name: String,
    pub billing: BillingCycle,
    pub horses: u32,
    pub cameras: u32,
    pub installation_type: InstallationType,
    pub plan_cost: Money,
    pub setup_fee: Money,
    pub installation: Money,
    pub subtotal: Money,
    pub shipping: Option<ShippingQuote>,
    pub tax: Option<TaxQuote>,
    pub total: Money,
    /// Yearly discount versus twelve monthly payments; zero when billed monthly
    pub savings: Money,
}

/// Stateful calculator for one checkout session
#[derive(Debug, Clone)]
pub struct Checkout {
    book: Arc<PriceBook>,
    plan: PricingPlan,
    horses: u32,
    cameras: u32,
    billing: BillingCycle,
    installation: InstallationType,
    shipping_method: ShippingMethod,
    zip: Option<String>,
    shipping: Option<ShippingQuote>,
}

impl Checkout {
    /// Start a session for `horses` horses on the matching tier
    pub fn new(book: Arc<PriceBook>, horses: u32) -> Result<Self, PricingError> {
        let plan = book.plan(PlanId::for_horse_count(horses)?)?.clone();
        Ok(Self {
            book,
            plan,
            horses,
            cameras: 0,
            billing: BillingCycle::default(),
            installation: InstallationType::default(),
            shipping_method: ShippingMethod::default(),
            zip: None,
            shipping: None,
        })
    }

    /// Change the herd size; the plan follows the count
    pub fn set_horses(&mut self, horses: u32) -> Result<(), PricingError> {
        let plan = self.book.plan(PlanId::for_horse_count(horses)?)?;
        self.plan = plan.clone();
        self.horses = horses;
        Ok(())
    }

    /// Pin a plan; it must cover the current horse count
    pub fn set_plan(&mut self, plan: PlanId) -> Result<(), PricingError> {
        plan.ensure_covers(self.horses)?;
        self.plan = self.book.plan(plan)?.clone();
        Ok(())
    }

    pub fn set_cameras(&mut self, cameras: u32) {
        self.cameras = cameras;
    }

    pub fn set_billing(&mut self, billing: BillingCycle) {
        self.billing = billing;
    }

    pub fn set_installation(&mut self, installation: InstallationType) {
        self.installation = installation;
    }

    /// Change service level, re-quoting if a zip is already accepted
    pub fn set_shipping_method(&mut self, method: ShippingMethod) -> Result<(), PricingError> {
        if let Some(zip) = &self.zip {
            self.shipping = Some(self.book.shipping().quote(zip, method)?);
        }
        self.shipping_method = method;
        Ok(())
    }

    /// Accept a destination zip
    ///
    /// A malformed zip returns `InvalidZip` and leaves the previous zip,
    /// shipping quote and tax untouched.
    pub fn set_zip(&mut self, zip: &str) -> Result<(), PricingError> {
        let quote = self.book.shipping().quote(zip, self.shipping_method)?;
        tracing::debug!(zip = %zip.trim(), method = %self.shipping_method, "shipping quoted");
        self.zip = Some(zip.trim().to_string());
        self.shipping = Some(quote);
        Ok(())
    }

    pub fn plan(&self) -> PlanId {
        self.plan.id
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    /// Recompute the order summary from the current inputs
    pub fn summary(&self) -> OrderSummaryData {
        let plan = &self.plan;
        let plan_cost = plan.price(self.billing, self.horses);
        let setup_fee = plan.setup_fee;
        let installation = self
            .book
            .installation()
            .cost(self.installation, self.cameras);
        let subtotal = plan_cost + setup_fee + installation;

        let tax = match (&self.zip, &self.shipping) {
            (Some(zip), Some(shipping)) => Some(self.book.tax().quote(zip, subtotal + shipping.cost)),
            _ => None,
        };

        let total = subtotal
            + self.shipping.as_ref().map_or(Money::ZERO, |s| s.cost)
            + tax.as_ref().map_or(Money::ZERO, |t| t.amount);

        let savings = match self.billing {
            BillingCycle::Yearly => plan.yearly_savings(self.horses),
            BillingCycle::Monthly => Money::ZERO,
        };

        OrderSummaryData {
            plan: plan.id,
            plan_name: plan.name.clone(),
            billing: self.billing,
            horses: self.horses,
            cameras: self.cameras,
            installation_type: self.installation,
            plan_cost,
            setup_fee,
            installation,
            subtotal,
            shipping: self.shipping.clone(),
            tax,
            total,
            savings,
        }
    }
}

/// Price an order in one call
///
/// Unlike a [`Checkout`] session there is no prior state to fall back on,
/// so a malformed zip is an error here.
pub fn quote(book: Arc<PriceBook>, request: &OrderRequest) -> Result<OrderSummaryData, PricingError> {
    let mut checkout = Checkout::new(book, request.horses)?;
    if let Some(plan) = request.plan {
        checkout.set_plan(plan)?;
    }
    checkout.set_cameras(request.cameras);
    checkout.set_billing(request.billing);
    checkout.set_installation(request.installation);
    checkout.set_shipping_method(request.shipping_method)?;
    if let Some(zip) = request.zip.as_deref().filter(|z| !z.trim().is_empty()) {
        checkout.set_zip(zip)?;
    }

    let summary = checkout.summary();
    tracing::info!(
        plan = %summary.plan,
        horses = summary.horses,
        cameras = summary.cameras,
        total_cents = summary.total.cents(),
        "order quoted"
    );
    Ok(summary)
}
