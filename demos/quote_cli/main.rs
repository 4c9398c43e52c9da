//! Print an order summary from the command line
//!
//! ```text
//! cargo run --example quote_cli -- <horses> [cameras] [zip] [yearly]
//! cargo run --example quote_cli -- 3 9 90210 yearly
//! ```

use anyhow::{Context, Result};
use onebarn::prelude::*;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let horses: u32 = args
        .first()
        .context("usage: quote_cli <horses> [cameras] [zip] [yearly]")?
        .parse()
        .context("horses must be a number")?;
    let cameras: u32 = match args.get(1) {
        Some(raw) => raw.parse().context("cameras must be a number")?,
        None => 0,
    };

    let book = Arc::new(AppConfig::load()?.price_book()?);
    let mut checkout = Checkout::new(book, horses)?;
    if cameras > 0 {
        checkout.set_cameras(cameras);
        checkout.set_installation(InstallationType::Professional);
    }
    if let Some(zip) = args.get(2) {
        checkout.set_zip(zip)?;
    }
    if args.get(3).is_some_and(|cycle| cycle == "yearly") {
        checkout.set_billing(BillingCycle::Yearly);
    }

    let summary = checkout.summary();
    println!("{} ({} horses, {:?})", summary.plan_name, summary.horses, summary.billing);
    println!("  plan          {:>12}", summary.plan_cost.to_string());
    if !summary.setup_fee.is_zero() {
        println!("  setup fee     {:>12}", summary.setup_fee.to_string());
    }
    if !summary.installation.is_zero() {
        println!("  installation  {:>12}", summary.installation.to_string());
    }
    println!("  subtotal      {:>12}", summary.subtotal.to_string());
    if let Some(shipping) = &summary.shipping {
        println!("  {:<13} {:>12}", shipping.label, shipping.cost.to_string());
    }
    if let Some(tax) = &summary.tax {
        let state = tax.state.as_deref().unwrap_or("--");
        println!("  tax ({})     {:>12}", state, tax.amount.to_string());
    }
    println!("  total         {:>12}", summary.total.to_string());
    if !summary.savings.is_zero() {
        println!("  you save {} with yearly billing", summary.savings);
    }
    Ok(())
}
