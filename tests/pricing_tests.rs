//! Tests for plan, installation, shipping and tax pricing
//!
//! These tests verify that:
//! - Yearly billing never costs more than twelve monthly payments
//! - Installation tiers switch exactly at their bounds
//! - Shipping and tax need a well-formed zip
//! - A price book loaded from YAML prices orders the same way

use onebarn::prelude::*;
use std::io::Write;

fn book() -> Arc<PriceBook> {
    Arc::new(PriceBook::default())
}

fn order(horses: u32) -> OrderRequest {
    OrderRequest {
        plan: None,
        horses,
        cameras: 0,
        billing: BillingCycle::Monthly,
        installation: InstallationType::SelfInstall,
        shipping_method: ShippingMethod::Standard,
        zip: None,
    }
}

// =============================================================================
// Plan Tests
// =============================================================================

mod plan_tests {
    use super::*;

    #[test]
    fn test_yearly_never_exceeds_twelve_months() {
        let book = book();
        for horses in 1..=5 {
            let plan = book.plan(PlanId::for_horse_count(horses).unwrap()).unwrap();
            let monthly = plan.price(BillingCycle::Monthly, horses);
            let yearly = plan.price(BillingCycle::Yearly, horses);
            assert!(yearly <= monthly.times(12), "{horses} horses");
        }
    }

    #[test]
    fn test_plan_for_horse_count() {
        assert_eq!(PlanId::for_horse_count(1), Ok(PlanId::OneHorse));
        assert_eq!(PlanId::for_horse_count(2), Ok(PlanId::TwoHorses));
        assert_eq!(PlanId::for_horse_count(5), Ok(PlanId::SmallHerd));
        assert_eq!(PlanId::for_horse_count(0), Err(PricingError::NoHorses));
        assert_eq!(
            PlanId::for_horse_count(6),
            Err(PricingError::TooManyHorses { count: 6 })
        );
    }

    #[test]
    fn test_explicit_plan_must_cover_horses() {
        let request = OrderRequest {
            plan: Some(PlanId::TwoHorses),
            ..order(4)
        };
        assert!(matches!(
            quote(book(), &request),
            Err(PricingError::PlanMismatch { .. })
        ));
    }

    #[test]
    fn test_savings_only_on_yearly() {
        let monthly = quote(book(), &order(2)).unwrap();
        assert_eq!(monthly.savings, Money::ZERO);

        let yearly = quote(
            book(),
            &OrderRequest {
                billing: BillingCycle::Yearly,
                ..order(2)
            },
        )
        .unwrap();
        assert_eq!(yearly.savings, Money::from_dollars(249 * 12 - 2490));
    }
}

// =============================================================================
// Installation Tests
// =============================================================================

mod installation_tests {
    use super::*;

    fn installation(cameras: u32) -> Money {
        let request = OrderRequest {
            cameras,
            installation: InstallationType::Professional,
            ..order(1)
        };
        quote(book(), &request).unwrap().installation
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(installation(4), Money::from_dollars(499));
        assert_eq!(installation(5), Money::from_dollars(899));
        assert_eq!(installation(8), Money::from_dollars(899));
        assert_eq!(installation(9), Money::from_dollars(1299));
    }

    #[test]
    fn test_zero_cameras_lands_in_first_tier() {
        assert_eq!(installation(0), Money::from_dollars(499));
    }
}

// =============================================================================
// Shipping and Tax Tests
// =============================================================================

mod shipping_tax_tests {
    use super::*;

    #[test]
    fn test_no_zip_means_no_shipping_or_tax() {
        let summary = quote(book(), &order(1)).unwrap();
        assert!(summary.shipping.is_none());
        assert!(summary.tax.is_none());
        assert_eq!(summary.total, summary.subtotal);
    }

    #[test]
    fn test_tax_applies_to_subtotal_plus_shipping() {
        let request = OrderRequest {
            zip: Some("78701".to_string()),
            ..order(2)
        };
        let summary = quote(book(), &request).unwrap();
        let shipping = summary.shipping.clone().unwrap();
        let tax = summary.tax.clone().unwrap();

        assert_eq!(tax.state.as_deref(), Some("TX"));
        assert_eq!(tax.taxable, summary.subtotal + shipping.cost);
        assert_eq!(tax.amount, tax.taxable.apply_rate(0.0625));
        assert_eq!(summary.total, summary.subtotal + shipping.cost + tax.amount);
    }

    #[test]
    fn test_untaxed_prefix() {
        let request = OrderRequest {
            zip: Some("59001".to_string()),
            ..order(1)
        };
        let tax = quote(book(), &request).unwrap().tax.unwrap();
        assert_eq!(tax.state, None);
        assert_eq!(tax.amount, Money::ZERO);
    }

    #[test]
    fn test_remote_surcharge() {
        let request = OrderRequest {
            zip: Some("96813".to_string()),
            ..order(1)
        };
        let shipping = quote(book(), &request).unwrap().shipping.unwrap();
        assert!(shipping.remote);
        assert_eq!(shipping.cost, Money::from_cents(2999 + 4000));
    }

    #[test]
    fn test_session_keeps_last_good_zip() {
        let mut checkout = Checkout::new(book(), 1).unwrap();
        checkout.set_zip("40511").unwrap();
        let good = checkout.summary();

        for bad in ["", "4051", "40511-", "ABCDE"] {
            assert!(checkout.set_zip(bad).is_err());
            assert_eq!(checkout.summary(), good);
        }
    }
}

// =============================================================================
// Configured Catalogue Tests
// =============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_price_book_from_yaml_file() {
        let yaml = r#"
pricing:
  installation:
    tiers:
      - max_cameras: 2
        price_cents: 25000
      - price_cents: 60000
  tax:
    brackets:
      - from_prefix: 400
        to_prefix: 427
        state: KY
        rate: 0.06
    default_rate: 0.05
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        let book = Arc::new(config.price_book().unwrap());

        let request = OrderRequest {
            cameras: 3,
            installation: InstallationType::Professional,
            zip: Some("90210".to_string()),
            ..order(1)
        };
        let summary = quote(book, &request).unwrap();
        assert_eq!(summary.installation, Money::from_dollars(600));
        let tax = summary.tax.unwrap();
        assert_eq!(tax.state, None);
        assert_eq!(tax.rate, 0.05);
    }

    #[test]
    fn test_incoherent_yaml_rejected() {
        let yaml = r#"
pricing:
  installation:
    tiers:
      - max_cameras: 8
        price_cents: 100
      - max_cameras: 4
        price_cents: 200
"#;
        assert!(AppConfig::from_yaml_str(yaml).is_err());
    }
}
