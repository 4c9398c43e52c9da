//! Run the One Barn API server
//!
//! Reads `ONEBARN_CONFIG` if set, otherwise the built-in catalogue.
//!
//! ```text
//! cargo run --example checkout_api
//! curl -s localhost:3000/shipping/40511
//! curl -s -XPOST localhost:3000/checkout/quote \
//!   -H 'content-type: application/json' \
//!   -d '{"horses": 2, "cameras": 6, "installation": "professional", "zip": "40511"}'
//! ```

use anyhow::Result;
use onebarn::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("onebarn=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let addr = config.server.addr();

    println!("🐴 {} API", config.brand.product_name);
    println!("   plans:        GET  http://{}/pricing/plans", addr);
    println!("   shipping:     GET  http://{}/shipping/{{zip}}", addr);
    println!("   quote:        POST http://{}/checkout/quote", addr);
    println!("   demo login:   POST http://{}/auth/login\n", addr);

    ServerBuilder::new(config).serve(&addr).await
}
