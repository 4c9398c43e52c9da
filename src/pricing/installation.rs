//! Professional camera installation pricing

use super::money::Money;
use serde::{Deserialize, Serialize};

/// Who mounts the cameras
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstallationType {
    #[default]
    SelfInstall,
    Professional,
}

/// One step of the installation price function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationTier {
    /// Inclusive upper bound on camera count; `None` for the open top tier
    #[serde(default)]
    pub max_cameras: Option<u32>,

    #[serde(rename = "price_cents")]
    pub price: Money,
}

/// Step function from camera count to installation price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationPricing {
    pub tiers: Vec<InstallationTier>,
}

impl Default for InstallationPricing {
    fn default() -> Self {
        Self {
            tiers: vec![
                InstallationTier {
                    max_cameras: Some(4),
                    price: Money::from_dollars(499),
                },
                InstallationTier {
                    max_cameras: Some(8),
                    price: Money::from_dollars(899),
                },
                InstallationTier {
                    max_cameras: None,
                    price: Money::from_dollars(1299),
                },
            ],
        }
    }
}

impl InstallationPricing {
    /// The first tier whose bound covers `cameras`
    pub fn tier_for(&self, cameras: u32) -> Option<&InstallationTier> {
        self.tiers
            .iter()
            .find(|tier| tier.max_cameras.is_none_or(|max| cameras <= max))
    }

    /// Installation cost; always zero for self-install
    pub fn cost(&self, kind: InstallationType, cameras: u32) -> Money {
        match kind {
            InstallationType::SelfInstall => Money::ZERO,
            InstallationType::Professional => self
                .tier_for(cameras)
                .or_else(|| self.tiers.last())
                .map(|tier| tier.price)
                .unwrap_or(Money::ZERO),
        }
    }

    /// Bounds must ascend and only the last tier may be open
    pub fn check(&self) -> Result<(), String> {
        if self.tiers.is_empty() {
            return Err("at least one installation tier is required".to_string());
        }
        let mut previous: Option<u32> = None;
        for (i, tier) in self.tiers.iter().enumerate() {
            match tier.max_cameras {
                None if i + 1 != self.tiers.len() => {
                    return Err(format!("tier {} is open-ended but not last", i + 1));
                }
                Some(max) if previous.is_some_and(|p| max <= p) => {
                    return Err(format!("tier {} bound {} does not ascend", i + 1, max));
                }
                Some(max) => previous = Some(max),
                None => {}
            }
        }
        Ok(())
    }
}
