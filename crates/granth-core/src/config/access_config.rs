//! Access gate configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the free/paid access gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Length of the ad interstitial shown before a free asset is released.
    pub interstitial_secs: u64,
    /// Whether a completed purchase still goes through the interstitial.
    pub paid_requires_interstitial: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            interstitial_secs: 5,
            paid_requires_interstitial: false,
        }
    }
}

impl AccessConfig {
    pub fn interstitial_delay(&self) -> Duration {
        Duration::from_secs(self.interstitial_secs)
    }
}
