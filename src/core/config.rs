//! Engine configuration.
//!
//! The rule constants that a table might tune live here rather than in the
//! components that use them:
//! - `die_sides` and `raise_step` for the Roll & Keep resolver
//! - `ShopPrices` for the initiative shop
//! - `rng_seed` for reproducible sessions
//!
//! Configuration can be built in code or parsed from TOML. Missing keys fall
//! back to their defaults.
//!
//! ```
//! use mastery_engine::core::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str("raise_step = 5").unwrap();
//! assert_eq!(config.raise_step, 5);
//! assert_eq!(config.die_sides, 8);
//! ```

use serde::{Deserialize, Serialize};

use super::rng::DiceRng;

/// Point prices for the initiative shop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopPrices {
    /// Meters of extra movement bought per step.
    pub movement_step_meters: u32,

    /// Initiative points per movement step.
    pub movement_cost_per_step: u32,

    /// Initiative points to swap places in the turn order.
    pub swap_cost: u32,

    /// Initiative points for one extra attack action.
    pub extra_attack_cost: u32,
}

impl Default for ShopPrices {
    fn default() -> Self {
        Self {
            movement_step_meters: 2,
            movement_cost_per_step: 1,
            swap_cost: 3,
            extra_attack_cost: 5,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Faces on every rolled die (default: 8).
    pub die_sides: u32,

    /// Points above the TN per raise (default: 4).
    pub raise_step: u32,

    /// Initiative shop prices.
    pub shop: ShopPrices,

    /// Seed for the session RNG. `None` draws one from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            die_sides: 8,
            raise_step: 4,
            shop: ShopPrices::default(),
            rng_seed: None,
        }
    }
}

/// Error returned when a configuration document is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Parse a TOML document, filling missing keys with defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the rules meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.die_sides < 2 {
            return Err(ConfigError::Invalid("die_sides must be at least 2".into()));
        }
        if self.raise_step == 0 {
            return Err(ConfigError::Invalid("raise_step must be positive".into()));
        }
        if self.shop.movement_step_meters == 0 {
            return Err(ConfigError::Invalid(
                "shop.movement_step_meters must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// A fresh session RNG: seeded when `rng_seed` is set, otherwise from
    /// OS entropy.
    #[must_use]
    pub fn session_rng(&self) -> DiceRng {
        match self.rng_seed {
            Some(seed) => DiceRng::new(seed),
            None => DiceRng::from_entropy(),
        }
    }

    /// Set the raise step.
    #[must_use]
    pub fn with_raise_step(mut self, step: u32) -> Self {
        self.raise_step = step;
        self
    }
}
