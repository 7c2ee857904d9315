use serde::{Deserialize, Serialize};
use tracing::warn;

/// Decimal places kept in a final result unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 10;

/// Environment variable read by `Config::from_env`.
pub const PRECISION_ENV: &str = "SHUNT_PRECISION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of decimal places results are rounded to.
    pub precision: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { precision: DEFAULT_PRECISION }
    }
}

impl Config {
    /// Defaults overridden by `SHUNT_PRECISION` when it holds a valid number.
    pub fn from_env() -> Self {
        match std::env::var(PRECISION_ENV) {
            Ok(raw) => Self::default().with_precision_str(&raw),
            Err(_) => Self::default(),
        }
    }

    fn with_precision_str(mut self, raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(precision) => self.precision = precision,
            Err(_) => warn!(value = raw, "ignoring invalid {}", PRECISION_ENV),
        }
        self
    }
}
