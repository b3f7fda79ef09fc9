//! Fee schedule loading and run configuration.

use serde::{Deserialize, Serialize};

/// Exchange fee schedule for tin delivery, fixed for the duration of a run.
///
/// Loaded once at startup and handed to [`crate::engine::CostEngine::new`];
/// individual calls may override single fees via
/// [`crate::engine::FeeOverrides`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Warehouse storage fee (yuan per ton per day).
    pub storage_fee_per_ton_day: f64,
    /// Warehouse inbound fee (yuan per ton).
    pub inbound_fee: f64,
    /// Warehouse outbound fee (yuan per ton).
    pub outbound_fee: f64,
    /// Packing fee (yuan per ton).
    pub packing_fee: f64,
    /// Warrant transfer fee (yuan per ton).
    pub transfer_fee: f64,
    /// Delivery settlement fee (yuan per ton).
    pub delivery_fee: f64,
    /// Value-added tax rate applied to the spot purchase.
    pub vat_rate: f64,
    /// Annualized funding rate used when a call supplies none.
    pub default_interest_rate: f64,
    /// Flat futures margin rate used when neither an override nor a
    /// dynamic schedule is supplied.
    pub default_margin_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            storage_fee_per_ton_day: 1.50,
            inbound_fee: 30.0,
            outbound_fee: 30.0,
            packing_fee: 40.0,
            transfer_fee: 2.0,
            delivery_fee: 1.0,
            vat_rate: 0.13,
            default_interest_rate: 0.05,
            default_margin_rate: 0.10,
        }
    }
}

impl FeeSchedule {
    /// Load the fee schedule from environment variables, falling back to
    /// the published tin delivery numbers for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage_fee_per_ton_day: env_f64(
                "STORAGE_FEE_PER_TON_DAY",
                defaults.storage_fee_per_ton_day,
            ),
            inbound_fee: env_f64("INBOUND_FEE_PER_TON", defaults.inbound_fee),
            outbound_fee: env_f64("OUTBOUND_FEE_PER_TON", defaults.outbound_fee),
            packing_fee: env_f64("PACKING_FEE_PER_TON", defaults.packing_fee),
            transfer_fee: env_f64("TRANSFER_FEE_PER_TON", defaults.transfer_fee),
            delivery_fee: env_f64("DELIVERY_FEE_PER_TON", defaults.delivery_fee),
            vat_rate: env_f64("VAT_RATE", defaults.vat_rate),
            default_interest_rate: env_f64("DEFAULT_INTEREST_RATE", defaults.default_interest_rate),
            default_margin_rate: env_f64("FUTURES_MARGIN_RATE", defaults.default_margin_rate),
        }
    }
}

/// Read an `f64` environment variable, falling back to `default` when the
/// variable is unset or unparseable.
fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}
