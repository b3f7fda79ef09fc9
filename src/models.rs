//! Shared data structures used throughout the application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::FeeOverrides;

/// Call-time inputs for one cash-and-carry evaluation.
///
/// Prices are yuan per ton; both dates are calendar dates and the holding
/// window is the half-open interval `[start_date, delivery_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeParams {
    /// Spot purchase price (yuan per ton, before VAT).
    pub spot_price: f64,
    /// Observed futures price for the delivery contract (yuan per ton).
    pub futures_price: f64,
    /// Trade size in tons. Must be positive.
    pub quantity_ton: f64,
    /// Spot purchase date.
    pub start_date: NaiveDate,
    /// Futures delivery date.
    pub delivery_date: NaiveDate,
    /// Annualized funding rate; `None` uses the schedule default.
    pub interest_rate: Option<f64>,
    /// Explicit futures margin rate. `None` lets the engine compute the
    /// dynamic stage-weighted rate over the holding window.
    pub margin_rate: Option<f64>,
    /// Extra margin charged by the broker on top of the exchange rate.
    pub enterprise_margin_addon: f64,
    /// Per-call fee overrides; unset fields use the schedule.
    pub fees: FeeOverrides,
}

impl TradeParams {
    /// Build params with every optional input left at its default.
    pub fn new(
        spot_price: f64,
        futures_price: f64,
        quantity_ton: f64,
        start_date: NaiveDate,
        delivery_date: NaiveDate,
    ) -> Self {
        Self {
            spot_price,
            futures_price,
            quantity_ton,
            start_date,
            delivery_date,
            interest_rate: None,
            margin_rate: None,
            enterprise_margin_addon: 0.0,
            fees: FeeOverrides::default(),
        }
    }
}
