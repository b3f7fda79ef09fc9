use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FeeSchedule;

/// Escalation stage of the exchange margin requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginPhase {
    /// From contract listing until the month before the delivery month.
    Listing,
    /// From the first day of the month before the delivery month.
    MonthBeforeDelivery,
    /// From the first day of the delivery month.
    DeliveryMonth,
    /// From two days before the last trading day.
    FinalDays,
}

impl MarginPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MarginPhase::Listing => "from contract listing",
            MarginPhase::MonthBeforeDelivery => "from first day of month before delivery month",
            MarginPhase::DeliveryMonth => "from first day of delivery month",
            MarginPhase::FinalDays => "from two days before last trading day",
        }
    }
}

/// One half-open interval `[start, end)` of the holding window with the
/// margin rate in force during it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarginPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rate: f64,
    pub phase: MarginPhase,
}

impl MarginPeriod {
    /// Length of the interval in calendar days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// The four stage rates applied as delivery approaches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarginPhaseRates {
    pub listing: f64,
    pub month_before_delivery: f64,
    pub delivery_month: f64,
    pub final_days: f64,
}

impl Default for MarginPhaseRates {
    fn default() -> Self {
        Self {
            listing: 0.05,
            month_before_delivery: 0.10,
            delivery_month: 0.15,
            final_days: 0.20,
        }
    }
}

/// Inputs for the margin-rate schedule builder.
///
/// Only the holding window is mandatory; every boundary date left `None`
/// is derived from `delivery_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginParams {
    pub start_date: NaiveDate,
    pub delivery_date: NaiveDate,
    /// Last trading day; only used to derive `two_days_before_last_date`.
    pub last_trading_date: Option<NaiveDate>,
    /// Extra margin charged on top of the weighted exchange rate. Not
    /// clamped in either direction.
    pub enterprise_margin_addon: f64,
    /// Contract listing date, informational only; defaults to `start_date`.
    pub listing_date: Option<NaiveDate>,
    /// First day of the month before the delivery month.
    pub month_before_delivery_date: Option<NaiveDate>,
    /// First day of the delivery month.
    pub delivery_month_start_date: Option<NaiveDate>,
    /// Two days before the last trading day.
    pub two_days_before_last_date: Option<NaiveDate>,
    pub rates: MarginPhaseRates,
}

impl MarginParams {
    pub fn new(start_date: NaiveDate, delivery_date: NaiveDate) -> Self {
        Self {
            start_date,
            delivery_date,
            last_trading_date: None,
            enterprise_margin_addon: 0.0,
            listing_date: None,
            month_before_delivery_date: None,
            delivery_month_start_date: None,
            two_days_before_last_date: None,
            rates: MarginPhaseRates::default(),
        }
    }
}

/// Full margin schedule result: the emitted periods, the weighted average
/// and every resolved boundary date for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginDetail {
    pub periods: Vec<MarginPeriod>,
    /// Length-weighted average of the stage rates over the window.
    pub average_rate: f64,
    pub enterprise_addon: f64,
    /// `average_rate + enterprise_addon`; this is the rate the engine uses.
    pub final_rate: f64,
    pub total_days: i64,
    pub listing_date: NaiveDate,
    pub month_before_delivery_date: NaiveDate,
    pub delivery_month_start_date: NaiveDate,
    pub two_days_before_last_date: NaiveDate,
}

/// Per-call overrides for the seven delivery fee line items.
///
/// The five baseline fees fall back to the [`FeeSchedule`] when unset; the
/// two agency add-ons (rail car application, freight forwarding) are opt-in
/// and fall back to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeOverrides {
    pub inbound_fee: Option<f64>,
    pub outbound_fee: Option<f64>,
    pub packing_fee: Option<f64>,
    pub transfer_fee: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub train_application_fee: Option<f64>,
    pub transport_fee: Option<f64>,
}

impl FeeOverrides {
    /// Merge the overrides with the schedule defaults into the per-ton
    /// rates actually charged.
    pub fn resolve(&self, schedule: &FeeSchedule) -> ResolvedFeeRates {
        ResolvedFeeRates {
            inbound_fee: self.inbound_fee.unwrap_or(schedule.inbound_fee),
            outbound_fee: self.outbound_fee.unwrap_or(schedule.outbound_fee),
            packing_fee: self.packing_fee.unwrap_or(schedule.packing_fee),
            transfer_fee: self.transfer_fee.unwrap_or(schedule.transfer_fee),
            delivery_fee: self.delivery_fee.unwrap_or(schedule.delivery_fee),
            train_application_fee: self.train_application_fee.unwrap_or(0.0),
            transport_fee: self.transport_fee.unwrap_or(0.0),
        }
    }
}

/// Per-ton fee rates after merging overrides with the schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolvedFeeRates {
    pub inbound_fee: f64,
    pub outbound_fee: f64,
    pub packing_fee: f64,
    pub transfer_fee: f64,
    pub delivery_fee: f64,
    pub train_application_fee: f64,
    pub transport_fee: f64,
}

/// Delivery fee line items for the whole trade (rate x quantity).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeliveryFees {
    pub inbound_fee: f64,
    pub outbound_fee: f64,
    pub packing_fee: f64,
    pub transfer_fee: f64,
    pub delivery_fee: f64,
    pub train_application_fee: f64,
    pub transport_fee: f64,
    pub total_misc_fees: f64,
}

/// Storage cost over the holding window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StorageCost {
    pub storage_fee_per_ton_day: f64,
    pub quantity_ton: f64,
    pub holding_days: i64,
    pub storage_cost: f64,
}

/// Interest on the two capital pools tied up by the trade: the full spot
/// outlay (VAT included) and the futures margin collateral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CapitalCost {
    pub spot_capital_amount: f64,
    pub futures_capital_amount: f64,
    pub total_capital_amount: f64,
    pub spot_interest_cost: f64,
    pub futures_interest_cost: f64,
    pub total_interest_cost: f64,
    /// Annualized rate actually used.
    pub interest_rate: f64,
    /// Margin rate actually used (override, schedule average or default).
    pub margin_rate: f64,
    pub holding_days: i64,
}

/// Complete cost breakdown for holding spot to delivery.
///
/// Always satisfies
/// `total_cost == spot_cost_with_vat + misc_fees.total_misc_fees
///  + storage.storage_cost + capital.total_interest_cost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalCost {
    pub spot_price: f64,
    pub quantity_ton: f64,
    pub start_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub holding_days: i64,
    pub spot_cost_base: f64,
    pub vat_amount: f64,
    pub spot_cost_with_vat: f64,
    pub misc_fees: DeliveryFees,
    pub storage: StorageCost,
    pub capital: CapitalCost,
    /// Present when the dynamic margin schedule was computed (no explicit
    /// `margin_rate` override on the call).
    pub margin_detail: Option<MarginDetail>,
    pub total_cost: f64,
    pub cost_per_ton: f64,
    /// Futures price at which revenue exactly covers the total cost.
    pub break_even_price: f64,
    /// Premium over spot needed to break even (yuan per ton).
    pub premium_needed: f64,
}

/// Arbitrage verdict for an observed futures price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageReport {
    pub costs: TotalCost,
    pub futures_price: f64,
    pub futures_revenue: f64,
    /// Total cost with the input-side VAT stripped back out; VAT is not a
    /// trading cost for P&L purposes.
    pub total_cost_excl_vat: f64,
    pub profit: f64,
    pub profit_per_ton: f64,
    /// Profit as a percentage of the spot notional.
    pub profit_rate: f64,
    pub can_arbitrage: bool,
    pub break_even_futures_price: f64,
}
