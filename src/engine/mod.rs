//! Cost-and-margin calculation engine.
//!
//! Pure, synchronous arithmetic over an immutable [`crate::config::FeeSchedule`];
//! the presentation layer supplies inputs and renders the structured results.

pub mod evaluator;
pub mod margin;
pub mod types;

pub use evaluator::CostEngine;
pub use margin::margin_rate_schedule;
pub use types::{
    ArbitrageReport, CapitalCost, DeliveryFees, FeeOverrides, MarginDetail, MarginParams,
    MarginPeriod, MarginPhase, MarginPhaseRates, ResolvedFeeRates, StorageCost, TotalCost,
};
