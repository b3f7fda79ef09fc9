//! Cost evaluation for a cash-and-carry trade held to delivery.

use chrono::NaiveDate;

use super::margin::margin_rate_schedule;
use super::types::{
    ArbitrageReport, CapitalCost, DeliveryFees, FeeOverrides, MarginParams, StorageCost, TotalCost,
};
use crate::config::FeeSchedule;
use crate::errors::{AppError, Result};
use crate::models::TradeParams;

/// Stateless calculation engine over an immutable [`FeeSchedule`].
#[derive(Debug, Clone)]
pub struct CostEngine {
    schedule: FeeSchedule,
}

impl CostEngine {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Interest on the capital tied up between `start_date` and `end_date`:
    /// the full spot outlay (VAT included) and the futures margin
    /// collateral, at simple interest of `rate / 365` per day.
    ///
    /// Negative windows clamp to zero days; a negative `margin_rate`
    /// override clamps to zero; `None` uses the schedule default.
    pub fn capital_cost(
        &self,
        spot_price: f64,
        quantity_ton: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interest_rate: Option<f64>,
        margin_rate: Option<f64>,
    ) -> CapitalCost {
        let interest_rate = interest_rate.unwrap_or(self.schedule.default_interest_rate);
        let holding_days = (end_date - start_date).num_days().max(0);
        let margin_rate = match margin_rate {
            Some(rate) => rate.max(0.0),
            None => self.schedule.default_margin_rate,
        };

        let spot_capital_amount = spot_price * quantity_ton * (1.0 + self.schedule.vat_rate);
        let futures_capital_amount = spot_price * quantity_ton * margin_rate;

        let daily_rate = interest_rate / 365.0;
        let spot_interest_cost = (spot_capital_amount * daily_rate * holding_days as f64).max(0.0);
        let futures_interest_cost =
            (futures_capital_amount * daily_rate * holding_days as f64).max(0.0);

        CapitalCost {
            spot_capital_amount,
            futures_capital_amount,
            total_capital_amount: spot_capital_amount + futures_capital_amount,
            spot_interest_cost,
            futures_interest_cost,
            total_interest_cost: spot_interest_cost + futures_interest_cost,
            interest_rate,
            margin_rate,
            holding_days,
        }
    }

    /// Warehouse storage accrued over the holding window (ton-days).
    pub fn storage_cost(&self, quantity_ton: f64, holding_days: i64) -> StorageCost {
        let holding_days = holding_days.max(0);
        StorageCost {
            storage_fee_per_ton_day: self.schedule.storage_fee_per_ton_day,
            quantity_ton,
            holding_days,
            storage_cost: self.schedule.storage_fee_per_ton_day
                * quantity_ton
                * holding_days as f64,
        }
    }

    /// The seven delivery fee line items, overrides merged with the
    /// schedule via [`FeeOverrides::resolve`].
    pub fn delivery_fees(&self, quantity_ton: f64, overrides: &FeeOverrides) -> DeliveryFees {
        let rates = overrides.resolve(&self.schedule);
        let inbound_fee = rates.inbound_fee * quantity_ton;
        let outbound_fee = rates.outbound_fee * quantity_ton;
        let packing_fee = rates.packing_fee * quantity_ton;
        let transfer_fee = rates.transfer_fee * quantity_ton;
        let delivery_fee = rates.delivery_fee * quantity_ton;
        let train_application_fee = rates.train_application_fee * quantity_ton;
        let transport_fee = rates.transport_fee * quantity_ton;

        DeliveryFees {
            inbound_fee,
            outbound_fee,
            packing_fee,
            transfer_fee,
            delivery_fee,
            train_application_fee,
            transport_fee,
            total_misc_fees: inbound_fee
                + outbound_fee
                + packing_fee
                + transfer_fee
                + delivery_fee
                + train_application_fee
                + transport_fee,
        }
    }

    /// Aggregate cost of buying spot and carrying it to delivery:
    ///
    /// `total = spot x qty x (1 + vat) + misc fees + storage + interest`
    ///
    /// Margin resolution: an explicit `margin_rate` on the call wins
    /// (clamped at zero); otherwise the dynamic stage-weighted schedule is
    /// computed over the window and its detail attached to the result.
    ///
    /// Errors on non-positive quantity; every per-ton figure divides by it.
    pub fn total_cost(&self, params: &TradeParams) -> Result<TotalCost> {
        if params.quantity_ton <= 0.0 {
            return Err(AppError::InvalidQuantity(params.quantity_ton));
        }

        let holding_days = (params.delivery_date - params.start_date).num_days().max(0);

        let (margin_rate, margin_detail) = match params.margin_rate {
            Some(rate) => (rate.max(0.0), None),
            None => {
                let mut margin_params =
                    MarginParams::new(params.start_date, params.delivery_date);
                margin_params.enterprise_margin_addon = params.enterprise_margin_addon;
                let detail = margin_rate_schedule(&margin_params);
                (detail.final_rate, Some(detail))
            }
        };

        let capital = self.capital_cost(
            params.spot_price,
            params.quantity_ton,
            params.start_date,
            params.delivery_date,
            params.interest_rate,
            Some(margin_rate),
        );
        let misc_fees = self.delivery_fees(params.quantity_ton, &params.fees);
        let storage = self.storage_cost(params.quantity_ton, holding_days);

        let spot_cost_base = params.spot_price * params.quantity_ton;
        let vat_amount = spot_cost_base * self.schedule.vat_rate;
        let spot_cost_with_vat = spot_cost_base + vat_amount;

        let total_cost = spot_cost_with_vat
            + misc_fees.total_misc_fees
            + storage.storage_cost
            + capital.total_interest_cost;
        let cost_per_ton = total_cost / params.quantity_ton;
        let break_even_price =
            params.spot_price + (total_cost - spot_cost_with_vat) / params.quantity_ton;

        Ok(TotalCost {
            spot_price: params.spot_price,
            quantity_ton: params.quantity_ton,
            start_date: params.start_date,
            delivery_date: params.delivery_date,
            holding_days,
            spot_cost_base,
            vat_amount,
            spot_cost_with_vat,
            misc_fees,
            storage,
            capital,
            margin_detail,
            total_cost,
            cost_per_ton,
            break_even_price,
            premium_needed: break_even_price - params.spot_price,
        })
    }

    /// Judge whether selling the future at `futures_price` more than covers
    /// the carry cost. VAT is stripped from the cost side; it is an
    /// input-side tax, not a trading cost.
    pub fn check_arbitrage(&self, params: &TradeParams) -> Result<ArbitrageReport> {
        let costs = self.total_cost(params)?;

        let futures_revenue = params.futures_price * params.quantity_ton;
        let total_cost_excl_vat = costs.total_cost - costs.vat_amount;
        let profit = futures_revenue - total_cost_excl_vat;
        let profit_per_ton = profit / params.quantity_ton;
        let profit_rate = if params.spot_price > 0.0 {
            profit / (params.spot_price * params.quantity_ton) * 100.0
        } else {
            0.0
        };

        Ok(ArbitrageReport {
            break_even_futures_price: costs.break_even_price,
            costs,
            futures_price: params.futures_price,
            futures_revenue,
            total_cost_excl_vat,
            profit,
            profit_per_ton,
            profit_rate,
            can_arbitrage: profit > 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> CostEngine {
        CostEngine::new(FeeSchedule::default())
    }

    fn params() -> TradeParams {
        TradeParams::new(
            403_250.0,
            408_290.0,
            10.0,
            date(2026, 1, 15),
            date(2026, 3, 15),
        )
    }

    #[test]
    fn capital_cost_splits_spot_and_margin_pools() {
        let cost = engine().capital_cost(
            400_000.0,
            10.0,
            date(2026, 1, 15),
            date(2026, 3, 15),
            Some(0.05),
            Some(0.10),
        );
        assert_eq!(cost.holding_days, 59);
        assert_relative_eq!(cost.spot_capital_amount, 4_520_000.0, epsilon = 1e-6);
        assert_relative_eq!(cost.futures_capital_amount, 400_000.0, epsilon = 1e-6);
        let daily = 0.05 / 365.0;
        assert_relative_eq!(
            cost.spot_interest_cost,
            4_520_000.0 * daily * 59.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            cost.total_interest_cost,
            cost.spot_interest_cost + cost.futures_interest_cost,
            epsilon = 1e-9
        );
    }

    #[test]
    fn negative_window_clamps_to_zero_interest() {
        let cost = engine().capital_cost(
            400_000.0,
            10.0,
            date(2026, 3, 15),
            date(2026, 1, 15),
            None,
            None,
        );
        assert_eq!(cost.holding_days, 0);
        assert_eq!(cost.total_interest_cost, 0.0);
    }

    #[test]
    fn negative_margin_rate_clamps_to_zero() {
        let cost = engine().capital_cost(
            400_000.0,
            10.0,
            date(2026, 1, 15),
            date(2026, 3, 15),
            None,
            Some(-0.25),
        );
        assert_eq!(cost.margin_rate, 0.0);
        assert_eq!(cost.futures_capital_amount, 0.0);
        assert_eq!(cost.futures_interest_cost, 0.0);
    }

    #[test]
    fn absent_margin_rate_uses_schedule_default() {
        let cost = engine().capital_cost(
            400_000.0,
            10.0,
            date(2026, 1, 15),
            date(2026, 3, 15),
            None,
            None,
        );
        assert_relative_eq!(cost.margin_rate, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn storage_cost_accrues_per_ton_day() {
        let storage = engine().storage_cost(10.0, 59);
        assert_relative_eq!(storage.storage_cost, 1.50 * 10.0 * 59.0, epsilon = 1e-9);

        let clamped = engine().storage_cost(10.0, -5);
        assert_eq!(clamped.holding_days, 0);
        assert_eq!(clamped.storage_cost, 0.0);
    }

    #[test]
    fn omitted_fees_reproduce_schedule_defaults() {
        let fees = engine().delivery_fees(10.0, &FeeOverrides::default());
        assert_relative_eq!(fees.inbound_fee, 300.0, epsilon = 1e-9);
        assert_relative_eq!(fees.outbound_fee, 300.0, epsilon = 1e-9);
        assert_relative_eq!(fees.packing_fee, 400.0, epsilon = 1e-9);
        assert_relative_eq!(fees.transfer_fee, 20.0, epsilon = 1e-9);
        assert_relative_eq!(fees.delivery_fee, 10.0, epsilon = 1e-9);
        // Agency add-ons are opt-in, not baseline fees.
        assert_eq!(fees.train_application_fee, 0.0);
        assert_eq!(fees.transport_fee, 0.0);
        assert_relative_eq!(fees.total_misc_fees, 1_030.0, epsilon = 1e-9);
    }

    #[test]
    fn explicit_zero_fee_override_is_honored() {
        let overrides = FeeOverrides {
            packing_fee: Some(0.0),
            ..FeeOverrides::default()
        };
        let fees = engine().delivery_fees(10.0, &overrides);
        assert_eq!(fees.packing_fee, 0.0);
        assert_relative_eq!(fees.total_misc_fees, 630.0, epsilon = 1e-9);
    }

    #[test]
    fn total_cost_identity_holds_exactly() {
        let costs = engine().total_cost(&params()).unwrap();
        assert_relative_eq!(
            costs.total_cost,
            costs.spot_cost_with_vat
                + costs.misc_fees.total_misc_fees
                + costs.storage.storage_cost
                + costs.capital.total_interest_cost,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            costs.cost_per_ton,
            costs.total_cost / 10.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            costs.premium_needed,
            costs.break_even_price - costs.spot_price,
            epsilon = 1e-9
        );
    }

    #[test]
    fn total_cost_attaches_margin_detail_without_override() {
        let costs = engine().total_cost(&params()).unwrap();
        let detail = costs.margin_detail.expect("dynamic schedule computed");
        assert_eq!(detail.total_days, 59);
        assert_relative_eq!(costs.capital.margin_rate, detail.final_rate, epsilon = 1e-12);
    }

    #[test]
    fn explicit_margin_override_wins_over_schedule() {
        let mut p = params();
        p.margin_rate = Some(0.30);
        let costs = engine().total_cost(&p).unwrap();
        assert!(costs.margin_detail.is_none());
        assert_relative_eq!(costs.capital.margin_rate, 0.30, epsilon = 1e-12);
    }

    #[test]
    fn total_cost_is_monotonic_in_holding_days() {
        let mut previous = f64::MIN;
        for delivery_day in [16, 30, 45, 60, 90] {
            let mut p = params();
            p.delivery_date = date(2026, 1, 15) + chrono::Duration::days(delivery_day);
            // Fix the margin so only time-driven costs vary.
            p.margin_rate = Some(0.10);
            let costs = engine().total_cost(&p).unwrap();
            assert!(costs.total_cost > previous);
            previous = costs.total_cost;
        }
    }

    #[test]
    fn zero_quantity_is_a_usage_error() {
        let mut p = params();
        p.quantity_ton = 0.0;
        assert!(matches!(
            engine().total_cost(&p),
            Err(AppError::InvalidQuantity(_))
        ));
        p.quantity_ton = -3.0;
        assert!(matches!(
            engine().check_arbitrage(&p),
            Err(AppError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn break_even_price_yields_zero_profit() {
        let costs = engine().total_cost(&params()).unwrap();
        let mut p = params();
        p.futures_price = costs.break_even_price;
        let report = engine().check_arbitrage(&p).unwrap();
        assert_relative_eq!(report.profit, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn zero_spot_price_guards_profit_rate() {
        let mut p = params();
        p.spot_price = 0.0;
        let report = engine().check_arbitrage(&p).unwrap();
        assert_eq!(report.profit_rate, 0.0);
        assert!(report.profit.is_finite());
    }
}
