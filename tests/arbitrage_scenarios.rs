//! End-to-end scenario: a March 2026 tin contract evaluated with the
//! published fee schedule.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use tin_carry_calculator::config::FeeSchedule;
use tin_carry_calculator::contract::contract_dates;
use tin_carry_calculator::engine::CostEngine;
use tin_carry_calculator::models::TradeParams;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn sn2603_carry_trade_is_profitable_at_408290() {
    let engine = CostEngine::new(FeeSchedule::default());
    let params = TradeParams::new(
        403_250.0,
        408_290.0,
        10.0,
        date(2026, 1, 15),
        date(2026, 3, 15),
    );

    let report = engine.check_arbitrage(&params).unwrap();
    let costs = &report.costs;

    assert_eq!(costs.holding_days, 59);

    // Spot leg: 403,250 x 10 plus 13% VAT.
    assert_relative_eq!(costs.spot_cost_base, 4_032_500.0, epsilon = 1e-6);
    assert_relative_eq!(costs.vat_amount, 524_225.0, epsilon = 1e-6);
    assert_relative_eq!(costs.spot_cost_with_vat, 4_556_725.0, epsilon = 1e-6);

    // Five baseline fees at (30 + 30 + 40 + 2 + 1) yuan/ton x 10 tons.
    assert_relative_eq!(costs.misc_fees.total_misc_fees, 1_030.0, epsilon = 1e-9);

    // Storage: 1.50 yuan/ton-day x 10 tons x 59 days.
    assert_relative_eq!(costs.storage.storage_cost, 885.0, epsilon = 1e-9);

    // Dynamic margin: 17d @ 5%, 28d @ 10%, 12d @ 15%, 2d @ 20%.
    let margin_rate = (17.0 * 0.05 + 28.0 * 0.10 + 12.0 * 0.15 + 2.0 * 0.20) / 59.0;
    assert_relative_eq!(costs.capital.margin_rate, margin_rate, epsilon = 1e-12);

    // Interest at 5%/365 on both capital pools over 59 days.
    let daily_factor = 0.05 / 365.0 * 59.0;
    let expected_interest =
        4_556_725.0 * daily_factor + 4_032_500.0 * margin_rate * daily_factor;
    assert_relative_eq!(
        costs.capital.total_interest_cost,
        expected_interest,
        epsilon = 1e-6
    );

    // The total is exactly the sum of its parts.
    let expected_total = 4_556_725.0 + 1_030.0 + 885.0 + expected_interest;
    assert_relative_eq!(costs.total_cost, expected_total, epsilon = 1e-6);
    assert_relative_eq!(costs.cost_per_ton, expected_total / 10.0, epsilon = 1e-6);
    assert_relative_eq!(
        costs.break_even_price,
        403_250.0 + (expected_total - 4_556_725.0) / 10.0,
        epsilon = 1e-6
    );

    // Verdict consistent with 408,290 x 10 vs. the VAT-exclusive cost.
    assert_relative_eq!(report.futures_revenue, 4_082_900.0, epsilon = 1e-6);
    assert_relative_eq!(
        report.profit,
        4_082_900.0 - (expected_total - 524_225.0),
        epsilon = 1e-6
    );
    assert!(report.profit > 0.0);
    assert!(report.can_arbitrage);
    assert!(report.break_even_futures_price < 408_290.0);
}

#[test]
fn contract_code_drives_the_same_window_as_explicit_dates() {
    let engine = CostEngine::new(FeeSchedule::default());
    let dates = contract_dates("sn2603").unwrap();
    assert_eq!(dates.delivery_date, date(2026, 3, 15));

    let explicit = engine
        .check_arbitrage(&TradeParams::new(
            403_250.0,
            408_290.0,
            10.0,
            date(2026, 1, 15),
            date(2026, 3, 15),
        ))
        .unwrap();
    let derived = engine
        .check_arbitrage(&TradeParams::new(
            403_250.0,
            408_290.0,
            10.0,
            date(2026, 1, 15),
            dates.delivery_date,
        ))
        .unwrap();

    assert_relative_eq!(
        explicit.costs.total_cost,
        derived.costs.total_cost,
        epsilon = 1e-9
    );
}

#[test]
fn large_enterprise_addon_pushes_rate_past_one_without_overflow() {
    let engine = CostEngine::new(FeeSchedule::default());
    let mut params = TradeParams::new(
        403_250.0,
        408_290.0,
        10.0,
        date(2026, 1, 15),
        date(2026, 3, 15),
    );
    params.enterprise_margin_addon = 2.0;

    let report = engine.check_arbitrage(&params).unwrap();
    let detail = report.costs.margin_detail.as_ref().unwrap();
    assert!(detail.final_rate > 1.0);
    assert!(report.costs.total_cost.is_finite());
    assert!(report.profit.is_finite());
}
