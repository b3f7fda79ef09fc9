//! Plain-text rendering of an arbitrage report.
//!
//! All formatting lives here; the engine only produces data structures.

use crate::engine::ArbitrageReport;

const RULE: &str =
    "================================================================================";

/// Render the full cost and arbitrage report as sectioned plain text.
pub fn render_report(report: &ArbitrageReport) -> String {
    let costs = &report.costs;
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    line(RULE.to_string());
    line("Tin (Sn) cash-and-carry delivery cost report".to_string());
    line(RULE.to_string());

    line("\n[Inputs]".to_string());
    line(format!("  Spot price:        {:>14.2} yuan/ton", costs.spot_price));
    line(format!("  Futures price:     {:>14.2} yuan/ton", report.futures_price));
    line(format!("  Quantity:          {:>14.2} tons", costs.quantity_ton));
    line(format!(
        "  Holding window:    {} -> {} ({} days)",
        costs.start_date, costs.delivery_date, costs.holding_days
    ));
    line(format!(
        "  Interest rate:     {:>13.2}% (annualized)",
        costs.capital.interest_rate * 100.0
    ));
    line(format!(
        "  Margin rate:       {:>13.2}%",
        costs.capital.margin_rate * 100.0
    ));

    if let Some(detail) = &costs.margin_detail {
        line("\n[Margin schedule]".to_string());
        for period in &detail.periods {
            line(format!(
                "  {} -> {}  {:>6.2}%  ({} days, {})",
                period.start,
                period.end,
                period.rate * 100.0,
                period.days(),
                period.phase.label()
            ));
        }
        line(format!(
            "  Weighted average: {:.2}% + enterprise addon {:.2}% = {:.2}%",
            detail.average_rate * 100.0,
            detail.enterprise_addon * 100.0,
            detail.final_rate * 100.0
        ));
    }

    line("\n[Cost breakdown]".to_string());
    line("  1. Spot purchase".to_string());
    line(format!("     Base cost:      {:>14.2} yuan", costs.spot_cost_base));
    line(format!("     VAT:            {:>14.2} yuan", costs.vat_amount));
    line(format!("     Subtotal:       {:>14.2} yuan", costs.spot_cost_with_vat));

    let fees = &costs.misc_fees;
    line("  2. Delivery fees".to_string());
    line(format!("     Inbound:        {:>14.2} yuan", fees.inbound_fee));
    line(format!("     Outbound:       {:>14.2} yuan", fees.outbound_fee));
    line(format!("     Packing:        {:>14.2} yuan", fees.packing_fee));
    line(format!("     Transfer:       {:>14.2} yuan", fees.transfer_fee));
    line(format!("     Settlement:     {:>14.2} yuan", fees.delivery_fee));
    if fees.train_application_fee > 0.0 {
        line(format!(
            "     Rail car appl.: {:>14.2} yuan",
            fees.train_application_fee
        ));
    }
    if fees.transport_fee > 0.0 {
        line(format!("     Freight fwd.:   {:>14.2} yuan", fees.transport_fee));
    }
    line(format!("     Subtotal:       {:>14.2} yuan", fees.total_misc_fees));

    line("  3. Storage".to_string());
    line(format!(
        "     {:.2} yuan/ton-day x {:.2} tons x {} days = {:.2} yuan",
        costs.storage.storage_fee_per_ton_day,
        costs.storage.quantity_ton,
        costs.storage.holding_days,
        costs.storage.storage_cost
    ));

    let capital = &costs.capital;
    line("  4. Capital interest".to_string());
    line(format!(
        "     Spot capital:   {:>14.2} yuan -> {:>12.2} yuan interest",
        capital.spot_capital_amount, capital.spot_interest_cost
    ));
    line(format!(
        "     Margin capital: {:>14.2} yuan -> {:>12.2} yuan interest",
        capital.futures_capital_amount, capital.futures_interest_cost
    ));
    line(format!(
        "     Subtotal:       {:>14.2} yuan",
        capital.total_interest_cost
    ));

    line("\n[Summary]".to_string());
    line(format!("  Total cost:        {:>14.2} yuan", costs.total_cost));
    line(format!("  Cost per ton:      {:>14.2} yuan/ton", costs.cost_per_ton));
    line(format!(
        "  Break-even price:  {:>14.2} yuan/ton",
        costs.break_even_price
    ));
    line(format!(
        "  Premium needed:    {:>14.2} yuan/ton",
        costs.premium_needed
    ));

    line("\n[Arbitrage]".to_string());
    line(format!("  Futures revenue:   {:>14.2} yuan", report.futures_revenue));
    line(format!(
        "  Cost excl. VAT:    {:>14.2} yuan",
        report.total_cost_excl_vat
    ));
    line(format!(
        "  Profit:            {:>14.2} yuan ({:.2} yuan/ton, {:.2}%)",
        report.profit, report.profit_per_ton, report.profit_rate
    ));
    line(format!(
        "  Verdict:           {}",
        if report.can_arbitrage {
            "arbitrage window OPEN"
        } else {
            "no arbitrage at this futures price"
        }
    ));
    line(RULE.to_string());

    out
}
