//! Dynamic margin-rate schedule.
//!
//! Exchange margin for a tin contract escalates in four stages as delivery
//! approaches. This module partitions the holding window into those stages
//! and reduces them to one length-weighted average rate.

use chrono::{Datelike, Duration, NaiveDate};

use super::types::{MarginDetail, MarginParams, MarginPeriod, MarginPhase};

/// Build the stage-partitioned margin schedule for a holding window and
/// return the weighted result.
///
/// A cursor walks from `start_date` through the four stage boundaries in
/// order, emitting a period only while the cursor is strictly before the
/// boundary; stages already passed when the window opens are skipped.
/// Period ends are capped at `delivery_date`. Out-of-order boundary dates
/// are not validated and simply collapse into fewer periods.
///
/// For a zero-length window the average is defined as the final-stage rate.
pub fn margin_rate_schedule(params: &MarginParams) -> MarginDetail {
    let listing_date = params.listing_date.unwrap_or(params.start_date);
    let month_before_delivery_date = params
        .month_before_delivery_date
        .unwrap_or_else(|| month_start(prev_month(params.delivery_date)));
    let delivery_month_start_date = params
        .delivery_month_start_date
        .unwrap_or_else(|| month_start(params.delivery_date));
    let two_days_before_last_date = params.two_days_before_last_date.unwrap_or_else(|| {
        params.last_trading_date.unwrap_or(params.delivery_date) - Duration::days(2)
    });

    let boundaries = [
        (
            month_before_delivery_date,
            params.rates.listing,
            MarginPhase::Listing,
        ),
        (
            delivery_month_start_date,
            params.rates.month_before_delivery,
            MarginPhase::MonthBeforeDelivery,
        ),
        (
            two_days_before_last_date,
            params.rates.delivery_month,
            MarginPhase::DeliveryMonth,
        ),
        (
            params.delivery_date,
            params.rates.final_days,
            MarginPhase::FinalDays,
        ),
    ];

    let mut periods = Vec::new();
    let mut cursor = params.start_date;
    for (boundary, rate, phase) in boundaries {
        if cursor < boundary {
            periods.push(MarginPeriod {
                start: cursor,
                end: boundary.min(params.delivery_date),
                rate,
                phase,
            });
            cursor = boundary;
        }
    }

    let total_days = (params.delivery_date - params.start_date).num_days();
    let average_rate = if total_days == 0 {
        params.rates.final_days
    } else {
        let weighted_sum: f64 = periods.iter().map(|p| p.rate * p.days() as f64).sum();
        weighted_sum / total_days as f64
    };
    let final_rate = average_rate + params.enterprise_margin_addon;

    MarginDetail {
        periods,
        average_rate,
        enterprise_addon: params.enterprise_margin_addon,
        final_rate,
        total_days,
        listing_date,
        month_before_delivery_date,
        delivery_month_start_date,
        two_days_before_last_date,
    }
}

/// First calendar day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Any day in the month preceding the one containing `date`.
fn prev_month(date: NaiveDate) -> NaiveDate {
    month_start(date) - Duration::days(1)
}
