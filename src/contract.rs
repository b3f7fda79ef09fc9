//! Contract-code date derivation.
//!
//! Convenience for the presentation layer: a tin ticker like `sn2603`
//! expands into the key dates the engine wants. The simplifications are
//! deliberate — fixed day-of-month, calendar days, no holiday calendar.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

/// Key dates derived from a contract code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContractDates {
    /// 15th of the contract month.
    pub delivery_date: NaiveDate,
    /// 22nd of the month eleven months before the contract month.
    pub listing_date: NaiveDate,
    /// First day of the month before the contract month.
    pub month_before_delivery_date: NaiveDate,
    /// First day of the contract month.
    pub delivery_month_start_date: NaiveDate,
    /// Two calendar days before the delivery date.
    pub two_days_before_last_date: NaiveDate,
}

/// Parse a ticker like `sn2603` (tin, March 2026) into its key dates.
///
/// The code is case-insensitive: an `sn` prefix followed by a two-digit
/// year (2000-based) and a two-digit month. Anything else is rejected.
pub fn contract_dates(code: &str) -> Result<ContractDates> {
    let lower = code.trim().to_lowercase();
    let digits = lower
        .strip_prefix("sn")
        .ok_or_else(|| AppError::InvalidContractCode(code.to_string()))?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidContractCode(code.to_string()));
    }

    let year = 2000
        + digits[..2]
            .parse::<i32>()
            .map_err(|_| AppError::InvalidContractCode(code.to_string()))?;
    let month = digits[2..]
        .parse::<u32>()
        .map_err(|_| AppError::InvalidContractCode(code.to_string()))?;
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidContractCode(code.to_string()));
    }

    let delivery_date = ymd(year, month, 15, code)?;
    let delivery_month_start_date = ymd(year, month, 1, code)?;

    let (listing_year, listing_month) = rewind_months(year, month, 11);
    let listing_date = ymd(listing_year, listing_month, 22, code)?;

    let (before_year, before_month) = rewind_months(year, month, 1);
    let month_before_delivery_date = ymd(before_year, before_month, 1, code)?;

    Ok(ContractDates {
        delivery_date,
        listing_date,
        month_before_delivery_date,
        delivery_month_start_date,
        two_days_before_last_date: delivery_date - Duration::days(2),
    })
}

/// Step a (year, month) pair back by `months`, wrapping across year ends.
fn rewind_months(year: i32, month: u32, months: u32) -> (i32, u32) {
    let mut year = year;
    let mut month = month as i32 - months as i32;
    while month <= 0 {
        month += 12;
        year -= 1;
    }
    (year, month as u32)
}

fn ymd(year: i32, month: u32, day: u32, code: &str) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::InvalidContractCode(code.to_string()))
}
