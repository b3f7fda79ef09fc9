//! Core library for the tin-carry-calculator project.
//!
//! Computes the full cost of a cash-and-carry trade in the tin
//! futures market (spot purchase held to delivery) and judges
//! whether a given futures price leaves room for arbitrage.

pub mod config;
pub mod contract;
pub mod engine;
pub mod errors;
pub mod models;
pub mod report;
pub mod utils;
