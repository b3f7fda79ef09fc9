use anyhow::Result;
use tin_carry_calculator::{
    config::FeeSchedule,
    contract,
    engine::CostEngine,
    models::TradeParams,
    report, utils,
};

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}

fn env_opt_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    // Fee schedule is loaded once and injected into the engine.
    let schedule = FeeSchedule::from_env();

    // Trade inputs
    let spot_price = env_f64("SPOT_PRICE", 403_250.0);
    let futures_price = env_f64("FUTURES_PRICE", 408_290.0);
    let quantity_ton = env_f64("QUANTITY_TON", 10.0);
    let contract_code = std::env::var("CONTRACT_CODE").unwrap_or_else(|_| "sn2603".into());

    // Delivery date comes from the contract code unless overridden.
    let dates = contract::contract_dates(&contract_code)?;
    let delivery_date = match std::env::var("DELIVERY_DATE") {
        Ok(raw) => utils::parse_date(&raw)?,
        Err(_) => dates.delivery_date,
    };
    let start_date = match std::env::var("START_DATE") {
        Ok(raw) => utils::parse_date(&raw)?,
        Err(_) => chrono::Local::now().date_naive(),
    };

    tracing::info!(
        %contract_code,
        spot_price,
        futures_price,
        quantity_ton,
        %start_date,
        %delivery_date,
        "[INIT] tin-carry-calculator starting"
    );

    let mut params = TradeParams::new(
        spot_price,
        futures_price,
        quantity_ton,
        start_date,
        delivery_date,
    );
    params.interest_rate = env_opt_f64("INTEREST_RATE");
    params.margin_rate = env_opt_f64("MARGIN_RATE");
    params.enterprise_margin_addon = env_f64("ENTERPRISE_MARGIN_ADDON", 0.0);
    params.fees.train_application_fee = env_opt_f64("TRAIN_APPLICATION_FEE_PER_TON");
    params.fees.transport_fee = env_opt_f64("TRANSPORT_FEE_PER_TON");

    let engine = CostEngine::new(schedule);
    let result = engine.check_arbitrage(&params)?;

    match std::env::var("REPORT_FORMAT").as_deref() {
        Ok("json") => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => println!("{}", report::render_report(&result)),
    }

    tracing::info!(
        profit = result.profit,
        break_even = result.break_even_futures_price,
        can_arbitrage = result.can_arbitrage,
        "[DONE] evaluation complete"
    );
    Ok(())
}
