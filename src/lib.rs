pub mod commands;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod normalize;
pub mod replay;

use dotenvy::dotenv;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;

/// Sale remainders at or below this threshold count as fully matched.
pub const AMOUNT_EPSILON: Decimal = dec!(0.00000001);

#[derive(Debug, Clone)]
pub struct LotConfig {
    pub lot_method: String,
    pub reports_dir: String,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            lot_method: "fifo".to_string(),
            reports_dir: "./reports".to_string(),
        }
    }
}

pub fn load_lot_config() -> Result<LotConfig, anyhow::Error> {
    dotenv().ok();
    let config = LotConfig {
        lot_method: env::var("LOT_METHOD").unwrap_or_else(|_| "fifo".to_string()),
        reports_dir: env::var("REPORTS_DIR").unwrap_or_else(|_| "./reports".to_string()),
    };

    if config.lot_method != "fifo" {
        anyhow::bail!(
            "Unsupported LOT_METHOD '{}'. Only 'fifo' is currently supported.",
            config.lot_method
        );
    }

    Ok(config)
}
