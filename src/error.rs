use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GainsError {
    #[error("could not read transactions file: {0}")]
    Csv(#[from] csv::Error),
    #[error("file does not look like a supported transactions export")]
    UnsupportedFormat,
    #[error("invalid {field} value '{value}'")]
    MalformedField { field: &'static str, value: String },
    #[error("sale exceeds open {symbol} holdings by {shortfall}")]
    InsufficientHoldings { symbol: String, shortfall: Decimal },
}
