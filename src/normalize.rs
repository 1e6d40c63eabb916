use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::GainsError;
use crate::models::{parse_date_str, NormalizedEvent, Side};

/// The two historical export schemas, sniffed from the CSV header row. The
/// legacy export packs quantity and symbol into one `Amount` column; the
/// current one splits them into `Amount` / `Amount currency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSchema {
    Legacy,
    Modern,
}

impl ExportSchema {
    pub fn detect(headers: &StringRecord) -> Result<Self, GainsError> {
        let has = |name: &str| headers.iter().any(|header| header == name);

        if has("Subtype") && has("Amount currency") {
            Ok(ExportSchema::Modern)
        } else if has("Sub Type") && has("Amount") {
            Ok(ExportSchema::Legacy)
        } else {
            Err(GainsError::UnsupportedFormat)
        }
    }

    /// Normalizes one raw row. `Ok(None)` means the row is not a trade (or
    /// is missing its structural markers) and the run moves on without it.
    pub fn normalize(
        &self,
        headers: &StringRecord,
        row: &StringRecord,
    ) -> Result<Option<NormalizedEvent>, GainsError> {
        match self {
            ExportSchema::Legacy => {
                let record: LegacyRecord = row.deserialize(Some(headers))?;
                record.normalize()
            }
            ExportSchema::Modern => {
                let record: ModernRecord = row.deserialize(Some(headers))?;
                record.normalize()
            }
        }
    }
}

/// Reads an export file, sniffs its schema and normalizes every trade row.
pub fn read_events(file: &Path) -> Result<Vec<NormalizedEvent>, GainsError> {
    let mut rdr = csv::Reader::from_path(file)?;
    let headers = rdr.headers()?.clone();
    let schema = ExportSchema::detect(&headers)?;

    let mut events = Vec::new();
    for row in rdr.records() {
        let row = row?;
        if let Some(event) = schema.normalize(&headers, &row)? {
            events.push(event);
        }
    }
    Ok(events)
}

fn trade_side(sub_type: &str) -> Option<Side> {
    match sub_type {
        "Buy" => Some(Side::Buy),
        "Sell" => Some(Side::Sell),
        _ => None,
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, GainsError> {
    Decimal::from_str_exact(value.trim()).map_err(|_| GainsError::MalformedField {
        field,
        value: value.to_string(),
    })
}

/// Parses the number out of a `"2000.00 USD"` style column.
fn leading_number(field: &'static str, value: &str) -> Result<Decimal, GainsError> {
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| GainsError::MalformedField {
            field,
            value: value.to_string(),
        })?;
    parse_decimal(field, token)
}

#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(rename = "Datetime")]
    datetime: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Rate", default)]
    rate: String,
    #[serde(rename = "Fee", default)]
    fee: String,
    #[serde(rename = "Sub Type", default)]
    sub_type: String,
}

impl LegacyRecord {
    fn normalize(self) -> Result<Option<NormalizedEvent>, GainsError> {
        let Some(side) = trade_side(&self.sub_type) else {
            return Ok(None);
        };
        // "0.56338792 BTC"; rows without the quantity/symbol split are skipped
        let Some((amount, symbol)) = self.amount.split_once(' ') else {
            return Ok(None);
        };

        let amount = parse_decimal("Amount", amount)?;
        let rate = leading_number("Rate", &self.rate)?;
        let fee = match self.fee.trim().is_empty() {
            true => Decimal::ZERO,
            false => leading_number("Fee", &self.fee)?,
        };
        let timestamp = parse_date_str(&self.datetime)?;

        Ok(Some(NormalizedEvent::new(
            symbol.trim(),
            side,
            amount,
            rate,
            fee,
            timestamp,
        )))
    }
}

#[derive(Debug, Deserialize)]
struct ModernRecord {
    #[serde(rename = "Datetime")]
    datetime: String,
    #[serde(rename = "Subtype", default)]
    subtype: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Amount currency", default)]
    amount_currency: String,
    #[serde(rename = "Rate", default)]
    rate: String,
    #[serde(rename = "Fee", default)]
    fee: String,
}

impl ModernRecord {
    fn normalize(self) -> Result<Option<NormalizedEvent>, GainsError> {
        let Some(side) = trade_side(&self.subtype) else {
            return Ok(None);
        };
        let symbol = self.amount_currency.trim();
        if symbol.is_empty() {
            return Ok(None);
        }

        let amount = parse_decimal("Amount", &self.amount)?;
        let rate = parse_decimal("Rate", &self.rate)?;
        let fee = match self.fee.trim().is_empty() {
            true => Decimal::ZERO,
            false => parse_decimal("Fee", &self.fee)?,
        };
        let timestamp = parse_date_str(&self.datetime)?;

        Ok(Some(NormalizedEvent::new(
            symbol, side, amount, rate, fee, timestamp,
        )))
    }
}
