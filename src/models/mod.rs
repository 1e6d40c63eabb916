use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::GainsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// A canonical trade row, as produced by the normalizer for either export
/// schema. Amounts and unit prices are rounded to 8 decimal places on
/// construction; fees keep whatever precision the export carried.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub symbol: String,
    pub side: Side,
    pub amount: Decimal,
    pub unit_price: Decimal,
    pub fee: Decimal,
    pub timestamp: NaiveDateTime,
    pub year: i32,
}

impl NormalizedEvent {
    pub fn new(
        symbol: &str,
        side: Side,
        amount: Decimal,
        unit_price: Decimal,
        fee: Decimal,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            amount: round_quantity(amount),
            unit_price: round_quantity(unit_price),
            fee,
            timestamp,
            year: timestamp.year(),
        }
    }
}

pub fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(8, RoundingStrategy::MidpointAwayFromZero)
}

/// An open purchase awaiting disposal. `remaining_fee` tracks the fee share
/// still attached to `remaining_amount`; matching never reads it back and
/// always prorates from the original amount/fee pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub symbol: String,
    pub acquired: NaiveDateTime,
    pub original_amount: Decimal,
    pub remaining_amount: Decimal,
    pub unit_price: Decimal,
    pub original_fee: Decimal,
    pub remaining_fee: Decimal,
}

impl Lot {
    pub fn open(event: &NormalizedEvent) -> Self {
        Self {
            symbol: event.symbol.clone(),
            acquired: event.timestamp,
            original_amount: event.amount,
            remaining_amount: event.amount,
            unit_price: event.unit_price,
            original_fee: event.fee,
            remaining_fee: event.fee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaleRow {
    pub date: NaiveDateTime,
    pub transaction: String,
    pub symbol: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HoldingRow {
    pub symbol: String,
    pub acquired: NaiveDateTime,
    pub amount: Decimal,
    pub open_amount: Decimal,
    pub rate: Decimal,
    pub open_fee: Decimal,
    pub basis: Decimal,
}

pub fn parse_date_str(s: &str) -> Result<NaiveDateTime, GainsError> {
    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%b. %d, %Y, %I:%M %p",
        "%b. %d, %Y %I:%M %p",
    ];
    let date_formats = ["%Y-%m-%d", "%m/%d/%Y"];

    for format in &datetime_formats {
        if let Ok(parsed_date) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(parsed_date);
        }
    }
    for format in &date_formats {
        if let Ok(parsed_date) = NaiveDate::parse_from_str(s, format) {
            return Ok(parsed_date
                .and_hms_opt(0, 0, 0)
                .expect("Error adding time 00:00:00 to Date"));
        }
    }

    Err(GainsError::MalformedField {
        field: "Datetime",
        value: s.to_string(),
    })
}
