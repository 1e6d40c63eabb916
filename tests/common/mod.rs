use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_fifo_gains::models::{NormalizedEvent, Side};
use tempfile::NamedTempFile;

/// Builds a legacy-schema export: `(datetime, amount, rate, fee, sub_type)`
/// per row, with `amount` in the combined `"<qty> <SYMBOL>"` form.
pub fn create_legacy_csv(records: &[(&str, &str, &str, &str, &str)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp CSV file");
    writeln!(file, "Type,Datetime,Account,Amount,Value,Rate,Fee,Sub Type").unwrap();
    for (datetime, amount, rate, fee, sub_type) in records {
        writeln!(
            file,
            "Market,\"{}\",Main,{},,{},{},{}",
            datetime, amount, rate, fee, sub_type
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

/// Builds a modern-schema export: `(datetime, subtype, amount, currency, rate, fee)`
/// per row. An empty fee mirrors the real exports, which often leave it blank.
pub fn create_modern_csv(records: &[(&str, &str, &str, &str, &str, &str)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp CSV file");
    writeln!(
        file,
        "ID,Account,Type,Subtype,Datetime,Amount,Amount currency,Value,Value currency,Rate,Rate currency,Fee,Fee currency,Order ID"
    )
    .unwrap();
    for (i, (datetime, subtype, amount, currency, rate, fee)) in records.iter().enumerate() {
        writeln!(
            file,
            "{},Main,Market,{},{},{},{},,,{},USD,{},USD,",
            i + 1,
            subtype,
            datetime,
            amount,
            currency,
            rate,
            fee
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

/// Builds a normalized event directly, for engine-level tests.
pub fn event(
    symbol: &str,
    side: Side,
    amount: &str,
    price: &str,
    fee: &str,
    date: &str,
) -> NormalizedEvent {
    let timestamp = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    NormalizedEvent::new(
        symbol,
        side,
        Decimal::from_str_exact(amount).unwrap(),
        Decimal::from_str_exact(price).unwrap(),
        Decimal::from_str_exact(fee).unwrap(),
        timestamp,
    )
}
