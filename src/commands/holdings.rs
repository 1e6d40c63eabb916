use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Error;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::ledger::Ledger;
use crate::models::HoldingRow;
use crate::normalize::read_events;
use crate::replay::replay;
use crate::LotConfig;

/// Replays the whole export and reports the lots still open afterwards.
pub fn holdings(file: &PathBuf, export: bool, config: &LotConfig) -> Result<(), Error> {
    if !file.is_file() {
        return Err(anyhow::anyhow!(
            "Could not find transactions file {:?}",
            file
        ));
    }

    let events = read_events(file)?;
    info!(events = events.len(), "replaying transactions");
    let ledger = replay(events)?;
    let rows = holding_rows(&ledger);

    let mut total_basis = dec!(0);
    println!(
        "{:<8} {:<20} {:>18} {:>18} {:>18} {:>14} {:>18}",
        "Symbol", "Acquired", "Amount", "OpenAmount", "Rate", "OpenFee", "Basis"
    );
    for row in &rows {
        total_basis += row.basis;
        println!(
            "{:<8} {:<20} {:>18} {:>18} {:>18} {:>14} {:>18}",
            row.symbol,
            row.acquired.to_string(),
            row.amount.to_string(),
            row.open_amount.to_string(),
            row.rate.to_string(),
            row.open_fee.to_string(),
            row.basis.to_string()
        );
    }
    println!();
    println!("Total open cost basis: {}", total_basis);

    if export {
        let path = export_holdings(&rows, total_basis, config)?;
        println!("Holdings report saved to {:?}", path);
    }

    Ok(())
}

fn holding_rows(ledger: &Ledger) -> Vec<HoldingRow> {
    let mut rows = Vec::new();
    for symbol in ledger.symbols() {
        for lot in ledger.open_lots(symbol) {
            rows.push(HoldingRow {
                symbol: lot.symbol.clone(),
                acquired: lot.acquired,
                amount: lot.original_amount,
                open_amount: lot.remaining_amount,
                rate: lot.unit_price,
                open_fee: lot.remaining_fee,
                basis: lot.remaining_amount * lot.unit_price + lot.remaining_fee,
            });
        }
    }
    rows
}

fn export_holdings(
    rows: &[HoldingRow],
    total_basis: Decimal,
    config: &LotConfig,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(&config.reports_dir)?;
    let file_path = Path::new(&config.reports_dir).join("holdings.csv");
    let mut wtr = csv::Writer::from_path(&file_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }
    if !rows.is_empty() {
        wtr.write_record(&[
            String::from(""),
            String::from(""),
            String::from(""),
            String::from(""),
            String::from(""),
            String::from(""),
            total_basis.to_string(),
        ])?;
    }
    wtr.flush()?;

    Ok(file_path)
}
