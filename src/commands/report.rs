use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Error;
use tracing::info;

use crate::normalize::read_events;
use crate::replay::{realized_gains, GainReport};
use crate::LotConfig;

pub fn report(file: &PathBuf, year: i32, export: bool, config: &LotConfig) -> Result<(), Error> {
    if !file.is_file() {
        return Err(anyhow::anyhow!(
            "Could not find transactions file {:?}",
            file
        ));
    }

    let events = read_events(file)?;
    info!(events = events.len(), year, "replaying transactions");
    let gains = realized_gains(events, year)?;

    print_sales(&gains);
    println!();
    println!(
        "Summary gain for {} (negative is loss): {}",
        gains.year, gains.total_gain
    );

    if export {
        let path = export_sales(&gains, config)?;
        println!("Realized gain report saved to {:?}", path);
    }

    Ok(())
}

fn print_sales(gains: &GainReport) {
    println!(
        "{:<20} {:<12} {:<8} {:>18} {:>18} {:>18}",
        "Date", "Transaction", "Symbol", "Amount", "Rate", "Profit"
    );
    for sale in &gains.sales {
        println!(
            "{:<20} {:<12} {:<8} {:>18} {:>18} {:>18}",
            sale.date.to_string(),
            sale.transaction,
            sale.symbol,
            sale.amount.to_string(),
            sale.rate.to_string(),
            sale.profit.to_string()
        );
    }
}

fn export_sales(gains: &GainReport, config: &LotConfig) -> Result<PathBuf, Error> {
    fs::create_dir_all(&config.reports_dir)?;
    let file_path = Path::new(&config.reports_dir).join(format!("realized_gains_{}.csv", gains.year));
    let mut wtr = csv::Writer::from_path(&file_path)?;

    for sale in &gains.sales {
        wtr.serialize(sale)?;
    }
    if !gains.sales.is_empty() {
        wtr.write_record(&[
            String::from(""),
            String::from(""),
            String::from(""),
            String::from(""),
            String::from(""),
            gains.total_gain.to_string(),
        ])?;
    }
    wtr.flush()?;

    Ok(file_path)
}
