use rust_decimal::Decimal;
use tracing::debug;

use crate::engine::consume;
use crate::error::GainsError;
use crate::ledger::Ledger;
use crate::models::{Lot, NormalizedEvent, SaleRow, Side};

/// Realized gain for one reporting year: the running total (negative is a
/// net loss), one audit row per qualifying sale, and the final ledger.
#[derive(Debug)]
pub struct GainReport {
    pub year: i32,
    pub total_gain: Decimal,
    pub sales: Vec<SaleRow>,
    pub ledger: Ledger,
}

/// Orders events chronologically; ties keep their input order. Combined
/// multi-year exports are not guaranteed sorted, and FIFO matching needs
/// buys replayed before the sells that consume them.
pub fn sequence(events: &mut [NormalizedEvent]) {
    events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// Replays the full event set through a fresh ledger. Every sell consumes
/// holdings regardless of its year; only sells dated in `year` contribute
/// to the total and the audit rows.
pub fn realized_gains(
    mut events: Vec<NormalizedEvent>,
    year: i32,
) -> Result<GainReport, GainsError> {
    sequence(&mut events);

    let mut ledger = Ledger::default();
    let mut total_gain = Decimal::ZERO;
    let mut sales = Vec::new();

    for event in &events {
        match event.side {
            Side::Buy => ledger.append(Lot::open(event)),
            Side::Sell => {
                let gain = consume(&mut ledger, event)?;
                debug!(symbol = %event.symbol, amount = %event.amount, %gain, "consumed sale");
                if event.year == year {
                    total_gain += gain;
                    sales.push(SaleRow {
                        date: event.timestamp,
                        transaction: String::from("Sell"),
                        symbol: event.symbol.clone(),
                        amount: event.amount,
                        rate: event.unit_price,
                        profit: gain,
                    });
                }
            }
        }
    }

    Ok(GainReport {
        year,
        total_gain,
        sales,
        ledger,
    })
}

/// Replays the full event set and returns only the open holdings left over.
pub fn replay(mut events: Vec<NormalizedEvent>) -> Result<Ledger, GainsError> {
    sequence(&mut events);

    let mut ledger = Ledger::default();
    for event in &events {
        match event.side {
            Side::Buy => ledger.append(Lot::open(event)),
            Side::Sell => {
                consume(&mut ledger, event)?;
            }
        }
    }
    Ok(ledger)
}
