use rust_decimal::Decimal;

use crate::error::GainsError;
use crate::ledger::Ledger;
use crate::models::NormalizedEvent;
use crate::AMOUNT_EPSILON;

/// Consumes open lots oldest-first to cover `sale` and returns the realized
/// gain (proceeds minus matched cost basis and fees). The sale's own fee is
/// always part of the cost. Mutates the ledger: fully matched lots are
/// popped, a partially matched lot keeps the unmatched remainder.
///
/// A sale remainder equal to the oldest lot's remainder drains the lot
/// rather than leaving a zero-size head. Matched fees are always prorated
/// against the lot's original amount and fee, never the reduced pair.
pub fn consume(ledger: &mut Ledger, sale: &NormalizedEvent) -> Result<Decimal, GainsError> {
    let proceeds = sale.amount * sale.unit_price;
    let mut cost = sale.fee;
    let mut remaining = sale.amount;

    while remaining > AMOUNT_EPSILON {
        let Some(lot) = ledger.oldest_mut(&sale.symbol) else {
            return Err(GainsError::InsufficientHoldings {
                symbol: sale.symbol.clone(),
                shortfall: remaining,
            });
        };

        if remaining >= lot.remaining_amount {
            let matched_fee = lot.remaining_amount / lot.original_amount * lot.original_fee;
            cost += lot.remaining_amount * lot.unit_price + matched_fee;
            remaining -= lot.remaining_amount;
            ledger.pop_oldest(&sale.symbol);
        } else {
            let matched_fee = remaining / lot.original_amount * lot.original_fee;
            cost += remaining * lot.unit_price + matched_fee;
            lot.remaining_amount -= remaining;
            lot.remaining_fee -= matched_fee;
            // the lot covered the rest of the sale, nothing left to match
            break;
        }
    }

    Ok(proceeds - cost)
}
