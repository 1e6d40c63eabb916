use std::collections::{HashMap, VecDeque};

use crate::models::Lot;

/// Per-symbol FIFO queues of open lots. Queues appear lazily on the first
/// append for a symbol; the head of each queue is the oldest open lot.
/// Owned by a single replay, handed back to the caller when it finishes.
#[derive(Debug, Default, PartialEq)]
pub struct Ledger {
    holdings: HashMap<String, VecDeque<Lot>>,
}

impl Ledger {
    pub fn append(&mut self, lot: Lot) {
        self.holdings
            .entry(lot.symbol.clone())
            .or_default()
            .push_back(lot);
    }

    pub fn peek_oldest(&self, symbol: &str) -> Option<&Lot> {
        self.holdings.get(symbol).and_then(|lots| lots.front())
    }

    pub fn oldest_mut(&mut self, symbol: &str) -> Option<&mut Lot> {
        self.holdings
            .get_mut(symbol)
            .and_then(|lots| lots.front_mut())
    }

    pub fn pop_oldest(&mut self, symbol: &str) -> Option<Lot> {
        self.holdings
            .get_mut(symbol)
            .and_then(|lots| lots.pop_front())
    }

    pub fn is_empty(&self, symbol: &str) -> bool {
        self.holdings
            .get(symbol)
            .map_or(true, |lots| lots.is_empty())
    }

    pub fn open_lots(&self, symbol: &str) -> impl Iterator<Item = &Lot> {
        self.holdings.get(symbol).into_iter().flatten()
    }

    /// Symbols with at least one open lot, sorted for stable reporting.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .holdings
            .iter()
            .filter(|(_, lots)| !lots.is_empty())
            .map(|(symbol, _)| symbol.as_str())
            .collect();
        symbols.sort_unstable();
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedEvent, Side};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn buy(symbol: &str, day: u32, amount: rust_decimal::Decimal) -> Lot {
        let timestamp = NaiveDate::from_ymd_opt(2021, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Lot::open(&NormalizedEvent::new(
            symbol,
            Side::Buy,
            amount,
            dec!(1000),
            dec!(0),
            timestamp,
        ))
    }

    #[test]
    fn queues_are_fifo_per_symbol() {
        let mut ledger = Ledger::default();
        ledger.append(buy("BTC", 1, dec!(1)));
        ledger.append(buy("BTC", 2, dec!(2)));
        ledger.append(buy("ETH", 1, dec!(3)));

        assert_eq!(ledger.peek_oldest("BTC").unwrap().original_amount, dec!(1));
        assert_eq!(ledger.pop_oldest("BTC").unwrap().original_amount, dec!(1));
        assert_eq!(ledger.peek_oldest("BTC").unwrap().original_amount, dec!(2));
        assert_eq!(ledger.peek_oldest("ETH").unwrap().original_amount, dec!(3));
    }

    #[test]
    fn unknown_symbol_is_empty() {
        let mut ledger = Ledger::default();
        assert!(ledger.is_empty("BTC"));
        assert!(ledger.peek_oldest("BTC").is_none());
        assert!(ledger.pop_oldest("BTC").is_none());

        ledger.append(buy("BTC", 1, dec!(1)));
        assert!(!ledger.is_empty("BTC"));
        ledger.pop_oldest("BTC");
        assert!(ledger.is_empty("BTC"));
        assert!(ledger.symbols().is_empty());
    }

    #[test]
    fn symbols_are_sorted() {
        let mut ledger = Ledger::default();
        ledger.append(buy("ETH", 1, dec!(1)));
        ledger.append(buy("BTC", 1, dec!(1)));
        assert_eq!(ledger.symbols(), vec!["BTC", "ETH"]);
    }
}
