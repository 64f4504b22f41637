use crate::error::{QrisError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One order awaiting a payment code.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub order: String,
    pub total: Decimal,
}

/// Reads orders from a CSV source with an `order,total` header.
///
/// Whitespace around fields is trimmed and short rows are tolerated so a
/// malformed line surfaces as a per-row error instead of aborting the batch.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes orders.
    pub fn orders(self) -> impl Iterator<Item = Result<Order>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(QrisError::from))
    }
}
