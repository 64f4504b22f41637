use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Outcome of rendering one order.
///
/// Exactly one of `payload` or `error` is set; a failed row never carries a
/// fallback code.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PayloadRow {
    pub order: String,
    pub total: Decimal,
    pub payload: Option<String>,
    pub qr_url: Option<String>,
    pub error: Option<String>,
}

impl PayloadRow {
    pub fn rendered(order: String, total: Decimal, payload: String, qr_url: String) -> Self {
        Self {
            order,
            total,
            payload: Some(payload),
            qr_url: Some(qr_url),
            error: None,
        }
    }

    pub fn failed(order: String, total: Decimal, error: impl ToString) -> Self {
        Self {
            order,
            total,
            payload: None,
            qr_url: None,
            error: Some(error.to_string()),
        }
    }
}

/// Writes rendered payloads as CSV with an `order,total,payload,qr_url,error` header.
pub struct PayloadWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_row(&mut self, row: &PayloadRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
