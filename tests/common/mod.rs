#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Static template with a stale checksum, as stored by merchants.
pub const BASE: &str = "0002010102115802ID6304ABCD";

/// `BASE` made dynamic for 25000.
pub const DYNAMIC_25000: &str = "0002010102125405250005802ID6304FFAF";

/// `BASE` made dynamic for 15000.
pub const DYNAMIC_15000: &str = "0002010102125405150005802ID63041C8A";

/// Writes `rows` orders whose totals cycle through `distinct` values.
pub fn generate_orders(path: &Path, rows: usize, distinct: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["order", "total"])?;

    for i in 1..=rows {
        let total = 1000 * (1 + i % distinct);
        wtr.write_record([format!("ORD-{i}"), total.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
