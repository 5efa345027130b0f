use std::io::Write;

use csv::Writer;
use serde::Serialize;

/// Writes the rows as CSV, header taken from the first row's field names.
pub fn print_rows<W, T>(output: &mut W, rows: impl IntoIterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
