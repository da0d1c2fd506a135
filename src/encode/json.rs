use crate::{encode::Encoder, series::Series};
use std::io::{BufWriter, Result, Write};

/// Writes the chart projections of a series as a single JSON document.
pub struct JsonEncoder<W: Write> {
    pub writer: BufWriter<W>,
    bytes_written: u64,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(writeable: W) -> Self {
        Self {
            writer: BufWriter::new(writeable),
            bytes_written: 0,
        }
    }
}

impl<W: Write> Encoder for JsonEncoder<W> {
    fn encode_series(&mut self, series: &Series) -> Result<()> {
        let bytes = serde_json::to_vec(&series.chart_data())?;
        self.writer.write_all(&bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
