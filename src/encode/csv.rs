use crate::{
    encode::{Decoder, Encoder},
    sample::Sample,
    series::{Series, TIMESTAMP_TITLE, VALUE_TITLE},
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::{BufRead, BufReader, BufWriter, Error, ErrorKind, Read, Result, Write};

pub fn header() -> String {
    format!("{},{}", TIMESTAMP_TITLE, VALUE_TITLE)
}

pub struct CsvEncoder<W: Write> {
    pub writer: BufWriter<W>,
    bytes_written: u64,
}

impl<W: Write> CsvEncoder<W> {
    pub fn new(writeable: W) -> Self {
        Self {
            writer: BufWriter::new(writeable),
            bytes_written: 0,
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    pub fn encode_header(&mut self) -> Result<()> {
        self.write_line(&header())
    }

    pub fn encode_sample(&mut self, sample: &Sample) -> Result<()> {
        self.write_line(&format!(
            "{},{}",
            sample.instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            sample.value
        ))
    }
}

impl<W: Write> Encoder for CsvEncoder<W> {
    fn encode_series(&mut self, series: &Series) -> Result<()> {
        self.encode_header()?;
        for sample in series {
            self.encode_sample(sample)?;
        }
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

pub struct CsvDecoder<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> CsvDecoder<R> {
    pub fn new(readable: R) -> Self {
        Self {
            reader: BufReader::new(readable),
        }
    }

    fn decode_line(line: &str) -> Result<Sample> {
        let parts: Vec<&str> = line.split(',').collect();
        let (ts, val) = match parts.len() {
            2 => Ok((parts[0], parts[1])),
            _ => Err(Error::new(
                ErrorKind::InvalidData,
                format!("expected two columns per line: {:?}", parts),
            )),
        }?;

        let instant = DateTime::parse_from_rfc3339(ts)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?
            .with_timezone(&Utc);
        let value: f64 = val
            .parse()
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

        Ok(Sample { instant, value })
    }
}

impl<R: Read> Decoder for CsvDecoder<R> {
    fn decode_samples(&mut self) -> Result<Vec<Sample>> {
        let mut lines = (&mut self.reader).lines();
        let first = lines.next().transpose()?.unwrap_or_default();
        if first.trim_end() != header() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("missing header: {:?}", header()),
            ));
        }

        let mut samples = vec![];
        for line in lines {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            samples.push(Self::decode_line(line)?);
        }
        Ok(samples)
    }
}
