//! Delimited table output.
//!
//! Fields are quoted only when they contain the delimiter, a quote, or a line
//! break. Records end with CRLF.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv_core::{QuoteStyle, Terminator, WriteResult, Writer, WriterBuilder};

use crate::error::TableError;
use crate::row::{Row, HEADER};

const BUFFER_SIZE: usize = 4096;

/// Writes records through `csv-core` into any byte sink.
pub struct TableWriter<W: Write> {
    wtr: W,
    writer: Writer,
    output: [u8; BUFFER_SIZE],
}

impl<W: Write> TableWriter<W> {
    pub fn new(wtr: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .quote(b'"')
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .build();
        Self {
            wtr,
            writer,
            output: [0; BUFFER_SIZE],
        }
    }

    pub fn write_record<'a, I>(&mut self, fields: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                let (result, nout) = self.writer.delimiter(&mut self.output);
                self.flush_output(result, nout)?;
            }
            self.write_field(field.as_bytes())?;
        }
        let (result, nout) = self.writer.terminator(&mut self.output);
        self.flush_output(result, nout)
    }

    fn write_field(&mut self, mut data: &[u8]) -> std::io::Result<()> {
        loop {
            let (result, nin, nout) = self.writer.field(data, &mut self.output);
            self.wtr.write_all(&self.output[..nout])?;
            if result == WriteResult::InputEmpty {
                return Ok(());
            }
            data = &data[nin..];
        }
    }

    fn flush_output(&mut self, result: WriteResult, nout: usize) -> std::io::Result<()> {
        self.wtr.write_all(&self.output[..nout])?;
        if result == WriteResult::OutputFull {
            // The buffer is drained after every call, so this cannot happen
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "csv output buffer too small",
            ));
        }
        Ok(())
    }

    /// Close any open quote and flush the sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        let (result, nout) = self.writer.finish(&mut self.output);
        self.flush_output(result, nout)?;
        self.wtr.flush()?;
        Ok(self.wtr)
    }
}

/// Write the header and all rows to `wtr`.
pub fn write_table<W: Write>(wtr: W, rows: &[Row], delimiter: u8) -> std::io::Result<W> {
    let mut table = TableWriter::new(wtr, delimiter);
    table.write_record(HEADER)?;
    for row in rows {
        table.write_record(row.fields())?;
    }
    table.finish()
}

/// Write the header and all rows to a file, replacing it if it exists.
pub fn write_table_file(path: &Path, rows: &[Row], delimiter: u8) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::io(path, e))?;
    write_table(BufWriter::new(file), rows, delimiter).map_err(|e| TableError::io(path, e))?;
    Ok(())
}
