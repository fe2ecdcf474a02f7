use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use binlog_decode::{ByteStream, ColumnMetadata, DecodeError, FieldDecoder, IoStream};
use clap::Args;
use tracing::{debug, info};

use crate::{
    column::ColumnSpec,
    format::{BytesStyle, render_value},
};

#[derive(Args)]
pub struct DecodeArgs {
    /// Path to the raw byte file (`-` for stdin)
    input: PathBuf,

    /// Column types in row order, e.g. `long`, `varchar:255`, `blob:2`
    #[arg(short, long = "column", required = true)]
    columns: Vec<ColumnSpec>,

    /// Read each column's metadata from the stream before the first row
    #[arg(long)]
    metadata_in_stream: bool,

    /// Bytes to discard before decoding
    #[arg(long, default_value_t = 0)]
    skip: usize,

    /// Stop after this many rows (default: until end of input)
    #[arg(short = 'n', long)]
    rows: Option<usize>,

    /// How byte-string values are printed
    #[arg(long, value_enum, default_value_t = BytesStyle::Text)]
    bytes: BytesStyle,
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        if self.input.as_os_str() == "-" {
            self.decode_from(IoStream::new(io::stdin().lock()))
        } else {
            let file = File::open(&self.input)
                .with_context(|| format!("failed to open {}", self.input.display()))?;
            self.decode_from(IoStream::new(BufReader::new(file)))
        }
    }

    fn decode_from<S: ByteStream>(&self, stream: S) -> Result<()> {
        let mut decoder = FieldDecoder::new(stream);
        decoder
            .skip(self.skip)
            .with_context(|| format!("failed to skip {} bytes", self.skip))?;

        let metadata = if self.metadata_in_stream {
            self.columns
                .iter()
                .map(|c| {
                    decoder
                        .decode_metadata(c.column_type)
                        .map(|m| c.resolve_metadata(m))
                })
                .collect::<Result<Vec<_>, _>>()
                .context("failed to read column metadata")?
        } else {
            self.columns.iter().map(|c| c.metadata).collect()
        };
        debug!(?metadata, "column metadata");

        let mut out = io::stdout().lock();
        let mut rows = 0;
        while self.rows.is_none_or(|limit| rows < limit) {
            let start = decoder.position();
            let Some(values) = decode_row(&mut decoder, &self.columns, &metadata, rows)? else {
                break;
            };
            let line: Vec<_> = values.iter().map(|v| render_value(v, self.bytes)).collect();
            writeln!(out, "{}", line.join("\t"))?;
            rows += 1;
            if self.rows.is_none() && decoder.position() == start {
                break;
            }
        }
        info!(rows, bytes = decoder.position(), "decode finished");
        Ok(())
    }
}

/// One row of values, or `None` when the input ends cleanly on a row boundary.
fn decode_row<S: ByteStream>(
    decoder: &mut FieldDecoder<S>,
    columns: &[ColumnSpec],
    metadata: &[ColumnMetadata],
    row: usize,
) -> Result<Option<Vec<binlog_decode::Value>>> {
    let mut values = Vec::with_capacity(columns.len());
    for (i, (column, meta)) in columns.iter().zip(metadata).enumerate() {
        match decoder.decode_value(column.column_type, meta) {
            Ok(v) => values.push(v),
            Err(DecodeError::UnexpectedEndOfStream { available: 0, .. }) if i == 0 => {
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "row {row}, column {i} ({}) at byte {}",
                        column.column_type,
                        decoder.position()
                    )
                });
            }
        }
    }
    Ok(Some(values))
}
