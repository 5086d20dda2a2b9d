//! JSONL input: one JSON object per line, each object one row.

use crate::decoder::RowDecoder;
use anyhow::{anyhow, Context, Result};
use json_types::json_to_row;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Decode every row of `reader` and write one JSON line per row to `writer`.
///
/// Blank lines are skipped. The first line that fails to parse or decode
/// aborts the run; the error names the 1-based line number. Returns the
/// number of rows written.
pub fn decode_jsonl<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    decoder: &RowDecoder,
    prefix: &str,
) -> Result<usize> {
    let mut decoded = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;

        if line.trim().is_empty() {
            continue;
        }

        let json_value: Value = serde_json::from_str(&line)
            .map_err(|e| anyhow!("Error parsing JSON at line {line_number}: {e}"))?;

        let row = json_to_row(&json_value)
            .with_context(|| format!("Invalid row at line {line_number}"))?;

        let output = decoder
            .decode(&row, prefix)
            .with_context(|| format!("Failed to decode {} at line {line_number}", decoder.name()))?;

        serde_json::to_writer(&mut *writer, &output)?;
        writeln!(writer)?;
        decoded += 1;
    }

    tracing::debug!("Decoded {} {} rows", decoded, decoder.name());
    Ok(decoded)
}

/// Decode a JSONL file.
pub fn decode_jsonl_file<W: Write>(
    path: &Path,
    writer: &mut W,
    decoder: &RowDecoder,
    prefix: &str,
) -> Result<usize> {
    tracing::info!(
        "Processing JSONL file: {} -> entity: {}",
        path.display(),
        decoder.name()
    );

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let decoded = decode_jsonl(BufReader::new(file), writer, decoder, prefix)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    tracing::info!("Completed decoding of {} rows from {}", decoded, path.display());
    Ok(decoded)
}
