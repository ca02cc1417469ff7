//! CSV parser for the vehicle registration dataset.

use std::borrow::Cow;
use std::io::Read;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::record::Record;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns the payload as plain CSV bytes, inflating it first if it is gzip-compressed.
pub fn decode_payload(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut inflated = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .context("failed to decompress gzip payload")?;
    debug!(compressed = bytes.len(), inflated = inflated.len(), "Payload decompressed");
    Ok(Cow::Owned(inflated))
}

/// Parses a CSV table with a header row into records.
///
/// Blank lines are skipped and empty cells become absent values. A row
/// shorter than the header leaves its trailing fields absent; extra cells
/// are ignored. Rows that are not valid UTF-8 are logged and skipped.
///
/// # Errors
///
/// Returns an error if the header row cannot be read.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>> {
    let payload = decode_payload(bytes)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload.as_ref());

    let headers: Vec<String> = rdr
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.byte_records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "Skipping malformed CSV row");
                skipped += 1;
                continue;
            }
        };

        let line = row.position().map(|p| p.line());
        let row = match StringRecord::from_byte_record(row) {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "Skipping CSV row with invalid UTF-8");
                skipped += 1;
                continue;
            }
        };

        records.push(to_record(&headers, &row));
    }

    debug!(rows = records.len(), skipped, columns = headers.len(), "CSV parsed");
    Ok(records)
}

fn to_record(headers: &[String], row: &StringRecord) -> Record {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), row.get(i)))
        .collect()
}
