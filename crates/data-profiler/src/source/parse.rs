//! Strict CSV parsing into a polars table.

use crate::error::{ProfilerError, Result};
use polars::prelude::*;
use std::io::Cursor;

/// Parse CSV bytes (header row first) into a table.
///
/// Parsing is all-or-nothing. The content is first checked record by record
/// so that a row with the wrong number of fields fails the whole parse
/// instead of being padded or truncated. Column types are inferred from
/// every row.
///
/// # Errors
///
/// Returns [`ProfilerError::ParseFailed`] for empty content, a header without
/// columns, ragged rows, invalid UTF-8 or anything polars rejects.
pub fn parse_csv(bytes: &[u8]) -> Result<DataFrame> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ProfilerError::ParseFailed("CSV content is empty".to_string()));
    }

    std::str::from_utf8(bytes)
        .map_err(|e| ProfilerError::ParseFailed(format!("CSV content is not UTF-8: {e}")))?;
    validate_records(bytes)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| ProfilerError::ParseFailed(e.to_string()))
}

/// Check that every record has as many fields as the header.
fn validate_records(bytes: &[u8]) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader
        .byte_headers()
        .map_err(|e| ProfilerError::ParseFailed(e.to_string()))?;
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(ProfilerError::ParseFailed(
            "CSV header has no columns".to_string(),
        ));
    }

    for result in reader.byte_records() {
        result.map_err(|e| ProfilerError::ParseFailed(e.to_string()))?;
    }

    Ok(())
}
