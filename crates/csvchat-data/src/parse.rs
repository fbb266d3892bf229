// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use csvchat_app::Table;

const UTF8_BOM: char = '\u{feff}';

/// Splits CSV text into a table. The first record is the header row; every
/// later record is a candidate row, and candidates whose cells are all blank
/// are discarded. Records may differ in width.
pub fn parse_text(raw: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut records = reader.records();
    let Some(first) = records.next() else {
        bail!("no header row; the file is empty");
    };
    let first = first.context("parse header row")?;
    let mut headers = first.iter().map(str::to_owned).collect::<Vec<_>>();
    if let Some(header) = headers.first_mut()
        && header.starts_with(UTF8_BOM)
    {
        *header = header.trim_start_matches(UTF8_BOM).to_owned();
    }

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        // +2: one for the header, one for 1-based line numbering.
        let record = record.with_context(|| format!("parse record {}", index + 2))?;
        rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    Ok(Table::new(headers, rows))
}

/// Decodes file bytes as UTF-8, falling back to Windows-1252 which is what
/// spreadsheet exports commonly produce.
pub fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => {
            let bytes = error.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}
