// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{NamedCell, NamedRow, Table};

const CONTENT_KEYS: [&str; 2] = ["conteudo", "content"];
const DATE_KEYS: [&str; 2] = ["data", "date"];

pub const EMPTY_DETAIL_MESSAGE: &str = "No content available for this row";

/// Indices, in header order, of headers named exactly in `allowed`.
pub fn visible_columns<S: AsRef<str>>(table: &Table, allowed: &[S]) -> Vec<usize> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| allowed.iter().any(|name| name.as_ref() == header.as_str()))
        .map(|(index, _)| index)
        .collect()
}

pub fn project_row(table: &Table, row_index: usize, columns: &[usize]) -> Vec<String> {
    let row = table.row(row_index).unwrap_or_default();
    columns
        .iter()
        .map(|column| row.get(*column).cloned().unwrap_or_default())
        .collect()
}

/// Full header-to-cell mapping for the preview pane; independent of the
/// visible column allow-list. `None` when the row does not exist.
pub fn to_named_row(table: &Table, row_index: usize) -> Option<NamedRow> {
    let row = table.row(row_index)?;
    let entries = table
        .headers()
        .iter()
        .zip(table.keys())
        .enumerate()
        .map(|(column, (header, key))| NamedCell {
            header: header.clone(),
            key: key.clone(),
            value: row.get(column).cloned().unwrap_or_default(),
        })
        .collect();
    Some(NamedRow::new(entries))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailFields {
    pub date: Option<String>,
    pub content: Option<String>,
}

impl DetailFields {
    /// Finds the date and content fields by canonical key. A field whose
    /// value is blank counts as absent.
    pub fn discover(row: &NamedRow) -> Self {
        Self {
            date: first_present(row, &DATE_KEYS),
            content: first_present(row, &CONTENT_KEYS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.content.is_none()
    }
}

fn first_present(row: &NamedRow, keys: &[&str]) -> Option<String> {
    row.entries()
        .iter()
        .find(|cell| keys.contains(&cell.key.as_str()) && !cell.value.trim().is_empty())
        .map(|cell| cell.value.clone())
}
