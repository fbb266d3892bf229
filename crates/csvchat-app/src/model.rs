// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ids::MessageId;

pub const DEFAULT_VISIBLE_COLUMNS: [&str; 2] = ["Ementa", "Data"];

/// Parsed CSV: the first record as headers, every later non-blank record as
/// a row. Rows keep their original width; projection pads or ignores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    keys: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let keys = headers.iter().map(|header| canonical_key(header)).collect();
        let rows = rows.into_iter().filter(|row| !is_blank_row(row)).collect();
        Self {
            headers,
            keys,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Canonical (trimmed, lower-cased) form of each header, same order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            headers: self.headers.clone(),
            row_count: self.rows.len(),
        }
    }
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

pub fn canonical_key(header: &str) -> String {
    header.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSummary {
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl TableSummary {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One row keyed by header. Every column is kept, in header order; lookups
/// by name resolve to the last column carrying that name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedRow {
    entries: Vec<NamedCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCell {
    pub header: String,
    pub key: String,
    pub value: String,
}

impl NamedRow {
    pub fn new(entries: Vec<NamedCell>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[NamedCell] {
        &self.entries
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|cell| cell.header == header)
            .map(|cell| cell.value.as_str())
    }

    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|cell| cell.key == key)
            .map(|cell| cell.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name-to-value pairs after duplicate resolution, in first-seen order.
    pub fn resolved(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = Vec::with_capacity(self.entries.len());
        for cell in &self.entries {
            match out.iter_mut().find(|slot| slot.0 == cell.header) {
                Some(slot) => slot.1 = cell.value.as_str(),
                None => out.push((cell.header.as_str(), cell.value.as_str())),
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Default { location: String },
    UserFile { path: PathBuf },
}

impl LoadSource {
    pub fn label(&self) -> String {
        match self {
            Self::Default { location } => location.clone(),
            Self::UserFile { path } => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    DefaultUnavailable { location: String, reason: String },
    UserFileUnreadable { path: PathBuf, reason: String },
}

impl LoadFailure {
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::DefaultUnavailable { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::DefaultUnavailable { reason, .. } | Self::UserFileUnreadable { reason, .. } => {
                reason
            }
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultUnavailable { location, reason } => {
                write!(f, "default data {location} unavailable: {reason}")
            }
            Self::UserFileUnreadable { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadFailure {}

/// Outcome of one ingestion attempt. Chat greets once per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLoadEvent {
    Loaded {
        summary: TableSummary,
        source: LoadSource,
    },
    Failed(LoadFailure),
}
