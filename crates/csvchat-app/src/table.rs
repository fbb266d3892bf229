// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{NamedRow, Table};
use crate::projection::to_named_row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub row: NamedRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub row_count: usize,
}

impl std::fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {} out of range (table has {} rows)",
            self.index, self.row_count
        )
    }
}

impl std::error::Error for IndexOutOfRange {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableStore {
    table: Option<Table>,
    selection: Option<Selection>,
}

impl TableStore {
    /// Replaces the active table. Any selection belonged to the old table
    /// and is dropped.
    pub fn load(&mut self, table: Table) {
        self.table = Some(table);
        self.selection = None;
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|selection| selection.index)
    }

    pub fn select(&mut self, index: usize) -> Result<&Selection, IndexOutOfRange> {
        let row_count = self.table.as_ref().map_or(0, Table::row_count);
        let row = self
            .table
            .as_ref()
            .and_then(|table| to_named_row(table, index))
            .ok_or(IndexOutOfRange { index, row_count })?;
        Ok(self.selection.insert(Selection { index, row }))
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexOutOfRange, TableStore};
    use crate::model::Table;

    fn sample_table() -> Table {
        Table::new(
            vec!["A".to_owned(), "B".to_owned()],
            vec![
                vec!["1".to_owned(), "2".to_owned()],
                vec!["3".to_owned(), "4".to_owned()],
            ],
        )
    }

    #[test]
    fn select_then_clear_returns_to_empty() {
        let mut store = TableStore::default();
        store.load(sample_table());

        let selection = store.select(1).expect("row 1 exists");
        assert_eq!(selection.index, 1);
        assert_eq!(selection.row.get("A"), Some("3"));
        assert_eq!(selection.row.get("B"), Some("4"));

        store.clear_selection();
        assert!(store.selection().is_none());
        store.clear_selection();
        assert!(store.selected_index().is_none());
    }

    #[test]
    fn out_of_range_select_keeps_prior_selection() {
        let mut store = TableStore::default();
        store.load(sample_table());
        store.select(0).expect("row 0 exists");

        let error = store.select(2).expect_err("row 2 is out of range");
        assert_eq!(
            error,
            IndexOutOfRange {
                index: 2,
                row_count: 2
            }
        );
        assert_eq!(store.selected_index(), Some(0));
        assert!(error.to_string().contains("out of range"));
    }

    #[test]
    fn select_without_table_is_out_of_range() {
        let mut store = TableStore::default();
        assert!(store.select(0).is_err());
        assert!(store.selection().is_none());
    }

    #[test]
    fn load_clears_selection() {
        let mut store = TableStore::default();
        store.load(sample_table());
        store.select(1).expect("row 1 exists");

        store.load(sample_table());
        assert!(store.selection().is_none());
        assert_eq!(store.table().map(Table::row_count), Some(2));
    }
}
