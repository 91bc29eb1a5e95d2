use crate::record::{Column, FieldValue, Record};

/// The editable, in-memory copy of every record shown in the grid.
///
/// Positions are snapshot positions, not page positions: deleting row 3 on
/// the second page of a filtered grid removes the third record overall.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSnapshot {
    rows: Vec<Record>,
}

impl TableSnapshot {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_blank(&mut self) {
        self.rows.push(Record::blank());
    }

    pub fn remove(&mut self, row: usize) -> Option<Record> {
        (row < self.rows.len()).then(|| self.rows.remove(row))
    }

    /// Write `value` into a cell. Returns false when the row does not exist
    /// or the text already matches what the cell displays, so re-posting an
    /// untouched grid keeps numeric values numeric.
    pub fn edit_cell(&mut self, row: usize, column: Column, value: &str) -> bool {
        let Some(record) = self.rows.get_mut(row) else {
            return false;
        };
        if record.display(column) == value {
            return false;
        }
        record.set(column, Some(FieldValue::text(value)));
        true
    }

    pub fn into_records(self) -> Vec<Record> {
        self.rows
    }
}
