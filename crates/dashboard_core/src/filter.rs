//! Per-column grid filters and paging, as typed into the grid header.

use crate::record::{Column, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Case-insensitive substring match; the needle is stored lowercased.
    Contains(String),
    Compare(Comparison, f64),
}

impl FilterExpr {
    /// Returns `None` for blank input, which means "no filter".
    pub fn parse(raw: &str) -> Option<FilterExpr> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Two-character operators first so ">=" is not read as ">".
        const OPERATORS: [(&str, Comparison); 6] = [
            (">=", Comparison::Ge),
            ("<=", Comparison::Le),
            ("!=", Comparison::Ne),
            (">", Comparison::Gt),
            ("<", Comparison::Lt),
            ("=", Comparison::Eq),
        ];
        for (prefix, comparison) in OPERATORS {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                if let Ok(number) = rest.trim().parse::<f64>() {
                    return Some(FilterExpr::Compare(comparison, number));
                }
            }
        }
        Some(FilterExpr::Contains(trimmed.to_lowercase()))
    }

    pub fn matches(&self, cell: &str) -> bool {
        match self {
            FilterExpr::Contains(needle) => cell.to_lowercase().contains(needle.as_str()),
            FilterExpr::Compare(comparison, rhs) => {
                let Ok(lhs) = cell.trim().parse::<f64>() else {
                    return false;
                };
                match comparison {
                    Comparison::Lt => lhs < *rhs,
                    Comparison::Le => lhs <= *rhs,
                    Comparison::Gt => lhs > *rhs,
                    Comparison::Ge => lhs >= *rhs,
                    Comparison::Eq => lhs == *rhs,
                    Comparison::Ne => lhs != *rhs,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub column: Column,
    /// Text as typed, echoed back into the filter box.
    pub raw: String,
    expr: FilterExpr,
}

impl ColumnFilter {
    pub fn new(column: Column, raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let expr = FilterExpr::parse(&raw)?;
        Some(Self { column, raw, expr })
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.expr.matches(&record.display(self.column))
    }
}

/// What part of the grid the user is looking at. Lives in the page URL, not
/// in application state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridQuery {
    pub filters: Vec<ColumnFilter>,
    /// Zero-based page index.
    pub page: usize,
}

impl GridQuery {
    /// Add or replace the filter on `column`. Blank input clears it.
    pub fn set_filter(&mut self, column: Column, raw: &str) {
        self.filters.retain(|f| f.column != column);
        if let Some(filter) = ColumnFilter::new(column, raw) {
            self.filters.push(filter);
        }
    }

    pub fn filter_for(&self, column: Column) -> Option<&ColumnFilter> {
        self.filters.iter().find(|f| f.column == column)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Snapshot positions of every record passing all filters.
    pub fn matching_rows(&self, rows: &[Record]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(index, _)| index)
            .collect()
    }
}
