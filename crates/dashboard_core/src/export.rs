//! Spreadsheet export of the rows the grid currently displays.
//!
//! The file is CSV rather than a workbook format: every spreadsheet program
//! opens it, and cells carry only display text, so nothing a workbook could
//! express is lost.

use crate::filter::GridQuery;
use crate::record::{Column, Record};

/// CSV with a header row of visible column names followed by every record
/// passing `query`'s filters (all pages). Lines end with CRLF.
pub fn export_csv(rows: &[Record], query: &GridQuery) -> String {
    let mut out = String::new();
    push_line(&mut out, Column::visible().map(|c| c.name().to_string()));
    for index in query.matching_rows(rows) {
        let record = &rows[index];
        push_line(&mut out, Column::visible().map(|c| record.display(c)));
    }
    out
}

fn push_line(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i != 0 {
            out.push(',');
        }
        push_field(out, &field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\n', '\r']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
