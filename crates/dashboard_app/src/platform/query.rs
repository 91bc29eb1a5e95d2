//! URL query and form body encoding for the grid.
//!
//! Both use `application/x-www-form-urlencoded`. The query carries what the
//! user is looking at (`page`, `filter.<column>`); the grid form body
//! carries every visible cell (`cell.<row>.<column>`) and the Add Row click
//! count.

use dashboard_core::{Column, GridQuery, Msg};

use super::ui::constants::{
    FIELD_CELL_PREFIX, FIELD_N_CLICKS, PARAM_FILTER_PREFIX, PARAM_PAGE, ROUTE_GRID,
};

/// Split an urlencoded string into decoded key/value pairs.
pub fn parse_pairs(encoded: &str) -> Result<Vec<(String, String)>, String> {
    encoded
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            Ok((decode(key)?, decode(value)?))
        })
        .collect()
}

fn decode(component: &str) -> Result<String, String> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| format!("invalid percent-encoding in {component:?}: {err}"))
}

/// Unknown parameters and columns are ignored; a malformed page number
/// means the first page.
pub fn parse_grid_query(encoded: &str) -> Result<GridQuery, String> {
    let mut query = GridQuery::default();
    for (key, value) in parse_pairs(encoded)? {
        if key == PARAM_PAGE {
            query.page = value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|page| page.checked_sub(1))
                .unwrap_or(0);
        } else if let Some(name) = key.strip_prefix(PARAM_FILTER_PREFIX) {
            if let Some(column) = Column::from_name(name) {
                query.set_filter(column, &value);
            }
        }
    }
    Ok(query)
}

/// Inverse of [`parse_grid_query`]; pages are written 1-based and the first
/// page is left implicit.
pub fn encode_grid_query(query: &GridQuery) -> String {
    let mut parts = Vec::new();
    if query.page > 0 {
        parts.push(format!("{PARAM_PAGE}={}", query.page + 1));
    }
    for filter in &query.filters {
        parts.push(format!(
            "{PARAM_FILTER_PREFIX}{}={}",
            filter.column.name(),
            urlencoding::encode(&filter.raw)
        ));
    }
    parts.join("&")
}

/// `path` with the encoded query appended when there is one.
pub fn with_query(path: &str, query: &GridQuery) -> String {
    let encoded = encode_grid_query(query);
    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{encoded}")
    }
}

pub fn grid_location(query: &GridQuery) -> String {
    with_query(ROUTE_GRID, query)
}

/// A submitted grid form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridForm {
    /// One edit per posted cell, in submission order.
    pub edits: Vec<Msg>,
    pub n_clicks: u64,
}

impl GridForm {
    pub fn parse(body: &str) -> Result<Self, String> {
        let mut form = GridForm::default();
        for (key, value) in parse_pairs(body)? {
            if key == FIELD_N_CLICKS {
                form.n_clicks = value.trim().parse().unwrap_or(0);
            } else if let Some((row, column)) = parse_cell_key(&key) {
                form.edits.push(Msg::CellEdited { row, column, value });
            }
        }
        Ok(form)
    }
}

/// `cell.<row>.<column>` for editable columns only.
fn parse_cell_key(key: &str) -> Option<(usize, Column)> {
    let rest = key.strip_prefix(FIELD_CELL_PREFIX)?;
    let (row, name) = rest.split_once('.')?;
    let column = Column::from_name(name).filter(|c| !c.is_hidden())?;
    Some((row.parse().ok()?, column))
}

pub fn cell_field_name(row: usize, column: Column) -> String {
    format!("{FIELD_CELL_PREFIX}{row}.{}", column.name())
}

pub fn filter_field_name(column: Column) -> String {
    format!("{PARAM_FILTER_PREFIX}{}", column.name())
}
