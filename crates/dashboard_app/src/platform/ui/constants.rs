//! Element ids, routes and form field names shared by the page and the
//! request router.

pub const PAGE_TITLE: &str = "Recipe Dashboard";

pub const DIV_HEADING: &str = "heading";
pub const DIV_DATATABLE: &str = "recipes-datatable";
pub const DIV_BUTTONS: &str = "button-flex";
pub const DIV_GRAPHS: &str = "show-graphs";
pub const DIV_STATUS: &str = "placeholder";
pub const FORM_GRID: &str = "grid-form";
pub const FORM_FILTER: &str = "filter-form";

pub const ROUTE_PAGE: &str = "/";
pub const ROUTE_GRID: &str = "/grid";
pub const ROUTE_EXPORT: &str = "/export.csv";
pub const ROUTE_ADD_ROW: &str = "/rows/add";
pub const ROUTE_SAVE: &str = "/save";

pub const FIELD_N_CLICKS: &str = "n_clicks";
pub const FIELD_CELL_PREFIX: &str = "cell.";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_FILTER_PREFIX: &str = "filter.";

pub const EXPORT_FILENAME: &str = "recipes.csv";

/// `/rows/{index}/delete`
pub fn delete_row_route(index: usize) -> String {
    format!("/rows/{index}/delete")
}
