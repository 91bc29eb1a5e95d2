use super::constants::*;
use super::escape;

/// Fixed width of every grid column, in pixels.
pub const CELL_WIDTH_PX: u32 = 180;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 1.5em; }
#heading h1 { margin: 0 0 0.5em 0; }
table.grid { border-collapse: collapse; table-layout: fixed; }
table.grid th, table.grid td {
    border: 1px solid #ccc;
    padding: 2px 4px;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}
table.grid input.cell { width: 100%; box-sizing: border-box; border: none; text-overflow: ellipsis; }
table.grid td.col-name input.cell { font-weight: bold; }
table.grid input.filter { width: 100%; box-sizing: border-box; }
td[title] { cursor: help; }
.pager { margin: 0.5em 0; }
.pager a, .pager span { margin-right: 1em; }
#button-flex { display: flex; gap: 1em; margin: 1em 0; }
#show-graphs svg text { font-family: monospace; font-size: 12px; }
#placeholder.information { color: #1a5e1a; }
#placeholder.warning { color: #8a6d00; }
#placeholder.error { color: #a30000; font-weight: bold; }
"#;

/// Wrap rendered sections in the page skeleton: heading, grid, buttons,
/// chart and status line, in that order.
pub fn page_shell(sections: &PageSections) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(PAGE_TITLE)));
    html.push_str(&format!(
        "<style>{STYLE}table.grid th, table.grid td {{ width: {CELL_WIDTH_PX}px; max-width: {CELL_WIDTH_PX}px; }}\n</style>\n"
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div id=\"{DIV_HEADING}\"><h1>{}</h1></div>\n",
        escape(PAGE_TITLE)
    ));
    html.push_str(&format!(
        "<div id=\"{DIV_DATATABLE}\">\n{}</div>\n",
        sections.grid
    ));
    html.push_str(&format!("<div id=\"{DIV_BUTTONS}\">\n{}</div>\n", sections.buttons));
    html.push_str(&format!("<div id=\"{DIV_GRAPHS}\">\n{}</div>\n", sections.chart));
    html.push_str(&sections.status);
    html.push_str("</body>\n</html>\n");
    html
}

/// Pre-rendered HTML for each region of the page.
#[derive(Debug, Default)]
pub struct PageSections {
    pub grid: String,
    pub buttons: String,
    pub chart: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_land_in_their_divs_in_order() {
        let html = page_shell(&PageSections {
            grid: "GRID".to_string(),
            buttons: "BUTTONS".to_string(),
            chart: "CHART".to_string(),
            status: "STATUS".to_string(),
        });
        let heading = html.find("id=\"heading\"").unwrap();
        let grid = html.find("GRID").unwrap();
        let buttons = html.find("BUTTONS").unwrap();
        let chart = html.find("CHART").unwrap();
        let status = html.find("STATUS").unwrap();
        assert!(heading < grid && grid < buttons && buttons < chart && chart < status);
        assert!(html.contains("<title>Recipe Dashboard</title>"));
        assert!(html.contains("width: 180px"));
    }
}
