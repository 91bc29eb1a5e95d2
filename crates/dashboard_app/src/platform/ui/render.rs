use dashboard_core::{AppViewModel, GridPage, GridQuery, GridView, Severity, StatusLine};

use super::chart::render_box_plot;
use super::constants::*;
use super::escape;
use super::layout::{page_shell, PageSections};
use crate::platform::query::{cell_field_name, filter_field_name, with_query};

pub fn render_page(view: &AppViewModel) -> String {
    let query = match &view.grid {
        GridView::Ready(page) => page.query.clone(),
        GridView::Loading | GridView::Unavailable { .. } => GridQuery::default(),
    };

    page_shell(&PageSections {
        grid: render_grid(view),
        buttons: render_buttons(&query),
        chart: render_box_plot(&view.chart),
        status: render_status(view.status.as_ref()),
    })
}

fn render_grid(view: &AppViewModel) -> String {
    // The grid form exists in every state so the buttons always have a
    // form to submit.
    let open_form = format!(
        "<form id=\"{FORM_GRID}\" method=\"post\">\n\
         <input type=\"hidden\" name=\"{FIELD_N_CLICKS}\" value=\"{}\">\n",
        view.add_row_clicks + 1
    );
    let mut html = format!(
        "<form id=\"{FORM_FILTER}\" method=\"get\" action=\"{ROUTE_GRID}\"></form>\n{open_form}"
    );

    match &view.grid {
        GridView::Loading => html.push_str("<p class=\"loading\">Loading records...</p>\n"),
        GridView::Unavailable { error } => html.push_str(&format!(
            "<p class=\"load-error\">Could not load records: {}</p>\n\
             <p><a href=\"{ROUTE_PAGE}\">Retry</a></p>\n",
            escape(error)
        )),
        GridView::Ready(page) => html.push_str(&render_table(page)),
    }

    html.push_str("</form>\n");
    html
}

fn render_table(page: &GridPage) -> String {
    let mut html = String::from("<table class=\"grid\">\n<thead>\n<tr>");
    for column in &page.columns {
        let hidden = if column.is_hidden() { " hidden" } else { "" };
        html.push_str(&format!("<th{hidden}>{}</th>", escape(column.name())));
    }
    html.push_str("<th></th></tr>\n<tr class=\"filters\">");
    for column in &page.columns {
        if column.is_hidden() {
            html.push_str("<th hidden></th>");
            continue;
        }
        let raw = page
            .query
            .filter_for(*column)
            .map(|f| f.raw.as_str())
            .unwrap_or("");
        html.push_str(&format!(
            "<th><input class=\"filter\" form=\"{FORM_FILTER}\" name=\"{}\" value=\"{}\" placeholder=\"filter\"></th>",
            filter_field_name(*column),
            escape(raw)
        ));
    }
    html.push_str(&format!(
        "<th><button type=\"submit\" form=\"{FORM_FILTER}\">Apply filters</button></th></tr>\n</thead>\n<tbody>\n"
    ));

    for row in &page.rows {
        html.push_str("<tr>");
        for cell in &row.cells {
            if cell.hidden {
                html.push_str(&format!("<td hidden>{}</td>", escape(&cell.text)));
                continue;
            }
            let title = cell
                .tooltip
                .as_deref()
                .map(|t| format!(" title=\"{}\"", escape(t)))
                .unwrap_or_default();
            html.push_str(&format!(
                "<td class=\"col-{}\"{title}><input class=\"cell\" name=\"{}\" value=\"{}\"></td>",
                cell.column.name(),
                cell_field_name(row.index, cell.column),
                escape(&cell.text)
            ));
        }
        html.push_str(&format!(
            "<td><button type=\"submit\" formaction=\"{}\">Delete</button></td></tr>\n",
            escape(&with_query(&delete_row_route(row.index), &page.query))
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(&render_pager(page));
    html
}

fn render_pager(page: &GridPage) -> String {
    let link = |target: usize, label: &str| {
        let query = GridQuery {
            filters: page.query.filters.clone(),
            page: target,
        };
        format!(
            "<a href=\"{}\">{label}</a>",
            escape(&with_query(ROUTE_GRID, &query))
        )
    };

    let mut html = String::from("<div class=\"pager\">");
    if page.page > 0 {
        html.push_str(&link(page.page - 1, "Previous"));
    }
    html.push_str(&format!(
        "<span>Page {} of {}</span>",
        page.page + 1,
        page.page_count
    ));
    if page.page + 1 < page.page_count {
        html.push_str(&link(page.page + 1, "Next"));
    }
    html.push_str(&format!(
        "<span>{} of {} rows</span><a href=\"{}\">Export CSV</a></div>\n",
        page.matching_rows,
        page.total_rows,
        escape(&with_query(ROUTE_EXPORT, &page.query))
    ));
    html
}

fn render_buttons(query: &GridQuery) -> String {
    format!(
        "<button type=\"submit\" form=\"{FORM_GRID}\" formaction=\"{}\" \
         title=\"Replaces every record in the collection with the grid contents\">Save to Database</button>\n\
         <button type=\"submit\" form=\"{FORM_GRID}\" formaction=\"{}\">Add Row</button>\n",
        escape(&with_query(ROUTE_SAVE, query)),
        escape(&with_query(ROUTE_ADD_ROW, query))
    )
}

fn render_status(status: Option<&StatusLine>) -> String {
    match status {
        None => format!("<div id=\"{DIV_STATUS}\" hidden></div>\n"),
        Some(line) => {
            let class = match line.severity {
                Severity::Information => "information",
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            format!(
                "<div id=\"{DIV_STATUS}\" class=\"{class}\">{}</div>\n",
                escape(&line.text)
            )
        }
    }
}
