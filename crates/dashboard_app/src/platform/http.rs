use std::io::Read;

use dashboard_core::{export_csv, GridQuery, Msg};
use dashboard_logging::{dash_info, dash_warn};
use tiny_http::{Header, Method, Request, Response};

use super::app::Dashboard;
use super::query::{grid_location, parse_grid_query, GridForm};
use super::ui::constants::{
    EXPORT_FILENAME, ROUTE_ADD_ROW, ROUTE_EXPORT, ROUTE_GRID, ROUTE_PAGE, ROUTE_SAVE,
};
use super::ui::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Fresh page: reload from the store, then render.
    Page,
    /// Render the current snapshot without reloading.
    Grid,
    Export,
    AddRow,
    DeleteRow(usize),
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    NotFound,
    MethodNotAllowed,
}

pub fn route(method: &Method, path: &str) -> Result<Route, RouteError> {
    let (route, expected) = match path {
        ROUTE_PAGE => (Route::Page, Method::Get),
        ROUTE_GRID => (Route::Grid, Method::Get),
        ROUTE_EXPORT => (Route::Export, Method::Get),
        ROUTE_ADD_ROW => (Route::AddRow, Method::Post),
        ROUTE_SAVE => (Route::Save, Method::Post),
        _ => match parse_delete_path(path) {
            Some(row) => (Route::DeleteRow(row), Method::Post),
            None => return Err(RouteError::NotFound),
        },
    };
    if *method == expected {
        Ok(route)
    } else {
        Err(RouteError::MethodNotAllowed)
    }
}

fn parse_delete_path(path: &str) -> Option<usize> {
    path.strip_prefix("/rows/")?
        .strip_suffix("/delete")?
        .parse()
        .ok()
}

/// Everything needed to answer a request, independent of the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
    pub attachment: Option<&'static str>,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
            attachment: None,
        }
    }

    fn csv(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/csv; charset=utf-8",
            body,
            location: None,
            attachment: Some(EXPORT_FILENAME),
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
            location: None,
            attachment: None,
        }
    }

    fn see_other(location: String) -> Self {
        Self {
            location: Some(location),
            ..Self::text(303, "")
        }
    }

    fn into_response(self) -> Response<std::io::Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes()).with_status_code(self.status);
        let mut headers = vec![create_header(b"Content-Type", self.content_type.as_bytes())];
        if let Some(location) = &self.location {
            headers.push(create_header(b"Location", location.as_bytes()));
        }
        if let Some(filename) = self.attachment {
            let disposition = format!("attachment; filename=\"{filename}\"");
            headers.push(create_header(b"Content-Disposition", disposition.as_bytes()));
        }
        for header in headers.into_iter().flatten() {
            response.add_header(header);
        }
        response
    }
}

/// Helper to create HTTP headers, returning None if the bytes are invalid
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

pub fn serve(dashboard: &mut Dashboard, mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => handle(dashboard, &method, &url, &body),
        Err(err) => Reply::text(400, format!("unreadable request body: {err}")),
    };

    dash_info!("{} {} -> {}", method, url, reply.status);
    if let Err(err) = request.respond(reply.into_response()) {
        dash_warn!("Failed to send response for {} {}: {}", method, url, err);
    }
}

pub fn handle(dashboard: &mut Dashboard, method: &Method, url: &str, body: &str) -> Reply {
    let (path, raw_query) = url.split_once('?').unwrap_or((url, ""));
    let route = match route(method, path) {
        Ok(route) => route,
        Err(RouteError::NotFound) => return Reply::text(404, format!("no such page: {path}")),
        Err(RouteError::MethodNotAllowed) => {
            return Reply::text(405, format!("{method} is not allowed on {path}"))
        }
    };
    let query = match parse_grid_query(raw_query) {
        Ok(query) => query,
        Err(err) => return Reply::text(400, err),
    };

    match route {
        Route::Page => {
            dashboard.dispatch(Msg::PageLoaded);
            Reply::html(render::render_page(&dashboard.view(&query)))
        }
        Route::Grid => Reply::html(render::render_page(&dashboard.view(&query))),
        Route::Export => {
            let rows = dashboard.state().snapshot().rows();
            Reply::csv(export_csv(rows, &query))
        }
        Route::AddRow => submit_grid(dashboard, body, &query, |form| Msg::AddRowClicked {
            n_clicks: form.n_clicks,
        }),
        Route::DeleteRow(row) => submit_grid(dashboard, body, &query, |_| Msg::RowDeleted { row }),
        Route::Save => submit_grid(dashboard, body, &query, |_| Msg::SaveClicked),
    }
}

/// Apply the posted cell edits, then the button's action, then send the
/// browser back to the grid it came from.
fn submit_grid(
    dashboard: &mut Dashboard,
    body: &str,
    query: &GridQuery,
    action: impl FnOnce(&GridForm) -> Msg,
) -> Reply {
    let form = match GridForm::parse(body) {
        Ok(form) => form,
        Err(err) => return Reply::text(400, err),
    };
    let action = action(&form);
    dashboard.dispatch_all(form.edits);
    dashboard.dispatch(action);
    Reply::see_other(grid_location(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{Column, FieldValue, Record, SaveStatus};
    use dashboard_store::{FaultMode, MemoryStore};

    fn soup() -> Record {
        Record {
            name: Some(FieldValue::from("Soup")),
            category: Some(FieldValue::from("uncategorized")),
            rating: Some(FieldValue::from(4)),
            ..Record::default()
        }
    }

    fn dashboard_with(records: &[Record]) -> Dashboard {
        dashboard_logging::initialize_for_tests();
        Dashboard::new(Box::new(MemoryStore::with_records(records)), 10)
    }

    #[test]
    fn routes_resolve() {
        assert_eq!(route(&Method::Get, "/"), Ok(Route::Page));
        assert_eq!(route(&Method::Get, "/grid"), Ok(Route::Grid));
        assert_eq!(route(&Method::Get, "/export.csv"), Ok(Route::Export));
        assert_eq!(route(&Method::Post, "/rows/add"), Ok(Route::AddRow));
        assert_eq!(route(&Method::Post, "/rows/12/delete"), Ok(Route::DeleteRow(12)));
        assert_eq!(route(&Method::Post, "/save"), Ok(Route::Save));
        assert_eq!(route(&Method::Get, "/save"), Err(RouteError::MethodNotAllowed));
        assert_eq!(route(&Method::Post, "/rows/x/delete"), Err(RouteError::NotFound));
        assert_eq!(route(&Method::Get, "/favicon.ico"), Err(RouteError::NotFound));
    }

    #[test]
    fn page_load_renders_records() {
        let mut dashboard = dashboard_with(&[soup()]);
        let reply = handle(&mut dashboard, &Method::Get, "/", "");

        assert_eq!(reply.status, 200);
        assert!(reply.content_type.starts_with("text/html"));
        assert!(reply.body.contains("value=\"Soup\""));
        assert!(reply.body.contains("No categorized ratings to plot"));
    }

    #[test]
    fn add_row_redirects_back_to_grid_with_query() {
        let mut dashboard = dashboard_with(&[soup()]);
        handle(&mut dashboard, &Method::Get, "/", "");

        let reply = handle(
            &mut dashboard,
            &Method::Post,
            "/rows/add?filter.name=so",
            "n_clicks=1&cell.0.name=Soup",
        );
        assert_eq!(reply.status, 303);
        assert_eq!(reply.location.as_deref(), Some("/grid?filter.name=so"));
        assert_eq!(dashboard.state().snapshot().len(), 2);

        handle(&mut dashboard, &Method::Post, "/rows/add", "n_clicks=0");
        assert_eq!(dashboard.state().snapshot().len(), 2);
    }

    #[test]
    fn edits_then_save_reach_the_store() {
        let mut dashboard = dashboard_with(&[soup()]);
        handle(&mut dashboard, &Method::Get, "/", "");

        let reply = handle(
            &mut dashboard,
            &Method::Post,
            "/save",
            "n_clicks=0&cell.0.name=Pumpkin+Soup&cell.0.rating=4",
        );
        assert_eq!(reply.status, 303);
        assert!(matches!(
            dashboard.state().save_status(),
            Some(SaveStatus::Saved { count: 1, .. })
        ));

        handle(&mut dashboard, &Method::Get, "/", "");
        let row = &dashboard.state().snapshot().rows()[0];
        assert_eq!(row.display(Column::Name), "Pumpkin Soup");
        assert_eq!(row.rating, Some(FieldValue::from(4)));
    }

    #[test]
    fn delete_then_export() {
        let mut stew = soup();
        stew.name = Some(FieldValue::from("Stew"));
        let mut dashboard = dashboard_with(&[soup(), stew]);
        handle(&mut dashboard, &Method::Get, "/", "");

        handle(&mut dashboard, &Method::Post, "/rows/0/delete", "n_clicks=0");
        let reply = handle(&mut dashboard, &Method::Get, "/export.csv", "");

        assert_eq!(reply.attachment, Some("recipes.csv"));
        let lines: Vec<_> = reply.body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Stew,"));
    }

    #[test]
    fn unreachable_store_renders_error_state() {
        dashboard_logging::initialize_for_tests();
        let mut store = MemoryStore::with_records(&[soup()]);
        store.set_fault(FaultMode::Unreachable);
        let mut dashboard = Dashboard::new(Box::new(store), 10);

        let reply = handle(&mut dashboard, &Method::Get, "/", "");
        assert_eq!(reply.status, 200);
        assert!(reply.body.contains("Could not load records"));
        assert!(reply.body.contains("memory store marked unreachable"));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let mut dashboard = dashboard_with(&[soup()]);
        let reply = handle(&mut dashboard, &Method::Post, "/save", "cell.0.name=%FF");
        assert_eq!(reply.status, 400);
    }
}
