mod app;
mod config;
mod effects;
mod http;
mod logging;
mod query;
mod ui;

pub use app::{run_app, Options};
