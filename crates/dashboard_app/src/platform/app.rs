use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use clap::Parser;
use dashboard_core::{update, AppState, GridQuery, Msg};
use dashboard_logging::{dash_debug, dash_info, dash_warn};
use dashboard_store::{MemoryStore, RecordStore, SqliteStore};
use tiny_http::Server;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{http, logging};

/// Command-line switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Parser)]
#[command(
    name = "dashboard_app",
    about = "Editable recipe grid and rating chart served over HTTP",
    after_help = "Settings are read from $DASHBOARD_CONFIG, else ./dashboard.ron."
)]
pub struct Options {
    #[arg(short, long, visible_alias = "debug", help = "Log at debug level")]
    pub verbose: bool,
    #[arg(
        long,
        help = "Keep the collection in process memory instead of the database file"
    )]
    pub memory: bool,
}

pub fn run_app(options: Options) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::initialize(config.log, options.verbose);
    config.log_summary();

    let store: Box<dyn RecordStore> = if options.memory {
        Box::new(MemoryStore::new())
    } else {
        Box::new(
            SqliteStore::open(&config.store_settings())
                .with_context(|| format!("opening {}", config.database.path.display()))?,
        )
    };
    let mut dashboard = Dashboard::new(store, config.page_size);

    let address = config.bind_address();
    let server =
        Server::http(&address).map_err(|err| anyhow!("could not listen on {address}: {err}"))?;
    dash_info!("Dashboard listening on http://{}/", address);

    // One handler at a time: requests and refresh ticks share this loop.
    let mut schedule = RefreshSchedule::new(config.refresh_interval(), Instant::now());
    if schedule.is_disabled() {
        dash_warn!(
            "Refresh interval of {}s is out of range; periodic reload disabled",
            config.refresh_interval_secs
        );
    }
    loop {
        let received = match schedule.wait(Instant::now()) {
            Some(wait) => server.recv_timeout(wait),
            None => server.recv().map(Some),
        };
        match received {
            Ok(Some(request)) => http::serve(&mut dashboard, request),
            Ok(None) => {}
            Err(err) => dash_warn!("Failed to receive request: {}", err),
        }

        if let Some(n_intervals) = schedule.tick(Instant::now()) {
            dashboard.dispatch(Msg::IntervalElapsed { n_intervals });
        }
    }
}

/// Periodic reload timing. An interval too large to add to the clock turns
/// refreshing off.
#[derive(Debug, Clone, Copy)]
struct RefreshSchedule {
    interval: Duration,
    next: Option<Instant>,
    n_intervals: u64,
}

impl RefreshSchedule {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now.checked_add(interval),
            n_intervals: 0,
        }
    }

    fn is_disabled(&self) -> bool {
        self.next.is_none()
    }

    /// Time left until the next tick; `None` means wait indefinitely.
    fn wait(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Advance past a due tick, returning its sequence number.
    fn tick(&mut self, now: Instant) -> Option<u64> {
        let next = self.next.filter(|next| now >= *next)?;
        self.n_intervals += 1;
        self.next = next.checked_add(self.interval);
        Some(self.n_intervals)
    }
}

/// Owns the application state and routes every message through `update`,
/// running the resulting effects until none are left.
pub struct Dashboard {
    state: AppState,
    runner: EffectRunner,
}

impl Dashboard {
    pub fn new(store: Box<dyn RecordStore>, page_size: usize) -> Self {
        Self {
            state: AppState::with_page_size(page_size),
            runner: EffectRunner::new(store),
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            dash_debug!("Dispatch {}", msg_label(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                inbox.push_back(self.runner.run(effect));
            }
        }
    }

    pub fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = Msg>) {
        for msg in msgs {
            self.dispatch(msg);
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self, query: &GridQuery) -> dashboard_core::AppViewModel {
        self.state.view(query)
    }
}

fn msg_label(msg: &Msg) -> String {
    match msg {
        Msg::PageLoaded => "PageLoaded".to_string(),
        Msg::IntervalElapsed { n_intervals } => format!("IntervalElapsed #{n_intervals}"),
        Msg::RecordsLoaded(records) => format!("RecordsLoaded ({} records)", records.len()),
        Msg::LoadFailed(err) => format!("LoadFailed ({err})"),
        Msg::AddRowClicked { n_clicks } => format!("AddRowClicked n_clicks={n_clicks}"),
        Msg::RowDeleted { row } => format!("RowDeleted row={row}"),
        Msg::CellEdited { row, column, .. } => format!("CellEdited row={row} column={column}"),
        Msg::SaveClicked => "SaveClicked".to_string(),
        Msg::SaveCompleted { count, .. } => format!("SaveCompleted ({count} records)"),
        Msg::SaveFailed(err) => format!("SaveFailed ({err})"),
        Msg::NoOp => "NoOp".to_string(),
    }
}
