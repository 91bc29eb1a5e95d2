use chrono::Local;
use dashboard_core::{Effect, Msg};
use dashboard_logging::{dash_error, dash_info};
use dashboard_store::RecordStore;

/// Executes effects against the store. Calls block until the store answers;
/// the outcome comes back as the next message to dispatch.
pub struct EffectRunner {
    store: Box<dyn RecordStore>,
}

impl EffectRunner {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        dash_info!("Using store {}", store.describe());
        Self { store }
    }

    pub fn run(&mut self, effect: Effect) -> Msg {
        match effect {
            Effect::FetchAll => match self.store.fetch_all() {
                Ok(records) => {
                    dash_info!(
                        "Loaded {} records from {}",
                        records.len(),
                        self.store.describe()
                    );
                    Msg::RecordsLoaded(records)
                }
                Err(err) => {
                    dash_error!("Loading from {} failed: {}", self.store.describe(), err);
                    Msg::LoadFailed(err.to_string())
                }
            },
            Effect::ReplaceAll { records } => {
                dash_info!(
                    "Replacing collection {} with {} records",
                    self.store.describe(),
                    records.len()
                );
                match self.store.replace_all(&records) {
                    Ok(count) => Msg::SaveCompleted {
                        count,
                        at: Local::now().format("%H:%M:%S").to_string(),
                    },
                    Err(err) => {
                        dash_error!("Saving to {} failed: {}", self.store.describe(), err);
                        Msg::SaveFailed(err.to_string())
                    }
                }
            }
        }
    }
}
