use crate::record::Record;

/// Side effects requested by [`update`](crate::update); the app runs them
/// against the store and feeds the outcome back as a [`Msg`](crate::Msg).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll,
    ReplaceAll { records: Vec<Record> },
}
