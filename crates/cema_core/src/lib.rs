//! Core domain logic for the CEMA health records dashboard.
//! This crate is the single source of truth for record semantics:
//! the client/program model, the records store with its persistence
//! mirror, and the pure derived views the dashboard renders from.

pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod views;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientId, Gender};
pub use model::program::{Program, ProgramId};
pub use model::validate::{ClientDraft, ProgramDraft, ValidationError};
pub use storage::sqlite::{open_mirror, open_mirror_in_memory, SqliteStorage};
pub use storage::{
    MemoryStorage, StorageAdapter, StorageError, StorageResult, CLIENTS_KEY, PROGRAMS_KEY,
};
pub use store::{PersistOutcome, RecordsStore, Snapshot, StoreConfig, StoreRejection};
pub use views::{
    dashboard_summary, enrolled_programs, filter_clients, new_this_week, program_distribution,
    recent_clients, total_enrollments, DashboardSummary, ProgramFilter, ProgramStat,
    RECENT_CLIENTS_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
