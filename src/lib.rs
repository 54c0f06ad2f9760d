pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod state;
pub mod stats;
pub mod store;
pub mod summary;
pub mod ui;
pub mod undo;

pub use app::router;
pub use config::Config;
pub use ledger::{Ledger, LedgerAction};
pub use state::AppState;
pub use store::{JsonFileStore, LedgerStore, MemoryStore, StoreError};
