pub mod app;
pub mod attachments;
pub mod config;
pub mod errors;
pub mod export;
pub mod flocks;
pub mod handlers;
pub mod ids;
pub mod ledger;
pub mod models;
pub mod notes;
pub mod schedule;
pub mod seed;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
