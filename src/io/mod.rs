pub mod config_io;
pub mod lock;
pub mod project_io;
pub mod record_store;
pub mod state;
pub mod watcher;
