pub mod column;
pub mod config;
pub mod id;
pub mod project;
pub mod record;

pub use column::*;
pub use config::*;
pub use id::*;
pub use project::*;
pub use record::*;
