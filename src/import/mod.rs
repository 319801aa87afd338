//! Import sessions: configuration, progress and orchestration

pub mod config;
pub mod progress;
pub mod session;

pub use config::ImportConfig;
pub use progress::{LogProgress, NoProgress, Progress, Stage};
pub use session::{ImportReport, ImportSession, GROUPS_DIRNAME, SCRIPT_FILENAME};
