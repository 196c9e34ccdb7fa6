pub mod cli;
pub mod config;
pub mod executor;
pub mod forwarding;
pub mod registry;
pub mod ui;
pub mod utils;

pub use cli::Cli;
pub use config::{ConfigDocument, ConfigStore, HostBlock};
pub use registry::HostRegistry;
