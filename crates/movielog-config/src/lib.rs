pub mod config;
pub mod paths;

pub use config::{Config, OmdbConfig, SearchConfig};
pub use paths::PathManager;
