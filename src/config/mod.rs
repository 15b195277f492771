//! Configuration module
//!
//! Loads and validates the optional TOML configuration file. All settings
//! default to live English Wikipedia, so a config file is only needed to
//! change the page budget, data directory, or fetch target.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_or_default};
pub use types::{Config, CrawlConfig, FetcherConfig, OutputConfig};
pub use validation::validate;
