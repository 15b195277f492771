//! Configuration validation
//!
//! Rejects configurations that would fail deep inside a crawl, before any
//! store is opened or mutated.

use crate::config::Config;
use crate::ConfigError;
use url::Url;

/// Validates a loaded configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawl.page_budget == 0 {
        return Err(ConfigError::Validation(
            "crawl.page-budget must be positive".to_string(),
        ));
    }

    let base = Url::parse(&config.fetcher.base_url).map_err(|e| {
        ConfigError::Validation(format!(
            "fetcher.base-url is not a valid URL: {}",
            e
        ))
    })?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "fetcher.base-url must be http or https, got {}",
            base.scheme()
        )));
    }

    if config.fetcher.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetcher.user-agent must not be empty".to_string(),
        ));
    }

    if config.fetcher.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher.request-timeout-secs must be positive".to_string(),
        ));
    }

    if config.output.data_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.data-dir must not be empty".to_string(),
        ));
    }

    Ok(())
}
