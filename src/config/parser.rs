use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads a configuration if a path was given, defaults otherwise
///
/// The defaults pass validation by construction, but are checked anyway so
/// a drifted default can never sneak past the same gate user files face.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawl]
page-budget = 25

[fetcher]
base-url = "https://en.wikipedia.org"
user-agent = "TestAgent/1.0"
request-timeout-secs = 5

[output]
data-dir = "./graphs"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.page_budget, 25);
        assert_eq!(config.fetcher.user_agent, "TestAgent/1.0");
        assert_eq!(config.output.data_dir, "./graphs");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("[crawl]\npage-budget = 10\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.page_budget, 10);
        assert_eq!(config.fetcher.base_url, "https://en.wikipedia.org");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = create_temp_config("[crawl]\nmax-depth = 3\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let file = create_temp_config("[crawl]\npage-budget = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(crate::ConfigError::Validation(_))));
    }

    #[test]
    fn test_no_path_yields_defaults() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.crawl.page_budget, 500);
    }
}
