use crate::config::patterns::PatternList;
use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.start_pages.is_empty() {
        return Err(ConfigError::Validation(
            "start_pages must contain at least one URL".to_string(),
        ));
    }

    for page in &config.start_pages {
        validate_start_page(page)?;
    }

    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout_seconds must be > 0".to_string(),
        ));
    }

    if config.parallelism == 0 {
        return Err(ConfigError::Validation(
            "parallelism must be positive, or negative to use all available cores".to_string(),
        ));
    }

    PatternList::compile(&config.ignored_urls)?;
    PatternList::compile(&config.ignored_words)?;

    Ok(())
}

/// Start pages must be absolute http(s) or file URLs
fn validate_start_page(page: &str) -> Result<(), ConfigError> {
    let url = Url::parse(page)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e)))?;

    match url.scheme() {
        "http" | "https" | "file" => Ok(()),
        other => Err(ConfigError::Validation(format!(
            "Start page '{}' uses unsupported scheme '{}'",
            page, other
        ))),
    }
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.result_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "result_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.profile_output_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "profile_output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
