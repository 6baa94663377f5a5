//! Root logging configuration
//!
//! Applied with [`LoggerRegistry::configure`](crate::LoggerRegistry::configure).

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};

/// HTTP and TLS client stacks that are chatty at `Info`
pub const DEFAULT_QUIET_LOGGERS: &[&str] = &["hyper", "h2", "reqwest", "rustls", "tower"];

/// # Example
///
/// ```
/// use logger_registry::{LogLevel, LoggingConfig};
///
/// let config = LoggingConfig::from_json(r#"{ "level": "Debug", "use_colors": true }"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.quiet_level, LogLevel::Warn);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Root level
    pub level: LogLevel,
    pub timestamp_format: TimestampFormat,
    pub output_format: OutputFormat,
    pub use_colors: bool,
    /// Loggers pinned to `quiet_level`, together with their descendants
    pub quiet_loggers: Vec<String>,
    pub quiet_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            timestamp_format: TimestampFormat::standard(),
            output_format: OutputFormat::Text,
            use_colors: false,
            quiet_loggers: DEFAULT_QUIET_LOGGERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            quiet_level: LogLevel::Warn,
        }
    }
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the root level from a name; unknown names select `Info`
    #[must_use]
    pub fn with_level_name(mut self, name: &str) -> Self {
        self.level = LogLevel::parse_or_default(name);
        self
    }

    #[must_use]
    pub fn with_quiet_logger(mut self, name: impl Into<String>) -> Self {
        self.quiet_loggers.push(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.quiet_loggers.iter().any(|name| name.trim().is_empty()) {
            return Err(LoggerError::config(
                "LoggingConfig",
                "quiet_loggers contains an empty name",
            ));
        }
        self.timestamp_format.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.timestamp_format, TimestampFormat::standard());
        assert_eq!(config.quiet_loggers.len(), DEFAULT_QUIET_LOGGERS.len());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_level_name_is_lenient() {
        assert_eq!(
            LoggingConfig::default().with_level_name("WARNING").level,
            LogLevel::Warn
        );
        assert_eq!(
            LoggingConfig::default().with_level_name("shouty").level,
            LogLevel::Info
        );
    }

    #[test]
    fn test_from_json_overrides() {
        let config = LoggingConfig::from_json(
            r#"{
                "level": "Error",
                "output_format": "Json",
                "quiet_loggers": ["sqlx"],
                "quiet_level": "Error"
            }"#,
        )
        .unwrap();

        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.quiet_loggers, vec!["sqlx"]);
        assert!(!config.use_colors);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            LoggingConfig::from_json("{ not json"),
            Err(LoggerError::JsonError(_))
        ));
        assert!(matches!(
            LoggingConfig::from_json(r#"{ "quiet_loggers": ["  "] }"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            LoggingConfig::from_json(r#"{ "timestamp_format": { "Custom": "" } }"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            LoggingConfig::from_json(r#"{ "timestamp_format": { "Custom": "%Q" } }"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
