//! Console appender implementation

use crate::core::{
    Appender, LogEntry, LogLevel, LoggerError, LoggingConfig, OutputFormat, Result,
    TimestampFormat,
};
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    /// Plain text, standard timestamps, no colours
    pub fn new() -> Self {
        Self {
            use_colors: false,
            timestamp_format: TimestampFormat::standard(),
            output_format: OutputFormat::Text,
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            use_colors: config.use_colors,
            timestamp_format: config.timestamp_format.clone(),
            output_format: config.output_format.clone(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use logger_registry::appenders::ConsoleAppender;
    /// use logger_registry::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render one entry the way it is printed
    pub fn render(&self, entry: &LogEntry) -> String {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.format_colored(entry),
            _ => self.output_format.format(entry, &self.timestamp_format),
        }
    }

    fn format_colored(&self, entry: &LogEntry) -> String {
        let base = format!(
            "{} - {} - {} - {}",
            self.timestamp_format.format(&entry.timestamp),
            entry.logger,
            entry.level.to_str().color(entry.level.color_code()),
            entry.message
        );

        match entry.context {
            Some(ref context) if !context.is_empty() => {
                format!("{} {}", base, context.format_fields())
            }
            _ => base,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry);

        // Route Error and Fatal levels to stderr, others to stdout
        match entry.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout()
            .flush()
            .map_err(|e| {
                LoggerError::io_operation("flushing stdout", "console sink unavailable", e)
            })?;
        std::io::stderr()
            .flush()
            .map_err(|e| {
                LoggerError::io_operation("flushing stderr", "console sink unavailable", e)
            })?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
