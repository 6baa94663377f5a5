//! Output format configuration for log entries
//!
//! - Text: `timestamp - logger - LEVEL - message` (default)
//! - Json: one JSON object per entry
//! - Logfmt: key=value pairs

use super::log_context::FieldValue;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Example: `2025-01-08 10:30:45 - PaymentService - INFO - Processing payment`
    #[default]
    Text,

    /// Example: `{"timestamp":"...","logger":"PaymentService","level":"INFO","message":"...","fields":{...}}`
    ///
    /// Context fields are nested under `fields` so they cannot shadow the
    /// entry's own keys.
    Json,

    /// Example: `timestamp=... logger=PaymentService level=INFO message="..."`
    Logfmt,
}

impl OutputFormat {
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp_format),
        }
    }

    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let base = format!(
            "{} - {} - {} - {}",
            timestamp_format.format(&entry.timestamp),
            entry.logger,
            entry.level.to_str(),
            entry.message
        );

        match entry.context {
            Some(ref context) if !context.is_empty() => {
                format!("{} {}", base, context.format_fields())
            }
            _ => base,
        }
    }

    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        let timestamp = match timestamp_format {
            TimestampFormat::Unix => serde_json::Value::Number(entry.timestamp.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(entry.timestamp.timestamp_millis().into())
            }
            _ => serde_json::Value::String(timestamp_format.format(&entry.timestamp)),
        };
        json_obj.insert("timestamp".to_string(), timestamp);
        json_obj.insert(
            "logger".to_string(),
            serde_json::Value::String(entry.logger.clone()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        json_obj.insert(
            "thread_id".to_string(),
            serde_json::Value::String(entry.thread_id.clone()),
        );
        if let Some(ref name) = entry.thread_name {
            json_obj.insert(
                "thread_name".to_string(),
                serde_json::Value::String(name.clone()),
            );
        }

        if let Some(context) = entry.context.as_ref().filter(|c| !c.is_empty()) {
            let fields = context
                .fields()
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json_value()))
                .collect();
            json_obj.insert("fields".to_string(), serde_json::Value::Object(fields));
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    fn format_logfmt(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = vec![
            format!(
                "timestamp={}",
                escape_logfmt_value(&timestamp_format.format(&entry.timestamp))
            ),
            format!("logger={}", escape_logfmt_value(&entry.logger)),
            format!("level={}", entry.level.to_str()),
            // message is always quoted
            format!("message={}", quote_logfmt_value(&entry.message)),
        ];

        if let Some(ref context) = entry.context {
            for (key, value) in context.fields() {
                let formatted_value = match value {
                    FieldValue::String(s) => quote_logfmt_value(s),
                    other => other.to_string(),
                };
                parts.push(format!("{}={}", escape_logfmt_key(key), formatted_value));
            }
        }

        parts.join(" ")
    }
}

fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn escape_logfmt_value(value: &str) -> String {
    if value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
