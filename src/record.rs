//! Wire shapes handed to the transport layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Source tag stamped on every web-vitals record
pub const WEB_VITAL_SOURCE: &str = "web-vital";

/// Suffix appended to the caller-supplied source of a log event
pub const LOG_SOURCE_SUFFIX: &str = "-log";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Environment/region/source tags attached to a log event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformMetadata {
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub source: String,
}

/// A single log line as buffered by the logger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub fields: Map<String, JsonValue>,
    #[serde(rename = "_time")]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformMetadata>,
    pub source: String,
}

impl LogEvent {
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        time: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Map::new(),
            time: time.into(),
            request: None,
            platform: None,
            source: source.into(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_request(mut self, request: RequestReport) -> Self {
        self.request = Some(request);
        self
    }
}

/// Snapshot of an inbound request taken when the report is generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestReport {
    pub start_time: i64,
    pub path: String,
    pub method: String,
    pub host: String,
    pub user_agent: String,
    pub scheme: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebVitalPlatform {
    pub environment: String,
    pub source: String,
}

/// Envelope around one reported web-vitals metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVitalRecord<T = JsonValue> {
    pub web_vital: T,
    #[serde(rename = "_time")]
    pub time: i64,
    pub platform: WebVitalPlatform,
}
