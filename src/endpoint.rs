/// Kind of telemetry payload being sent to Axiom
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointType {
    Logs,
    WebVitals,
}

impl EndpointType {
    /// Name used in log fields and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Logs => "logs",
            EndpointType::WebVitals => "webVitals",
        }
    }

    /// Sub-path under the local proxy route. Both types share one route.
    pub fn proxy_sub_path(&self) -> &'static str {
        match self {
            EndpointType::Logs | EndpointType::WebVitals => "/logs",
        }
    }

    /// All supported endpoint types
    pub fn all() -> &'static [EndpointType] {
        &[EndpointType::Logs, EndpointType::WebVitals]
    }
}

impl std::fmt::Display for EndpointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
