//! Platform adapters: endpoint resolution and record shaping per deployment target.

use tracing::debug;

use crate::clock::now_millis;
use crate::config::PlatformConfig;
use crate::endpoint::EndpointType;
use crate::record::{
    LogEvent, PlatformMetadata, RequestReport, WebVitalPlatform, WebVitalRecord,
    LOG_SOURCE_SUFFIX, WEB_VITAL_SOURCE,
};
use crate::request::{get_header_or_default, RequestLike, RequestMetaError};

/// Capabilities every platform adapter provides.
///
/// Adapters are chosen once at startup and shared across request handlers, so
/// implementations must only read their configuration.
pub trait Provider: Send + Sync {
    fn config(&self) -> &PlatformConfig;

    /// Whether the platform reports edge requests separately.
    fn should_send_edge_report(&self) -> bool {
        self.config().should_send_edge_report
    }

    fn is_env_vars_set(&self) -> bool {
        self.config().is_env_vars_set()
    }

    /// Direct ingest URL for the given event type.
    fn ingest_url(&self, endpoint: EndpointType) -> String;

    fn logs_endpoint(&self) -> String;

    fn web_vitals_endpoint(&self) -> String;

    /// Wrap metrics in envelopes sharing one timestamp, preserving input order.
    fn wrap_web_vitals_object<T: Clone>(&self, metrics: &[T]) -> Vec<WebVitalRecord<T>>;

    /// Overwrite `event.platform` with this platform's tags.
    fn inject_platform_metadata(&self, event: &mut LogEvent, source: &str);

    /// Snapshot an inbound request as a report.
    fn generate_request_meta<R: RequestLike + ?Sized>(
        &self,
        req: &R,
    ) -> Result<RequestReport, RequestMetaError>;
}

/// Adapter for platforms without dedicated handling.
#[derive(Clone, Debug)]
pub struct GenericProvider {
    config: PlatformConfig,
}

impl GenericProvider {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(PlatformConfig::from_env())
    }

    fn proxied_or_direct(&self, endpoint: EndpointType) -> String {
        let url = if self.config.uses_proxy() {
            format!("{}{}", self.config.proxy_path, endpoint.proxy_sub_path())
        } else {
            self.ingest_url(endpoint)
        };
        debug!(
            endpoint = %endpoint,
            proxied = self.config.uses_proxy(),
            url = %url,
            "resolved endpoint"
        );
        url
    }
}

impl Provider for GenericProvider {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    // Every event type shares one dataset ingest path here.
    fn ingest_url(&self, _endpoint: EndpointType) -> String {
        format!(
            "{}/api/v1/datasets/{}/ingest",
            self.config.axiom_url,
            self.config.dataset.as_deref().unwrap_or_default()
        )
    }

    fn logs_endpoint(&self) -> String {
        self.proxied_or_direct(EndpointType::Logs)
    }

    fn web_vitals_endpoint(&self) -> String {
        self.proxied_or_direct(EndpointType::WebVitals)
    }

    fn wrap_web_vitals_object<T: Clone>(&self, metrics: &[T]) -> Vec<WebVitalRecord<T>> {
        let time = now_millis();
        metrics
            .iter()
            .map(|metric| WebVitalRecord {
                web_vital: metric.clone(),
                time,
                platform: WebVitalPlatform {
                    environment: self.config.environment.clone(),
                    source: WEB_VITAL_SOURCE.to_string(),
                },
            })
            .collect()
    }

    fn inject_platform_metadata(&self, event: &mut LogEvent, source: &str) {
        event.platform = Some(PlatformMetadata {
            environment: self.config.environment.clone(),
            region: self.config.region.clone(),
            source: format!("{}{}", source, LOG_SOURCE_SUFFIX),
        });
    }

    fn generate_request_meta<R: RequestLike + ?Sized>(
        &self,
        req: &R,
    ) -> Result<RequestReport, RequestMetaError> {
        let path = req.url().ok_or(RequestMetaError::MissingField("url"))?;
        let method = req
            .method()
            .ok_or(RequestMetaError::MissingField("method"))?;

        Ok(RequestReport {
            start_time: now_millis(),
            path: path.to_string(),
            method: method.to_string(),
            host: get_header_or_default(req, "host", ""),
            user_agent: get_header_or_default(req, "user-agent", ""),
            // Always https; the request's own scheme is not inspected.
            scheme: "https".to_string(),
            ip: get_header_or_default(req, "x-forwarded-for", ""),
            region: self.config.region.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use crate::record::LogLevel;
    use crate::request::RequestParts;
    use crate::settings::{ProxyToggle, Settings};
    use serde_json::json;

    fn provider(use_proxy: ProxyToggle, context: ExecutionContext) -> GenericProvider {
        let settings = Settings {
            axiom_url: Some("https://cloud.axiom.co".to_string()),
            dataset: Some("prod-logs".to_string()),
            token: Some("xaat-123".to_string()),
            use_proxy,
            environment: Some("production".to_string()),
            region: Some("iad1".to_string()),
            ..Default::default()
        };
        GenericProvider::new(PlatformConfig::new(settings, context))
    }

    #[test]
    fn test_ingest_url() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        assert_eq!(
            p.ingest_url(EndpointType::Logs),
            "https://cloud.axiom.co/api/v1/datasets/prod-logs/ingest"
        );
        assert_eq!(
            p.ingest_url(EndpointType::WebVitals),
            p.ingest_url(EndpointType::Logs)
        );
    }

    #[test]
    fn test_ingest_url_without_dataset_has_empty_segment() {
        let p = GenericProvider::new(PlatformConfig::new(
            Settings::default(),
            ExecutionContext::Server,
        ));
        assert_eq!(
            p.ingest_url(EndpointType::Logs),
            "https://cloud.axiom.co/api/v1/datasets//ingest"
        );
        assert!(!p.is_env_vars_set());
    }

    #[test]
    fn test_browser_with_proxy_uses_proxy_path() {
        for toggle in [ProxyToggle::Enabled, ProxyToggle::Unset] {
            let p = provider(toggle, ExecutionContext::Browser);
            assert_eq!(p.logs_endpoint(), "/_axiom/logs");
            assert_eq!(p.web_vitals_endpoint(), "/_axiom/logs");
        }
    }

    #[test]
    fn test_browser_without_proxy_goes_direct() {
        let p = provider(ProxyToggle::Disabled, ExecutionContext::Browser);
        assert_eq!(
            p.logs_endpoint(),
            "https://cloud.axiom.co/api/v1/datasets/prod-logs/ingest"
        );
    }

    #[test]
    fn test_server_always_goes_direct() {
        for toggle in [ProxyToggle::Enabled, ProxyToggle::Disabled, ProxyToggle::Unset] {
            let p = provider(toggle, ExecutionContext::Server);
            assert_eq!(
                p.logs_endpoint(),
                "https://cloud.axiom.co/api/v1/datasets/prod-logs/ingest"
            );
            assert_eq!(
                p.web_vitals_endpoint(),
                "https://cloud.axiom.co/api/v1/datasets/prod-logs/ingest"
            );
        }
    }

    #[test]
    fn test_wrap_web_vitals_preserves_order() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Browser);
        let metrics = vec![json!({"name": "LCP"}), json!({"name": "CLS"})];

        let before = now_millis();
        let records = p.wrap_web_vitals_object(&metrics);
        let after = now_millis();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].web_vital, metrics[0]);
        assert_eq!(records[1].web_vital, metrics[1]);
        for record in &records {
            assert_eq!(record.platform.source, "web-vital");
            assert_eq!(record.platform.environment, "production");
            assert!(record.time >= before && record.time <= after);
        }
        assert_eq!(records[0].time, records[1].time);
        assert_eq!(metrics.len(), 2);
    }

    #[test]
    fn test_wrap_web_vitals_empty() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let records = p.wrap_web_vitals_object::<serde_json::Value>(&[]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_inject_platform_metadata() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let mut event = LogEvent::new(LogLevel::Info, "hello", "2024-01-01T00:00:00Z", "api")
            .with_field("user", "u-1");
        let original = event.clone();

        p.inject_platform_metadata(&mut event, "api");

        let platform = event.platform.as_ref().unwrap();
        assert_eq!(platform.source, "api-log");
        assert_eq!(platform.environment, "production");
        assert_eq!(platform.region.as_deref(), Some("iad1"));
        assert_eq!(event.message, original.message);
        assert_eq!(event.fields, original.fields);
        assert_eq!(event.source, original.source);
        assert_eq!(event.time, original.time);
    }

    #[test]
    fn test_inject_platform_metadata_overwrites() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let mut event = LogEvent::new(LogLevel::Info, "hello", "t", "edge");
        p.inject_platform_metadata(&mut event, "edge");
        p.inject_platform_metadata(&mut event, "lambda");
        assert_eq!(event.platform.unwrap().source, "lambda-log");
    }

    #[test]
    fn test_request_meta_without_forwarded_for() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let req = RequestParts::new("/api/hello", "GET").with_header("host", "example.com");

        let report = p.generate_request_meta(&req).unwrap();
        assert_eq!(report.ip, "");
        assert_eq!(report.user_agent, "");
        assert_eq!(report.host, "example.com");
        assert_eq!(report.path, "/api/hello");
        assert_eq!(report.method, "GET");
        assert_eq!(report.scheme, "https");
        assert_eq!(report.region.as_deref(), Some("iad1"));
    }

    #[test]
    fn test_request_meta_copies_forwarded_for_verbatim() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let req = RequestParts::new("/", "POST")
            .with_header("x-forwarded-for", "203.0.113.7, 10.0.0.1");
        let report = p.generate_request_meta(&req).unwrap();
        assert_eq!(report.ip, "203.0.113.7, 10.0.0.1");
    }

    #[test]
    fn test_request_meta_missing_url() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let mut req = RequestParts::default();
        req.method = Some("GET".to_string());
        assert_eq!(
            p.generate_request_meta(&req),
            Err(RequestMetaError::MissingField("url"))
        );
    }

    #[test]
    fn test_request_meta_missing_method() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        let mut req = RequestParts::default();
        req.url = Some("/".to_string());
        assert_eq!(
            p.generate_request_meta(&req),
            Err(RequestMetaError::MissingField("method"))
        );
    }

    #[test]
    fn test_generic_provider_has_no_edge_report() {
        let p = provider(ProxyToggle::Unset, ExecutionContext::Server);
        assert!(!p.should_send_edge_report());
    }
}
