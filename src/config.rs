use tracing::{info, warn};

use crate::context::ExecutionContext;
use crate::settings::Settings;

/// Public Axiom cloud endpoint, used when no base URL is configured
pub const DEFAULT_AXIOM_URL: &str = "https://cloud.axiom.co";

/// Same-origin route served by the ingest reverse proxy
pub const PROXY_PATH: &str = "/_axiom";

/// Platform configuration derived once at startup.
///
/// Consumers receive it by reference (or inside an `Arc`); nothing in the
/// crate reads the environment after construction.
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    pub proxy_url: Option<String>,
    pub use_proxy_on_browser: bool,
    pub proxy_path: &'static str,
    pub is_browser: bool,
    pub should_send_edge_report: bool,
    pub token: Option<String>,
    pub dataset: Option<String>,
    pub environment: String,
    pub axiom_url: String,
    pub region: Option<String>,
}

impl PlatformConfig {
    pub fn new(settings: Settings, context: ExecutionContext) -> Self {
        let settings = settings.normalized();
        let environment_missing = settings.environment.is_none();
        let config = Self {
            proxy_url: settings.proxy_url,
            use_proxy_on_browser: settings.use_proxy.resolve(),
            proxy_path: PROXY_PATH,
            is_browser: context.is_browser(),
            should_send_edge_report: false,
            token: settings.token,
            dataset: settings.dataset,
            environment: settings.environment.unwrap_or_default(),
            axiom_url: settings
                .axiom_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_AXIOM_URL.to_string()),
            region: settings.region,
        };

        if environment_missing {
            warn!("NODE_ENV not set - platform environment will be empty");
        }
        if !config.is_env_vars_set() {
            warn!(
                dataset_set = config.dataset.is_some(),
                token_set = config.token.is_some(),
                "Axiom ingestion env vars incomplete - telemetry should not be sent"
            );
        }
        info!(
            context = context.as_str(),
            use_proxy_on_browser = config.use_proxy_on_browser,
            axiom_url = %config.axiom_url,
            "PlatformConfig initialized"
        );

        config
    }

    /// Build from the process environment, detecting the execution context.
    pub fn from_env() -> Self {
        Self::new(Settings::from_env(), ExecutionContext::detect())
    }

    /// True when base URL, dataset and token are all non-empty.
    pub fn is_env_vars_set(&self) -> bool {
        fn non_empty(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.is_empty())
        }
        !self.axiom_url.is_empty() && non_empty(&self.dataset) && non_empty(&self.token)
    }

    /// Whether browser telemetry is routed through the local proxy path.
    pub fn uses_proxy(&self) -> bool {
        self.use_proxy_on_browser && self.is_browser
    }
}
