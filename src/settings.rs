//! Raw configuration inputs, read from the environment or a TOML file.

use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

pub const AXIOM_URL_ENV: &str = "AXIOM_URL";
pub const AXIOM_DATASET_ENV: &str = "AXIOM_DATASET";
pub const AXIOM_TOKEN_ENV: &str = "AXIOM_TOKEN";
pub const PROXY_URL_ENV: &str = "NEXT_PUBLIC_AXIOM_PROXY_URL";
pub const USE_PROXY_ENV: &str = "NEXT_PUBLIC_AXIOM_USE_PROXY";
pub const ENVIRONMENT_ENV: &str = "NODE_ENV";
pub const REGION_ENV: &str = "REGION";

/// Tri-state proxy flag.
///
/// Only the literal strings `"true"` and `"false"` are recognised; every other
/// value, including an absent variable, is `Unset` and resolves to proxying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawToggle")]
pub enum ProxyToggle {
    Enabled,
    Disabled,
    #[default]
    Unset,
}

impl ProxyToggle {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("true") => ProxyToggle::Enabled,
            Some("false") => ProxyToggle::Disabled,
            _ => ProxyToggle::Unset,
        }
    }

    pub fn resolve(&self) -> bool {
        match self {
            ProxyToggle::Enabled | ProxyToggle::Unset => true,
            ProxyToggle::Disabled => false,
        }
    }
}

/// TOML files may spell the flag as a bool or as the env var string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawToggle {
    Flag(bool),
    Text(String),
}

impl From<RawToggle> for ProxyToggle {
    fn from(raw: RawToggle) -> Self {
        match raw {
            RawToggle::Flag(true) => ProxyToggle::Enabled,
            RawToggle::Flag(false) => ProxyToggle::Disabled,
            RawToggle::Text(text) => ProxyToggle::parse(Some(&text)),
        }
    }
}

/// Unprocessed platform settings. Empty strings count as unset.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub axiom_url: Option<String>,
    pub dataset: Option<String>,
    pub token: Option<String>,
    pub proxy_url: Option<String>,
    pub use_proxy: ProxyToggle,
    pub environment: Option<String>,
    pub region: Option<String>,
}

impl Settings {
    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(mut var: impl FnMut(&str) -> Option<String>) -> Self {
        let mut read = |name: &str| var(name).filter(|v| !v.is_empty());
        Self {
            axiom_url: read(AXIOM_URL_ENV),
            dataset: read(AXIOM_DATASET_ENV),
            token: read(AXIOM_TOKEN_ENV),
            proxy_url: read(PROXY_URL_ENV),
            use_proxy: ProxyToggle::parse(read(USE_PROXY_ENV).as_deref()),
            environment: read(ENVIRONMENT_ENV),
            region: read(REGION_ENV),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Drop empty strings so every optional value is either set or `None`.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            axiom_url: non_empty(self.axiom_url),
            dataset: non_empty(self.dataset),
            token: non_empty(self.token),
            proxy_url: non_empty(self.proxy_url),
            use_proxy: self.use_proxy,
            environment: non_empty(self.environment),
            region: non_empty(self.region),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Settings {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings.normalized())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.as_ref().display()))
    }
}

// Token stays out of Debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("axiom_url", &self.axiom_url)
            .field("dataset", &self.dataset)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("proxy_url", &self.proxy_url)
            .field("use_proxy", &self.use_proxy)
            .field("environment", &self.environment)
            .field("region", &self.region)
            .finish()
    }
}
