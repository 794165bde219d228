// src/lib.rs
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod provider;
pub mod record;
pub mod request;
pub mod settings;

pub use config::{PlatformConfig, DEFAULT_AXIOM_URL, PROXY_PATH};
pub use context::ExecutionContext;
pub use endpoint::EndpointType;
pub use provider::{GenericProvider, Provider};
pub use record::{LogEvent, LogLevel, PlatformMetadata, RequestReport, WebVitalRecord};
pub use request::{get_header_or_default, RequestLike, RequestMetaError, RequestParts};
pub use settings::{ProxyToggle, Settings};

#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(not(target_arch = "wasm32"))]
pub use native::init_tracing;

#[cfg(target_arch = "wasm32")]
pub use wasm::init_tracing;
