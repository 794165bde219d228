use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, RequestMetaArgs};
use crate::config::PlatformConfig;
use crate::context::ExecutionContext;
use crate::endpoint::EndpointType;
use crate::provider::{GenericProvider, Provider};
use crate::record::RequestReport;
use crate::request::RequestParts;
use crate::settings::Settings;

/// Build the provider from `--config` (or the environment) and `--context`.
pub fn load_provider(cli: &Cli) -> Result<GenericProvider> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::from_env(),
    };
    let context = cli.context.unwrap_or_else(ExecutionContext::detect);
    Ok(GenericProvider::new(PlatformConfig::new(settings, context)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestUrls {
    pub logs: String,
    pub web_vitals: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointsReport {
    pub logs: String,
    pub web_vitals: String,
    pub ingest: IngestUrls,
    pub proxied: bool,
}

pub fn endpoints_report<P: Provider>(provider: &P) -> EndpointsReport {
    EndpointsReport {
        logs: provider.logs_endpoint(),
        web_vitals: provider.web_vitals_endpoint(),
        ingest: IngestUrls {
            logs: provider.ingest_url(EndpointType::Logs),
            web_vitals: provider.ingest_url(EndpointType::WebVitals),
        },
        proxied: provider.config().uses_proxy(),
    }
}

pub fn request_report<P: Provider>(
    provider: &P,
    args: &RequestMetaArgs,
) -> Result<RequestReport> {
    let mut req = RequestParts::new(&args.url, &args.method);
    for (name, value) in &args.headers {
        req = req.with_header(name, value);
    }
    Ok(provider.generate_request_meta(&req)?)
}

pub fn execute_check<P: Provider>(provider: &P) -> Result<()> {
    let config = provider.config();
    if !provider.is_env_vars_set() {
        bail!(
            "Axiom ingestion is not configured (dataset set: {}, token set: {}). \
            Set AXIOM_DATASET and AXIOM_TOKEN.",
            config.dataset.is_some(),
            config.token.is_some()
        );
    }
    info!(axiom_url = %config.axiom_url, "ingestion env vars set");
    println!("ok: sending to {}", provider.ingest_url(EndpointType::Logs));
    Ok(())
}

pub fn execute_endpoints<P: Provider>(provider: &P) -> Result<()> {
    let report = endpoints_report(provider);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn execute_request_meta<P: Provider>(provider: &P, args: &RequestMetaArgs) -> Result<()> {
    let report = request_report(provider, args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
