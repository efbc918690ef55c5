// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand implementations.

use std::sync::Arc;

use anyhow::Context;
use gatehouse_server_authz::{PolicyEngine, PolicyOutcome, Principal};
use gatehouse_server_catalog::{CatalogClient, CatalogClientConfig, EntityRefDefaults};
use gatehouse_server_config::{CatalogConfig, GatehouseConfig};
use tracing::info;

pub fn format_version_info() -> String {
	format!("gatehouse version: {}", env!("CARGO_PKG_VERSION"))
}

pub fn classify(permission: &str) -> String {
	let tier = gatehouse_server_authz::classify(permission);
	match tier.required_capability() {
		Some(capability) => format!("{tier} (requires {capability})"),
		None => tier.to_string(),
	}
}

pub fn catalog_client_config(config: &CatalogConfig) -> CatalogClientConfig {
	let defaults = EntityRefDefaults {
		kind: Some(config.default_kind.clone()),
		namespace: config.default_namespace.clone(),
	};
	let client_config = CatalogClientConfig::new(config.base_url.clone())
		.with_timeout(config.timeout())
		.with_defaults(defaults);
	match &config.token {
		Some(token) => client_config.with_token(token.clone()),
		None => client_config,
	}
}

/// Builds an engine backed by the HTTP catalog.
pub fn build_engine(config: &GatehouseConfig) -> anyhow::Result<PolicyEngine> {
	let client = CatalogClient::new(catalog_client_config(&config.catalog))
		.context("failed to build catalog client")?;
	info!(
		catalog = %config.catalog.base_url,
		annotation_prefix = %config.policy.annotation_prefix,
		"policy engine ready"
	);
	Ok(PolicyEngine::new(Arc::new(client))
		.with_annotation_prefix(config.policy.annotation_prefix.clone()))
}

pub async fn decide(
	engine: &PolicyEngine,
	principal: Option<&str>,
	permission: &str,
) -> PolicyOutcome {
	let principal = principal.map(Principal::new);
	engine.evaluate(principal.as_ref(), permission).await
}

pub fn render_outcome(outcome: &PolicyOutcome, json: bool) -> anyhow::Result<String> {
	if json {
		return serde_json::to_string(outcome).context("failed to serialize outcome");
	}
	Ok(outcome.decision.to_string())
}
