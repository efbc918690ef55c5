// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for Gatehouse.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults
//! - TOML file (`/etc/gatehouse/gatehouse.toml` unless overridden)
//! - environment (`GATEHOUSE_*`)
//!
//! ```ignore
//! use gatehouse_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("catalog at {}", config.catalog.base_url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::GatehouseConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, SYSTEM_CONFIG_PATH,
};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatehouseConfig {
	pub catalog: CatalogConfig,
	pub policy: PolicyConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
pub fn load_config() -> Result<GatehouseConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<GatehouseConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<GatehouseConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = GatehouseConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: GatehouseConfigLayer) -> Result<GatehouseConfig, ConfigError> {
	let catalog = layer.catalog.unwrap_or_default().finalize();
	let policy = layer.policy.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_catalog(&catalog)?;

	info!(
		catalog = %catalog.base_url,
		token_configured = catalog.token.is_some(),
		timeout_ms = catalog.timeout_ms,
		annotation_prefix = %policy.annotation_prefix,
		log_format = %logging.format,
		"Gatehouse configuration loaded"
	);

	Ok(GatehouseConfig {
		catalog,
		policy,
		logging,
	})
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
	if !(catalog.base_url.starts_with("http://") || catalog.base_url.starts_with("https://")) {
		return Err(ConfigError::Validation(format!(
			"catalog.base_url must be an http(s) URL, got '{}'",
			catalog.base_url
		)));
	}
	if catalog.timeout_ms == 0 {
		return Err(ConfigError::Validation(
			"catalog.timeout_ms must be greater than zero".to_string(),
		));
	}
	if catalog.default_namespace.trim().is_empty() {
		return Err(ConfigError::Validation(
			"catalog.default_namespace must not be empty".to_string(),
		));
	}
	Ok(())
}
