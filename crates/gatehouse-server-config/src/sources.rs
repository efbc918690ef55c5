// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::GatehouseConfigLayer;
use crate::sections::{CatalogConfigLayer, LogFormat, LoggingConfigLayer, PolicyConfigLayer};

/// Default location of the system config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/gatehouse/gatehouse.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<GatehouseConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<GatehouseConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(GatehouseConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<GatehouseConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(GatehouseConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: GatehouseConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: GATEHOUSE_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<GatehouseConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_vars(|name| std::env::var(name).ok())
	}
}

/// Builds a layer from a variable lookup. Empty values count as unset,
/// except for the annotation prefix where empty selects bare keys.
fn load_from_vars<F>(lookup: F) -> Result<GatehouseConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let vars = Vars(lookup);
	Ok(GatehouseConfigLayer {
		catalog: Some(load_catalog(&vars)?),
		policy: Some(load_policy(&vars)),
		logging: Some(load_logging(&vars)?),
	})
}

struct Vars<F>(F);

impl<F> Vars<F>
where
	F: Fn(&str) -> Option<String>,
{
	fn var(&self, name: &str) -> Option<String> {
		self.raw(name).filter(|s| !s.is_empty())
	}

	/// Like `var`, but a set-but-empty variable is kept as `Some("")`.
	fn raw(&self, name: &str) -> Option<String> {
		(self.0)(name)
	}

	fn u64(&self, name: &str) -> Result<Option<u64>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid u64 value '{v}'"),
			}),
			None => Ok(None),
		}
	}
}

fn load_catalog<F>(vars: &Vars<F>) -> Result<CatalogConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	Ok(CatalogConfigLayer {
		base_url: vars.var("GATEHOUSE_CATALOG_BASE_URL"),
		token: vars.var("GATEHOUSE_CATALOG_TOKEN"),
		timeout_ms: vars.u64("GATEHOUSE_CATALOG_TIMEOUT_MS")?,
		default_kind: vars.var("GATEHOUSE_CATALOG_DEFAULT_KIND"),
		default_namespace: vars.var("GATEHOUSE_CATALOG_DEFAULT_NAMESPACE"),
	})
}

fn load_policy<F>(vars: &Vars<F>) -> PolicyConfigLayer
where
	F: Fn(&str) -> Option<String>,
{
	PolicyConfigLayer {
		annotation_prefix: vars.raw("GATEHOUSE_POLICY_ANNOTATION_PREFIX"),
	}
}

fn load_logging<F>(vars: &Vars<F>) -> Result<LoggingConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let format = vars
		.var("GATEHOUSE_LOG_FORMAT")
		.map(|v| {
			v.parse::<LogFormat>().map_err(|_| ConfigError::InvalidValue {
				key: "GATEHOUSE_LOG_FORMAT".to_string(),
				message: format!("unknown log format '{v}', expected 'pretty' or 'json'"),
			})
		})
		.transpose()?;

	Ok(LoggingConfigLayer {
		level: vars.var("GATEHOUSE_LOG_LEVEL"),
		format,
	})
}
