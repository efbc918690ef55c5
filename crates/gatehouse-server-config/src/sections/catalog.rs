// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Software catalog connection section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:7007";
pub const DEFAULT_TIMEOUT_MS: u64 = gatehouse_server_catalog::DEFAULT_TIMEOUT.as_millis() as u64;
pub const DEFAULT_KIND: &str = "user";
pub const DEFAULT_NAMESPACE: &str = "default";

/// Catalog configuration layer (for merging).
///
/// `token` is redacted in Debug output.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfigLayer {
	pub base_url: Option<String>,
	pub token: Option<String>,
	pub timeout_ms: Option<u64>,
	pub default_kind: Option<String>,
	pub default_namespace: Option<String>,
}

impl std::fmt::Debug for CatalogConfigLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogConfigLayer")
			.field("base_url", &self.base_url)
			.field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
			.field("timeout_ms", &self.timeout_ms)
			.field("default_kind", &self.default_kind)
			.field("default_namespace", &self.default_namespace)
			.finish()
	}
}

impl CatalogConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.timeout_ms.is_some() {
			self.timeout_ms = other.timeout_ms;
		}
		if other.default_kind.is_some() {
			self.default_kind = other.default_kind;
		}
		if other.default_namespace.is_some() {
			self.default_namespace = other.default_namespace;
		}
	}

	pub fn finalize(self) -> CatalogConfig {
		CatalogConfig {
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			token: self.token,
			timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
			default_kind: self
				.default_kind
				.unwrap_or_else(|| DEFAULT_KIND.to_string()),
			default_namespace: self
				.default_namespace
				.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
		}
	}
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
	pub base_url: String,
	pub token: Option<String>,
	pub timeout_ms: u64,
	pub default_kind: String,
	pub default_namespace: String,
}

impl CatalogConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl std::fmt::Debug for CatalogConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogConfig")
			.field("base_url", &self.base_url)
			.field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
			.field("timeout_ms", &self.timeout_ms)
			.field("default_kind", &self.default_kind)
			.field("default_namespace", &self.default_namespace)
			.finish()
	}
}

impl Default for CatalogConfig {
	fn default() -> Self {
		CatalogConfigLayer::default().finalize()
	}
}
