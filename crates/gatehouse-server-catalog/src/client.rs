// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Directory lookup abstraction and the HTTP software catalog client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::{debug, instrument};

use crate::entity::Entity;
use crate::entity_ref::{EntityRef, EntityRefDefaults};
use crate::error::{CatalogError, CatalogResult};

/// Default request timeout. Kept short so a slow directory fails closed
/// instead of stalling every privileged check.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Looks up directory entities by reference.
///
/// Implementations return `Ok(None)` when the entity does not exist and an
/// error for anything that prevented a definitive answer.
#[async_trait]
pub trait EntityDirectory: Send + Sync {
	async fn get_entity_by_ref(&self, entity_ref: &str) -> CatalogResult<Option<Entity>>;
}

/// Connection settings for [`CatalogClient`].
#[derive(Clone)]
pub struct CatalogClientConfig {
	pub base_url: String,
	pub token: Option<String>,
	pub timeout: Duration,
	pub defaults: EntityRefDefaults,
}

impl fmt::Debug for CatalogClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalogClientConfig")
			.field("base_url", &self.base_url)
			.field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
			.field("timeout", &self.timeout)
			.field("defaults", &self.defaults)
			.finish()
	}
}

impl CatalogClientConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			token: None,
			timeout: DEFAULT_TIMEOUT,
			defaults: EntityRefDefaults::default(),
		}
	}

	/// Builder: set the bearer token sent with every request.
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// Builder: set the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Builder: set the defaults used to complete partial references.
	pub fn with_defaults(mut self, defaults: EntityRefDefaults) -> Self {
		self.defaults = defaults;
		self
	}
}

/// Software catalog client speaking the `entities/by-name` REST endpoint.
pub struct CatalogClient {
	http: reqwest::Client,
	base_url: Url,
	token: Option<String>,
	defaults: EntityRefDefaults,
}

impl fmt::Debug for CatalogClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalogClient")
			.field("base_url", &self.base_url.as_str())
			.field("defaults", &self.defaults)
			.finish_non_exhaustive()
	}
}

impl CatalogClient {
	pub fn new(config: CatalogClientConfig) -> CatalogResult<Self> {
		let base_url = Url::parse(&config.base_url).map_err(|e| CatalogError::ClientBuild {
			message: format!("invalid base url '{}': {e}", config.base_url),
		})?;
		if base_url.cannot_be_a_base() {
			return Err(CatalogError::ClientBuild {
				message: format!("base url '{}' cannot be a base", config.base_url),
			});
		}

		let http = gatehouse_common_http::build_client_with_timeout(config.timeout).map_err(|e| {
			CatalogError::ClientBuild {
				message: e.to_string(),
			}
		})?;

		Ok(Self {
			http,
			base_url,
			token: config.token,
			defaults: config.defaults,
		})
	}

	/// Builds the lookup URL for a parsed reference.
	pub fn entity_url(&self, entity_ref: &EntityRef) -> CatalogResult<Url> {
		let mut url = self.base_url.clone();
		url
			.path_segments_mut()
			.map_err(|_| CatalogError::ClientBuild {
				message: format!("base url '{}' cannot be a base", self.base_url),
			})?
			.pop_if_empty()
			.extend([
				"api",
				"catalog",
				"entities",
				"by-name",
				entity_ref.kind(),
				entity_ref.namespace(),
				entity_ref.name(),
			]);
		Ok(url)
	}
}

#[async_trait]
impl EntityDirectory for CatalogClient {
	#[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
	async fn get_entity_by_ref(&self, entity_ref: &str) -> CatalogResult<Option<Entity>> {
		let parsed = EntityRef::parse_with_defaults(entity_ref, &self.defaults)?;
		let url = self.entity_url(&parsed)?;

		let mut request = self.http.get(url);
		if let Some(token) = &self.token {
			request = request.bearer_auth(token);
		}

		let response = request.send().await?;
		let status = response.status();
		debug!(status = status.as_u16(), entity = %parsed, "catalog responded");

		if status == StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(CatalogError::UnexpectedStatus {
				status: status.as_u16(),
				message,
			});
		}

		let body = response.bytes().await?;
		let entity: Entity =
			serde_json::from_slice(&body).map_err(|e| CatalogError::MalformedResponse {
				message: e.to_string(),
			})?;
		Ok(Some(entity))
	}
}
