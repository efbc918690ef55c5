// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

use crate::entity_ref::EntityRefError;

/// Result type alias for directory operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while looking up entities in the directory.
///
/// "Entity not found" is not an error: lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum CatalogError {
	#[error("invalid entity reference: {0}")]
	InvalidEntityRef(#[from] EntityRefError),

	#[error("catalog request timed out")]
	Timeout,

	#[error("catalog unavailable: {message}")]
	Unavailable { message: String },

	#[error("catalog returned unexpected status {status}: {message}")]
	UnexpectedStatus { status: u16, message: String },

	#[error("malformed catalog response: {message}")]
	MalformedResponse { message: String },

	#[error("failed to build catalog client: {message}")]
	ClientBuild { message: String },
}

impl CatalogError {
	/// Returns true if retrying the same lookup later could succeed.
	pub fn is_transient(&self) -> bool {
		match self {
			CatalogError::Timeout | CatalogError::Unavailable { .. } => true,
			CatalogError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
			CatalogError::InvalidEntityRef(_)
			| CatalogError::MalformedResponse { .. }
			| CatalogError::ClientBuild { .. } => false,
		}
	}
}

impl From<reqwest::Error> for CatalogError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			return CatalogError::Timeout;
		}
		if err.is_decode() {
			return CatalogError::MalformedResponse {
				message: err.to_string(),
			};
		}
		CatalogError::Unavailable {
			message: err.to_string(),
		}
	}
}
