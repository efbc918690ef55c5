// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Catalog entity references.
//!
//! A reference has the shape `[kind:][namespace/]name`, for example
//! `user:default/jane.doe`. Missing parts are filled from [`EntityRefDefaults`].
//! Kind and namespace are normalized to lowercase; the name is kept verbatim.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing an entity reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityRefError {
	#[error("entity reference is empty")]
	Empty,

	#[error("entity reference '{value}' has no kind and no default kind is configured")]
	MissingKind { value: String },

	#[error("entity reference '{value}' has an empty {component}")]
	EmptyComponent {
		value: String,
		component: &'static str,
	},

	#[error("entity reference '{value}' is not of the form [kind:][namespace/]name")]
	InvalidFormat { value: String },
}

/// Fallback kind and namespace applied to partial references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRefDefaults {
	pub kind: Option<String>,
	pub namespace: String,
}

impl Default for EntityRefDefaults {
	fn default() -> Self {
		Self {
			kind: Some("user".to_string()),
			namespace: "default".to_string(),
		}
	}
}

/// A fully qualified catalog entity reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
	kind: String,
	namespace: String,
	name: String,
}

impl EntityRef {
	pub fn new(kind: &str, namespace: &str, name: &str) -> Self {
		Self {
			kind: kind.to_ascii_lowercase(),
			namespace: namespace.to_ascii_lowercase(),
			name: name.to_string(),
		}
	}

	/// Parses `value`, filling missing parts from `defaults`.
	pub fn parse_with_defaults(
		value: &str,
		defaults: &EntityRefDefaults,
	) -> Result<Self, EntityRefError> {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			return Err(EntityRefError::Empty);
		}

		let (kind, rest) = match trimmed.split_once(':') {
			Some((kind, rest)) => (Some(kind), rest),
			None => (None, trimmed),
		};
		let (namespace, name) = match rest.split_once('/') {
			Some((namespace, name)) => (Some(namespace), name),
			None => (None, rest),
		};

		if name.contains([':', '/'])
			|| kind.is_some_and(|k| k.contains('/'))
			|| namespace.is_some_and(|ns| ns.contains(':'))
		{
			return Err(EntityRefError::InvalidFormat {
				value: trimmed.to_string(),
			});
		}

		let empty = |component| EntityRefError::EmptyComponent {
			value: trimmed.to_string(),
			component,
		};
		if kind.is_some_and(str::is_empty) {
			return Err(empty("kind"));
		}
		if namespace.is_some_and(str::is_empty) {
			return Err(empty("namespace"));
		}
		if name.is_empty() {
			return Err(empty("name"));
		}

		let kind = match kind {
			Some(kind) => kind,
			None => defaults
				.kind
				.as_deref()
				.ok_or_else(|| EntityRefError::MissingKind {
					value: trimmed.to_string(),
				})?,
		};
		let namespace = namespace.unwrap_or(&defaults.namespace);

		Ok(Self::new(kind, namespace, name))
	}

	pub fn kind(&self) -> &str {
		&self.kind
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl FromStr for EntityRef {
	type Err = EntityRefError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_with_defaults(s, &EntityRefDefaults::default())
	}
}

impl fmt::Display for EntityRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}/{}", self.kind, self.namespace, self.name)
	}
}
