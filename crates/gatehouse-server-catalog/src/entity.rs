// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Catalog entity envelope, reduced to the fields Gatehouse reads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A catalog entity as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_version: Option<String>,
	pub kind: String,
	pub metadata: EntityMetadata,
}

/// Entity metadata. `annotations` may be absent or `null` in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub annotations: Option<HashMap<String, String>>,
}

impl Entity {
	/// Creates an entity with no annotations.
	pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			api_version: None,
			kind: kind.into(),
			metadata: EntityMetadata {
				name: name.into(),
				..Default::default()
			},
		}
	}

	/// Builder: add a single annotation.
	pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self
			.metadata
			.annotations
			.get_or_insert_with(HashMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// Consumes the entity, returning its annotations. Absent annotations
	/// become an empty map.
	pub fn into_annotations(self) -> HashMap<String, String> {
		self.metadata.annotations.unwrap_or_default()
	}
}
