// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory directory for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::client::EntityDirectory;
use crate::entity::Entity;
use crate::entity_ref::{EntityRef, EntityRefDefaults};
use crate::error::{CatalogError, CatalogResult};

/// A directory backed by a map of parsed references.
///
/// Lookups normalize references the same way [`crate::CatalogClient`] does,
/// so `jane`, `user:jane` and `user:default/jane` hit the same entry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
	defaults: EntityRefDefaults,
	entities: Arc<RwLock<HashMap<EntityRef, Entity>>>,
}

impl InMemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `entity` under `entity_ref`, replacing any previous entry.
	pub fn insert(&self, entity_ref: &str, entity: Entity) -> CatalogResult<()> {
		let key = EntityRef::parse_with_defaults(entity_ref, &self.defaults)?;
		self
			.entities
			.write()
			.map_err(|_| CatalogError::Unavailable {
				message: "directory lock poisoned".to_string(),
			})?
			.insert(key, entity);
		Ok(())
	}

	/// Removes the entry for `entity_ref`, returning it if present.
	pub fn remove(&self, entity_ref: &str) -> CatalogResult<Option<Entity>> {
		let key = EntityRef::parse_with_defaults(entity_ref, &self.defaults)?;
		Ok(
			self
				.entities
				.write()
				.map_err(|_| CatalogError::Unavailable {
					message: "directory lock poisoned".to_string(),
				})?
				.remove(&key),
		)
	}
}

#[async_trait]
impl EntityDirectory for InMemoryDirectory {
	async fn get_entity_by_ref(&self, entity_ref: &str) -> CatalogResult<Option<Entity>> {
		let key = EntityRef::parse_with_defaults(entity_ref, &self.defaults)?;
		let entities = self
			.entities
			.read()
			.map_err(|_| CatalogError::Unavailable {
				message: "directory lock poisoned".to_string(),
			})?;
		Ok(entities.get(&key).cloned())
	}
}
