// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted directory double for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use gatehouse_server_catalog::{CatalogError, CatalogResult, Entity, EntityDirectory};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
	Timeout,
	Unavailable,
	Malformed,
}

impl Fault {
	fn to_error(self) -> CatalogError {
		match self {
			Fault::Timeout => CatalogError::Timeout,
			Fault::Unavailable => CatalogError::Unavailable {
				message: "connection refused".to_string(),
			},
			Fault::Malformed => CatalogError::MalformedResponse {
				message: "expected value at line 1 column 1".to_string(),
			},
		}
	}
}

enum Scripted {
	Found(Entity),
	Fails(Fault),
}

/// Answers lookups by exact reference; anything unscripted is "not found".
#[derive(Default)]
pub(crate) struct ScriptedDirectory {
	entries: HashMap<String, Scripted>,
	calls: AtomicUsize,
}

impl ScriptedDirectory {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_entity(mut self, entity_ref: &str, entity: Entity) -> Self {
		self
			.entries
			.insert(entity_ref.to_string(), Scripted::Found(entity));
		self
	}

	pub(crate) fn with_fault(mut self, entity_ref: &str, fault: Fault) -> Self {
		self
			.entries
			.insert(entity_ref.to_string(), Scripted::Fails(fault));
		self
	}

	pub(crate) fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait::async_trait]
impl EntityDirectory for ScriptedDirectory {
	async fn get_entity_by_ref(&self, entity_ref: &str) -> CatalogResult<Option<Entity>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self.entries.get(entity_ref) {
			Some(Scripted::Found(entity)) => Ok(Some(entity.clone())),
			Some(Scripted::Fails(fault)) => Err(fault.to_error()),
			None => Ok(None),
		}
	}
}
