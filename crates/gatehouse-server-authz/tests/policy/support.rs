// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gatehouse_server_authz::{PolicyEngine, Principal};
use gatehouse_server_catalog::{
	CatalogError, CatalogResult, Entity, EntityDirectory, InMemoryDirectory,
};

pub const JANE: &str = "user:default/jane";

/// Builds an engine over an in-memory directory holding `jane` with the given
/// annotations.
pub fn engine_for_jane(annotations: &[(&str, &str)]) -> (PolicyEngine, InMemoryDirectory) {
	let directory = InMemoryDirectory::new();
	let entity = annotations
		.iter()
		.fold(Entity::new("User", "jane"), |entity, (k, v)| {
			entity.with_annotation(*k, *v)
		});
	directory.insert(JANE, entity).unwrap();
	(PolicyEngine::new(Arc::new(directory.clone())), directory)
}

pub fn jane() -> Principal {
	Principal::new(JANE)
}

/// Wraps a directory and can be switched into an outage.
pub struct FlakyDirectory {
	inner: InMemoryDirectory,
	failing: AtomicBool,
	delay: Option<Duration>,
	calls: AtomicUsize,
}

impl FlakyDirectory {
	pub fn new(inner: InMemoryDirectory) -> Self {
		Self {
			inner,
			failing: AtomicBool::new(false),
			delay: None,
			calls: AtomicUsize::new(0),
		}
	}

	/// Every lookup sleeps for `delay` before answering.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl EntityDirectory for FlakyDirectory {
	async fn get_entity_by_ref(&self, entity_ref: &str) -> CatalogResult<Option<Entity>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		if self.failing.load(Ordering::SeqCst) {
			return Err(CatalogError::Timeout);
		}
		self.inner.get_entity_by_ref(entity_ref).await
	}
}

/// A directory that always answers with a payload it could not parse.
pub struct GarbledDirectory;

#[async_trait]
impl EntityDirectory for GarbledDirectory {
	async fn get_entity_by_ref(&self, _entity_ref: &str) -> CatalogResult<Option<Entity>> {
		Err(CatalogError::MalformedResponse {
			message: "invalid type: boolean `true`, expected a string".to_string(),
		})
	}
}
