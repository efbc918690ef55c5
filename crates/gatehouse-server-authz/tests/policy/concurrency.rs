// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use gatehouse_server_authz::{Decision, PolicyEngine, Principal};
use gatehouse_server_catalog::{Entity, InMemoryDirectory};

use super::support::FlakyDirectory;

fn directory_with_users() -> InMemoryDirectory {
	let directory = InMemoryDirectory::new();
	directory
		.insert(
			"user:default/deployer",
			Entity::new("User", "deployer").with_annotation("can-deploy", "true"),
		)
		.unwrap();
	directory
		.insert("user:default/viewer", Entity::new("User", "viewer"))
		.unwrap();
	directory
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_decisions_do_not_interfere() {
	let directory = Arc::new(
		FlakyDirectory::new(directory_with_users()).with_delay(Duration::from_millis(5)),
	);
	let engine = Arc::new(PolicyEngine::new(directory.clone()));

	let mut handles = Vec::new();
	for i in 0..64 {
		let engine = engine.clone();
		handles.push(tokio::spawn(async move {
			let (who, expected) = if i % 2 == 0 {
				("user:default/deployer", Decision::Allow)
			} else {
				("user:default/viewer", Decision::Deny)
			};
			let principal = Principal::new(who);
			let decision = engine
				.decide(Some(&principal), "argocd.application.sync")
				.await;
			(decision, expected)
		}));
	}

	for handle in handles {
		let (decision, expected) = handle.await.unwrap();
		assert_eq!(decision, expected);
	}
	assert_eq!(directory.calls(), 64);
}

#[test]
fn engine_is_send_and_sync() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<PolicyEngine>();
}

#[test]
fn decide_blocks_cleanly_outside_async_context() {
	let engine = PolicyEngine::new(Arc::new(directory_with_users()));
	let principal = Principal::new("user:default/viewer");
	let decision = tokio_test::block_on(engine.decide(Some(&principal), "catalog.entity.list"));
	assert_eq!(decision, Decision::Allow);
}
