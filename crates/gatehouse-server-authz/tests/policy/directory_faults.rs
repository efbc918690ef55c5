// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use gatehouse_server_authz::{AnnotationResolver, Decision, PolicyEngine, Principal, Resolution};
use gatehouse_server_catalog::{Entity, InMemoryDirectory};

use super::support::{jane, FlakyDirectory, GarbledDirectory, JANE};

fn deployer_directory() -> InMemoryDirectory {
	let directory = InMemoryDirectory::new();
	directory
		.insert(
			JANE,
			Entity::new("User", "jane")
				.with_annotation("can-deploy", "true")
				.with_annotation("admin", "false"),
		)
		.unwrap();
	directory
}

#[tokio::test]
async fn timeout_denies_deploy_despite_real_annotation() {
	let flaky = Arc::new(FlakyDirectory::new(deployer_directory()));
	let engine = PolicyEngine::new(flaky.clone());

	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.action.execute").await,
		Decision::Allow
	);

	flaky.set_failing(true);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.action.execute").await,
		Decision::Deny
	);
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.read").await,
		Decision::Allow
	);

	flaky.set_failing(false);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.action.execute").await,
		Decision::Allow
	);
	assert_eq!(flaky.calls(), 4);
}

#[tokio::test]
async fn malformed_directory_response_fails_closed() {
	let engine = PolicyEngine::new(Arc::new(GarbledDirectory));
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.delete").await,
		Decision::Deny
	);
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.list").await,
		Decision::Allow
	);
}

#[tokio::test]
async fn unparseable_reference_fails_closed() {
	let engine = PolicyEngine::new(Arc::new(deployer_directory()));
	let principal = Principal::new("user:default/");
	assert_eq!(
		engine.decide(Some(&principal), "argocd.application.sync").await,
		Decision::Deny
	);
}

#[tokio::test]
async fn resolver_reports_failure_before_collapsing() {
	let flaky = Arc::new(FlakyDirectory::new(deployer_directory()));
	flaky.set_failing(true);
	let resolver = AnnotationResolver::new(flaky);

	assert!(resolver.lookup(Some(JANE)).await.is_failed());
	assert!(resolver.resolve(Some(JANE)).await.is_empty());
}

#[tokio::test]
async fn resolver_returns_full_snapshot() {
	let resolver = AnnotationResolver::new(Arc::new(deployer_directory()));
	match resolver.lookup(Some(JANE)).await {
		Resolution::Resolved(annotations) => {
			assert_eq!(annotations.len(), 2);
			assert!(annotations.is_flag_set("can-deploy"));
			assert!(!annotations.is_flag_set("admin"));
		}
		other => panic!("expected resolved annotations, got {other:?}"),
	}
}
