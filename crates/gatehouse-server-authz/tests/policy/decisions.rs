// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use gatehouse_server_authz::{Decision, Principal, Rule};

use super::support::{engine_for_jane, jane};

#[tokio::test]
async fn unauthenticated_requests_are_denied() {
	let (engine, _) = engine_for_jane(&[("admin", "true")]);
	for permission in [
		"catalog.entity.read",
		"catalog.entity.list",
		"scaffolder.action.execute",
		"some.random.action",
	] {
		assert_eq!(engine.decide(None, permission).await, Decision::Deny, "{permission}");
	}
}

#[tokio::test]
async fn admin_allows_unclassified_actions() {
	let (engine, _) = engine_for_jane(&[("admin", "true")]);
	let outcome = engine.evaluate(Some(&jane()), "some.random.action").await;
	assert_eq!(outcome.decision, Decision::Allow);
	assert_eq!(outcome.rule, Rule::AdminOverride);
}

#[tokio::test]
async fn plain_user_can_list_catalog() {
	let (engine, _) = engine_for_jane(&[]);
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.list").await,
		Decision::Allow
	);
}

#[tokio::test]
async fn scaffolder_execution_needs_can_deploy() {
	let (engine, _) = engine_for_jane(&[]);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.action.execute").await,
		Decision::Deny
	);

	let (engine, _) = engine_for_jane(&[("can-deploy", "true")]);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.action.execute").await,
		Decision::Allow
	);
}

#[tokio::test]
async fn resource_flag_does_not_grant_templates() {
	let (engine, _) = engine_for_jane(&[("can-create-resources", "true")]);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.template.create").await,
		Decision::Deny
	);
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.create").await,
		Decision::Allow
	);

	let (engine, _) = engine_for_jane(&[("can-create-templates", "true")]);
	assert_eq!(
		engine.decide(Some(&jane()), "scaffolder.template.create").await,
		Decision::Allow
	);
}

#[tokio::test]
async fn read_marker_overrides_deploy_marker() {
	for flag in ["true", "false"] {
		let (engine, _) = engine_for_jane(&[("can-deploy", flag)]);
		let outcome = engine.evaluate(Some(&jane()), "argocd.read.sync").await;
		assert_eq!(outcome.decision, Decision::Allow);
		assert_eq!(outcome.rule, Rule::ReadAccess);
	}
}

#[tokio::test]
async fn non_true_flag_values_are_not_granted() {
	for value in ["false", "", "True", "1", "yes"] {
		let (engine, _) = engine_for_jane(&[("can-deploy", value)]);
		assert_eq!(
			engine.decide(Some(&jane()), "argocd.application.sync").await,
			Decision::Deny,
			"value {value:?}"
		);
	}
}

#[tokio::test]
async fn repeated_queries_are_idempotent() {
	let (engine, _) = engine_for_jane(&[("can-create-templates", "true")]);
	let principal = jane();
	for permission in [
		"scaffolder.template.create",
		"catalog.entity.delete",
		"catalog.entity.read",
	] {
		let first = engine.evaluate(Some(&principal), permission).await;
		for _ in 0..5 {
			assert_eq!(engine.evaluate(Some(&principal), permission).await, first);
		}
	}
}

#[tokio::test]
async fn directory_changes_apply_to_next_decision() {
	let (engine, directory) = engine_for_jane(&[]);
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.refresh").await,
		Decision::Deny
	);

	directory
		.insert(
			"user:default/jane",
			gatehouse_server_catalog::Entity::new("User", "jane")
				.with_annotation("can-create-resources", "true"),
		)
		.unwrap();
	assert_eq!(
		engine.decide(Some(&jane()), "catalog.entity.refresh").await,
		Decision::Allow
	);
}

#[tokio::test]
async fn identity_without_reference_is_read_only() {
	let (engine, _) = engine_for_jane(&[("admin", "true")]);
	let principal = Principal::without_entity_ref();
	assert_eq!(
		engine.decide(Some(&principal), "catalog.entity.read").await,
		Decision::Allow
	);
	assert_eq!(
		engine.decide(Some(&principal), "some.random.action").await,
		Decision::Deny
	);
}
