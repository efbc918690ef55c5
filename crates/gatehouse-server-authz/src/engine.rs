// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission policy evaluation engine.
//!
//! Evaluation order, first match terminates:
//!
//! 1. **No principal**: DENY, even for reads
//! 2. **Admin override**: `admin = "true"` allows everything
//! 3. **Read**: always allowed for any identified principal
//! 4. **Deploy / Resource / Template**: allowed iff the matching flag is set
//! 5. **Anything else**: DENY
//!
//! [`evaluate_annotations`] holds steps 2-5 as a pure function over already
//! resolved annotations. [`PolicyEngine`] adds step 1 and the directory read.

use std::sync::Arc;

use gatehouse_server_catalog::EntityDirectory;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::classify::classify;
use crate::resolver::AnnotationResolver;
use crate::types::{AnnotationSet, Capability, CapabilityKeys, Decision, Principal, PrivilegeTier};

/// The rule that terminated evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "capability", rename_all = "snake_case")]
pub enum Rule {
	Unauthenticated,
	AdminOverride,
	ReadAccess,
	CapabilityGranted(Capability),
	CapabilityMissing(Capability),
	DefaultDeny,
}

/// A decision together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyOutcome {
	pub decision: Decision,
	pub tier: PrivilegeTier,
	#[serde(flatten)]
	pub rule: Rule,
}

impl PolicyOutcome {
	fn allow(tier: PrivilegeTier, rule: Rule) -> Self {
		Self {
			decision: Decision::Allow,
			tier,
			rule,
		}
	}

	fn deny(tier: PrivilegeTier, rule: Rule) -> Self {
		Self {
			decision: Decision::Deny,
			tier,
			rule,
		}
	}
}

/// Evaluates a permission against resolved annotations.
///
/// Pure and infallible: the same inputs always give the same outcome.
pub fn evaluate_annotations(
	annotations: &AnnotationSet,
	keys: &CapabilityKeys,
	permission: &str,
) -> PolicyOutcome {
	if keys.is_granted(annotations, Capability::Admin) {
		return PolicyOutcome::allow(PrivilegeTier::Admin, Rule::AdminOverride);
	}

	let tier = classify(permission);
	if tier == PrivilegeTier::Read {
		return PolicyOutcome::allow(tier, Rule::ReadAccess);
	}

	match tier.required_capability() {
		Some(capability) if keys.is_granted(annotations, capability) => {
			PolicyOutcome::allow(tier, Rule::CapabilityGranted(capability))
		}
		Some(capability) => PolicyOutcome::deny(tier, Rule::CapabilityMissing(capability)),
		None => PolicyOutcome::deny(tier, Rule::DefaultDeny),
	}
}

/// Annotation-driven permission policy.
///
/// Holds no per-request state; share one instance behind an `Arc` across
/// tasks.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
	resolver: AnnotationResolver,
	keys: CapabilityKeys,
}

impl PolicyEngine {
	/// Creates an engine reading principals from `directory`, using bare
	/// annotation keys.
	pub fn new(directory: Arc<dyn EntityDirectory>) -> Self {
		Self::from_resolver(AnnotationResolver::new(directory), CapabilityKeys::default())
	}

	pub fn from_resolver(resolver: AnnotationResolver, keys: CapabilityKeys) -> Self {
		Self { resolver, keys }
	}

	/// Builder: look capability flags up under `prefix`.
	pub fn with_annotation_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.keys = CapabilityKeys::with_prefix(prefix);
		self
	}

	pub fn capability_keys(&self) -> &CapabilityKeys {
		&self.keys
	}

	/// Evaluates `permission` for `principal`, reporting the deciding rule.
	#[instrument(
		level = "debug",
		skip(self, principal),
		fields(
			principal = principal.and_then(Principal::entity_ref).unwrap_or("<none>"),
			authenticated = principal.is_some(),
		)
	)]
	pub async fn evaluate(&self, principal: Option<&Principal>, permission: &str) -> PolicyOutcome {
		let Some(principal) = principal else {
			let outcome = PolicyOutcome::deny(classify(permission), Rule::Unauthenticated);
			debug!(decision = %outcome.decision, rule = ?outcome.rule, "policy decision");
			return outcome;
		};

		let annotations = self.resolver.resolve(principal.entity_ref()).await;
		let outcome = evaluate_annotations(&annotations, &self.keys, permission);
		debug!(
			decision = %outcome.decision,
			tier = %outcome.tier,
			rule = ?outcome.rule,
			"policy decision"
		);
		outcome
	}

	/// Decides `permission` for `principal`.
	pub async fn decide(&self, principal: Option<&Principal>, permission: &str) -> Decision {
		self.evaluate(principal, permission).await.decision
	}
}
