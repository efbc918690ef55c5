// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for permission policy evaluation.
//!
//! - [`Principal`]: the identity making the request
//! - [`AnnotationSet`]: capability annotations resolved for that identity
//! - [`PrivilegeTier`]: the bucket a permission name falls into
//! - [`Capability`]: a boolean flag annotation that grants a tier
//! - [`Decision`]: the ALLOW / DENY result

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The only annotation value that sets a capability flag.
pub const FLAG_SET: &str = "true";

/// The identity attached to a request.
///
/// A principal may exist without a directory reference, in which case no
/// annotations can be resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub entity_ref: Option<String>,
}

impl Principal {
	/// Creates a principal identified by a directory reference.
	pub fn new(entity_ref: impl Into<String>) -> Self {
		Self {
			entity_ref: Some(entity_ref.into()),
		}
	}

	/// Creates an identified principal that carries no directory reference.
	pub fn without_entity_ref() -> Self {
		Self { entity_ref: None }
	}

	pub fn entity_ref(&self) -> Option<&str> {
		self.entity_ref.as_deref()
	}
}

/// Annotations resolved for a principal.
///
/// Always a complete snapshot of one directory read, or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet(HashMap<String, String>);

impl AnnotationSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Returns true if `key` is present with the exact value `"true"`.
	pub fn is_flag_set(&self, key: &str) -> bool {
		self.get(key) == Some(FLAG_SET)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Builder: add an annotation.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}
}

impl From<HashMap<String, String>> for AnnotationSet {
	fn from(map: HashMap<String, String>) -> Self {
		Self(map)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnnotationSet {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

/// Privilege tiers a permission can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeTier {
	/// Global override granted by the `admin` flag. Never derived from a name.
	Admin,
	Read,
	Deploy,
	ResourceManage,
	TemplateManage,
	Unclassified,
}

impl PrivilegeTier {
	/// The capability flag that unlocks this tier, if any.
	///
	/// `Read` needs none; `Unclassified` cannot be unlocked except by admin.
	pub fn required_capability(self) -> Option<Capability> {
		match self {
			PrivilegeTier::Admin => Some(Capability::Admin),
			PrivilegeTier::Deploy => Some(Capability::Deploy),
			PrivilegeTier::ResourceManage => Some(Capability::CreateResources),
			PrivilegeTier::TemplateManage => Some(Capability::CreateTemplates),
			PrivilegeTier::Read | PrivilegeTier::Unclassified => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			PrivilegeTier::Admin => "admin",
			PrivilegeTier::Read => "read",
			PrivilegeTier::Deploy => "deploy",
			PrivilegeTier::ResourceManage => "resource_manage",
			PrivilegeTier::TemplateManage => "template_manage",
			PrivilegeTier::Unclassified => "unclassified",
		}
	}
}

impl fmt::Display for PrivilegeTier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Boolean flag annotations recognised by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	Admin,
	Deploy,
	CreateResources,
	CreateTemplates,
}

impl Capability {
	/// Annotation name without any namespace prefix.
	pub fn annotation_name(self) -> &'static str {
		match self {
			Capability::Admin => "admin",
			Capability::Deploy => "can-deploy",
			Capability::CreateResources => "can-create-resources",
			Capability::CreateTemplates => "can-create-templates",
		}
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.annotation_name())
	}
}

/// Maps capabilities to the annotation keys looked up on a principal.
///
/// Keys are `{prefix}{annotation_name}`. With the default empty prefix the
/// keys are the bare names (`admin`, `can-deploy`, ...); catalogs that
/// namespace annotations use a prefix such as `backstage.io/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityKeys {
	prefix: String,
}

impl CapabilityKeys {
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn key(&self, capability: Capability) -> String {
		format!("{}{}", self.prefix, capability.annotation_name())
	}

	/// Returns true if `annotations` grants `capability`.
	pub fn is_granted(&self, annotations: &AnnotationSet, capability: Capability) -> bool {
		annotations.is_flag_set(&self.key(capability))
	}
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
	Allow,
	Deny,
}

impl Decision {
	pub fn is_allow(self) -> bool {
		matches!(self, Decision::Allow)
	}

	/// ALLOW when `granted`, DENY otherwise.
	pub fn from_grant(granted: bool) -> Self {
		if granted {
			Decision::Allow
		} else {
			Decision::Deny
		}
	}
}

impl fmt::Display for Decision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Decision::Allow => f.write_str("ALLOW"),
			Decision::Deny => f.write_str("DENY"),
		}
	}
}
