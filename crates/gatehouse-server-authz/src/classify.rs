// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission name classification.
//!
//! A permission name is bucketed by case-sensitive substring containment
//! against a fixed, ordered table of markers. The first category whose
//! markers match wins, so a name carrying both a read marker and a
//! privileged marker (`argocd.read.sync`) is classified as [`PrivilegeTier::Read`].

use crate::types::PrivilegeTier;

/// Name-derived categories in evaluation order.
pub const CATEGORIES: [(PrivilegeTier, &[&str]); 4] = [
	(PrivilegeTier::Read, &["read", "get", "list"]),
	(
		PrivilegeTier::Deploy,
		&[
			"argocd",
			"sync",
			"scaffolder.action.execute",
			"scaffolder.task",
		],
	),
	(
		PrivilegeTier::ResourceManage,
		&[
			"catalog.entity.create",
			"catalog.entity.delete",
			"catalog.entity.refresh",
		],
	),
	(
		PrivilegeTier::TemplateManage,
		&["scaffolder.template", "template"],
	),
];

/// Returns the markers for a name-derived tier, or an empty slice for
/// `Admin` and `Unclassified`.
pub fn markers(tier: PrivilegeTier) -> &'static [&'static str] {
	CATEGORIES
		.iter()
		.find(|(t, _)| *t == tier)
		.map(|(_, markers)| *markers)
		.unwrap_or(&[])
}

/// Returns true if `permission` contains any marker of `tier`.
///
/// Matching is independent per tier; a name may match several.
pub fn matches(tier: PrivilegeTier, permission: &str) -> bool {
	markers(tier).iter().any(|marker| permission.contains(marker))
}

/// Classifies a permission name into exactly one tier.
pub fn classify(permission: &str) -> PrivilegeTier {
	CATEGORIES
		.iter()
		.find(|(_, markers)| markers.iter().any(|marker| permission.contains(marker)))
		.map(|(tier, _)| *tier)
		.unwrap_or(PrivilegeTier::Unclassified)
}
