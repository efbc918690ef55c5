// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Annotation-based permission policy for Gatehouse.
//!
//! A permission check takes a permission name and an optional principal and
//! answers ALLOW or DENY. The principal's capability flags are read from
//! annotations on its catalog entity:
//!
//! | Annotation             | Grants                                      |
//! |------------------------|---------------------------------------------|
//! | `admin`                | every permission                            |
//! | `can-deploy`           | ArgoCD sync, scaffolder execution and tasks |
//! | `can-create-resources` | catalog entity create / delete / refresh    |
//! | `can-create-templates` | scaffolder template operations              |
//!
//! Read permissions are open to every identified principal. Everything else
//! is denied. A principal whose entity cannot be resolved is treated as
//! having no annotations.

pub mod classify;
pub mod engine;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;

pub use classify::classify;
pub use engine::{evaluate_annotations, PolicyEngine, PolicyOutcome, Rule};
pub use resolver::{AnnotationResolver, Resolution, ResolutionFailure};
pub use types::{
	AnnotationSet, Capability, CapabilityKeys, Decision, Principal, PrivilegeTier, FLAG_SET,
};
