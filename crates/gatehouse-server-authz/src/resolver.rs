// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Principal annotation resolution.
//!
//! [`AnnotationResolver::lookup`] reports exactly what happened as a
//! [`Resolution`]. [`AnnotationResolver::resolve`] collapses every failure to
//! an empty [`AnnotationSet`] after logging it. This is the only place where a
//! directory fault turns into "no capabilities", so the fail-closed behaviour
//! can be audited here.

use std::fmt;
use std::sync::Arc;

use gatehouse_server_catalog::{CatalogError, EntityDirectory};
use tracing::{debug, warn};

use crate::types::AnnotationSet;

/// Why annotations could not be resolved for a reference.
#[derive(Debug)]
pub enum ResolutionFailure {
	/// The directory answered that no such entity exists.
	NotFound,
	/// The directory could not give a definitive answer.
	Directory(CatalogError),
}

impl fmt::Display for ResolutionFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResolutionFailure::NotFound => f.write_str("entity not found"),
			ResolutionFailure::Directory(err) => write!(f, "{err}"),
		}
	}
}

/// Result of looking up a principal's annotations.
#[derive(Debug)]
pub enum Resolution {
	/// The principal carried no directory reference; nothing was queried.
	NoReference,
	/// The entity was found; its full annotation snapshot.
	Resolved(AnnotationSet),
	/// The lookup did not produce an entity.
	Failed {
		entity_ref: String,
		failure: ResolutionFailure,
	},
}

impl Resolution {
	pub fn is_failed(&self) -> bool {
		matches!(self, Resolution::Failed { .. })
	}
}

/// Resolves principal references to capability annotations.
#[derive(Clone)]
pub struct AnnotationResolver {
	directory: Arc<dyn EntityDirectory>,
}

impl fmt::Debug for AnnotationResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnnotationResolver").finish_non_exhaustive()
	}
}

impl AnnotationResolver {
	pub fn new(directory: Arc<dyn EntityDirectory>) -> Self {
		Self { directory }
	}

	/// Looks up `entity_ref` without hiding failures.
	pub async fn lookup(&self, entity_ref: Option<&str>) -> Resolution {
		let Some(entity_ref) = entity_ref else {
			return Resolution::NoReference;
		};

		match self.directory.get_entity_by_ref(entity_ref).await {
			Ok(Some(entity)) => Resolution::Resolved(entity.into_annotations().into()),
			Ok(None) => Resolution::Failed {
				entity_ref: entity_ref.to_string(),
				failure: ResolutionFailure::NotFound,
			},
			Err(err) => Resolution::Failed {
				entity_ref: entity_ref.to_string(),
				failure: ResolutionFailure::Directory(err),
			},
		}
	}

	/// Resolves `entity_ref` to its annotations, or an empty set on any
	/// failure. Never returns an error.
	pub async fn resolve(&self, entity_ref: Option<&str>) -> AnnotationSet {
		match self.lookup(entity_ref).await {
			Resolution::NoReference => {
				debug!("principal has no entity reference");
				AnnotationSet::new()
			}
			Resolution::Resolved(annotations) => {
				debug!(
					entity_ref = entity_ref.unwrap_or_default(),
					annotation_count = annotations.len(),
					"resolved principal annotations"
				);
				annotations
			}
			Resolution::Failed {
				entity_ref,
				failure,
			} => {
				let transient = matches!(&failure, ResolutionFailure::Directory(err) if err.is_transient());
				warn!(
					entity_ref = %entity_ref,
					error = %failure,
					transient,
					"principal annotations unavailable, treating as none"
				);
				AnnotationSet::new()
			}
		}
	}
}
