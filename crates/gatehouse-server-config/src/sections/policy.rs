// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfigLayer {
	/// Prepended to every capability annotation name, e.g. `backstage.io/`.
	pub annotation_prefix: Option<String>,
}

impl PolicyConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.annotation_prefix.is_some() {
			self.annotation_prefix = other.annotation_prefix;
		}
	}

	pub fn finalize(self) -> PolicyConfig {
		PolicyConfig {
			annotation_prefix: self.annotation_prefix.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
	pub annotation_prefix: String,
}
