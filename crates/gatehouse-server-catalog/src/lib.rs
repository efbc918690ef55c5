// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Entity directory access for Gatehouse.
//!
//! This crate provides:
//! - [`EntityDirectory`]: the one-method lookup capability the policy engine
//!   depends on
//! - [`CatalogClient`]: an HTTP implementation against the software catalog's
//!   `entities/by-name` endpoint
//! - [`InMemoryDirectory`]: a map-backed implementation for tests and local runs
//! - [`EntityRef`]: parsing of `[kind:][namespace/]name` references

pub mod client;
pub mod entity;
pub mod entity_ref;
pub mod error;
pub mod memory;

pub use client::{CatalogClient, CatalogClientConfig, EntityDirectory, DEFAULT_TIMEOUT};
pub use entity::{Entity, EntityMetadata};
pub use entity_ref::{EntityRef, EntityRefDefaults, EntityRefError};
pub use error::{CatalogError, CatalogResult};
pub use memory::InMemoryDirectory;
