#![deny(missing_docs)]

//! # fpb-schema — Versioned Schema Registry
//!
//! JSON Schema (draft-04) documents for every plugin package format.
//!
//! Schemas are produced by pure functions over shared [`fragments`]; nothing
//! is cached or mutated after construction. [`SchemaSet::for_version`]
//! assembles the complete set for one [`fpb_core::PackageVersion`].
//!
//! Deployment task schemas come from a single generator,
//! [`task::task_schema`], driven by the closed [`TaskType`] enum. The
//! string-keyed maps in [`SchemaSet`] exist because task data selects its
//! schema by the runtime value of its `type` field.

pub mod attributes;
pub mod components;
pub mod fragments;
pub mod graph;
pub mod metadata;
pub mod registry;
pub mod roles;
pub mod task;

pub use attributes::AttributeSchemas;
pub use registry::SchemaSet;
pub use task::TaskType;
