#![deny(missing_docs)]

//! # fpb-checks — Checks Library
//!
//! Reusable checks over loaded plugin data. Every check returns a
//! [`fpb_core::ReportNode`] titled after what it checked; a failed check is a
//! report with error nodes, never an `Err`. `Err` is reserved for
//! [`fpb_core::ConfigurationError`]: a schema that does not compile is a
//! defect of this tool, not of the plugin.
//!
//! ## Checks
//!
//! | Check | Purpose |
//! |-------|---------|
//! | [`generic_schema_check`] | one JSON Schema, violations keyed by path |
//! | [`multi_type_check`] | record lists dispatched on their `type` field |
//! | [`version_compatibility_check`] | declared Fuel releases vs. a minimum |
//! | [`path_existence_check`] | files and glob masks below the plugin root |
//! | [`environment_attributes_check`] | `environment_config.yaml` entries |
//! | [`task_role_check`] | role references in deployment tasks |
//! | [`legacy_fuel_version_check`], [`mode_directive_check`] | deprecation warnings |

pub mod attributes;
pub mod compatibility;
pub mod deprecation;
pub mod multi;
pub mod paths;
pub mod roles;
pub mod schema;

pub use attributes::environment_attributes_check;
pub use compatibility::version_compatibility_check;
pub use deprecation::{legacy_fuel_version_check, mode_directive_check};
pub use multi::multi_type_check;
pub use paths::{path_existence_check, release_paths_check};
pub use roles::task_role_check;
pub use schema::{generic_schema_check, Violation};
