#![deny(missing_docs)]

//! # fpb-core — Foundational Types for the Fuel Plugin Builder
//!
//! Every other crate in the workspace depends on this one. It has no
//! internal crate dependencies. It uses only `serde`, `serde_json`, `serde_yaml`,
//! `thiserror` and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **One report structure.** Loaders, checks and validators all speak
//!    [`ReportNode`]. Failure is derived by traversal, so a subtree attached
//!    before one of its descendants fails still reports the failure.
//!
//! 2. **Typed versions.** [`PackageVersion`] is a closed enum with one
//!    variant per supported plugin format; [`PlatformVersion`] compares
//!    dotted numeric strings component-wise (`6.10` > `6.9`).
//!
//! 3. **Structured errors.** [`ConfigurationError`] covers the conditions
//!    that abort a run. Everything a plugin author can fix is reported as an
//!    error node instead.

pub mod error;
pub mod report;
pub mod version;

pub use error::{ConfigurationError, RenderError, VersionParseError};
pub use report::{
    Level, RenderFormat, RenderOptions, RenderedReport, ReportNode, ReportSummary, TextStyle,
};
pub use version::{PackageVersion, PlatformVersion};
