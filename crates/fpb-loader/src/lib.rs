#![deny(missing_docs)]

//! # fpb-loader — Plugin Data Tree Loader
//!
//! Reads a plugin directory into a single [`DataTree`]: the root manifest,
//! every `*_path` reference it makes, and the auxiliary files its package
//! format expects ([`Layout`]).
//!
//! ## Design Principles
//!
//! 1. **Never abort.** [`load`] always returns a tree and a report. Missing
//!    and malformed files become report nodes so every downstream check
//!    still runs on what was loaded.
//!
//! 2. **Pure resolution.** [`loader::resolve_paths`] builds a new tree; the
//!    parsed manifest is never edited in place.
//!
//! 3. **One merge policy.** Mask matches and overlays are folded with
//!    [`files::merge_values`].

pub mod error;
pub mod files;
pub mod layout;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use layout::{Layout, Overlay};
pub use loader::{find_manifest, load, DataTree};
