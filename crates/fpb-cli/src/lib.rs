//! # fpb-cli — Command Line Interface
//!
//! Provides the `fpb` binary.
//!
//! ## Subcommands
//!
//! - `fpb validate <PATH>`: validate a plugin directory and print the report.
//! - `fpb inspect <PATH>`: print the loaded data tree.
//! - `fpb versions`: list supported package versions.
//!
//! ```bash
//! fpb validate ./fuel_plugin_example
//! fpb validate ./fuel_plugin_example --format json --timestamp
//! FPB_REPORT_INDENT=2 fpb -vv validate ./fuel_plugin_example
//! ```

pub mod config;
pub mod inspect;
pub mod validate;
pub mod versions;
