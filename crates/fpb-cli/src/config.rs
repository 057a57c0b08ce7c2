//! Report rendering configuration.
//!
//! Defaults come from the environment; command line flags override them.

use fpb_core::{RenderFormat, TextStyle};

/// How reports are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Output format.
    pub format: RenderFormat,
    /// Text output layout.
    pub style: TextStyle,
    /// Stamp JSON and YAML output with the generation time.
    pub timestamp: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Text,
            style: TextStyle::default(),
            timestamp: false,
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FPB_REPORT_FORMAT`: `text`, `json` or `yaml` (default: `text`)
    /// - `FPB_REPORT_INDENT`: spaces per nesting level (default: 4)
    /// - `FPB_REPORT_POINTER`: marker before the deepest failures (default: `"> "`)
    /// - `FPB_REPORT_TIMESTAMP`: `1`/`true` to stamp structured output
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("FPB_REPORT_FORMAT") {
            config.format = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FPB_REPORT_FORMAT".to_string(), raw))?;
        }
        if let Some(raw) = lookup("FPB_REPORT_INDENT") {
            config.style.indent = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FPB_REPORT_INDENT".to_string(), raw))?;
        }
        if let Some(raw) = lookup("FPB_REPORT_POINTER") {
            config.style.failure_pointer = raw;
        }
        if let Some(raw) = lookup("FPB_REPORT_TIMESTAMP") {
            config.timestamp = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(ConfigError::InvalidValue("FPB_REPORT_TIMESTAMP".to_string(), raw)),
            };
        }
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that does not parse.
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = ReportConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.style.indent, 4);
        assert_eq!(config.style.failure_pointer, "> ");
    }

    #[test]
    fn variables_override_defaults() {
        let config = ReportConfig::from_lookup(lookup(&[
            ("FPB_REPORT_FORMAT", "yaml"),
            ("FPB_REPORT_INDENT", "2"),
            ("FPB_REPORT_POINTER", "* "),
            ("FPB_REPORT_TIMESTAMP", "true"),
        ]))
        .unwrap();
        assert_eq!(config.format, RenderFormat::Yaml);
        assert_eq!(config.style.indent, 2);
        assert_eq!(config.style.failure_pointer, "* ");
        assert!(config.timestamp);
    }

    #[test]
    fn invalid_values_are_errors() {
        for (name, value) in [
            ("FPB_REPORT_FORMAT", "xml"),
            ("FPB_REPORT_INDENT", "-1"),
            ("FPB_REPORT_TIMESTAMP", "maybe"),
        ] {
            let err = ReportConfig::from_lookup(lookup(&[(name, value)])).unwrap_err();
            assert!(err.to_string().contains(name));
        }
    }
}
