//! # Report Tree
//!
//! Every loader step and every check produces a [`ReportNode`]. Nodes are
//! only ever appended, never removed or reordered, and a node's failure
//! state is computed from its subtree on each query rather than cached.
//!
//! ## Rendering
//!
//! [`ReportNode::render`] produces one of three formats:
//!
//! - `text`: one line per node, indented by depth. The deepest failing line
//!   on each path carries a pointer marker in place of its indent.
//! - `json` / `yaml`: a [`RenderedReport`] document holding the tree and an
//!   optional summary. A timestamp is included only when one is supplied
//!   through [`RenderOptions`].
//!
//! Rendering is a pure function of the tree and the options.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Severity of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// A failure. Counted by [`ReportNode::count_failures`].
    Error,
    /// A problem that does not fail validation.
    Warning,
    /// Progress information.
    Info,
    /// Diagnostic detail.
    Debug,
}

impl Level {
    /// Lowercase name, as used in JSON and YAML output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for [`ReportNode::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Indented plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl RenderFormat {
    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Text => "text",
            RenderFormat::Json => "json",
            RenderFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(RenderFormat::Text),
            "json" => Ok(RenderFormat::Json),
            "yaml" | "yml" => Ok(RenderFormat::Yaml),
            other => Err(format!("unknown report format {other:?}; expected text, json or yaml")),
        }
    }
}

/// Layout of the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// Spaces per depth level.
    pub indent: usize,
    /// Marker placed in front of the deepest failing line on each path.
    pub failure_pointer: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            indent: 4,
            failure_pointer: "> ".to_string(),
        }
    }
}

/// Options accepted by [`ReportNode::render_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text layout.
    pub style: TextStyle,
    /// Timestamp stamped into JSON and YAML output. Never implied.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Verdict attached to a rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// True when the tree holds no error nodes.
    pub successful: bool,
    /// Number of error nodes in the tree.
    pub failures: usize,
}

/// Top-level document of the JSON and YAML formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReport {
    /// The report tree.
    pub report: ReportNode,
    /// Verdict, present when a summary was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
    /// Generation time, present only when explicitly supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// One node of a validation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<Level>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ReportNode>,
}

impl ReportNode {
    /// A titled node with no level and no children.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            level: None,
            children: Vec::new(),
        }
    }

    /// An untitled grouping node. Not printed in text output; its children
    /// are.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A leaf line at the given level.
    pub fn leaf(level: Level, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            level: Some(level),
            children: Vec::new(),
        }
    }

    /// The node's own text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The node's own level, if any.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[ReportNode] {
        &self.children
    }

    /// Append one child.
    pub fn add_node(&mut self, node: ReportNode) -> &mut Self {
        self.children.push(node);
        self
    }

    /// Append children in order.
    ///
    /// Only [`ReportNode`] values are accepted, so a non-node argument is a
    /// compile error rather than a runtime one.
    pub fn add_nodes<I>(&mut self, nodes: I) -> &mut Self
    where
        I: IntoIterator<Item = ReportNode>,
    {
        self.children.extend(nodes);
        self
    }

    /// Append an error line. Accepts strings and error values alike.
    pub fn error(&mut self, message: impl fmt::Display) -> &mut Self {
        self.push_leaf(Level::Error, message)
    }

    /// Append an error line followed by one error line per labeled extra,
    /// each formatted `"key: value"`.
    pub fn error_with<I, K, V>(&mut self, message: impl fmt::Display, details: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        self.push_leaf(Level::Error, message);
        for (key, value) in details {
            self.push_leaf(Level::Error, format!("{key}: {value}"));
        }
        self
    }

    /// Append a warning line.
    pub fn warning(&mut self, message: impl fmt::Display) -> &mut Self {
        self.push_leaf(Level::Warning, message)
    }

    /// Append an info line.
    pub fn info(&mut self, message: impl fmt::Display) -> &mut Self {
        self.push_leaf(Level::Info, message)
    }

    /// Append a debug line.
    pub fn debug(&mut self, message: impl fmt::Display) -> &mut Self {
        self.push_leaf(Level::Debug, message)
    }

    fn push_leaf(&mut self, level: Level, message: impl fmt::Display) -> &mut Self {
        let node = ReportNode::leaf(level, message.to_string());
        self.children.push(node);
        self
    }

    /// True if this node is an error or any descendant is.
    pub fn is_failed(&self) -> bool {
        self.level == Some(Level::Error) || self.children.iter().any(ReportNode::is_failed)
    }

    /// Number of error-level nodes in this subtree, this node included.
    pub fn count_failures(&self) -> usize {
        let own = usize::from(self.level == Some(Level::Error));
        own + self
            .children
            .iter()
            .map(ReportNode::count_failures)
            .sum::<usize>()
    }

    /// The summary verdict for this tree.
    pub fn summary(&self) -> ReportSummary {
        let failures = self.count_failures();
        ReportSummary {
            successful: failures == 0,
            failures,
        }
    }

    /// Render with default options.
    pub fn render(
        &self,
        format: RenderFormat,
        include_summary: bool,
    ) -> Result<String, RenderError> {
        self.render_with(format, include_summary, &RenderOptions::default())
    }

    /// Render with explicit style and timestamp options.
    pub fn render_with(
        &self,
        format: RenderFormat,
        include_summary: bool,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        match format {
            RenderFormat::Text => Ok(self.render_text(include_summary, &options.style)),
            RenderFormat::Json => {
                let doc = self.rendered_document(include_summary, options);
                Ok(serde_json::to_string_pretty(&doc)?)
            }
            RenderFormat::Yaml => {
                let doc = self.rendered_document(include_summary, options);
                Ok(serde_yaml::to_string(&doc)?)
            }
        }
    }

    fn rendered_document(&self, include_summary: bool, options: &RenderOptions) -> RenderedReport {
        RenderedReport {
            report: self.clone(),
            summary: include_summary.then(|| self.summary()),
            generated_at: options.generated_at,
        }
    }

    fn render_text(&self, include_summary: bool, style: &TextStyle) -> String {
        let mut lines = Vec::new();
        self.write_lines(&mut lines, 0, style);
        if include_summary {
            let summary = self.summary();
            let mut node = ReportNode::new("Summary:");
            if summary.successful {
                node.info("Validation successful!");
            } else {
                let noun = if summary.failures == 1 {
                    "error"
                } else {
                    "errors"
                };
                node.info(format!(
                    "Validation failed! Please fix {} {noun} listed above.",
                    summary.failures
                ));
            }
            node.write_lines(&mut lines, 0, style);
        }
        lines.join("\n")
    }

    fn write_lines(&self, lines: &mut Vec<String>, depth: usize, style: &TextStyle) {
        if self.text.is_some() || self.level.is_some() {
            let mut width = style.indent * depth;
            let deepest_failure =
                self.is_failed() && !self.children.iter().any(ReportNode::is_failed);
            let mut line = String::new();
            if deepest_failure {
                width = width.saturating_sub(style.failure_pointer.chars().count());
                line.push_str(&" ".repeat(width));
                line.push_str(&style.failure_pointer);
            } else {
                line.push_str(&" ".repeat(width));
            }
            if let Some(level) = self.level {
                line.push_str(level.label());
                line.push_str(": ");
            }
            if let Some(text) = &self.text {
                line.push_str(text);
            }
            lines.push(line.trim_end().to_string());
        }
        for child in &self.children {
            child.write_lines(lines, depth + 1, style);
        }
    }
}
