//! Schema and run configuration.
//!
//! Everything here is plain data with serde defaults, so a run can be
//! described by a small TOML file:
//!
//! ```toml
//! data_dir = "Dynamo"
//! project_count = 2
//!
//! [assembly]
//! feature_width = 4
//! self_loops = "drop"
//!
//! [[schema.categories]]
//! name = "Beam"
//! feature_count = 4
//!
//! [[schema.categories]]
//! name = "Slab"
//! feature_count = 5
//! id_label = "Slab ID"
//!
//! [tables]
//! feature_headers = ["Dim 1", "Dim 2", "Dim 3", "Volume"]
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

// ============================================================================
// Category schema
// ============================================================================

/// One element category and the layout of its export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    /// Number of feature lines that make up one record (`F`).
    pub feature_count: usize,
    /// Label of the identifier line. Defaults to `"<name> ID"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_label: Option<String>,
    /// Label of the connections line. Defaults to `"<name> Connections"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections_label: Option<String>,
    /// File name inside a project directory. Defaults to `"<name>sData.csv"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, feature_count: usize) -> Self {
        Self {
            name: name.into(),
            feature_count,
            id_label: None,
            connections_label: None,
            file_name: None,
        }
    }

    pub fn id_label(&self) -> Cow<'_, str> {
        match &self.id_label {
            Some(l) => Cow::Borrowed(l),
            None => Cow::Owned(format!("{} ID", self.name)),
        }
    }

    pub fn connections_label(&self) -> Cow<'_, str> {
        match &self.connections_label {
            Some(l) => Cow::Borrowed(l),
            None => Cow::Owned(format!("{} Connections", self.name)),
        }
    }

    pub fn file_name(&self) -> Cow<'_, str> {
        match &self.file_name {
            Some(f) => Cow::Borrowed(f),
            None => Cow::Owned(format!("{}sData.csv", self.name)),
        }
    }
}

/// Ordered set of categories. The order is the node concatenation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub categories: Vec<CategorySpec>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            categories: vec![
                CategorySpec::new("Beam", 4),
                CategorySpec::new("Column", 4),
                CategorySpec::new("Slab", 5),
                CategorySpec::new("Wall", 4),
            ],
        }
    }
}

impl Schema {
    pub fn new(categories: Vec<CategorySpec>) -> Self {
        Self { categories }
    }

    pub fn get(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Infer the category of a file from its name.
    ///
    /// The first category (in schema order) whose name is a substring of
    /// the file name wins. Directory components are not considered.
    pub fn infer(&self, path: &Path) -> Option<&CategorySpec> {
        let file_name = path.file_name()?.to_string_lossy();
        self.categories.iter().find(|c| file_name.contains(c.name.as_str()))
    }

    /// Smallest `F` across categories.
    pub fn min_feature_count(&self) -> Option<usize> {
        self.categories.iter().map(|c| c.feature_count).min()
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::ConfigError("schema declares no categories".into()));
        }
        for (i, cat) in self.categories.iter().enumerate() {
            if cat.name.is_empty() {
                return Err(Error::ConfigError(format!("category #{i} has an empty name")));
            }
            if cat.feature_count == 0 {
                return Err(Error::ConfigError(format!(
                    "category '{}' must declare at least one feature", cat.name
                )));
            }
            if self.categories[..i].iter().any(|c| c.name == cat.name) {
                return Err(Error::ConfigError(format!("category '{}' declared twice", cat.name)));
            }
            if cat.id_label() == cat.connections_label() {
                return Err(Error::ConfigError(format!(
                    "category '{}' uses the same label for ids and connections", cat.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Assembly settings
// ============================================================================

/// What to do with an element that lists itself as a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// Skip the reference; no edge is emitted.
    #[default]
    Drop,
    /// Emit a `(i, i)` edge.
    Keep,
    /// Fail with `Error::SelfLoopError`.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Working feature width. `None` keeps each category's native width.
    pub feature_width: Option<usize>,
    pub self_loops: SelfLoopPolicy,
}

impl AssemblyConfig {
    pub fn with_feature_width(mut self, width: usize) -> Self {
        self.feature_width = Some(width);
        self
    }

    pub fn with_self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }
}

// ============================================================================
// Output tables
// ============================================================================

/// File names and header names of the exported tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub node_file: String,
    pub edge_file: String,
    /// Also write the whole graph as JSON next to the tables.
    pub json_file: Option<String>,
    pub node_id_header: String,
    pub element_id_header: String,
    /// Names of the feature columns; extra columns become `Feature <n>`.
    pub feature_headers: Vec<String>,
    pub src_header: String,
    pub dst_header: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            node_file: "Nodes.csv".into(),
            edge_file: "Edges.csv".into(),
            json_file: None,
            node_id_header: "Node ID".into(),
            element_id_header: "Element ID".into(),
            feature_headers: ["Dim 1", "Dim 2", "Dim 3", "Volume"].map(String::from).to_vec(),
            src_header: "Src ID".into(),
            dst_header: "Dst ID".into(),
        }
    }
}

impl TableConfig {
    /// Header of feature column `i` (0-based).
    pub fn feature_header(&self, i: usize) -> Cow<'_, str> {
        match self.feature_headers.get(i) {
            Some(h) => Cow::Borrowed(h),
            None => Cow::Owned(format!("Feature {}", i + 1)),
        }
    }
}

// ============================================================================
// Pipeline settings
// ============================================================================

/// Settings for a multi-project run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the `Project NNN` folders.
    pub data_dir: PathBuf,
    /// Projects `1..=project_count` are processed.
    pub project_count: usize,
    /// Project folder name prefix; the 3-digit project number is appended.
    pub project_prefix: String,
    pub schema: Schema,
    pub assembly: AssemblyConfig,
    pub tables: TableConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Dynamo"),
            project_count: 1,
            project_prefix: "Project ".into(),
            schema: Schema::default(),
            assembly: AssemblyConfig::default(),
            tables: TableConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, project_count: usize) -> Self {
        Self { data_dir: data_dir.into(), project_count, ..Self::default() }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Directory of project `n` (1-based), e.g. `Dynamo/Project 007`.
    pub fn project_dir(&self, n: usize) -> PathBuf {
        self.data_dir.join(format!("{}{:03}", self.project_prefix, n))
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        if let Some(width) = self.assembly.feature_width {
            if width == 0 {
                return Err(Error::ConfigError("feature_width must be at least 1".into()));
            }
            let min = self.schema.min_feature_count().unwrap_or(0);
            if width > min {
                return Err(Error::ConfigError(format!(
                    "feature_width {width} exceeds the narrowest category ({min} features)"
                )));
            }
        }
        if self.tables.node_file == self.tables.edge_file {
            return Err(Error::ConfigError("node and edge tables share a file name".into()));
        }
        Ok(())
    }
}
