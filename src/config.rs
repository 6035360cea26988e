//! Decoded form of a buildpack.toml

use serde::Deserialize;
use std::collections::BTreeMap;

pub const BUILDPACK_TOML: &str = "buildpack.toml";

/// Contents of a buildpack.toml. Every table is optional; keys this crate
/// does not model are ignored, except under `[metadata]` where they are kept
/// in `unparsed`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BuildpackConfig {
    #[serde(default)]
    pub api: String,

    #[serde(default)]
    pub buildpack: BuildpackInfo,

    #[serde(default)]
    pub metadata: ConfigMetadata,

    #[serde(default)]
    pub stacks: Vec<ConfigStack>,

    /// Sub-buildpack groups. Non-empty only for meta-buildpacks.
    #[serde(default)]
    pub order: Vec<ConfigOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildpackInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub homepage: Option<String>,
    #[serde(default)]
    pub clear_env: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<ConfigLicense>,
    #[serde(default)]
    pub sbom_formats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLicense {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigMetadata {
    #[serde(default)]
    pub include_files: Vec<String>,
    pub pre_package: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<ConfigDependency>,
    #[serde(default)]
    pub default_versions: BTreeMap<String, String>,
    /// Buildpack-specific keys with no dedicated field
    #[serde(flatten)]
    pub unparsed: BTreeMap<String, toml::Value>,
}

/// One entry of `[[metadata.dependencies]]`. Key spelling is mixed
/// (`source_sha256` next to `source-checksum`) and kept as buildpacks write it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigDependency {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub uri: String,
    pub sha256: Option<String>,
    pub checksum: Option<String>,
    #[serde(default)]
    pub stacks: Vec<String>,
    pub source: Option<String>,
    pub source_sha256: Option<String>,
    #[serde(rename = "source-checksum")]
    pub source_checksum: Option<String>,
    pub cpe: Option<String>,
    pub purl: Option<String>,
    #[serde(default)]
    pub licenses: Vec<toml::Value>,
    pub deprecation_date: Option<toml::value::Datetime>,
    #[serde(rename = "strip-components", default)]
    pub strip_components: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigStack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub mixins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOrder {
    #[serde(default)]
    pub group: Vec<ConfigOrderGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOrderGroup {
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub optional: bool,
}

impl BuildpackConfig {
    /// Decode buildpack.toml contents
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// A meta-buildpack composes other buildpacks through `[[order]]`
    /// instead of implementing detect/build itself.
    pub fn is_meta(&self) -> bool {
        !self.order.is_empty()
    }
}
