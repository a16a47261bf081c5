//! Configuration schema for extension gates.
//!
//! ```yaml
//! extension:
//!   id: reports
//!   name: Advanced Reports
//!   entry_point: boot
//! presentation: banner
//! requirements:
//!   runtime: "7.4"
//!   companion-product: { minimum: "3.0" }
//!   node: { minimum: "18", name: "Node.js", command: "node --version" }
//! ```
//!
//! Requirement values are either a bare minimum version or a table. Versions
//! must be quoted strings or integers. YAML reads an unquoted `7.10` as the
//! float `7.1`, so float scalars are rejected as malformed.

use crate::diagnostics::{BannerSink, DiagnosticSink, RowAnnotationSink, SilentSink};
use crate::gate::HostContext;
use crate::requirements::probe::CommandProbe;
use crate::requirements::{RequirementOverride, RequirementSpec, Resolvable};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::Write;
use std::rc::Rc;

/// Entry point used when the config names none.
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// The gated extension
    pub extension: ExtensionConfig,

    /// How unmet requirements are presented
    pub presentation: PresentationMode,

    /// Requirements, in declaration order
    pub requirements: RequirementList,
}

impl GateConfig {
    /// Requirement specs in declaration order.
    ///
    /// Malformed entries become requirements that can never be met.
    pub fn requirement_specs(&self) -> Vec<(String, RequirementSpec)> {
        self.requirements
            .iter()
            .map(|(id, config)| {
                if let RequirementConfig::Malformed(value) = config {
                    tracing::warn!(
                        "Requirement '{}' is malformed ({:?}); it will be reported as unmet",
                        id,
                        value
                    );
                }
                (id.clone(), config.to_spec())
            })
            .collect()
    }
}

/// Identity of the gated extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Stable id, used for per-extension hook points
    pub id: String,

    /// Display name
    pub name: String,

    /// Name of the callback to run when requirements are met
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
}

impl ExtensionConfig {
    pub fn context(&self) -> HostContext {
        HostContext::new(&self.id, &self.name)
    }

    /// Configured entry point, or [`DEFAULT_ENTRY_POINT`].
    pub fn entry_point(&self) -> &str {
        self.entry_point.as_deref().unwrap_or(DEFAULT_ENTRY_POINT)
    }
}

/// How unmet requirements are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Notice listing every unmet requirement
    #[default]
    Banner,
    /// Annotation on the extension's listing row
    Row,
    /// Nothing beyond log output
    Silent,
}

impl PresentationMode {
    /// Sink for this mode, rendering into `writer`.
    pub fn sink<W: Write + 'static>(&self, writer: W, color: bool) -> Rc<dyn DiagnosticSink> {
        match self {
            PresentationMode::Banner => Rc::new(BannerSink::new(writer).with_color(color)),
            PresentationMode::Row => Rc::new(RowAnnotationSink::new(writer).with_color(color)),
            PresentationMode::Silent => Rc::new(SilentSink),
        }
    }
}

/// A version written as text or as a YAML integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Text(String),
    Integer(u64),
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionValue::Text(s) => f.write_str(s),
            VersionValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// One requirement entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementConfig {
    /// Bare minimum version
    Minimum(VersionValue),
    /// Full table
    Table(RequirementTable),
    /// Anything else; kept so the gate can still report it
    Malformed(serde_yaml::Value),
}

impl RequirementConfig {
    pub fn to_spec(&self) -> RequirementSpec {
        match self {
            RequirementConfig::Minimum(minimum) => RequirementSpec::Minimum(minimum.to_string()),
            RequirementConfig::Table(table) => table.to_spec().into(),
            RequirementConfig::Malformed(_) => RequirementOverride::new().minimum("").into(),
        }
    }
}

/// Requirement fields; anything omitted takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementTable {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Minimum version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<VersionValue>,

    /// Fixed current version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<VersionValue>,

    /// Fixed presence flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,

    /// Command whose output supplies `current` and whose success supplies `exists`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl RequirementTable {
    pub fn to_spec(&self) -> RequirementOverride {
        let spec = RequirementOverride {
            name: self.name.clone(),
            minimum: self.minimum.as_ref().map(|v| v.to_string()),
            current: self
                .current
                .as_ref()
                .map(|v| Resolvable::literal(Some(v.to_string()))),
            exists: self.exists.map(Resolvable::literal),
        };

        match &self.command {
            Some(command) => CommandProbe::new(command.clone()).apply_to(spec),
            None => spec,
        }
    }
}

/// Requirements keyed by id, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementList(Vec<(String, RequirementConfig)>);

impl RequirementList {
    pub fn new(entries: Vec<(String, RequirementConfig)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, RequirementConfig)> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&RequirementConfig> {
        self.0.iter().find(|(key, _)| key == id).map(|(_, config)| config)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RequirementList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, config) in &self.0 {
            map.serialize_entry(id, config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RequirementList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = RequirementList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of requirement ids to versions or tables")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(RequirementList::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, RequirementConfig>()? {
                    entries.push(entry);
                }
                Ok(RequirementList(entries))
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}
