//! Requirement descriptors and the specs they are built from.

use crate::requirements::resolver::Resolution;
use crate::requirements::value::Resolvable;
use crate::requirements::version;

/// Minimum version assumed when a full override leaves it out.
pub const DEFAULT_MINIMUM: &str = "1";

/// How a caller declares a requirement.
#[derive(Debug, Clone)]
pub enum RequirementSpec {
    /// Shorthand: only the minimum version.
    Minimum(String),
    /// Any subset of descriptor fields.
    Full(RequirementOverride),
}

impl From<&str> for RequirementSpec {
    fn from(minimum: &str) -> Self {
        RequirementSpec::Minimum(minimum.to_string())
    }
}

impl From<String> for RequirementSpec {
    fn from(minimum: String) -> Self {
        RequirementSpec::Minimum(minimum)
    }
}

impl From<RequirementOverride> for RequirementSpec {
    fn from(spec: RequirementOverride) -> Self {
        RequirementSpec::Full(spec)
    }
}

/// Explicit descriptor fields; anything left `None` takes its default.
#[derive(Debug, Clone, Default)]
pub struct RequirementOverride {
    pub name: Option<String>,
    pub minimum: Option<String>,
    pub current: Option<Resolvable<Option<String>>>,
    pub exists: Option<Resolvable<bool>>,
}

impl RequirementOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn minimum(mut self, minimum: impl Into<String>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    /// Fixed current version.
    pub fn current(mut self, current: impl Into<String>) -> Self {
        self.current = Some(Resolvable::literal(Some(current.into())));
        self
    }

    /// Current version computed at check time.
    pub fn current_with(mut self, producer: impl Fn() -> Option<String> + 'static) -> Self {
        self.current = Some(Resolvable::computed(producer));
        self
    }

    /// Fixed presence flag.
    pub fn exists(mut self, exists: bool) -> Self {
        self.exists = Some(Resolvable::literal(exists));
        self
    }

    /// Presence computed at check time.
    pub fn exists_with(mut self, producer: impl Fn() -> bool + 'static) -> Self {
        self.exists = Some(Resolvable::computed(producer));
        self
    }
}

/// A single named dependency constraint and its last evaluation.
#[derive(Debug, Clone)]
pub struct RequirementDescriptor {
    id: String,
    name: String,
    minimum: String,
    current: Resolvable<Option<String>>,
    exists: Resolvable<bool>,
    resolved_current: Option<String>,
    resolved_exists: bool,
    checked: bool,
    met: bool,
}

impl RequirementDescriptor {
    /// Build an unchecked descriptor from a spec.
    ///
    /// `default_name` is used when the spec carries no display name.
    pub fn from_spec(id: &str, spec: RequirementSpec, default_name: &str) -> Self {
        let spec = match spec {
            RequirementSpec::Minimum(minimum) => RequirementOverride {
                minimum: Some(minimum),
                ..Default::default()
            },
            RequirementSpec::Full(spec) => spec,
        };

        Self {
            id: sanitize_key(id),
            name: spec.name.unwrap_or_else(|| default_name.to_string()),
            minimum: spec.minimum.unwrap_or_else(|| DEFAULT_MINIMUM.to_string()),
            current: spec.current.unwrap_or(Resolvable::Literal(None)),
            exists: spec.exists.unwrap_or(Resolvable::Literal(false)),
            resolved_current: None,
            resolved_exists: false,
            checked: false,
            met: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum(&self) -> &str {
        &self.minimum
    }

    /// Declared current version source.
    pub fn current_source(&self) -> &Resolvable<Option<String>> {
        &self.current
    }

    /// Declared presence source.
    pub fn exists_source(&self) -> &Resolvable<bool> {
        &self.exists
    }

    /// Current version as of the last check.
    pub fn current(&self) -> Option<&str> {
        self.resolved_current.as_deref()
    }

    /// Presence as of the last check.
    pub fn exists(&self) -> bool {
        self.resolved_exists
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn met(&self) -> bool {
        self.met
    }

    /// Record a resolution, updating every evaluated field at once.
    pub(crate) fn apply(&mut self, resolution: Resolution) {
        let current = resolution
            .current
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let met = resolution.exists
            && current
                .as_deref()
                .is_some_and(|current| version::meets_minimum(current, &self.minimum));

        tracing::debug!(
            requirement = %self.id,
            current = current.as_deref().unwrap_or("-"),
            minimum = %self.minimum,
            exists = resolution.exists,
            met,
            "Requirement checked"
        );

        self.resolved_current = current;
        self.resolved_exists = resolution.exists;
        self.checked = true;
        self.met = met;
    }
}

/// Normalize a requirement id: lowercase ASCII alphanumerics, `-` and `_`.
pub fn sanitize_key(id: &str) -> String {
    id.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(current: Option<&str>, exists: bool) -> Resolution {
        Resolution {
            current: current.map(String::from),
            exists,
        }
    }

    #[test]
    fn shorthand_sets_minimum_only() {
        let d = RequirementDescriptor::from_spec("runtime", "7.4".into(), "Runtime");
        assert_eq!(d.id(), "runtime");
        assert_eq!(d.name(), "Runtime");
        assert_eq!(d.minimum(), "7.4");
        assert!(!d.checked());
        assert!(!d.met());
    }

    #[test]
    fn override_defaults_minimum() {
        let d = RequirementDescriptor::from_spec(
            "x",
            RequirementOverride::new().name("X").into(),
            "",
        );
        assert_eq!(d.minimum(), DEFAULT_MINIMUM);
        assert_eq!(d.name(), "X");
        assert!(matches!(d.exists_source(), Resolvable::Literal(false)));
        assert!(matches!(d.current_source(), Resolvable::Literal(None)));
    }

    #[test]
    fn explicit_name_beats_default() {
        let d = RequirementDescriptor::from_spec(
            "runtime",
            RequirementOverride::new().name("Interpreter").minimum("1").into(),
            "Runtime",
        );
        assert_eq!(d.name(), "Interpreter");
    }

    #[test]
    fn sanitize_key_drops_invalid_characters() {
        assert_eq!(sanitize_key("Companion Product!"), "companionproduct");
        assert_eq!(sanitize_key("peer_ext-2"), "peer_ext-2");
    }

    #[test]
    fn apply_marks_met_when_present_and_new_enough() {
        let mut d = RequirementDescriptor::from_spec("x", "2.0".into(), "");
        d.apply(resolution(Some("2.1"), true));
        assert!(d.checked());
        assert!(d.met());
        assert_eq!(d.current(), Some("2.1"));
    }

    #[test]
    fn apply_is_unmet_when_missing() {
        let mut d = RequirementDescriptor::from_spec("x", "1.0".into(), "");
        d.apply(resolution(Some("5.0"), false));
        assert!(d.checked());
        assert!(!d.met());
        assert!(!d.exists());
    }

    #[test]
    fn apply_treats_blank_current_as_absent() {
        let mut d = RequirementDescriptor::from_spec("x", "1.0".into(), "");
        d.apply(resolution(Some("   "), true));
        assert!(!d.met());
        assert_eq!(d.current(), None);
    }

    #[test]
    fn apply_is_unmet_for_non_version_current() {
        let mut d = RequirementDescriptor::from_spec("x", "0".into(), "");
        d.apply(resolution(Some("unknown"), true));
        assert!(!d.met());
        assert_eq!(d.current(), Some("unknown"));
    }
}
