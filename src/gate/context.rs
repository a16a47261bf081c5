//! Host-supplied identity of the gated extension.

/// Who the gate is protecting, as shown in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Stable id, used for per-extension hook points.
    pub extension_id: String,
    /// Display name.
    pub extension_name: String,
}

impl HostContext {
    pub fn new(extension_id: impl Into<String>, extension_name: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            extension_name: extension_name.into(),
        }
    }

    /// Name to show users: the display name, else the id.
    pub fn display_name(&self) -> &str {
        if !self.extension_name.is_empty() {
            &self.extension_name
        } else if !self.extension_id.is_empty() {
            &self.extension_id
        } else {
            "This extension"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_name_then_id() {
        assert_eq!(HostContext::new("reports", "Reports").display_name(), "Reports");
        assert_eq!(HostContext::new("reports", "").display_name(), "reports");
        assert_eq!(HostContext::default().display_name(), "This extension");
    }
}
