//! Indicator configuration.
//!
//! The accent color and the client table live in an explicit immutable
//! config passed to the indicator at construction, loadable from a
//! TOML file. Every field has a default, so an absent or empty file
//! behaves like the builtin setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::registry::{ClientEntry, ClientRegistry};

/// Panel icon color while unread mail is present.
pub const DEFAULT_ACCENT_COLOR: &str = "#E95420";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Accent color applied by the host renderer in the unread state.
    pub accent_color: String,
    /// Extra registry entries, matched after the builtin table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_clients: Vec<ClientEntry>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            extra_clients: Vec::new(),
        }
    }
}

impl IndicatorConfig {
    /// The client registry this config describes: builtin table plus
    /// any extra entries.
    pub fn registry(&self) -> ClientRegistry {
        if self.extra_clients.is_empty() {
            ClientRegistry::default()
        } else {
            ClientRegistry::with_extra_entries(self.extra_clients.clone())
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|err| format!("parse config: {err}"))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("read config {}: {err}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_reproduces_original_constants() {
        let config = IndicatorConfig::default();
        assert_eq!(config.accent_color, "#E95420");
        assert!(config.extra_clients.is_empty());
        assert!(config.registry().resolve("thunderbird.desktop").is_some());
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = IndicatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, IndicatorConfig::default());
    }

    #[test]
    fn accent_color_only_override() {
        let config = IndicatorConfig::from_toml_str(r##"accent_color = "#FF0000""##).unwrap();
        assert_eq!(config.accent_color, "#FF0000");
        assert!(config.extra_clients.is_empty());
    }

    #[test]
    fn extra_client_from_toml_resolves() {
        let raw = r#"
[[extra_clients]]
desktop_ids = ["org.kde.kmail2.desktop"]
display_name = "KMail"
launch_command = "kmail"
"#;
        let config = IndicatorConfig::from_toml_str(raw).unwrap();
        let client = config.registry().resolve("org.kde.kmail2.desktop").unwrap();
        assert_eq!(client.display_name, "KMail");
        assert_eq!(client.fallback_launch_command, None);
        // Builtin table is still there.
        assert!(config.registry().resolve("org.gnome.Geary.desktop").is_some());
    }

    #[test]
    fn extra_client_fallback_round_trips() {
        let raw = r#"
[[extra_clients]]
desktop_ids = ["org.kde.kmail2.desktop"]
display_name = "KMail"
launch_command = "kmail"
fallback_launch_command = "flatpak run org.kde.kmail2"
"#;
        let config = IndicatorConfig::from_toml_str(raw).unwrap();
        let client = config.registry().resolve("org.kde.kmail2.desktop").unwrap();
        assert_eq!(
            client.fallback_launch_command.as_deref(),
            Some("flatpak run org.kde.kmail2")
        );
    }

    #[test]
    fn invalid_toml_reports_parse_error() {
        let err = IndicatorConfig::from_toml_str("accent_color = [").unwrap_err();
        assert!(err.starts_with("parse config:"), "got {err:?}");
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r##"accent_color = "#123456""##).unwrap();
        let config = IndicatorConfig::load(file.path()).unwrap();
        assert_eq!(config.accent_color, "#123456");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = IndicatorConfig::load(Path::new("/nonexistent/postbell.toml")).unwrap_err();
        assert!(err.contains("/nonexistent/postbell.toml"), "got {err:?}");
    }
}
