//! Overlay settings.
//!
//! Explicit, statically-typed schema: every option is a named field with a
//! serde default, loaded from a YAML file under the home config directory
//! (overridable through an environment variable). The core only reads these
//! values; how they are
//! edited or persisted is the host's business. A missing or invalid file
//! is never fatal: it logs and falls back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable overriding the settings file location.
const ENV_SETTINGS_PATH: &str = "PMONOWPLAYING_CONFIG";
/// Default settings file, relative to the home directory.
const DEFAULT_RELATIVE_PATH: &str = ".config/pmonowplaying/config.yaml";

/// Default base URL of the companion HTTP endpoint.
const DEFAULT_BASE_URL: &str = "http://localhost:58888";

/// Which side of the screen the panel sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// All overlay options, with their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    // Layout
    pub side: Side,
    /// Vertical position of the panel, percentage of the screen height.
    pub y_position: u8,
    /// Background opacity (0 = transparent, 100 = opaque).
    pub background_opacity: u8,

    // Visibility toggles
    pub show_cover_art: bool,
    pub show_media_title: bool,
    pub show_artist_name: bool,
    pub show_timeline: bool,
    pub show_play_status_icon: bool,

    // Companion
    /// Base URL of the companion HTTP endpoint.
    pub endpoint_base_url: String,
    /// Path of the companion executable. `None` means the endpoint is
    /// managed externally and the supervisor stays idle.
    pub companion_path: Option<PathBuf>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        OverlaySettings {
            side: Side::Right,
            y_position: 10,
            background_opacity: 55,
            show_cover_art: true,
            show_media_title: true,
            show_artist_name: true,
            show_timeline: true,
            show_play_status_icon: true,
            endpoint_base_url: DEFAULT_BASE_URL.to_string(),
            companion_path: None,
        }
    }
}

impl OverlaySettings {
    /// Load settings from the default location.
    ///
    /// Resolution order: `PMONOWPLAYING_CONFIG` env var, then
    /// `~/.config/pmonowplaying/config.yaml`. Missing file or unreadable
    /// content falls back to [`Default`].
    pub fn load() -> Self {
        let path = match std::env::var(ENV_SETTINGS_PATH) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => match dirs::home_dir() {
                Some(home) => home.join(DEFAULT_RELATIVE_PATH),
                None => {
                    warn!("Cannot resolve home directory, using default settings");
                    return Self::default();
                }
            },
        };
        Self::load_from(&path)
    }

    /// Load settings from an explicit file path.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                info!(
                    "No settings file at {} ({error}), using defaults",
                    path.display()
                );
                return Self::default();
            }
        };

        match serde_yaml::from_str::<OverlaySettings>(&content) {
            Ok(settings) => settings.sanitized(),
            Err(error) => {
                warn!(
                    "Invalid settings file {}: {error}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values back into their documented bounds.
    pub fn sanitized(mut self) -> Self {
        if self.y_position > 100 {
            warn!("y_position {} out of range, clamping to 100", self.y_position);
            self.y_position = 100;
        }
        if self.background_opacity > 100 {
            warn!(
                "background_opacity {} out of range, clamping to 100",
                self.background_opacity
            );
            self.background_opacity = 100;
        }
        self
    }

    /// True when at least one visual element is enabled; an entirely
    /// disabled overlay draws no background panel either.
    pub fn any_element_visible(&self) -> bool {
        self.show_cover_art
            || self.show_media_title
            || self.show_artist_name
            || self.show_timeline
            || self.show_play_status_icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let settings = OverlaySettings::default();
        assert_eq!(settings.side, Side::Right);
        assert_eq!(settings.y_position, 10);
        assert_eq!(settings.background_opacity, 55);
        assert!(settings.show_cover_art);
        assert!(settings.show_media_title);
        assert!(settings.show_artist_name);
        assert!(settings.show_timeline);
        assert!(settings.show_play_status_icon);
        assert_eq!(settings.endpoint_base_url, "http://localhost:58888");
        assert!(settings.companion_path.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = OverlaySettings::load_from(Path::new("/nonexistent/config.yaml"));
        assert_eq!(settings.y_position, OverlaySettings::default().y_position);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "side: left\nshow_timeline: false").unwrap();

        let settings = OverlaySettings::load_from(file.path());
        assert_eq!(settings.side, Side::Left);
        assert!(!settings.show_timeline);
        assert_eq!(settings.background_opacity, 55);
    }

    #[test]
    fn invalid_yaml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "side: {{nonsense").unwrap();

        let settings = OverlaySettings::load_from(file.path());
        assert_eq!(settings.side, Side::Right);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "y_position: 250\nbackground_opacity: 101").unwrap();

        let settings = OverlaySettings::load_from(file.path());
        assert_eq!(settings.y_position, 100);
        assert_eq!(settings.background_opacity, 100);
    }

    #[test]
    fn visibility_aggregate() {
        let mut settings = OverlaySettings::default();
        assert!(settings.any_element_visible());
        settings.show_cover_art = false;
        settings.show_media_title = false;
        settings.show_artist_name = false;
        settings.show_timeline = false;
        settings.show_play_status_icon = false;
        assert!(!settings.any_element_visible());
    }
}
