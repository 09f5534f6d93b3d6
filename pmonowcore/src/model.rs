//! Data model shared between the poller and the display layer.
//!
//! [`MediaInfo`] is the wire DTO returned by the companion's `media_info`
//! endpoint; it is consumed and discarded during reconciliation.
//! [`Snapshot`] is the immutable value object that results from it: the
//! single source of truth for rendering, replaced wholesale on every poll
//! cycle and never mutated in place.

use pmonowutils::clamp01;
use serde::Deserialize;

/// Placeholder title published before the first successful poll.
pub const LOADING_TITLE: &str = "Loading Now Playing...";
/// Placeholder artist published before the first successful poll.
pub const LOADING_ARTIST: &str = "Loading Artist...";

/// Titles reported by some players when no session carries metadata.
const TITLE_SENTINELS: [&str; 2] = ["(none)", "(unknown)"];

/// Raw media information as served by the companion process.
///
/// Every field is optional: the companion mirrors whatever the OS media
/// session exposes, and any of it may be missing at any time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub app: Option<String>,
    pub status: Option<String>,
    pub position: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Logical playback status derived from the textual `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Playing,
    Paused,
    /// Stopped, closed, or any vendor-specific string we do not track.
    Other,
}

impl MediaStatus {
    /// Map the raw status string to a logical status, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("Playing") {
            MediaStatus::Playing
        } else if raw.eq_ignore_ascii_case("Paused") {
            MediaStatus::Paused
        } else {
            MediaStatus::Other
        }
    }

    /// A session counts as active while it is playing or paused.
    pub fn is_active(&self) -> bool {
        matches!(self, MediaStatus::Playing | MediaStatus::Paused)
    }
}

/// Immutable record of the current media state.
///
/// A `Snapshot` is built once, published through the store, and read by the
/// render side without locks. Text/playback fields and image fields evolve
/// on different schedules, so the two `with_*` constructors each preserve
/// the other group untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Display title, already ellipsized.
    pub title: String,
    /// Display artist, already ellipsized.
    pub artist: String,
    /// The reporting application looks like Spotify.
    pub is_spotify: bool,
    /// Playing or paused, with a real (non-sentinel) title.
    pub is_media_active: bool,
    pub is_playing: bool,

    /// Fractional playback position in `[0, 1]`.
    pub target_progress: f64,
    pub target_position_sec: f64,
    pub target_end_sec: f64,

    pub image_loaded: bool,
    pub cover_tex_w: u32,
    pub cover_tex_h: u32,
}

impl Snapshot {
    fn placeholder(title: &str, artist: &str) -> Self {
        Snapshot {
            title: title.to_string(),
            artist: artist.to_string(),
            is_spotify: false,
            is_media_active: false,
            is_playing: false,
            target_progress: 0.0,
            target_position_sec: 0.0,
            target_end_sec: 0.0,
            image_loaded: false,
            cover_tex_w: 0,
            cover_tex_h: 0,
        }
    }

    /// Initial state, before the first poll cycle completes.
    pub fn loading() -> Self {
        Self::placeholder(LOADING_TITLE, LOADING_ARTIST)
    }

    /// Empty state: polling succeeded structurally but no media is shown,
    /// or the info fetch failed this cycle.
    pub fn inactive() -> Self {
        Self::placeholder("", "")
    }

    /// The companion process is configured but not running.
    pub fn offline() -> Self {
        Self::placeholder("Companion server not running", "Please check logs.")
    }

    /// Generic state published when a poll cycle fails unexpectedly.
    pub fn error() -> Self {
        Self::placeholder("An error occurred.", "")
    }

    /// New snapshot with updated text/playback fields, image fields kept.
    #[allow(clippy::too_many_arguments)]
    pub fn with_playback(
        &self,
        title: String,
        artist: String,
        is_spotify: bool,
        is_media_active: bool,
        is_playing: bool,
        target_progress: f64,
        target_position_sec: f64,
        target_end_sec: f64,
    ) -> Self {
        Snapshot {
            title,
            artist,
            is_spotify,
            is_media_active,
            is_playing,
            target_progress,
            target_position_sec,
            target_end_sec,
            ..self.clone()
        }
    }

    /// New snapshot with updated image fields, text/playback kept.
    pub fn with_image(&self, loaded: bool, width: u32, height: u32) -> Self {
        Snapshot {
            image_loaded: loaded,
            cover_tex_w: width,
            cover_tex_h: height,
            ..self.clone()
        }
    }

    /// True when the timeline values are worth displaying and smoothing
    /// toward. Placeholder titles and zero-length media collapse to an
    /// empty timeline instead.
    pub fn is_displayable(&self) -> bool {
        !self.title.is_empty()
            && self.title != LOADING_TITLE
            && self.target_progress >= 0.0
            && self.target_end_sec > 0.0
    }
}

/// True when the reported title is a real track title and not one of the
/// "(none)" / "(unknown)" sentinels.
pub fn is_real_title(title: &str) -> bool {
    !title.is_empty()
        && !TITLE_SENTINELS
            .iter()
            .any(|sentinel| title.eq_ignore_ascii_case(sentinel))
}

/// Reconcile raw position/start/end seconds into display targets.
///
/// Guard against malformed or absent duration data: when `end <= start`
/// the whole timeline is forced to zero. Otherwise progress is the
/// clamped fraction `(position - start) / (end - start)` and position/end
/// pass through unchanged.
pub fn derive_targets(position_sec: f64, start_sec: f64, end_sec: f64) -> (f64, f64, f64) {
    if end_sec > start_sec {
        let progress = clamp01((position_sec - start_sec) / (end_sec - start_sec));
        (progress, position_sec, end_sec)
    } else {
        (0.0, 0.0, 0.0)
    }
}
