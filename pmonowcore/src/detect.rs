//! Cover-art change detection.
//!
//! Decoding and registering a cover image is the expensive part of a poll
//! cycle, so it is gated twice. First, [`CoverChangeDetector::should_fetch`]
//! decides from cheap signals (text deltas, app flag, cooldown) whether a
//! fetch is warranted at all. Second, a fast 64-bit content checksum of the
//! downloaded bytes lets a non-eager fetch skip the decode when the cover
//! is known unchanged.

use std::time::{Duration, Instant};

use twox_hash::xxh3::hash64;

/// Minimum delay between two image fetch attempts when nothing changed.
const IMAGE_FETCH_COOLDOWN: Duration = Duration::from_secs(5);

/// Fast content checksum of downloaded image bytes.
pub fn cover_checksum(bytes: &[u8]) -> u64 {
    hash64(bytes)
}

/// How a pending image fetch was triggered.
///
/// An eager fetch follows a detected text/app change and bypasses the
/// unchanged-checksum skip; a refresh fetch only re-decodes when the bytes
/// actually differ from the displayed cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Eager,
    Refresh,
}

impl FetchTrigger {
    pub fn is_eager(&self) -> bool {
        matches!(self, FetchTrigger::Eager)
    }
}

/// Per-cycle state backing the image fetch decision.
///
/// Owned by the poller; never shared with the render side.
#[derive(Debug)]
pub struct CoverChangeDetector {
    last_title: String,
    last_artist: String,
    last_is_spotify: bool,
    displayed_checksum: Option<u64>,
    last_attempt: Option<Instant>,
}

impl CoverChangeDetector {
    pub fn new() -> Self {
        CoverChangeDetector {
            last_title: String::new(),
            last_artist: String::new(),
            last_is_spotify: false,
            displayed_checksum: None,
            last_attempt: None,
        }
    }

    /// Decide whether this cycle should attempt an image fetch.
    ///
    /// Triggers when media is active, cover display is enabled, and any of:
    /// the title/artist text changed, the app flag changed, no image is
    /// currently loaded, or the cooldown since the last attempt elapsed.
    /// The remembered text/app values are updated on every call.
    pub fn should_fetch(
        &mut self,
        media_active: bool,
        covers_enabled: bool,
        title: &str,
        artist: &str,
        is_spotify: bool,
        image_loaded: bool,
    ) -> Option<FetchTrigger> {
        let text_changed = title != self.last_title || artist != self.last_artist;
        let app_changed = is_spotify != self.last_is_spotify;

        self.last_title = title.to_string();
        self.last_artist = artist.to_string();
        self.last_is_spotify = is_spotify;

        if !media_active || !covers_enabled {
            return None;
        }

        if text_changed || app_changed {
            Some(FetchTrigger::Eager)
        } else if !image_loaded || self.cooldown_elapsed() {
            Some(FetchTrigger::Refresh)
        } else {
            None
        }
    }

    /// Record that an image fetch is starting now (cooldown anchor).
    pub fn mark_attempt(&mut self) {
        self.last_attempt = Some(Instant::now());
    }

    /// True when the checksum matches the currently displayed cover.
    pub fn is_displayed(&self, checksum: u64) -> bool {
        self.displayed_checksum == Some(checksum)
    }

    /// Record the checksum of a successfully displayed cover.
    pub fn record_displayed(&mut self, checksum: u64) {
        self.displayed_checksum = Some(checksum);
    }

    fn cooldown_elapsed(&self) -> bool {
        match self.last_attempt {
            Some(last) => last.elapsed() >= IMAGE_FETCH_COOLDOWN,
            None => true,
        }
    }
}

impl Default for CoverChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> CoverChangeDetector {
        let mut detector = CoverChangeDetector::new();
        // Première observation : mémorise le texte courant.
        detector.should_fetch(true, true, "Song", "Band", false, true);
        detector.mark_attempt();
        detector
    }

    #[test]
    fn text_change_is_eager() {
        let mut detector = fresh();
        let trigger = detector.should_fetch(true, true, "Other", "Band", false, true);
        assert_eq!(trigger, Some(FetchTrigger::Eager));
    }

    #[test]
    fn app_change_is_eager() {
        let mut detector = fresh();
        let trigger = detector.should_fetch(true, true, "Song", "Band", true, true);
        assert_eq!(trigger, Some(FetchTrigger::Eager));
    }

    #[test]
    fn missing_image_triggers_refresh() {
        let mut detector = fresh();
        let trigger = detector.should_fetch(true, true, "Song", "Band", false, false);
        assert_eq!(trigger, Some(FetchTrigger::Refresh));
    }

    #[test]
    fn unchanged_state_within_cooldown_does_nothing() {
        let mut detector = fresh();
        let trigger = detector.should_fetch(true, true, "Song", "Band", false, true);
        assert_eq!(trigger, None);
    }

    #[test]
    fn inactive_or_disabled_never_fetches() {
        let mut detector = fresh();
        assert_eq!(
            detector.should_fetch(false, true, "Other", "Band", false, false),
            None
        );
        assert_eq!(
            detector.should_fetch(true, false, "Third", "Band", false, false),
            None
        );
    }

    #[test]
    fn text_is_remembered_even_while_inactive() {
        let mut detector = fresh();
        // Changement observé pendant une période inactive...
        detector.should_fetch(false, true, "Other", "Band", false, true);
        // ...donc plus de delta quand le média redevient actif.
        let trigger = detector.should_fetch(true, true, "Other", "Band", false, true);
        assert_eq!(trigger, None);
    }

    #[test]
    fn checksum_gates_redundant_decodes() {
        let mut detector = fresh();
        let bytes = b"fake image payload";
        let checksum = cover_checksum(bytes);
        detector.record_displayed(checksum);

        // Non-eager + même checksum : on saute le décodage.
        assert!(detector.is_displayed(checksum));
        // Checksum différent : on décode, eager ou pas.
        assert!(!detector.is_displayed(cover_checksum(b"other payload")));
    }

    #[test]
    fn checksums_are_stable_and_discriminating() {
        assert_eq!(cover_checksum(b"abc"), cover_checksum(b"abc"));
        assert_ne!(cover_checksum(b"abc"), cover_checksum(b"abd"));
    }
}
