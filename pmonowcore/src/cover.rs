//! Cover art registration seam.
//!
//! Uploading a decoded image to the host (a GPU texture, a terminal
//! backend, ...) often carries thread-affinity constraints the core cannot
//! know about. The poller therefore hands fully decoded RGBA pixels to a
//! [`CoverSink`]; a host whose registration must run on a specific thread
//! marshals internally and blocks this call until done.

use image::RgbaImage;

use crate::errors::NowPlayingError;

/// Host-side destination for decoded cover art.
pub trait CoverSink: Send + Sync {
    /// Make `image` the displayed cover, replacing any previous one.
    fn register(&self, image: RgbaImage) -> Result<(), NowPlayingError>;

    /// Drop the displayed cover and free its resources. Idempotent.
    fn clear(&self);
}

/// Sink that drops every image, for hosts without cover display and for
/// tests.
#[derive(Debug, Default)]
pub struct NullCoverSink;

impl CoverSink for NullCoverSink {
    fn register(&self, image: RgbaImage) -> Result<(), NowPlayingError> {
        tracing::debug!(
            "Discarding {}x{} cover (no sink installed)",
            image.width(),
            image.height()
        );
        Ok(())
    }

    fn clear(&self) {}
}
