//! Shared state and top-level facade.
//!
//! All mutable state the poller, the supervisor, and the render side need
//! lives in one [`OverlayContext`], constructed once at startup and passed
//! around as an `Arc`. There are no process-wide globals: creating two
//! overlays gives two fully independent instances.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::client::MediaEndpoint;
use crate::cover::CoverSink;
use crate::detect::CoverChangeDetector;
use crate::errors::NowPlayingError;
use crate::model::Snapshot;
use crate::poller::Poller;
use crate::settings::OverlaySettings;
use crate::store::SnapshotStore;
use crate::supervisor::CompanionSupervisor;

/// Everything shared between the background poller and the render side.
pub struct OverlayContext {
    pub settings: OverlaySettings,
    pub store: SnapshotStore,
    pub endpoint: MediaEndpoint,
    pub detector: Mutex<CoverChangeDetector>,
    pub supervisor: CompanionSupervisor,
    pub cover_sink: Arc<dyn CoverSink>,
}

impl OverlayContext {
    pub fn new(
        settings: OverlaySettings,
        cover_sink: Arc<dyn CoverSink>,
    ) -> Result<Arc<Self>, NowPlayingError> {
        let endpoint = MediaEndpoint::new(&settings.endpoint_base_url)?;
        let supervisor = CompanionSupervisor::new(settings.companion_path.clone());

        Ok(Arc::new(OverlayContext {
            settings,
            store: SnapshotStore::new(),
            endpoint,
            detector: Mutex::new(CoverChangeDetector::new()),
            supervisor,
            cover_sink,
        }))
    }

    /// Drop the displayed cover: snapshot image fields and host resource.
    pub fn clear_cover(&self) {
        self.store.clear_image();
        self.cover_sink.clear();
    }
}

/// Top-level facade tying the context and the poller together.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use pmonowcore::{NowPlayingOverlay, NullCoverSink, OverlaySettings};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let overlay =
///         NowPlayingOverlay::new(OverlaySettings::load(), Arc::new(NullCoverSink))?;
///     overlay.start().await;
///     // ... render loop reads overlay.snapshot() every frame ...
///     overlay.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct NowPlayingOverlay {
    context: Arc<OverlayContext>,
    poller: Arc<Poller>,
}

impl NowPlayingOverlay {
    pub fn new(
        settings: OverlaySettings,
        cover_sink: Arc<dyn CoverSink>,
    ) -> Result<Self, NowPlayingError> {
        let context = OverlayContext::new(settings, cover_sink)?;
        let poller = Arc::new(Poller::new(Arc::clone(&context)));
        Ok(NowPlayingOverlay { context, poller })
    }

    pub fn context(&self) -> &Arc<OverlayContext> {
        &self.context
    }

    /// Current snapshot, for the render side.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.context.store.load()
    }

    /// Launch the companion (when managed) and start polling.
    ///
    /// Idempotent: a second call is a no-op.
    pub async fn start(&self) {
        if self.context.supervisor.is_managed()
            && let Err(error) = self.context.supervisor.launch().await
        {
            // Le poller republiera l'état offline et retentera à chaque cycle.
            warn!("Companion launch failed at startup: {error}");
            self.context.store.publish(Snapshot::offline());
        }
        self.poller.start();
    }

    /// Stop polling, stop the companion, release the displayed cover.
    ///
    /// Idempotent and safe to call concurrently with an in-flight cycle.
    pub async fn shutdown(&self) {
        self.poller.stop();
        self.context.supervisor.stop().await;
        self.context.clear_cover();
    }
}
