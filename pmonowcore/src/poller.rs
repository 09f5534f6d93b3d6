//! Background reconciliation loop.
//!
//! A single task, started once, runs one cycle per second: check the
//! companion, fetch the media info, derive a fresh [`Snapshot`], publish
//! it, and decide whether cover art work is warranted. Everything that can
//! go wrong inside a cycle is converted into a coherent published state —
//! the schedule itself never dies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use pmonowutils::ellipsize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::context::OverlayContext;
use crate::detect::{FetchTrigger, cover_checksum};
use crate::model::{MediaStatus, Snapshot, derive_targets, is_real_title};

/// Fixed cadence of the reconciliation loop.
const POLL_PERIOD: Duration = Duration::from_secs(1);

/// Periodic poller, `Idle` until [`Poller::start`] then `Running`.
pub struct Poller {
    context: Arc<OverlayContext>,
    running: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    pub fn new(context: Arc<OverlayContext>) -> Self {
        Poller {
            context,
            running: AtomicBool::new(false),
            task: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the periodic schedule (first cycle runs immediately).
    ///
    /// Idempotent: only the first call spawns a task.
    pub fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Poller already running, ignoring start request");
            return;
        }

        let poller = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_PERIOD);
            loop {
                ticker.tick().await;
                if !poller.running.load(Ordering::SeqCst) {
                    break;
                }
                // Chaque cycle tourne dans sa propre tâche : un panic y est
                // confiné, converti en état d'erreur, et le planning continue.
                let cycle = tokio::spawn({
                    let poller = Arc::clone(&poller);
                    async move { poller.cycle().await }
                });
                let failure = match cycle.await {
                    Ok(Ok(())) => None,
                    Ok(Err(error)) => Some(format!("{error:#}")),
                    Err(join_error) => Some(join_error.to_string()),
                };
                if let Some(failure) = failure {
                    warn!("Poll cycle failed: {failure}");
                    poller.context.store.publish(Snapshot::error());
                    poller.context.clear_cover();
                }
            }
        });
        *self.task.lock().unwrap() = Some(handle);
    }

    /// Stop the schedule. Idempotent; concurrent calls are safe, and an
    /// in-flight cycle finishes on its own before the schedule ends.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// One reconciliation cycle.
    pub(crate) async fn cycle(&self) -> anyhow::Result<()> {
        let context = &self.context;

        // 1. Compagnon mort : état offline + tentative de relance.
        if context.supervisor.is_managed() && !context.supervisor.is_alive().await {
            context.store.publish(Snapshot::offline());
            if let Err(error) = context.supervisor.launch().await {
                warn!("Companion relaunch failed: {error}");
            }
            return Ok(());
        }

        // 2. Pas de données ce cycle : état vide, pochette retirée.
        let Some(info) = context.endpoint.fetch_info().await else {
            context.store.publish(Snapshot::inactive());
            context.clear_cover();
            return Ok(());
        };

        // 3. Dérivation des champs du snapshot.
        let title = ellipsize(info.title.as_deref().unwrap_or(""));
        let artist = ellipsize(info.artist.as_deref().unwrap_or(""));

        let is_spotify = info
            .app
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains("spotify");

        let status = MediaStatus::parse(info.status.as_deref().unwrap_or(""));
        let is_playing = status == MediaStatus::Playing;
        let is_media_active = status.is_active() && is_real_title(&title);

        let position_sec = pmonowutils::parse_time_to_seconds(info.position.as_deref());
        let start_sec = pmonowutils::parse_time_to_seconds(info.start.as_deref());
        let end_sec = pmonowutils::parse_time_to_seconds(info.end.as_deref());
        let (target_progress, target_position_sec, target_end_sec) =
            derive_targets(position_sec, start_sec, end_sec);

        // 4. Publication texte/lecture, champs image conservés.
        let previous = context.store.load();
        context.store.publish(previous.with_playback(
            title.clone(),
            artist.clone(),
            is_spotify,
            is_media_active,
            is_playing,
            target_progress,
            target_position_sec,
            target_end_sec,
        ));

        // 5. Décision de récupération de pochette. Un verrou empoisonné
        // (tâche image qui a paniqué) ne doit pas tuer le planning.
        let trigger = context
            .detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .should_fetch(
                is_media_active,
                context.settings.show_cover_art,
                &title,
                &artist,
                is_spotify,
                previous.image_loaded,
            );
        if let Some(trigger) = trigger {
            let context = Arc::clone(context);
            tokio::spawn(fetch_and_update_cover(context, trigger));
        }

        // 6. Média inactif : pochette retirée.
        if !is_media_active {
            context.clear_cover();
        }

        Ok(())
    }
}

/// Fetch, gate, decode, and register a cover image, then fold the result
/// into whatever snapshot is current at completion time.
async fn fetch_and_update_cover(context: Arc<OverlayContext>, trigger: FetchTrigger) {
    context
        .detector
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .mark_attempt();

    let Some(bytes) = context.endpoint.fetch_image().await else {
        context.clear_cover();
        return;
    };

    let checksum = cover_checksum(&bytes);
    let displayed = context
        .detector
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_displayed(checksum);
    if !trigger.is_eager() && displayed {
        // Pochette inchangée : on évite un décodage inutile.
        return;
    }

    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image.to_rgba8(),
        Err(error) => {
            warn!("Failed to decode cover art: {error}");
            context.clear_cover();
            return;
        }
    };
    let (width, height) = image.dimensions();

    match context.cover_sink.register(image) {
        Ok(()) => {
            context
                .detector
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record_displayed(checksum);
            context.store.update_image(true, width, height);
        }
        Err(error) => {
            warn!("Failed to register cover art: {error}");
            context.store.update_image(false, 0, 0);
        }
    }
}
