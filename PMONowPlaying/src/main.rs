use std::sync::Arc;
use std::time::Duration;

use pmonowcore::{NowPlayingOverlay, NullCoverSink, OverlaySettings, SmoothingEngine};
use pmonowutils::format_timestamp;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Largeur de la barre de progression du rendu terminal.
const BAR_WIDTH: usize = 24;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ========== PHASE 1 : Configuration ==========
    let settings = OverlaySettings::load();
    info!("🎵 PMONowPlaying starting");
    info!("  endpoint: {}", settings.endpoint_base_url);
    match settings.companion_path.as_ref() {
        Some(path) => info!("  companion: {}", path.display()),
        None => info!("  companion: externally managed"),
    }

    // ========== PHASE 2 : Démarrage du moteur ==========
    let overlay = NowPlayingOverlay::new(settings, Arc::new(NullCoverSink))?;
    overlay.start().await;
    info!("✅ Poller running, press Ctrl+C to stop...");

    // ========== PHASE 3 : Boucle de rendu terminal ==========
    // Un "renderer" minimal : il lit le snapshot courant, lisse les
    // valeurs, et n'écrit une ligne que quand l'affichage change.
    let mut smoothing = SmoothingEngine::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(33));
    let mut last_line = String::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = overlay.snapshot();
                let values = smoothing.advance(&snapshot);

                let line = if snapshot.is_media_active {
                    let marker = if snapshot.is_playing { "▶" } else { "⏸" };
                    let filled = (values.progress * BAR_WIDTH as f64) as usize;
                    format!(
                        "{} {} — {} [{} / {}] {}{}",
                        marker,
                        snapshot.title,
                        snapshot.artist,
                        format_timestamp(values.position_sec),
                        format_timestamp(values.end_sec),
                        "█".repeat(filled.min(BAR_WIDTH)),
                        "░".repeat(BAR_WIDTH.saturating_sub(filled)),
                    )
                } else {
                    format!("({})", snapshot.title)
                };

                if line != last_line {
                    info!("{line}");
                    last_line = line;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    // ========== PHASE 4 : Arrêt ==========
    info!("Shutting down...");
    overlay.shutdown().await;
    info!("✅ Bye");
    Ok(())
}
