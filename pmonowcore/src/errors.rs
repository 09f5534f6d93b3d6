use std::path::PathBuf;

use thiserror::Error;

/// Erreurs du moteur PMONowPlaying.
///
/// Les échecs transitoires (timeout réseau, réponse non-200, JSON absent)
/// ne passent jamais par ce type : le fetcher les convertit en `None` et le
/// poller les traite comme "pas de mise à jour ce cycle". Seules les
/// conditions qui méritent d'être remontées à l'appelant sont listées ici.
#[derive(Error, Debug)]
pub enum NowPlayingError {
    #[error("No companion executable configured")]
    CompanionNotConfigured,

    #[error("Companion executable not found at {}", .0.display())]
    CompanionNotFound(PathBuf),

    #[error("Failed to launch companion process: {0}")]
    CompanionLaunch(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Failed to register cover art: {0}")]
    CoverRegistration(String),
}
