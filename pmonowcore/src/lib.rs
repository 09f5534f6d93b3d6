//! # pmonowcore - Moteur "now playing" de PMONowPlaying
//!
//! Cette crate fournit le cœur réutilisable d'un overlay "now playing" :
//! un poller en tâche de fond qui interroge un processus compagnon local
//! via HTTP, réconcilie les données dans un [`Snapshot`] immuable, décide
//! quand récupérer et décoder la pochette, et expose ce snapshot à un
//! consommateur haute fréquence (le moteur de lissage, côté rendu).
//!
//! ## Architecture
//!
//! Deux activités périodiques indépendantes ne partagent qu'une seule
//! ressource, le [`Snapshot`] courant :
//!
//! 1. Le [`Poller`] (1 Hz) : superviseur de processus → fetch HTTP →
//!    réconciliation → publication atomique dans le [`SnapshotStore`].
//! 2. Le [`SmoothingEngine`] (cadence de rendu, 60+ Hz) : lit le dernier
//!    snapshot et fait converger exponentiellement les valeurs affichées
//!    vers les cibles, sans jamais bloquer.
//!
//! Le rendu proprement dit est le travail de l'hôte : il reçoit un
//! [`FrameLayout`] entièrement résolu (via [`compute_frame`]) et se
//! contente de dessiner.
//!
//! ## Exemple minimal
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pmonowcore::{NowPlayingOverlay, NullCoverSink, OverlaySettings, SmoothingEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let overlay =
//!         NowPlayingOverlay::new(OverlaySettings::load(), Arc::new(NullCoverSink))?;
//!     overlay.start().await;
//!
//!     let mut smoothing = SmoothingEngine::new();
//!     loop {
//!         let snapshot = overlay.snapshot();
//!         let values = smoothing.advance(&snapshot);
//!         // ... dessiner avec `values` ...
//!         # break;
//!     }
//!
//!     overlay.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod context;
pub mod cover;
pub mod detect;
pub mod errors;
pub mod layout;
pub mod model;
pub mod poller;
pub mod settings;
pub mod smoothing;
pub mod store;
pub mod supervisor;

pub use client::MediaEndpoint;
pub use context::{NowPlayingOverlay, OverlayContext};
pub use cover::{CoverSink, NullCoverSink};
pub use detect::{CoverChangeDetector, FetchTrigger, cover_checksum};
pub use errors::NowPlayingError;
pub use layout::{FrameLayout, LayoutPolicy, TextMeasurer, compute_frame};
pub use model::{MediaInfo, MediaStatus, Snapshot};
pub use poller::Poller;
pub use settings::{OverlaySettings, Side};
pub use smoothing::{SmoothedValues, SmoothingEngine};
pub use store::SnapshotStore;
pub use supervisor::CompanionSupervisor;
