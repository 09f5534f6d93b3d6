//! Temporal smoothing of displayed playback values.
//!
//! The poller refreshes targets at 1 Hz while the host renders at 60+ Hz.
//! This engine runs on the render clock and makes the displayed progress
//! and times drift exponentially toward the latest [`Snapshot`] targets,
//! so the timeline moves fluidly despite the coarse polling. It owns its
//! state exclusively, performs no I/O, never blocks, and never fails.

use std::time::Instant;

use pmonowutils::clamp01;

use crate::model::Snapshot;

/// Exponential factor applied to the progress bar each frame.
const PROGRESS_SMOOTHING_FACTOR: f64 = 0.15;
/// Exponential factor applied to the elapsed/end times each frame.
const TIME_SMOOTHING_FACTOR: f64 = 0.10;
/// Upper clamp of the frame-rate compensation, so a freeze or a long stall
/// does not produce one huge visual jump on the next frame.
const MAX_FRAME_COEFFICIENT: f64 = 5.0;

/// Display-ready values produced once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedValues {
    pub progress: f64,
    pub position_sec: f64,
    pub end_sec: f64,
}

/// Per-frame interpolation state.
///
/// Owned by the render-side consumer only; the poller never sees it.
#[derive(Debug)]
pub struct SmoothingEngine {
    current_progress: f64,
    current_position_sec: f64,
    current_end_sec: f64,
    last_update: Instant,
}

impl SmoothingEngine {
    pub fn new() -> Self {
        SmoothingEngine {
            current_progress: 0.0,
            current_position_sec: 0.0,
            current_end_sec: 0.0,
            last_update: Instant::now(),
        }
    }

    /// Advance using wall-clock time since the previous invocation.
    pub fn advance(&mut self, snapshot: &Snapshot) -> SmoothedValues {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f64();
        self.last_update = now;
        self.step(snapshot, dt)
    }

    /// Advance by an explicit `dt` in seconds.
    ///
    /// Hosts with a frame-locked clock can call this directly; it is also
    /// the deterministic entry point used by the tests.
    pub fn step(&mut self, snapshot: &Snapshot, dt: f64) -> SmoothedValues {
        // Compensation indépendante du frame rate, bornée.
        let coefficient = (dt * 60.0).min(MAX_FRAME_COEFFICIENT);

        self.current_progress +=
            (snapshot.target_progress - self.current_progress) * PROGRESS_SMOOTHING_FACTOR * coefficient;
        self.current_progress = clamp01(self.current_progress);

        if snapshot.is_displayable() {
            if snapshot.is_playing {
                // Avance locale entre deux polls, pour une précision par frame.
                self.current_position_sec += dt;
            }
            self.current_position_sec += (snapshot.target_position_sec - self.current_position_sec)
                * TIME_SMOOTHING_FACTOR
                * coefficient;
            self.current_position_sec = self.current_position_sec.min(snapshot.target_end_sec);

            self.current_end_sec +=
                (snapshot.target_end_sec - self.current_end_sec) * TIME_SMOOTHING_FACTOR * coefficient;
        } else {
            // Rien à afficher : la timeline se replie proprement vers zéro.
            self.current_position_sec -=
                self.current_position_sec * TIME_SMOOTHING_FACTOR * coefficient;
            self.current_end_sec -= self.current_end_sec * TIME_SMOOTHING_FACTOR * coefficient;
        }

        SmoothedValues {
            progress: self.current_progress,
            position_sec: self.current_position_sec,
            end_sec: self.current_end_sec,
        }
    }
}

impl Default for SmoothingEngine {
    fn default() -> Self {
        Self::new()
    }
}
