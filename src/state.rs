use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rand::Rng;
use tracing::debug;

use crate::engine::{self, Rendered};
use crate::model::{find_preset, Dimensions, TextureParams};
use crate::settings::StudioSettings;

// ── Busy guard ─────────────────────────────────────────────────────

/// Non-blocking "generation in progress" flag. A second request while one
/// is active is rejected, never queued.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    busy: AtomicBool,
}

/// Held for the duration of one generation; clears the flag on drop.
#[derive(Debug)]
pub struct GenerationTicket<'a> {
    guard: &'a GenerationGuard,
}

impl GenerationGuard {
    pub fn try_begin(&self) -> Option<GenerationTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GenerationTicket { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for GenerationTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

// ── Studio state ───────────────────────────────────────────────────

/// Caller-side state: the current parameters, the canvas size and the busy
/// flag. The renderer itself never sees this; it only gets a snapshot of the
/// parameters.
#[derive(Debug, Default)]
pub struct StudioState {
    pub params: Mutex<TextureParams>,
    pub dimensions: Mutex<Dimensions>,
    guard: GenerationGuard,
}

impl StudioState {
    pub fn new(params: TextureParams, dimensions: Dimensions) -> Self {
        Self {
            params: Mutex::new(params),
            dimensions: Mutex::new(dimensions),
            guard: GenerationGuard::default(),
        }
    }

    pub fn from_settings(settings: &StudioSettings) -> Self {
        Self::new(settings.params.clone(), settings.dimensions())
    }

    /// Snapshot of the current state for persisting.
    pub fn to_settings(&self) -> StudioSettings {
        let dimensions = *self.dimensions.lock();
        StudioSettings {
            width: dimensions.width,
            height: dimensions.height,
            params: self.params.lock().clone(),
            ..StudioSettings::default()
        }
    }

    /// Read-only access to the parameters. Locks the mutex for the duration of `f`.
    pub fn with_params<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TextureParams) -> R,
    {
        let guard = self.params.lock();
        f(&guard)
    }

    /// Mutating access to the parameters. Locks the mutex for the duration of `f`.
    pub fn with_params_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TextureParams) -> R,
    {
        let mut guard = self.params.lock();
        f(&mut guard)
    }

    /// Apply a named preset. Unknown ids leave the parameters untouched.
    /// Returns whether a preset was applied.
    pub fn load_preset(&self, id: &str) -> bool {
        let Some(preset) = find_preset(id) else {
            debug!(id, "unknown preset ignored");
            return false;
        };
        self.with_params_mut(|params| preset.apply(params));
        true
    }

    pub fn randomize<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.with_params_mut(|params| params.randomize(rng));
    }

    pub fn is_generating(&self) -> bool {
        self.guard.is_busy()
    }

    /// Render the current parameters. Returns `None` without rendering if a
    /// generation is already running.
    pub fn generate(&self) -> Option<Rendered> {
        let Some(_ticket) = self.guard.try_begin() else {
            debug!("generation already in progress, request dropped");
            return None;
        };
        let params = self.with_params(TextureParams::clone);
        let dimensions = *self.dimensions.lock();
        Some(engine::render(&params, dimensions))
    }
}
