/// Cursor tracking — maps pointer positions to a crosshair and a
/// per-series readout, rate-limited for fast pointer motion.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::data::spectrum::SpectrumCollection;

use super::nearest::nearest_sample;

/// How the pointer is reported.
///
/// `Snap` follows the nearest sample of the reference series (the first
/// loaded spectrum) and reads the same wavelength on every visible series.
/// `Free` reports the raw pointer coordinates with no sample lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CursorMode {
    Snap,
    Free,
}

impl CursorMode {
    pub fn label(&self) -> &'static str {
        match self {
            CursorMode::Snap => "Snap to sample",
            CursorMode::Free => "Free crosshair",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CursorMode::Snap => CursorMode::Free,
            CursorMode::Free => CursorMode::Snap,
        }
    }
}

/// What the overlay draws: the crosshair position and the readout lines,
/// one `(filename, reflectance)` pair per covered visible series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorState {
    pub crosshair: Option<[f64; 2]>,
    pub readout: Vec<(String, f64)>,
}

/// Tracks pointer motion over the plot.
///
/// Holds only its own throttle bookkeeping and the last reported state;
/// the collection stays the single source of truth for series data.
/// Events arriving inside the throttle window are dropped outright, not
/// queued.
pub struct CursorTracker {
    pub mode: CursorMode,
    min_interval: Duration,
    min_delta_x: f64,
    last_update: Option<Instant>,
    last_x: Option<f64>,
    anchor: [f64; 2],
    state: CursorState,
}

impl CursorTracker {
    /// Default throttle: 20 updates/s at most, and pointer moves smaller
    /// than 0.001 wavelength units are skipped outright.
    pub fn new(mode: CursorMode) -> Self {
        Self::with_throttle(mode, Duration::from_millis(50), 1e-3)
    }

    pub fn with_throttle(mode: CursorMode, min_interval: Duration, min_delta_x: f64) -> Self {
        Self {
            mode,
            min_interval,
            min_delta_x,
            last_update: None,
            last_x: None,
            anchor: [0.0, 0.0],
            state: CursorState::default(),
        }
    }

    /// Feed one pointer position in plot coordinates.
    ///
    /// Returns whether the state changed. No-ops (throttled events, empty
    /// collection, pointer off the reference series' range) leave the
    /// previous crosshair and readout in place. The caller is expected to
    /// forward only pointers that are over the plotting surface.
    pub fn on_pointer_move(&mut self, collection: &SpectrumCollection, x: f64, y: f64) -> bool {
        if collection.is_empty() {
            return false;
        }
        if let Some(at) = self.last_update {
            if at.elapsed() < self.min_interval {
                return false;
            }
        }
        if let Some(last_x) = self.last_x {
            if (x - last_x).abs() < self.min_delta_x {
                return false;
            }
        }

        match self.mode {
            CursorMode::Snap => {
                let Some(reference) = collection.first() else {
                    return false;
                };
                if !reference.covers(x) {
                    return false;
                }
                let Some((snap_x, snap_y)) =
                    nearest_sample(reference.wavelengths(), reference.reflectances(), x)
                else {
                    return false;
                };

                let mut readout = Vec::new();
                for (_, record) in collection.visible_records() {
                    if !record.covers(snap_x) {
                        continue;
                    }
                    if let Some((_, value)) =
                        nearest_sample(record.wavelengths(), record.reflectances(), snap_x)
                    {
                        readout.push((record.filename.clone(), value));
                    }
                }
                self.state.crosshair = Some([snap_x, snap_y]);
                self.state.readout = readout;
            }
            CursorMode::Free => {
                self.state.crosshair = Some([x, y]);
                self.state.readout.clear();
            }
        }

        self.last_update = Some(Instant::now());
        self.last_x = Some(x);
        true
    }

    /// Follow a zoom/pan: the readout anchor tracks the new top-right
    /// corner; the content is cleared only when nothing is loaded.
    pub fn on_viewport_changed(
        &mut self,
        x_range: (f64, f64),
        y_range: (f64, f64),
        collection_is_empty: bool,
    ) {
        self.anchor = [x_range.1, y_range.1];
        if collection_is_empty {
            self.state = CursorState::default();
        }
    }

    /// Where the readout box is pinned, in plot coordinates.
    pub fn anchor(&self) -> [f64; 2] {
        self.anchor
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Forget the crosshair, readout, and throttle bookkeeping.
    pub fn reset(&mut self) {
        self.state = CursorState::default();
        self.last_update = None;
        self.last_x = None;
    }
}
