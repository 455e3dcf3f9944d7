//! Live parameter store shared between a control thread and the audio
//! thread.
//!
//! [`ParameterStore`] keeps each scalar in an atomic cell (`f32` bit
//! patterns in `AtomicU32`), so the audio thread can take a
//! [`ChainSettings`] snapshot every block without locking or allocating.
//! Reads use relaxed ordering: a snapshot sees the latest value of each
//! individual parameter, with no cross-parameter ordering guarantee. That
//! is the intended contract — a half-applied multi-knob gesture lasts one
//! block and settles on the next.

use crate::settings::{ChainSettings, Slope};
use core::sync::atomic::{AtomicU32, Ordering};

/// Lowest settable frequency, Hz.
pub const MIN_FREQ_HZ: f32 = 20.0;
/// Highest settable frequency, Hz.
pub const MAX_FREQ_HZ: f32 = 20_000.0;
/// Peak gain floor, dB.
pub const MIN_GAIN_DB: f32 = -24.0;
/// Peak gain ceiling, dB.
pub const MAX_GAIN_DB: f32 = 24.0;
/// Lowest settable peak Q.
pub const MIN_Q: f32 = 0.1;
/// Highest settable peak Q.
pub const MAX_Q: f32 = 10.0;

/// One atomically readable/writable `f32`.
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// The seven EQ parameters, writable from a control thread and
/// snapshot-readable from the audio thread.
///
/// Setters clamp into the documented ranges and silently drop non-finite
/// writes, so every snapshot carries factory-valid values.
#[derive(Debug)]
pub struct ParameterStore {
    peak_freq: AtomicF32,
    peak_gain_db: AtomicF32,
    peak_q: AtomicF32,
    low_cut_freq: AtomicF32,
    high_cut_freq: AtomicF32,
    low_cut_slope: AtomicU32,
    high_cut_slope: AtomicU32,
}

impl ParameterStore {
    /// Create a store seeded with the given settings.
    ///
    /// Seeds pass through the same clamping as the setters; a non-finite
    /// seed leaves that parameter at its default.
    pub fn new(settings: ChainSettings) -> Self {
        let defaults = ChainSettings::default();
        let store = Self {
            peak_freq: AtomicF32::new(defaults.peak_freq),
            peak_gain_db: AtomicF32::new(defaults.peak_gain_db),
            peak_q: AtomicF32::new(defaults.peak_q),
            low_cut_freq: AtomicF32::new(defaults.low_cut_freq),
            high_cut_freq: AtomicF32::new(defaults.high_cut_freq),
            low_cut_slope: AtomicU32::new(defaults.low_cut_slope as u32),
            high_cut_slope: AtomicU32::new(defaults.high_cut_slope as u32),
        };
        store.set_peak_freq(settings.peak_freq);
        store.set_peak_gain_db(settings.peak_gain_db);
        store.set_peak_q(settings.peak_q);
        store.set_low_cut_freq(settings.low_cut_freq);
        store.set_high_cut_freq(settings.high_cut_freq);
        store.set_low_cut_slope(settings.low_cut_slope);
        store.set_high_cut_slope(settings.high_cut_slope);
        store
    }

    fn set_clamped(cell: &AtomicF32, value: f32, min: f32, max: f32) {
        if value.is_finite() {
            cell.store(value.clamp(min, max));
        }
    }

    /// Set the peak band center frequency (clamped to 20 Hz – 20 kHz).
    pub fn set_peak_freq(&self, freq: f32) {
        Self::set_clamped(&self.peak_freq, freq, MIN_FREQ_HZ, MAX_FREQ_HZ);
    }

    /// Set the peak band gain (clamped to ±24 dB).
    pub fn set_peak_gain_db(&self, gain_db: f32) {
        Self::set_clamped(&self.peak_gain_db, gain_db, MIN_GAIN_DB, MAX_GAIN_DB);
    }

    /// Set the peak band Q (clamped to 0.1 – 10).
    pub fn set_peak_q(&self, q: f32) {
        Self::set_clamped(&self.peak_q, q, MIN_Q, MAX_Q);
    }

    /// Set the low-cut cutoff frequency (clamped to 20 Hz – 20 kHz).
    pub fn set_low_cut_freq(&self, freq: f32) {
        Self::set_clamped(&self.low_cut_freq, freq, MIN_FREQ_HZ, MAX_FREQ_HZ);
    }

    /// Set the high-cut cutoff frequency (clamped to 20 Hz – 20 kHz).
    pub fn set_high_cut_freq(&self, freq: f32) {
        Self::set_clamped(&self.high_cut_freq, freq, MIN_FREQ_HZ, MAX_FREQ_HZ);
    }

    /// Set the low-cut slope.
    pub fn set_low_cut_slope(&self, slope: Slope) {
        self.low_cut_slope.store(slope as u32, Ordering::Relaxed);
    }

    /// Set the high-cut slope.
    pub fn set_high_cut_slope(&self, slope: Slope) {
        self.high_cut_slope.store(slope as u32, Ordering::Relaxed);
    }

    fn load_slope(cell: &AtomicU32) -> Slope {
        // Stored exclusively through the typed setters, so the index is
        // always in range; fall back to the shallowest slope regardless.
        Slope::from_index(cell.load(Ordering::Relaxed) as usize).unwrap_or(Slope::Db12)
    }

    /// Read every parameter into an immutable snapshot.
    ///
    /// Wait-free: seven relaxed loads, no allocation.
    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings {
            peak_freq: self.peak_freq.load(),
            peak_gain_db: self.peak_gain_db.load(),
            peak_q: self.peak_q.load(),
            low_cut_freq: self.low_cut_freq.load(),
            high_cut_freq: self.high_cut_freq.load(),
            low_cut_slope: Self::load_slope(&self.low_cut_slope),
            high_cut_slope: Self::load_slope(&self.high_cut_slope),
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(ChainSettings::default())
    }
}
