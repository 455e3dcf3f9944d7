//! Instantaneous EQ settings.
//!
//! [`ChainSettings`] is the immutable value the processing cycle works
//! from: it is read out of the live [`crate::params::ParameterStore`] once
//! per block, turned into coefficients, and discarded.

/// Cut filter steepness, in dB per octave.
///
/// Each step adds one cascaded second-order section, so the realized
/// slope is `sections() * 12` dB/oct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    /// 12 dB/oct — one active section.
    #[default]
    Db12 = 0,
    /// 24 dB/oct — two active sections.
    Db24 = 1,
    /// 36 dB/oct — three active sections.
    Db36 = 2,
    /// 48 dB/oct — four active sections.
    Db48 = 3,
}

impl Slope {
    /// All slopes in increasing steepness order.
    pub const ALL: [Slope; 4] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Number of active second-order sections in the cut cascade (1..=4).
    #[inline]
    pub fn sections(self) -> usize {
        self as usize + 1
    }

    /// Realized steepness in dB per octave.
    #[inline]
    pub fn db_per_octave(self) -> u32 {
        (self as u32 + 1) * 12
    }

    /// Look up a slope by its selector index (0..=3).
    pub fn from_index(index: usize) -> Option<Slope> {
        Self::ALL.get(index).copied()
    }
}

/// Snapshot of every user-facing EQ parameter.
///
/// Never mutated after construction; the store hands out a fresh value
/// each processing cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Peak band center frequency in Hz.
    pub peak_freq: f32,
    /// Peak band gain in dB (positive boosts, negative cuts).
    pub peak_gain_db: f32,
    /// Peak band quality factor.
    pub peak_q: f32,
    /// Low-cut (highpass) cutoff frequency in Hz.
    pub low_cut_freq: f32,
    /// High-cut (lowpass) cutoff frequency in Hz.
    pub high_cut_freq: f32,
    /// Low-cut steepness.
    pub low_cut_slope: Slope,
    /// High-cut steepness.
    pub high_cut_slope: Slope,
}

impl Default for ChainSettings {
    /// Neutral settings: cuts parked at the band edges, peak flat.
    fn default() -> Self {
        Self {
            peak_freq: 750.0,
            peak_gain_db: 0.0,
            peak_q: 1.0,
            low_cut_freq: 20.0,
            high_cut_freq: 20_000.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
        }
    }
}
