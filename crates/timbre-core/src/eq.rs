//! The stereo equalizer: two mono chains plus the per-block refresh
//! cycle.
//!
//! [`StereoEqualizer`] is free-standing — it depends on no host types.
//! The host (or the CLI) calls [`prepare`](StereoEqualizer::prepare)
//! once, then [`process_cycle`](StereoEqualizer::process_cycle) per
//! block: snapshot the parameters, derive coefficients, push them into
//! both channels, filter in place.

use crate::biquad::Coefficients;
use crate::chain::{ChainPosition, MonoChain};
use crate::design::{CutKind, DesignError, cut_coefficients, peak_coefficients};
use crate::params::ParameterStore;
use crate::settings::ChainSettings;

/// A full chain's worth of coefficients, derived in one shot.
///
/// Designing everything before applying anything is what makes a
/// parameter update all-or-nothing: a [`DesignError`] leaves the
/// previously installed coefficients untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCoefficients {
    /// Highpass cascade slots for the low-cut band.
    pub low_cut: [Coefficients; 4],
    /// Peaking section for the middle band.
    pub peak: Coefficients,
    /// Lowpass cascade slots for the high-cut band.
    pub high_cut: [Coefficients; 4],
}

impl ChainCoefficients {
    /// Derive every band's coefficients from one settings snapshot.
    pub fn design(sample_rate: f32, settings: &ChainSettings) -> Result<Self, DesignError> {
        Ok(Self {
            low_cut: cut_coefficients(
                sample_rate,
                settings.low_cut_freq,
                settings.low_cut_slope,
                CutKind::Highpass,
            )?,
            peak: peak_coefficients(
                sample_rate,
                settings.peak_freq,
                settings.peak_q,
                settings.peak_gain_db,
            )?,
            high_cut: cut_coefficients(
                sample_rate,
                settings.high_cut_freq,
                settings.high_cut_slope,
                CutKind::Lowpass,
            )?,
        })
    }
}

/// Errors surfaced by the equalizer to its caller.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProcessError {
    /// `process`/`update` called before [`StereoEqualizer::prepare`].
    #[error("equalizer used before prepare()")]
    NotPrepared,
    /// A settings value was rejected by the coefficient factory.
    #[error(transparent)]
    Design(#[from] DesignError),
    /// Left and right buffers differ in length.
    #[error("channel buffers differ in length: left {left}, right {right}")]
    ChannelMismatch {
        /// Left buffer length.
        left: usize,
        /// Right buffer length.
        right: usize,
    },
    /// A block exceeded the size given to `prepare`.
    #[error("block of {len} samples exceeds prepared maximum {max}")]
    BlockTooLarge {
        /// Offending block length.
        len: usize,
        /// Maximum length given to `prepare`.
        max: usize,
    },
}

/// Stereo three-band EQ: low cut, peak, high cut.
///
/// Left and right own independent filter state but always carry
/// numerically identical coefficients — every update goes through
/// [`push`](Self::push), which writes both chains.
#[derive(Debug, Clone)]
pub struct StereoEqualizer {
    sample_rate: f32,
    max_block_size: usize,
    prepared: bool,
    settings: ChainSettings,
    left: MonoChain,
    right: MonoChain,
}

impl StereoEqualizer {
    /// Create an unprepared equalizer with default settings.
    pub fn new() -> Self {
        Self {
            sample_rate: 0.0,
            max_block_size: 0,
            prepared: false,
            settings: ChainSettings::default(),
            left: MonoChain::new(),
            right: MonoChain::new(),
        }
    }

    /// (Re)initialize for a sample rate and block size bound.
    ///
    /// Clears all filter state and installs coefficients for the current
    /// settings. Must be called before processing; may be called again
    /// whenever the host renegotiates the stream format.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), ProcessError> {
        let coeffs = ChainCoefficients::design(sample_rate, &self.settings)?;
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.reset();
        self.right.reset();
        self.push_all(&coeffs);
        self.prepared = true;
        Ok(())
    }

    /// Replace the active settings, rederiving all coefficients.
    ///
    /// All-or-nothing: on error the previous coefficients stay active.
    pub fn update(&mut self, settings: &ChainSettings) -> Result<(), ProcessError> {
        if !self.prepared {
            return Err(ProcessError::NotPrepared);
        }
        let coeffs = ChainCoefficients::design(self.sample_rate, settings)?;
        self.settings = *settings;
        self.push_all(&coeffs);
        Ok(())
    }

    /// Push one position's coefficients into both channels together.
    fn push(&mut self, position: ChainPosition, coeffs: &ChainCoefficients) {
        match position {
            ChainPosition::LowCut => {
                self.left.set_low_cut(coeffs.low_cut);
                self.right.set_low_cut(coeffs.low_cut);
            }
            ChainPosition::Peak => {
                self.left.set_peak(coeffs.peak);
                self.right.set_peak(coeffs.peak);
            }
            ChainPosition::HighCut => {
                self.left.set_high_cut(coeffs.high_cut);
                self.right.set_high_cut(coeffs.high_cut);
            }
        }
    }

    fn push_all(&mut self, coeffs: &ChainCoefficients) {
        self.push(ChainPosition::LowCut, coeffs);
        self.push(ChainPosition::Peak, coeffs);
        self.push(ChainPosition::HighCut, coeffs);
    }

    /// Filter one block in place, each channel through its own chain.
    ///
    /// Channels share no state; processing order between them is
    /// unobservable in the output.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) -> Result<(), ProcessError> {
        if !self.prepared {
            return Err(ProcessError::NotPrepared);
        }
        if left.len() != right.len() {
            return Err(ProcessError::ChannelMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        if left.len() > self.max_block_size {
            return Err(ProcessError::BlockTooLarge {
                len: left.len(),
                max: self.max_block_size,
            });
        }

        self.left.process_block(left);
        self.right.process_block(right);
        Ok(())
    }

    /// One full processing cycle: snapshot, rederive, filter.
    ///
    /// This is the per-block entry point a host calls at stream cadence.
    /// Wait-free with respect to parameter writers and allocation-free.
    pub fn process_cycle(
        &mut self,
        params: &ParameterStore,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), ProcessError> {
        let snapshot = params.snapshot();
        if snapshot != self.settings {
            self.update(&snapshot)?;
        }
        self.process_block(left, right)
    }

    /// Clear filter state without reconfiguring coefficients.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// The sample rate given to the last successful `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// The settings whose coefficients are currently installed.
    pub fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    /// Left channel chain (read access for inspection).
    pub fn left(&self) -> &MonoChain {
        &self.left
    }

    /// Right channel chain (read access for inspection).
    pub fn right(&self) -> &MonoChain {
        &self.right
    }
}

impl Default for StereoEqualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Slope;

    const SR: f32 = 48_000.0;

    fn prepared() -> StereoEqualizer {
        let mut eq = StereoEqualizer::new();
        eq.prepare(SR, 512).unwrap();
        eq
    }

    #[test]
    fn process_before_prepare_is_rejected() {
        let mut eq = StereoEqualizer::new();
        let mut l = [0.0f32; 8];
        let mut r = [0.0f32; 8];
        assert_eq!(
            eq.process_block(&mut l, &mut r),
            Err(ProcessError::NotPrepared)
        );
        assert_eq!(
            eq.update(&ChainSettings::default()),
            Err(ProcessError::NotPrepared)
        );
    }

    #[test]
    fn silence_in_silence_out() {
        let mut eq = prepared();
        eq.update(&ChainSettings {
            low_cut_freq: 200.0,
            low_cut_slope: Slope::Db48,
            peak_gain_db: 12.0,
            high_cut_freq: 5_000.0,
            ..ChainSettings::default()
        })
        .unwrap();

        let mut l = [0.0f32; 256];
        let mut r = [0.0f32; 256];
        eq.process_block(&mut l, &mut r).unwrap();
        assert!(l.iter().all(|&s| s == 0.0));
        assert!(r.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn identical_input_identical_output() {
        let mut eq = prepared();
        eq.update(&ChainSettings {
            low_cut_freq: 100.0,
            peak_gain_db: -6.0,
            ..ChainSettings::default()
        })
        .unwrap();

        let signal: [f32; 128] = core::array::from_fn(|i| (i as f32 * 0.2).sin() * 0.5);
        let mut l = signal;
        let mut r = signal;
        eq.process_block(&mut l, &mut r).unwrap();
        assert_eq!(l, r);
    }

    #[test]
    fn mismatched_channels_rejected() {
        let mut eq = prepared();
        let mut l = [0.0f32; 8];
        let mut r = [0.0f32; 4];
        assert_eq!(
            eq.process_block(&mut l, &mut r),
            Err(ProcessError::ChannelMismatch { left: 8, right: 4 })
        );
    }

    #[test]
    fn oversized_block_rejected() {
        let mut eq = StereoEqualizer::new();
        eq.prepare(SR, 16).unwrap();
        let mut l = [0.0f32; 32];
        let mut r = [0.0f32; 32];
        assert_eq!(
            eq.process_block(&mut l, &mut r),
            Err(ProcessError::BlockTooLarge { len: 32, max: 16 })
        );
    }

    #[test]
    fn failed_update_keeps_previous_coefficients() {
        let mut eq = prepared();
        eq.update(&ChainSettings {
            peak_gain_db: 6.0,
            ..ChainSettings::default()
        })
        .unwrap();
        let before = eq.left().peak();

        let bad = ChainSettings {
            peak_q: -1.0,
            ..ChainSettings::default()
        };
        assert!(eq.update(&bad).is_err());
        assert_eq!(eq.left().peak(), before);
        assert_eq!(eq.settings().peak_gain_db, 6.0);
    }

    #[test]
    fn both_channels_always_carry_identical_coefficients() {
        let mut eq = prepared();
        eq.update(&ChainSettings {
            low_cut_freq: 300.0,
            low_cut_slope: Slope::Db36,
            peak_gain_db: 4.5,
            high_cut_freq: 9_000.0,
            high_cut_slope: Slope::Db24,
            ..ChainSettings::default()
        })
        .unwrap();

        assert_eq!(eq.left().peak(), eq.right().peak());
        assert_eq!(eq.left().low_cut().sections(), eq.right().low_cut().sections());
        assert_eq!(eq.left().high_cut().sections(), eq.right().high_cut().sections());
    }

    #[test]
    fn process_cycle_tracks_store_changes() {
        let mut eq = prepared();
        let store = ParameterStore::default();
        let mut l = [0.5f32; 64];
        let mut r = [0.5f32; 64];
        eq.process_cycle(&store, &mut l, &mut r).unwrap();

        store.set_peak_gain_db(12.0);
        eq.process_cycle(&store, &mut l, &mut r).unwrap();
        assert_eq!(eq.settings().peak_gain_db, 12.0);
        assert_ne!(eq.left().peak(), Coefficients::IDENTITY);
    }
}
