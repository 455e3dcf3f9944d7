//! Filter chain topology: cut cascades and the per-channel mono chain.
//!
//! A [`MonoChain`] runs one channel through LowCut → Peak → HighCut. Each
//! cut band is a [`CutCascade`] of four fixed biquad slots; slope changes
//! swap coefficients, never the topology.

use crate::biquad::{Biquad, Coefficients};

/// Which slot of a [`MonoChain`] a coefficient update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    /// The highpass cascade at the head of the chain.
    LowCut,
    /// The peaking band in the middle.
    Peak,
    /// The lowpass cascade at the tail.
    HighCut,
}

/// Four biquad slots in series.
///
/// Every slot runs on every sample. Bypassed slots hold
/// [`Coefficients::IDENTITY`], which passes input through while
/// multiplying any stale delay-line content by zero, so reducing the
/// slope cannot leak state from a previously active slot.
#[derive(Debug, Clone, Default)]
pub struct CutCascade {
    stages: [Biquad; 4],
}

impl CutCascade {
    /// All slots identity, zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a full set of four slot coefficients at once.
    pub fn set_coefficients(&mut self, sections: [Coefficients; 4]) {
        for (stage, section) in self.stages.iter_mut().zip(sections) {
            stage.set_coefficients(section);
        }
    }

    /// The coefficients currently installed in each slot.
    pub fn sections(&self) -> [Coefficients; 4] {
        [
            self.stages[0].coefficients(),
            self.stages[1].coefficients(),
            self.stages[2].coefficients(),
            self.stages[3].coefficients(),
        ]
    }

    /// Run one sample through all four slots.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut signal = input;
        for stage in &mut self.stages {
            signal = stage.process(signal);
        }
        signal
    }

    /// Run a block through the cascade in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for stage in &mut self.stages {
            stage.process_block(buffer);
        }
    }

    /// Clear every slot's delay line.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

/// One channel's complete filter chain: LowCut → Peak → HighCut.
///
/// Positions update independently; swapping the peak coefficients never
/// touches cut-cascade state and vice versa.
#[derive(Debug, Clone, Default)]
pub struct MonoChain {
    low_cut: CutCascade,
    peak: Biquad,
    high_cut: CutCascade,
}

impl MonoChain {
    /// A fully pass-through chain with zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install low-cut cascade coefficients.
    pub fn set_low_cut(&mut self, sections: [Coefficients; 4]) {
        self.low_cut.set_coefficients(sections);
    }

    /// Install peak band coefficients.
    pub fn set_peak(&mut self, coeffs: Coefficients) {
        self.peak.set_coefficients(coeffs);
    }

    /// Install high-cut cascade coefficients.
    pub fn set_high_cut(&mut self, sections: [Coefficients; 4]) {
        self.high_cut.set_coefficients(sections);
    }

    /// The low-cut cascade (read access for inspection).
    pub fn low_cut(&self) -> &CutCascade {
        &self.low_cut
    }

    /// The peak band's current coefficients.
    pub fn peak(&self) -> Coefficients {
        self.peak.coefficients()
    }

    /// The high-cut cascade (read access for inspection).
    pub fn high_cut(&self) -> &CutCascade {
        &self.high_cut
    }

    /// Run one sample through the whole chain.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let after_low = self.low_cut.process(input);
        let after_peak = self.peak.process(after_low);
        self.high_cut.process(after_peak)
    }

    /// Run a block through the whole chain in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        self.low_cut.process_block(buffer);
        self.peak.process_block(buffer);
        self.high_cut.process_block(buffer);
    }

    /// Clear all filter state without touching coefficients.
    pub fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }
}
