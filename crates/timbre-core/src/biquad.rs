//! Second-order IIR filter stage.
//!
//! [`Biquad`] implements the Direct Form I difference equation:
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
//!                - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! Coefficient derivation lives in [`crate::design`]; this module only
//! stores a [`Coefficients`] set and runs samples through it.

use crate::math::flush_denormal;

/// One normalized biquad coefficient set.
///
/// The feedback coefficient `a0` is already divided out, so the set is
/// exactly the five numbers the difference equation consumes. Sets are
/// replaced wholesale via [`Biquad::set_coefficients`], never edited in
/// place, which keeps a coefficient update atomic with respect to sample
/// processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficients.
    pub b0: f32,
    /// Feedforward z^-1 tap.
    pub b1: f32,
    /// Feedforward z^-2 tap.
    pub b2: f32,
    /// Feedback z^-1 tap (normalized).
    pub a1: f32,
    /// Feedback z^-2 tap (normalized).
    pub a2: f32,
}

impl Coefficients {
    /// Exact pass-through: `y[n] = x[n]`, no state contribution.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build a normalized set from raw cookbook output, dividing by `a0`.
    #[inline]
    pub fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Whether both poles lie strictly inside the unit circle.
    ///
    /// Uses the second-order stability triangle: `|a2| < 1` and
    /// `|a1| < 1 + a2`.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }

    /// Whether every coefficient is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single filter stage: one coefficient set plus one delay line.
///
/// Stages never share state. A stereo processor owns one stage per
/// channel and feeds both the same coefficients.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: Coefficients,
    // Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,
    // Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a stage with pass-through coefficients and zero state.
    pub fn new() -> Self {
        Self {
            coeffs: Coefficients::IDENTITY,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replace the transfer function wholesale. State is kept, so a
    /// coefficient change mid-stream settles like any other filter input
    /// change instead of clicking.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.coeffs = coeffs;
    }

    /// The currently active coefficient set.
    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Process a single sample, advancing the delay line.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    /// Process a block of samples in place.
    #[inline]
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the delay line without touching coefficients.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
