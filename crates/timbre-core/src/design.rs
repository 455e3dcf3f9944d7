//! Coefficient factory: settings in, biquad coefficient sets out.
//!
//! Pure, deterministic functions mapping `(sample_rate, parameters)` to
//! [`Coefficients`]. The peak band uses the RBJ cookbook peaking EQ; the
//! cut filters use the even-order Butterworth decomposition into cascaded
//! second-order sections, one RBJ highpass/lowpass section per stage with
//! the Butterworth pole-angle Q.
//!
//! # Input validation
//!
//! Two-tier policy, applied identically by every function here:
//!
//! - Non-finite or non-positive sample rate, frequency, Q, or a non-finite
//!   gain are **rejected** with [`DesignError`]. Nothing downstream ever
//!   sees NaN or infinite coefficients.
//! - Finite positive frequencies at or above Nyquist are **clamped** to
//!   47.5% of the sample rate, leaving headroom before the bilinear
//!   transform warps toward instability.

use crate::biquad::Coefficients;
use crate::settings::Slope;
use core::f32::consts::PI;
use libm::{cosf, powf, sinf};

/// Fraction of the sample rate a cutoff/center frequency may reach.
const NYQUIST_MARGIN: f32 = 0.475;

/// Rejected factory input.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DesignError {
    /// Sample rate was zero, negative, or non-finite.
    #[error("sample rate must be a positive finite value, got {0}")]
    InvalidSampleRate(f32),
    /// Frequency was zero, negative, or non-finite.
    #[error("frequency must be a positive finite value, got {0} Hz")]
    InvalidFrequency(f32),
    /// Q was zero, negative, or non-finite.
    #[error("Q must be a positive finite value, got {0}")]
    InvalidQ(f32),
    /// Gain was non-finite.
    #[error("gain must be finite, got {0} dB")]
    InvalidGain(f32),
}

/// Which response a cut cascade realizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// Low-cut band: highpass sections.
    Highpass,
    /// High-cut band: lowpass sections.
    Lowpass,
}

fn checked_rate(sample_rate: f32) -> Result<f32, DesignError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(DesignError::InvalidSampleRate(sample_rate))
    }
}

fn checked_freq(freq: f32, sample_rate: f32) -> Result<f32, DesignError> {
    if freq.is_finite() && freq > 0.0 {
        Ok(freq.min(sample_rate * NYQUIST_MARGIN))
    } else {
        Err(DesignError::InvalidFrequency(freq))
    }
}

fn checked_q(q: f32) -> Result<f32, DesignError> {
    if q.is_finite() && q > 0.0 {
        Ok(q)
    } else {
        Err(DesignError::InvalidQ(q))
    }
}

/// RBJ peaking EQ section.
///
/// `gain_db == 0.0` returns [`Coefficients::IDENTITY`] exactly, so a flat
/// peak band is a bitwise pass-through rather than a near-unity filter.
pub fn peak_coefficients(
    sample_rate: f32,
    freq: f32,
    q: f32,
    gain_db: f32,
) -> Result<Coefficients, DesignError> {
    let sample_rate = checked_rate(sample_rate)?;
    let freq = checked_freq(freq, sample_rate)?;
    let q = checked_q(q)?;
    if !gain_db.is_finite() {
        return Err(DesignError::InvalidGain(gain_db));
    }
    if gain_db == 0.0 {
        return Ok(Coefficients::IDENTITY);
    }

    // A = sqrt(10^(dB/20))
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * freq / sample_rate;
    let cs = cosf(omega);
    let alpha = sinf(omega) / (2.0 * q);

    Ok(Coefficients::normalized(
        1.0 + alpha * a,
        -2.0 * cs,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cs,
        1.0 - alpha / a,
    ))
}

/// One RBJ highpass or lowpass section at the given Q.
fn cut_section(sample_rate: f32, freq: f32, q: f32, kind: CutKind) -> Coefficients {
    let omega = 2.0 * PI * freq / sample_rate;
    let cs = cosf(omega);
    let alpha = sinf(omega) / (2.0 * q);

    let (b0, b1) = match kind {
        CutKind::Highpass => ((1.0 + cs) / 2.0, -(1.0 + cs)),
        CutKind::Lowpass => ((1.0 - cs) / 2.0, 1.0 - cs),
    };

    Coefficients::normalized(b0, b1, b0, 1.0 + alpha, -2.0 * cs, 1.0 - alpha)
}

/// Butterworth cut cascade: always four slots, trailing slots identity.
///
/// The first `slope.sections()` slots carry second-order sections of a
/// Butterworth filter of order `2 * slope.sections()`, giving
/// `slope.db_per_octave()` dB/oct at `freq`. The remaining slots are
/// [`Coefficients::IDENTITY`], so a cascade can apply all four slots
/// unconditionally regardless of slope.
pub fn cut_coefficients(
    sample_rate: f32,
    freq: f32,
    slope: Slope,
    kind: CutKind,
) -> Result<[Coefficients; 4], DesignError> {
    let sample_rate = checked_rate(sample_rate)?;
    let freq = checked_freq(freq, sample_rate)?;

    let sections = slope.sections();
    let order = 2.0 * sections as f32;

    let mut out = [Coefficients::IDENTITY; 4];
    for (k, slot) in out.iter_mut().take(sections).enumerate() {
        // Butterworth pole angle for section k of an order-2N filter.
        let theta = PI * (2.0 * k as f32 + 1.0) / (2.0 * order);
        let q = 1.0 / (2.0 * cosf(theta));
        *slot = cut_section(sample_rate, freq, q, kind);
    }
    Ok(out)
}
