//! Timbre Core - stereo parametric EQ signal chain
//!
//! This crate implements the complete DSP path of a three-band parametric
//! equalizer: a low-cut (highpass) cascade, a peaking bell, and a
//! high-cut (lowpass) cascade, run independently over the left and right
//! channels. It is designed for real-time use: no allocation, locking, or
//! I/O anywhere in the processing path.
//!
//! # Core Abstractions
//!
//! - [`Biquad`] / [`Coefficients`] - one second-order IIR stage and its
//!   wholesale-replaceable coefficient set
//! - [`peak_coefficients`] / [`cut_coefficients`] - pure coefficient
//!   factory (RBJ peaking EQ, Butterworth cut cascades)
//! - [`CutCascade`] / [`MonoChain`] - fixed four-slot cascades and the
//!   per-channel LowCut → Peak → HighCut chain
//! - [`StereoEqualizer`] - the host-facing processor with a
//!   prepare/process/reset lifecycle
//! - [`ParameterStore`] / [`ChainSettings`] - lock-free live parameters
//!   and the immutable per-block snapshot read from them
//!
//! # Example
//!
//! ```rust
//! use timbre_core::{ChainSettings, ParameterStore, Slope, StereoEqualizer};
//!
//! let params = ParameterStore::new(ChainSettings::default());
//! params.set_low_cut_freq(120.0);
//! params.set_low_cut_slope(Slope::Db24);
//!
//! let mut eq = StereoEqualizer::new();
//! eq.prepare(48_000.0, 512).unwrap();
//!
//! let mut left = [0.0f32; 512];
//! let mut right = [0.0f32; 512];
//! eq.process_cycle(&params, &mut left, &mut right).unwrap();
//! ```
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! timbre-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: fixed-size state, no heap use after construction
//! - **Fail closed**: invalid parameters are rejected before any
//!   coefficient is installed; the chain never emits NaN/Inf
//! - **Deterministic**: identical inputs produce bit-identical
//!   coefficients, so filter behavior is reproducible in tests

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod chain;
pub mod design;
pub mod eq;
pub mod math;
pub mod params;
pub mod settings;

pub use biquad::{Biquad, Coefficients};
pub use chain::{ChainPosition, CutCascade, MonoChain};
pub use design::{CutKind, DesignError, cut_coefficients, peak_coefficients};
pub use eq::{ChainCoefficients, ProcessError, StereoEqualizer};
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use params::{
    MAX_FREQ_HZ, MAX_GAIN_DB, MAX_Q, MIN_FREQ_HZ, MIN_GAIN_DB, MIN_Q, ParameterStore,
};
pub use settings::{ChainSettings, Slope};
