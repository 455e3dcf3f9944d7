//! Property-based tests for the EQ coefficient factory and chain.
//!
//! Verifies pole stability across the full valid parameter space,
//! zero-gain identity, factory determinism, and silence propagation
//! using proptest for randomized input generation.

use proptest::prelude::*;
use timbre_core::{
    ChainCoefficients, ChainSettings, Coefficients, CutKind, Slope, StereoEqualizer,
    cut_coefficients, peak_coefficients,
};

fn arb_slope() -> impl Strategy<Value = Slope> {
    (0usize..4).prop_map(|i| Slope::from_index(i).unwrap())
}

fn arb_settings() -> impl Strategy<Value = ChainSettings> {
    (
        20.0f32..20_000.0,
        -24.0f32..24.0,
        0.1f32..10.0,
        20.0f32..20_000.0,
        20.0f32..20_000.0,
        arb_slope(),
        arb_slope(),
    )
        .prop_map(
            |(peak_freq, peak_gain_db, peak_q, low_cut_freq, high_cut_freq, lo, hi)| {
                ChainSettings {
                    peak_freq,
                    peak_gain_db,
                    peak_q,
                    low_cut_freq,
                    high_cut_freq,
                    low_cut_slope: lo,
                    high_cut_slope: hi,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every peaking section designed from valid parameters has both
    /// poles strictly inside the unit circle and finite coefficients.
    #[test]
    fn peak_sections_are_stable(
        sample_rate in 22_050.0f32..192_000.0,
        freq in 20.0f32..20_000.0,
        q in 0.1f32..10.0,
        gain_db in -24.0f32..24.0,
    ) {
        let c = peak_coefficients(sample_rate, freq, q, gain_db).unwrap();
        prop_assert!(c.is_finite(), "non-finite peak coefficients: {c:?}");
        prop_assert!(
            c.is_stable(),
            "unstable peak (sr={sample_rate}, f={freq}, q={q}, g={gain_db}): {c:?}"
        );
    }

    /// Every cut cascade slot, active or identity, is stable and finite
    /// for any valid cutoff and slope, highpass and lowpass alike.
    #[test]
    fn cut_sections_are_stable(
        sample_rate in 22_050.0f32..192_000.0,
        freq in 20.0f32..20_000.0,
        slope in arb_slope(),
        highpass in any::<bool>(),
    ) {
        let kind = if highpass { CutKind::Highpass } else { CutKind::Lowpass };
        let sections = cut_coefficients(sample_rate, freq, slope, kind).unwrap();
        for c in sections {
            prop_assert!(c.is_finite(), "non-finite cut coefficients: {c:?}");
            prop_assert!(
                c.is_stable(),
                "unstable cut (sr={sample_rate}, f={freq}, {slope:?}, {kind:?}): {c:?}"
            );
        }
    }

    /// Zero peak gain yields the exact identity set for any frequency
    /// and Q, not merely a near-unity filter.
    #[test]
    fn zero_gain_is_identity_everywhere(
        freq in 20.0f32..20_000.0,
        q in 0.1f32..10.0,
    ) {
        let c = peak_coefficients(48_000.0, freq, q, 0.0).unwrap();
        prop_assert_eq!(c, Coefficients::IDENTITY);
    }

    /// Repeated designs from the same inputs are bit-identical.
    #[test]
    fn factory_is_deterministic(settings in arb_settings()) {
        let a = ChainCoefficients::design(48_000.0, &settings).unwrap();
        let b = ChainCoefficients::design(48_000.0, &settings).unwrap();
        prop_assert_eq!(a, b);
    }

    /// A freshly prepared equalizer maps silence to exact silence under
    /// any valid settings.
    #[test]
    fn silence_maps_to_silence(settings in arb_settings()) {
        let mut eq = StereoEqualizer::new();
        eq.prepare(48_000.0, 256).unwrap();
        eq.update(&settings).unwrap();

        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        eq.process_block(&mut left, &mut right).unwrap();
        prop_assert!(left.iter().all(|&s| s == 0.0));
        prop_assert!(right.iter().all(|&s| s == 0.0));
    }

    /// Any valid settings over bounded input produce finite output.
    #[test]
    fn output_stays_finite(
        settings in arb_settings(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut eq = StereoEqualizer::new();
        eq.prepare(48_000.0, 32).unwrap();
        eq.update(&settings).unwrap();

        let mut left = input;
        let mut right = input;
        eq.process_block(&mut left, &mut right).unwrap();
        for (l, r) in left.iter().zip(&right) {
            prop_assert!(l.is_finite() && r.is_finite());
        }
    }
}
