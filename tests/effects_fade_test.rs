//! Unit tests for the shared layer fade helper and the sparkle twinkle
//! function.
//!
//! Tests cover:
//! - Constant-rate fades landing exactly on target without overshoot
//! - Asymmetric in/out rates as used by the splat and dirt layers
//! - Twinkle output staying in unit range and being deterministic

use vehicle_render_engine::engine::effects::fade_toward;
use vehicle_render_engine::engine::effects::sparkle::{hash_noise, twinkle};

#[test]
fn fade_rises_at_the_given_rate() {
    let after_one_frame = fade_toward(0.0, 1.0, 2.0, 1.0 / 60.0);
    assert!((after_one_frame - 2.0 / 60.0).abs() < 1.0e-6);
}

#[test]
fn fade_never_overshoots_the_target() {
    assert_eq!(fade_toward(0.9, 1.0, 5.0, 1.0), 1.0);
    assert_eq!(fade_toward(0.1, 0.0, 5.0, 1.0), 0.0);
    assert_eq!(fade_toward(0.5, 0.5, 5.0, 1.0), 0.5);
}

#[test]
fn fade_converges_in_both_directions() {
    let mut alpha = 0.0;
    for _ in 0..600 {
        alpha = fade_toward(alpha, 1.0, 2.8, 1.0 / 60.0);
    }
    assert_eq!(alpha, 1.0);

    for _ in 0..600 {
        alpha = fade_toward(alpha, 0.0, 0.45, 1.0 / 60.0);
    }
    assert_eq!(alpha, 0.0);
}

#[test]
fn slower_out_rate_takes_longer_than_in_rate() {
    let frames_to = |rate: f32, from: f32, to: f32| {
        let mut alpha = from;
        let mut frames = 0;
        while alpha != to {
            alpha = fade_toward(alpha, to, rate, 1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000);
        }
        frames
    };

    // Splat-style asymmetry: fast accumulation, slow wash-off.
    assert!(frames_to(2.8, 0.0, 1.0) < frames_to(0.45, 1.0, 0.0));
}

#[test]
fn hash_noise_is_deterministic_and_in_unit_range() {
    for i in 0..256 {
        let x = i as f32 * 0.37;
        let value = hash_noise(x);
        assert!((0.0..=1.0).contains(&value));
        assert_eq!(value, hash_noise(x));
    }
}

#[test]
fn twinkle_is_bounded_and_deterministic() {
    for i in 0..512 {
        let time = i as f32 * 0.021;
        let phase = (i % 7) as f32 * 1.3;
        let value = twinkle(time, phase);
        assert!((0.0..=1.0).contains(&value), "twinkle out of range: {value}");
        assert_eq!(value, twinkle(time, phase));
    }
}

#[test]
fn twinkle_actually_flickers() {
    // Over a sweep of time samples the gate must both open and close, and
    // the open intensity must vary. A constant output would read as a static
    // glow, not glitter.
    let samples: Vec<f32> = (0..400).map(|i| twinkle(i as f32 * 0.033, 0.8)).collect();
    let zeros = samples.iter().filter(|v| **v == 0.0).count();
    let lit = samples.iter().filter(|v| **v > 0.05).count();
    assert!(zeros > 0, "gate never closed");
    assert!(lit > 0, "gate never opened");
}
