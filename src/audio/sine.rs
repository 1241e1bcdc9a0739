//! Sine phase for tone synthesis
//!
//! Phase is reduced with integer arithmetic before any float work, so long
//! tones don't accumulate drift. The sine itself comes from `libm`.

use core::f64::consts::TAU;

/// Angle of sample `index` for a tone of `freq_hz` at `sample_rate` Hz
///
/// 2π·f·(i / fs), reduced to `[0, 2π)` exactly via `(f·i) mod fs`.
#[inline]
pub fn phase_angle(freq_hz: u32, index: u64, sample_rate: u32) -> f64 {
    let rate = sample_rate.max(1) as u64;
    let num = (freq_hz as u64 % rate) * (index % rate) % rate;
    TAU * num as f64 / rate as f64
}

/// round(sin(angle) · amplitude), half away from zero
#[inline]
pub fn scaled_sin(angle: f64, amplitude: i32) -> i32 {
    libm::round(libm::sin(angle) * amplitude as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn test_phase_angle_wraps() {
        // 1 kHz @ 44.1 kHz: sample 441 lands on exactly 10 cycles
        assert_eq!(phase_angle(1000, 441, 44_100), 0.0);
        assert_eq!(phase_angle(1000, 0, 44_100), 0.0);
        let quarter = phase_angle(11_025, 1, 44_100);
        assert!((quarter - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_phase_angle_matches_unreduced() {
        for i in 0..2000u64 {
            let reduced = phase_angle(700, i, 44_100);
            let direct = TAU * 700.0 * i as f64 / 44_100.0;
            assert!((reduced.sin() - direct.sin()).abs() < 1e-9, "i={}", i);
        }
    }

    #[test]
    fn test_scaled_sin_rounds() {
        // sin(2π/44.1) · 10000 = 1419.94...
        let angle = phase_angle(1000, 1, 44_100);
        assert_eq!(scaled_sin(angle, 10_000), 1420);
        assert_eq!(scaled_sin(TAU - angle, 10_000), -1420);
        assert_eq!(scaled_sin(FRAC_PI_2, 10_000), 10_000);
        assert_eq!(scaled_sin(0.0, 10_000), 0);
    }
}
