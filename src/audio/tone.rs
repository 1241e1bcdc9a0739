//! Interleaved stereo sine tone buffer
//!
//! One buffer per beep: allocated, filled, written to I2S, dropped.

use alloc::vec::Vec;

use super::sine;
use crate::error::AmpTestError;

/// Interleaved channel count (L, R)
pub const CHANNELS: usize = 2;

/// Bytes per interleaved frame (2 × i16)
pub const BYTES_PER_FRAME: usize = CHANNELS * core::mem::size_of::<i16>();

/// A single tone request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSpec {
    /// Tone frequency in Hz
    pub frequency_hz: u32,
    /// Tone length in milliseconds
    pub duration_ms: u32,
}

impl ToneSpec {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self { frequency_hz, duration_ms }
    }
}

/// Number of frames for `duration_ms` at `sample_rate`
///
/// `sample_rate * duration_ms / 1000`, truncated.
#[inline]
pub fn sample_count(sample_rate: u32, duration_ms: u32) -> u64 {
    sample_rate as u64 * duration_ms as u64 / 1000
}

/// Mono sample `index` of a sine at `freq_hz`
///
/// round(sin(2π·f·i/fs) · amplitude), clamped to ±amplitude.
#[inline]
pub fn sine_sample(freq_hz: u32, index: u64, sample_rate: u32, amplitude: i16) -> i16 {
    let amp = (amplitude.unsigned_abs() as i32).min(i16::MAX as i32);
    let angle = sine::phase_angle(freq_hz, index, sample_rate);
    let value = sine::scaled_sin(angle, amp);
    value.clamp(-amp, amp) as i16
}

/// Owned interleaved stereo sample buffer
///
/// Both channels carry the same mono sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneBuffer {
    samples: Vec<i16>,
}

impl ToneBuffer {
    /// Synthesize `spec` into a freshly allocated buffer
    ///
    /// Fails with [`AmpTestError::Alloc`] when the buffer would exceed
    /// `max_bytes`, when its size overflows, or when the heap refuses it.
    /// Nothing is allocated on failure.
    pub fn synthesize(
        spec: ToneSpec,
        sample_rate: u32,
        amplitude: i16,
        max_bytes: usize,
    ) -> Result<Self, AmpTestError> {
        let frames = sample_count(sample_rate, spec.duration_ms);
        let bytes = Self::bytes_for(frames).ok_or(AmpTestError::Alloc { bytes: usize::MAX })?;

        if bytes > max_bytes {
            return Err(AmpTestError::Alloc { bytes });
        }

        // bytes fits usize, so frames * CHANNELS does too
        let len = bytes / core::mem::size_of::<i16>();

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| AmpTestError::Alloc { bytes })?;

        for i in 0..frames {
            let sample = sine_sample(spec.frequency_hz, i, sample_rate, amplitude);
            samples.push(sample); // Left
            samples.push(sample); // Right
        }

        Ok(Self { samples })
    }

    /// Byte size of `frames` interleaved frames, `None` on overflow
    pub fn bytes_for(frames: u64) -> Option<usize> {
        usize::try_from(frames).ok()?.checked_mul(BYTES_PER_FRAME)
    }

    /// Number of stereo frames
    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    /// Number of i16 values (frames × 2)
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interleaved samples, L first
    #[inline]
    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    /// Frame `index` as (left, right)
    pub fn frame(&self, index: usize) -> Option<(i16, i16)> {
        let base = index.checked_mul(CHANNELS)?;
        match self.samples.get(base..base.checked_add(CHANNELS)?) {
            Some(&[l, r]) => Some((l, r)),
            _ => None,
        }
    }

    /// Iterator over (left, right) frames
    pub fn frames_iter(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.samples.chunks_exact(CHANNELS).map(|f| (f[0], f[1]))
    }

    /// Raw native-endian bytes, as the I2S DMA expects them
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: i16 has no padding and every bit pattern is a valid u8;
        // u8 alignment (1) is satisfied by any pointer. Length covers exactly
        // the initialized samples and borrows `self`.
        unsafe {
            core::slice::from_raw_parts(
                self.samples.as_ptr() as *const u8,
                self.samples.len() * core::mem::size_of::<i16>(),
            )
        }
    }

    /// Payload size in bytes
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.samples.len() * core::mem::size_of::<i16>()
    }
}
