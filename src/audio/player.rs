//! Blocking tone playback
//!
//! Synthesize → write → drop buffer → wait for the DMA queue to drain.
//! The sink is an owned handle acquired at init, so a tone can't be played
//! on a peripheral that never came up.

use embedded_hal::delay::DelayNs;

use super::tone::{ToneBuffer, ToneSpec};
use crate::error::AmpTestError;

/// Anything that can take a block of interleaved 16-bit PCM bytes
pub trait AudioSink {
    /// Write all of `bytes`, blocking until the peripheral has accepted them.
    fn write_blocking(&mut self, bytes: &[u8]) -> Result<(), AmpTestError>;
}

impl<S: AudioSink + ?Sized> AudioSink for &mut S {
    fn write_blocking(&mut self, bytes: &[u8]) -> Result<(), AmpTestError> {
        (**self).write_blocking(bytes)
    }
}

/// Tone synthesis parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Peak amplitude (well under i16::MAX to avoid clipping)
    pub amplitude: i16,
    /// Extra wait after the write so the DMA queue can drain
    pub settle_ms: u32,
    /// Heap budget for one tone buffer
    pub max_buffer_bytes: usize,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: crate::config::SAMPLE_RATE_HZ,
            amplitude: crate::config::TONE_AMPLITUDE,
            settle_ms: crate::config::SETTLE_MS,
            max_buffer_bytes: crate::config::MAX_TONE_BUFFER_BYTES,
        }
    }
}

/// What a successful `play_tone` pushed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    /// Stereo frames written
    pub frames: usize,
    /// Payload bytes written
    pub bytes: usize,
    /// Total time spent waiting after the write
    pub waited_ms: u32,
}

/// Play one tone and block until it has finished sounding
///
/// Allocation failure returns before the sink is touched.
pub fn play_tone<S, D>(
    sink: &mut S,
    delay: &mut D,
    spec: ToneSpec,
    config: &ToneConfig,
) -> Result<PlayReport, AmpTestError>
where
    S: AudioSink + ?Sized,
    D: DelayNs,
{
    let buffer = ToneBuffer::synthesize(
        spec,
        config.sample_rate,
        config.amplitude,
        config.max_buffer_bytes,
    )?;

    sink.write_blocking(buffer.as_bytes())?;

    let frames = buffer.frames();
    let bytes = buffer.byte_len();
    drop(buffer);

    // write returns once DMA has the data, not once it's been clocked out
    let waited_ms = spec.duration_ms.saturating_add(config.settle_ms);
    delay.delay_ms(waited_ms);

    Ok(PlayReport { frames, bytes, waited_ms })
}
