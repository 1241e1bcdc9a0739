//! Audio subsystem for the amplifier test tone
//!
//! Architecture:
//! - Sine: integer phase reduction + `libm` sin/round
//! - Tone buffer: interleaved stereo i16, one allocation per beep
//! - Player: blocking write to an [`AudioSink`], then drain wait
//! - MAX98357A via I2S @ 44.1 kHz

pub mod sine;
pub mod tone;
pub mod player;

pub use tone::{sample_count, sine_sample, ToneBuffer, ToneSpec, BYTES_PER_FRAME, CHANNELS};
pub use player::{play_tone, AudioSink, PlayReport, ToneConfig};
