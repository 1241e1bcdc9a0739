//! Hardware Abstraction Layer for the amplifier test.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Tone synthesis stays in `audio`, HAL is just I/O.

pub mod i2s;

pub use i2s::{I2sOutputConfig, I2sPins};

#[cfg(target_os = "espidf")]
pub use i2s::{init, Amplifier, I2sPinSet};
