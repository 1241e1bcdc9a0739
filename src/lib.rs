//! # MAX98357A Amp Test
//!
//! I2S bring-up test for a MAX98357A class-D amplifier on ESP32-S3.
//!
//! ## Architecture
//!
//! Linear init, then a polling loop:
//! - [`hal::i2s`] brings up the I2S TX channel and hands back an owned
//!   `Amplifier` (ESP-IDF only)
//! - [`audio`] synthesizes a sine beep and plays it through any [`AudioSink`]
//! - [`report`] and [`console`] print the wiring table, results and
//!   troubleshooting text over UART
//!
//! Everything except the ESP-IDF drivers builds and tests on the host.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod audio;
pub mod config;
pub mod console;
pub mod error;
pub mod hal;
pub mod logging;
pub mod report;

pub use audio::{play_tone, AudioSink, PlayReport, ToneBuffer, ToneConfig, ToneSpec};
pub use config::AmpTestConfig;
pub use error::{AmpTestError, InitStage};
pub use logging::{DiagLog, LogLevel};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");
