//! Module: config
//!
//! Purpose: Compile-time configuration for the amplifier test.
//!
//! There is no runtime configuration: every value lives here as a constant,
//! and the grouped structs below are what `main` threads through the
//! initializer, the player and the console.

use crate::audio::{ToneConfig, ToneSpec};
use crate::hal::{I2sOutputConfig, I2sPins};
use crate::logging::LogLevel;

// --- Audio ---

/// Output sample rate
pub const SAMPLE_RATE_HZ: u32 = 44_100;
/// Test tone frequency (1 kHz)
pub const TONE_FREQUENCY_HZ: u32 = 1_000;
/// Test tone length
pub const TONE_DURATION_MS: u32 = 500;
/// Peak amplitude, ~-10 dBFS
pub const TONE_AMPLITUDE: i16 = 10_000;
/// Wait after each write for the DMA queue to drain
pub const SETTLE_MS: u32 = 100;
/// Heap budget for a single tone buffer (default tone needs 88 200 bytes)
pub const MAX_TONE_BUFFER_BYTES: usize = 192 * 1024;

// --- I2S peripheral ---

/// DIN on MAX98357A
pub const I2S_DOUT_GPIO: i32 = 40;
/// LRC on MAX98357A
pub const I2S_WS_GPIO: i32 = 41;
/// BCLK on MAX98357A
pub const I2S_BCLK_GPIO: i32 = 42;
pub const DMA_BUFFER_COUNT: u32 = 8;
pub const DMA_FRAMES_PER_BUFFER: u32 = 64;

// --- Console ---

pub const CONSOLE_BAUD: u32 = 115_200;
/// UART0 TX on ESP32-S3
pub const CONSOLE_TX_GPIO: i32 = 43;
pub const LOG_LEVEL: LogLevel = LogLevel::Info;

// --- Timing ---

/// Give the serial monitor time to attach before the banner
pub const BOOT_DELAY_MS: u32 = 1_000;
/// Pause between "I2S initialized" and the first beep
pub const POST_INIT_DELAY_MS: u32 = 500;
/// Pause between beeps
pub const BEEP_INTERVAL_MS: u32 = 3_000;

/// Serial console configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub baud_rate: u32,
    pub tx_pin: i32,
    pub log_level: LogLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baud_rate: CONSOLE_BAUD,
            tx_pin: CONSOLE_TX_GPIO,
            log_level: LOG_LEVEL,
        }
    }
}

/// Everything the test needs, grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmpTestConfig {
    pub pins: I2sPins,
    pub i2s: I2sOutputConfig,
    pub tone: ToneConfig,
    /// The beep played every cycle
    pub beep: ToneSpec,
    pub console: ConsoleConfig,
    pub boot_delay_ms: u32,
    pub post_init_delay_ms: u32,
    pub beep_interval_ms: u32,
}

impl Default for AmpTestConfig {
    fn default() -> Self {
        Self {
            pins: I2sPins::default(),
            i2s: I2sOutputConfig::default(),
            tone: ToneConfig::default(),
            beep: ToneSpec::new(TONE_FREQUENCY_HZ, TONE_DURATION_MS),
            console: ConsoleConfig::default(),
            boot_delay_ms: BOOT_DELAY_MS,
            post_init_delay_ms: POST_INIT_DELAY_MS,
            beep_interval_ms: BEEP_INTERVAL_MS,
        }
    }
}
