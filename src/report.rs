//! Console text for the bring-up test
//!
//! Everything a technician reads on the serial monitor: banner, wiring
//! table, init result, per-beep result and the troubleshooting checklist.

use core::fmt::{self, Write};

use crate::audio::PlayReport;
use crate::error::AmpTestError;
use crate::hal::I2sPins;

const RULE: &str = "========================================";

/// Title banner with firmware version
pub fn banner(out: &mut dyn Write, version: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "MAX98357A Audio Amplifier Test")?;
    writeln!(out, "{}", version)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

/// Wiring table
pub fn pin_map(out: &mut dyn Write, pins: &I2sPins) -> fmt::Result {
    writeln!(out, "Pin Configuration:")?;
    writeln!(out, "  DIN  (I2S_DOUT) -> GPIO {}", pins.dout)?;
    writeln!(out, "  BCLK (I2S_BCLK) -> GPIO {}", pins.bclk)?;
    writeln!(out, "  LRC  (I2S_LRC)  -> GPIO {}", pins.ws)?;
    writeln!(out, "  VIN  -> 5V")?;
    writeln!(out, "  GND  -> GND")?;
    writeln!(out, "  SD   -> GND (always on)")?;
    writeln!(out)
}

pub fn initializing(out: &mut dyn Write) -> fmt::Result {
    writeln!(out, "Initializing I2S...")
}

/// Init succeeded, beeps are about to start
pub fn init_ok(out: &mut dyn Write) -> fmt::Result {
    writeln!(out, "✓ I2S initialized successfully!")?;
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Playing test tone...")?;
    writeln!(out, "You should hear a beep sound!")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

/// Init failed; no tone will be played
pub fn init_failed(out: &mut dyn Write, err: &AmpTestError) -> fmt::Result {
    writeln!(out, "ERROR: {}", err)?;
    if err.is_wiring_suspect() {
        writeln!(out, "Check your wiring!")?;
    }
    writeln!(out, "Tone playback disabled until reset.")?;
    writeln!(out)
}

/// Reminder printed every interval while init is failed
pub fn halted(out: &mut dyn Write, err: &AmpTestError) -> fmt::Result {
    writeln!(
        out,
        "I2S not initialized ({}); fix the fault and reset the board.",
        err.code()
    )
}

/// Result line for one beep
pub fn tone_result(out: &mut dyn Write, result: &Result<PlayReport, AmpTestError>) -> fmt::Result {
    match result {
        Ok(_) => writeln!(out, "Beep played!")?,
        Err(err) => writeln!(out, "ERROR: {}", err)?,
    }
    writeln!(out)
}

/// Hardware checklist shown after every beep
pub fn troubleshooting(out: &mut dyn Write) -> fmt::Result {
    writeln!(out, "Hardware Test Results:")?;
    writeln!(out, "  If you heard a beep: ✓ MAX98357A working!")?;
    writeln!(out, "  If no sound:")?;
    writeln!(out, "    - Check wiring connections")?;
    writeln!(out, "    - Verify speaker is connected to SPK+ and SPK-")?;
    writeln!(out, "    - Check VIN is connected to 5V (not 3.3V)")?;
    writeln!(out, "    - Ensure SD pin is connected to GND")?;
    writeln!(out)
}

pub fn next_beep(out: &mut dyn Write, interval_ms: u32) -> fmt::Result {
    if interval_ms % 1000 == 0 {
        writeln!(out, "Next beep in {} seconds...", interval_ms / 1000)?;
    } else {
        writeln!(out, "Next beep in {} ms...", interval_ms)?;
    }
    writeln!(out)
}
