//! Console report text tests

use max98357a_amp_test::audio::PlayReport;
use max98357a_amp_test::hal::I2sPins;
use max98357a_amp_test::{report, AmpTestError, InitStage};

fn render(f: impl FnOnce(&mut String) -> core::fmt::Result) -> String {
    let mut out = String::new();
    f(&mut out).unwrap();
    out
}

#[test]
fn test_banner() {
    let out = render(|o| report::banner(o, "AmpTest v0.1.0-gabc1234"));
    assert!(out.starts_with('\n'));
    assert!(out.contains("MAX98357A Audio Amplifier Test"));
    assert!(out.contains("AmpTest v0.1.0-gabc1234"));
    assert_eq!(out.matches("========================================").count(), 2);
}

#[test]
fn test_pin_map_uses_configured_pins() {
    let out = render(|o| report::pin_map(o, &I2sPins::default()));
    assert!(out.contains("DIN  (I2S_DOUT) -> GPIO 40"));
    assert!(out.contains("BCLK (I2S_BCLK) -> GPIO 42"));
    assert!(out.contains("LRC  (I2S_LRC)  -> GPIO 41"));
    assert!(out.contains("VIN  -> 5V"));
    assert!(out.contains("SD   -> GND (always on)"));

    let custom = I2sPins { bclk: 5, ws: 6, dout: 7 };
    let out = render(|o| report::pin_map(o, &custom));
    assert!(out.contains("-> GPIO 7"));
    assert!(!out.contains("GPIO 40"));
}

#[test]
fn test_init_ok() {
    let out = render(|o| report::init_ok(o));
    assert!(out.contains("✓ I2S initialized successfully!"));
    assert!(out.contains("Playing test tone..."));
    assert!(out.contains("You should hear a beep sound!"));
}

#[test]
fn test_init_failed_install_suggests_wiring() {
    let err = AmpTestError::Peripheral { stage: InitStage::DriverInstall, code: 258 };
    let out = render(|o| report::init_failed(o, &err));
    assert!(out.contains("ERROR: E01: I2S driver install failed (258)"));
    assert!(out.contains("Check your wiring!"));
    assert!(out.contains("disabled"));
}

#[test]
fn test_init_failed_enable_no_wiring_hint() {
    let err = AmpTestError::Peripheral { stage: InitStage::ChannelEnable, code: 259 };
    let out = render(|o| report::init_failed(o, &err));
    assert!(out.contains("I2S channel enable failed (259)"));
    assert!(!out.contains("Check your wiring!"));
}

#[test]
fn test_halted_names_code() {
    let err = AmpTestError::Peripheral { stage: InitStage::DriverInstall, code: -1 };
    let out = render(|o| report::halted(o, &err));
    assert!(out.contains("I2S not initialized (E01)"));
}

#[test]
fn test_tone_result() {
    let ok = Ok(PlayReport { frames: 22_050, bytes: 88_200, waited_ms: 600 });
    let out = render(|o| report::tone_result(o, &ok));
    assert!(out.contains("Beep played!"));

    let err = Err(AmpTestError::Alloc { bytes: 88_200 });
    let out = render(|o| report::tone_result(o, &err));
    assert!(out.contains("ERROR: E02: failed to allocate memory for audio samples"));
    assert!(!out.contains("Beep played!"));
}

#[test]
fn test_troubleshooting_checklist() {
    let out = render(|o| report::troubleshooting(o));
    assert!(out.contains("Hardware Test Results:"));
    assert!(out.contains("SPK+ and SPK-"));
    assert!(out.contains("5V (not 3.3V)"));
    assert!(out.contains("SD pin is connected to GND"));
}

#[test]
fn test_next_beep() {
    assert!(render(|o| report::next_beep(o, 3_000)).contains("Next beep in 3 seconds..."));
    assert!(render(|o| report::next_beep(o, 1_500)).contains("Next beep in 1500 ms..."));
}
