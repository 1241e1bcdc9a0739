//! MAX98357A Amp Test - Main entry point
//!
//! 1. Bring up the serial console, print banner and wiring table
//! 2. Initialize I2S (once, no retries)
//! 3. Beep every few seconds and print the troubleshooting checklist
//!
//! If I2S init fails no tone is ever played; the board sits in an idle loop
//! repeating the failure until it is reset.

#![cfg_attr(target_os = "espidf", no_std, no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::IOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys as esp_idf_sys;

    use max98357a_amp_test::{
        config::AmpTestConfig,
        console::{drain_log, SerialConsole},
        diag_error, diag_info, diag_warn,
        hal::{self, Amplifier, I2sPinSet},
        logging::{now_us, DiagLog},
        play_tone, report, AmpTestError, VERSION,
    };

    #[no_mangle]
    fn main() {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        let Ok(peripherals) = Peripherals::take() else {
            return;
        };

        let config = AmpTestConfig::default();
        let mut log: DiagLog = DiagLog::with_level(config.console.log_level);

        FreeRtos::delay_ms(config.boot_delay_ms);

        // Nowhere to report a console failure, so just stop
        let Ok(mut console) =
            SerialConsole::new(peripherals.uart0, peripherals.pins.gpio43, &config.console)
        else {
            return;
        };

        let _ = report::banner(&mut console, VERSION);
        let _ = report::pin_map(&mut console, &config.pins);
        let _ = report::initializing(&mut console);

        // GPIOs must match config.pins
        let pins = I2sPinSet {
            bclk: peripherals.pins.gpio42.downgrade(),
            ws: peripherals.pins.gpio41.downgrade(),
            dout: peripherals.pins.gpio40.downgrade(),
        };

        match hal::init(peripherals.i2s0, pins, &config.i2s) {
            Ok(amp) => {
                diag_info!(
                    log,
                    now_us(),
                    "I2S0 TX up: {} Hz, {}-bit, {} ch, BCLK {} Hz, DMA {}x{} ({} bytes)",
                    config.i2s.sample_rate,
                    config.i2s.bits_per_sample,
                    config.i2s.channels,
                    config.i2s.bclk_hz(),
                    config.i2s.dma_buffer_count,
                    config.i2s.frames_per_buffer,
                    config.i2s.dma_queue_bytes()
                );
                drain_log(&mut log, &mut console);
                let _ = report::init_ok(&mut console);

                FreeRtos::delay_ms(config.post_init_delay_ms);
                beep_loop(amp, &config, &mut console, &mut log)
            }
            Err(err) => {
                diag_error!(log, now_us(), "{}", err);
                drain_log(&mut log, &mut console);
                let _ = report::init_failed(&mut console, &err);
                console.flush();
                halt_loop(&err, &config, &mut console)
            }
        }
    }

    fn beep_loop(
        mut amp: Amplifier<'_>,
        config: &AmpTestConfig,
        console: &mut SerialConsole<'_>,
        log: &mut DiagLog,
    ) -> ! {
        let mut delay = FreeRtos;
        let mut played: u32 = 0;

        loop {
            let result = play_tone(&mut amp, &mut delay, config.beep, &config.tone);

            match &result {
                Ok(r) => {
                    played = played.wrapping_add(1);
                    diag_info!(
                        log,
                        now_us(),
                        "beep #{}: {} Hz, {} frames, {} bytes",
                        played,
                        config.beep.frequency_hz,
                        r.frames,
                        r.bytes
                    );
                }
                Err(err @ AmpTestError::Alloc { .. }) => {
                    diag_warn!(log, now_us(), "beep skipped, nothing written: {}", err);
                }
                Err(err) => {
                    diag_error!(log, now_us(), "{}", err);
                }
            }

            drain_log(log, console);
            let _ = report::tone_result(console, &result);
            let _ = report::troubleshooting(console);
            let _ = report::next_beep(console, config.beep_interval_ms);
            console.flush();

            FreeRtos::delay_ms(config.beep_interval_ms);
        }
    }

    fn halt_loop(err: &AmpTestError, config: &AmpTestConfig, console: &mut SerialConsole<'_>) -> ! {
        loop {
            FreeRtos::delay_ms(config.beep_interval_ms);
            let _ = report::halted(console, err);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "{}: firmware image, build with --target xtensa-esp32s3-espidf",
        max98357a_amp_test::VERSION
    );
}
