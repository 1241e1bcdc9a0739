//! Serial console output on UART0.
//!
//! Carries the banner, the test report and drained diagnostic log lines.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32-S3 GPIO43 (U0TXD) ──────▶ USB-UART RX (on-board bridge)
//!                                  └─▶ PC Serial Monitor @ 115200
//! ```
//!
//! UART0 is also the ESP-IDF log console. IDF component logs (driver
//! install warnings, boot messages) go to the same pins, so they can show up
//! between report lines. Component log verbosity is left at the IDF default.

use core::fmt::{self, Write};

use crate::logging::{DiagLog, LogEntry};

#[cfg(target_os = "espidf")]
pub use uart::SerialConsole;

/// Format one log entry.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, out: &mut dyn Write) -> fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Write every pending entry to `out`, then report drops if any.
///
/// Returns the number of entries written.
pub fn drain_log<const N: usize>(log: &mut DiagLog<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;

    while let Some(entry) = log.drain() {
        let _ = format_log_entry(&entry, out);
        count += 1;
    }

    let dropped = log.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {} log entries", dropped);
        log.reset_dropped();
    }

    count
}

#[cfg(target_os = "espidf")]
mod uart {
    use core::fmt;

    use esp_idf_svc::hal::gpio::{self, OutputPin};
    use esp_idf_svc::hal::peripheral::Peripheral;
    use esp_idf_svc::hal::uart::{self, UartTxDriver, UART0};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use crate::config::ConsoleConfig;

    /// TX-only UART console implementing `core::fmt::Write`.
    pub struct SerialConsole<'d> {
        uart: UartTxDriver<'d>,
    }

    impl<'d> SerialConsole<'d> {
        /// Initialize UART0 TX-only for console output.
        pub fn new(
            uart0: impl Peripheral<P = UART0> + 'd,
            tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
            config: &ConsoleConfig,
        ) -> Result<Self, EspError> {
            let uart_config = uart::config::Config::default().baudrate(Hertz(config.baud_rate));

            let uart = UartTxDriver::new(
                uart0,
                tx_pin,
                Option::<gpio::AnyIOPin>::None, // CTS
                Option::<gpio::AnyIOPin>::None, // RTS
                &uart_config,
            )?;

            Ok(Self { uart })
        }

        /// Block until the TX FIFO is empty.
        pub fn flush(&mut self) {
            let _ = self.uart.wait_done(esp_idf_svc::hal::delay::BLOCK);
        }
    }

    impl fmt::Write for SerialConsole<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut bytes = s.as_bytes();
            while !bytes.is_empty() {
                let n = self.uart.write(bytes).map_err(|_| fmt::Error)?;
                if n == 0 {
                    return Err(fmt::Error);
                }
                bytes = &bytes[n..];
            }
            Ok(())
        }
    }
}
