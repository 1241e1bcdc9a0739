//! I2S transmit HAL for the MAX98357A.
//!
//! The MAX98357A needs no control bus: BCLK, LRC and DIN are all it takes.
//! Standard Philips framing, 16-bit stereo, ESP32-S3 as clock master.
//!
//! ```text
//! ESP32-S3 GPIO42 (BCLK) ──────▶ BCLK
//! ESP32-S3 GPIO41 (WS)   ──────▶ LRC
//! ESP32-S3 GPIO40 (DOUT) ──────▶ DIN
//!                     5V ──────▶ VIN
//!                    GND ──────▶ GND, SD (always on)
//! ```

use crate::config;

/// I2S pin assignment (GPIO numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sPins {
    /// Bit clock (MAX98357A BCLK)
    pub bclk: i32,
    /// Word select / frame clock (MAX98357A LRC)
    pub ws: i32,
    /// Serial data out (MAX98357A DIN)
    pub dout: i32,
}

impl Default for I2sPins {
    fn default() -> Self {
        Self {
            bclk: config::I2S_BCLK_GPIO,
            ws: config::I2S_WS_GPIO,
            dout: config::I2S_DOUT_GPIO,
        }
    }
}

/// I2S TX channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sOutputConfig {
    pub sample_rate: u32,
    pub bits_per_sample: u8,
    pub channels: u8,
    /// DMA descriptors in the TX queue
    pub dma_buffer_count: u32,
    /// Frames per DMA descriptor
    pub frames_per_buffer: u32,
    /// Send zeros on underrun instead of repeating stale data
    pub auto_clear: bool,
}

impl Default for I2sOutputConfig {
    fn default() -> Self {
        Self {
            sample_rate: config::SAMPLE_RATE_HZ,
            bits_per_sample: 16,
            channels: 2,
            dma_buffer_count: config::DMA_BUFFER_COUNT,
            frames_per_buffer: config::DMA_FRAMES_PER_BUFFER,
            auto_clear: true,
        }
    }
}

impl I2sOutputConfig {
    /// Bit clock frequency: fs × bits × channels
    pub fn bclk_hz(&self) -> u32 {
        self.sample_rate * self.bits_per_sample as u32 * self.channels as u32
    }

    /// Total DMA queue depth in bytes
    pub fn dma_queue_bytes(&self) -> usize {
        self.dma_buffer_count as usize
            * self.frames_per_buffer as usize
            * self.channels as usize
            * (self.bits_per_sample as usize / 8)
    }
}

#[cfg(target_os = "espidf")]
pub use driver::{init, Amplifier, I2sPinSet};

#[cfg(target_os = "espidf")]
mod driver {
    use esp_idf_svc::hal::delay::BLOCK;
    use esp_idf_svc::hal::gpio::AnyIOPin;
    use esp_idf_svc::hal::i2s::{config as i2s_cfg, I2s, I2sDriver, I2sTx};
    use esp_idf_svc::hal::peripheral::Peripheral;

    use super::I2sOutputConfig;
    use crate::audio::AudioSink;
    use crate::error::{AmpTestError, InitStage};

    /// Pins handed over to the driver. Must match `I2sPins::default()`.
    pub struct I2sPinSet {
        pub bclk: AnyIOPin,
        pub ws: AnyIOPin,
        pub dout: AnyIOPin,
    }

    /// Owned I2S TX channel wired to the amplifier.
    pub struct Amplifier<'d> {
        driver: I2sDriver<'d, I2sTx>,
    }

    /// Install the I2S driver, route pins and enable TX.
    pub fn init<'d>(
        i2s: impl Peripheral<P = impl I2s> + 'd,
        pins: I2sPinSet,
        config: &I2sOutputConfig,
    ) -> Result<Amplifier<'d>, AmpTestError> {
        let data_width = match config.bits_per_sample {
            16 => i2s_cfg::DataBitWidth::Bits16,
            24 => i2s_cfg::DataBitWidth::Bits24,
            _ => i2s_cfg::DataBitWidth::Bits32,
        };
        let slot_mode = if config.channels == 1 {
            i2s_cfg::SlotMode::Mono
        } else {
            i2s_cfg::SlotMode::Stereo
        };

        let channel_cfg = i2s_cfg::Config::default()
            .dma_buffer_count(config.dma_buffer_count)
            .frames_per_buffer(config.frames_per_buffer)
            .auto_clear(config.auto_clear);

        let std_cfg = i2s_cfg::StdConfig::new(
            channel_cfg,
            i2s_cfg::StdClkConfig::from_sample_rate_hz(config.sample_rate),
            i2s_cfg::StdSlotConfig::philips_slot_default(data_width, slot_mode),
            i2s_cfg::StdGpioConfig::default(),
        );

        let mut driver = I2sDriver::new_std_tx(
            i2s,
            &std_cfg,
            pins.bclk,
            pins.dout,
            Option::<AnyIOPin>::None, // MCLK: MAX98357A derives its clock from BCLK
            pins.ws,
        )
        .map_err(|e| AmpTestError::Peripheral {
            stage: InitStage::DriverInstall,
            code: e.code(),
        })?;

        driver.tx_enable().map_err(|e| AmpTestError::Peripheral {
            stage: InitStage::ChannelEnable,
            code: e.code(),
        })?;

        Ok(Amplifier { driver })
    }

    impl AudioSink for Amplifier<'_> {
        fn write_blocking(&mut self, bytes: &[u8]) -> Result<(), AmpTestError> {
            self.driver
                .write_all(bytes, BLOCK)
                .map_err(|e| AmpTestError::Write { code: e.code() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pins() {
        let pins = I2sPins::default();
        assert_eq!(pins.bclk, 42);
        assert_eq!(pins.ws, 41);
        assert_eq!(pins.dout, 40);
    }

    #[test]
    fn test_default_output_config() {
        let cfg = I2sOutputConfig::default();
        assert_eq!(cfg.sample_rate, 44_100);
        assert_eq!(cfg.bits_per_sample, 16);
        assert_eq!(cfg.channels, 2);
        assert_eq!(cfg.dma_buffer_count, 8);
        assert_eq!(cfg.frames_per_buffer, 64);
        assert!(cfg.auto_clear);
    }

    #[test]
    fn test_derived_clocks() {
        let cfg = I2sOutputConfig::default();
        assert_eq!(cfg.bclk_hz(), 1_411_200);
        // 8 × 64 frames × 4 bytes
        assert_eq!(cfg.dma_queue_bytes(), 2048);
    }
}
