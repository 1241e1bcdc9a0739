//! Bring-up error types

/// Which step of the I2S bring-up failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Driver install and pin routing (`i2s_new_channel` + `i2s_channel_init_std_mode`)
    DriverInstall,
    /// Enabling the TX channel after install
    ChannelEnable,
}

impl InitStage {
    /// Get stage description
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DriverInstall => "I2S driver install failed",
            Self::ChannelEnable => "I2S channel enable failed",
        }
    }
}

/// Bring-up error with code and message
///
/// Raw ESP-IDF codes are kept as `i32` (`esp_err_t`) so the type is usable
/// on the host as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmpTestError {
    /// E01: I2S peripheral could not be configured
    Peripheral { stage: InitStage, code: i32 },
    /// E02: Sample buffer could not be allocated
    Alloc { bytes: usize },
    /// E03: Blocking write to the I2S channel failed
    Write { code: i32 },
}

impl AmpTestError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Peripheral { .. } => "E01",
            Self::Alloc { .. } => "E02",
            Self::Write { .. } => "E03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Peripheral { stage, .. } => stage.as_str(),
            Self::Alloc { .. } => "failed to allocate memory for audio samples",
            Self::Write { .. } => "I2S write failed",
        }
    }

    /// True if the failure points at wiring or pin routing
    pub fn is_wiring_suspect(&self) -> bool {
        matches!(
            self,
            Self::Peripheral { stage: InitStage::DriverInstall, .. }
        )
    }
}

impl core::fmt::Display for AmpTestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())?;
        match self {
            Self::Peripheral { code, .. } | Self::Write { code } => write!(f, " ({})", code),
            Self::Alloc { bytes: usize::MAX } => f.write_str(" (size overflow)"),
            Self::Alloc { bytes } => write!(f, " ({} bytes)", bytes),
        }
    }
}
