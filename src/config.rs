//! System configuration parameters
//!
//! Every tunable the monitor loop reads. There is no configuration file or
//! persisted store: the firmware runs with [`MonitorConfig::default`], and
//! tests construct variants directly.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Core monitor configuration, passed into
/// [`MonitorService`](crate::app::service::MonitorService) at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Serial ---
    /// Console baud rate.
    pub serial_baud: u32,

    // --- Display ---
    /// 7-bit I2C address of the SSD1306 panel.
    pub display_i2c_address: u8,
    /// Clear the frame buffer at the start of every successful cycle.
    /// `false` keeps the additive buffer: annotations persist across frames.
    pub clear_each_frame: bool,

    // --- Light sensor ---
    /// ADC resolution for the LDR input (bits).
    pub light_resolution_bits: u8,
    /// Lower bound of the lux estimate.
    pub lux_min: u16,
    /// Upper bound of the lux estimate.
    pub lux_max: u16,

    // --- Thresholds (carried, gate nothing observable) ---
    /// Temperature above which a reading is flagged (Celsius).
    pub temp_threshold_c: f32,
    /// Humidity below which a reading is flagged (percent).
    pub humidity_threshold_pct: f32,

    // --- Timing ---
    /// Fixed delay at the top of each loop iteration (milliseconds).
    pub cycle_period_ms: u32,

    // --- Diagnostics ---
    /// Maximum level for `log` diagnostics.
    pub log_level: LevelFilter,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            serial_baud: 115_200,

            display_i2c_address: 0x3C,
            clear_each_frame: false,

            light_resolution_bits: 12, // 0-4095
            lux_min: 0,
            lux_max: 1000,

            temp_threshold_c: 30.0,
            humidity_threshold_pct: 30.0,

            cycle_period_ms: 1000, // 1 Hz

            log_level: LevelFilter::Info,
        }
    }
}

impl MonitorConfig {
    /// Largest raw count the light ADC can produce at the configured width.
    ///
    /// Widths past 16 bits saturate at `u16::MAX`; this runs before
    /// [`validate`](Self::validate) does.
    pub fn light_raw_max(&self) -> u16 {
        1u32.checked_shl(u32::from(self.light_resolution_bits))
            .map_or(u16::MAX, |v| (v - 1).min(u32::from(u16::MAX)) as u16)
    }

    /// Reject values the loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_period_ms must be > 0"));
        }
        if !(1..=16).contains(&self.light_resolution_bits) {
            return Err(ConfigError::ValidationFailed(
                "light_resolution_bits must be in 1..=16",
            ));
        }
        if self.lux_max < self.lux_min {
            return Err(ConfigError::ValidationFailed("lux_max must be >= lux_min"));
        }
        if self.display_i2c_address > 0x7F {
            return Err(ConfigError::ValidationFailed(
                "display_i2c_address must be a 7-bit address",
            ));
        }
        if self.serial_baud == 0 {
            return Err(ConfigError::ValidationFailed("serial_baud must be > 0"));
        }
        Ok(())
    }
}

/// Errors from [`MonitorConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation. The message names the field.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
