//! Per-cycle domain values.
//!
//! Everything here is recomputed every iteration and dropped at its end;
//! nothing carries over between cycles.

use crate::config::MonitorConfig;
use crate::error::SensorError;

use super::events::Button;

/// A climate sample, already truncated to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateSample {
    pub temperature_c: i32,
    pub humidity_pct: i32,
}

impl ClimateSample {
    /// Build a sample from driver floats.
    ///
    /// Either value being NaN is a sensor fault. Valid values are truncated
    /// toward zero.
    pub fn from_float(temperature_c: f32, humidity_pct: f32) -> Result<Self, SensorError> {
        if temperature_c.is_nan() || humidity_pct.is_nan() {
            return Err(SensorError::NotANumber);
        }
        Ok(Self {
            temperature_c: temperature_c as i32,
            humidity_pct: humidity_pct as i32,
        })
    }
}

/// One complete reading: climate plus light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub temperature_c: i32,
    pub humidity_pct: i32,
    /// Raw ADC counts, `0..=LuxScale::raw_max`.
    pub light_raw: u16,
    /// Linear rescale of `light_raw` into the lux range.
    pub lux: u16,
}

impl Reading {
    pub fn new(climate: ClimateSample, light_raw: u16, scale: &LuxScale) -> Self {
        Self {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            light_raw,
            lux: scale.to_lux(light_raw),
        }
    }
}

/// Button levels sampled once per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed_p: bool,
    pub pressed_k: bool,
}

impl ButtonState {
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::P => self.pressed_p,
            Button::K => self.pressed_k,
        }
    }
}

/// Integer range map with floor division.
///
/// `value` is mapped from `from.0..=from.1` onto `to.0..=to.1`. Inputs are
/// not clamped; a result outside `i32` saturates. A degenerate source range
/// maps everything to `to.0`.
pub fn map_range(value: i32, from: (i32, i32), to: (i32, i32)) -> i32 {
    // Each factor fits in 33 bits, so the product fits in i128.
    let span_in = i128::from(from.1) - i128::from(from.0);
    if span_in == 0 {
        return to.0;
    }
    let span_out = i128::from(to.1) - i128::from(to.0);
    let mut num = (i128::from(value) - i128::from(from.0)) * span_out;
    let mut den = span_in;
    if den < 0 {
        num = -num;
        den = -den;
    }
    let mapped = num.div_euclid(den) + i128::from(to.0);
    mapped.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

/// Raw light counts to lux estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuxScale {
    pub raw_max: u16,
    pub lux_min: u16,
    pub lux_max: u16,
}

impl LuxScale {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            raw_max: config.light_raw_max(),
            lux_min: config.lux_min,
            lux_max: config.lux_max,
        }
    }

    /// `floor(raw * (lux_max - lux_min) / raw_max) + lux_min`.
    ///
    /// `raw` above `raw_max` cannot come out of the ADC; it is pinned to
    /// `raw_max` so the result stays inside the lux range.
    pub fn to_lux(&self, raw: u16) -> u16 {
        let raw = raw.min(self.raw_max);
        map_range(
            i32::from(raw),
            (0, i32::from(self.raw_max)),
            (i32::from(self.lux_min), i32::from(self.lux_max)),
        ) as u16
    }
}

impl Default for LuxScale {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}

/// Threshold comparison for a reading.
///
/// Reported through debug logging only; nothing on the serial line or the
/// panel depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdStatus {
    pub temp_high: bool,
    pub humidity_low: bool,
}

impl ThresholdStatus {
    pub fn evaluate(reading: &Reading, config: &MonitorConfig) -> Self {
        Self {
            temp_high: reading.temperature_c as f32 > config.temp_threshold_c,
            humidity_low: (reading.humidity_pct as f32) < config.humidity_threshold_pct,
        }
    }

    pub fn any(&self) -> bool {
        self.temp_high || self.humidity_low
    }
}
