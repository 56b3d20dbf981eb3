//! Hardware adapter — bridges the board's inputs to domain port traits.
//!
//! Owns the [`SensorHub`] and the [`ButtonPair`], exposing them through
//! [`ClimatePort`], [`LightPort`], [`ButtonPort`] and [`InputSetupPort`].
//! On non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs.

use log::debug;

use crate::adapters::time::MonotonicClock;
use crate::app::ports::{ButtonPort, ClimatePort, InputSetupPort, LightPort};
use crate::app::reading::{ButtonState, ClimateSample};
use crate::drivers::button::ButtonPair;
use crate::drivers::hw_init;
use crate::error::{Error, SensorError};
use crate::sensors::SensorHub;

pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    buttons: ButtonPair,
    clock: MonotonicClock,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, buttons: ButtonPair, clock: MonotonicClock) -> Self {
        Self {
            sensor_hub,
            buttons,
            clock,
        }
    }
}

// ── Sensor ports ──────────────────────────────────────────────

impl ClimatePort for HardwareAdapter {
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        let now_us = self.clock.uptime_us();
        self.sensor_hub.read_climate(now_us)
    }
}

impl LightPort for HardwareAdapter {
    fn read_light_raw(&mut self) -> u16 {
        self.sensor_hub.read_light_raw()
    }
}

impl ButtonPort for HardwareAdapter {
    fn sample_buttons(&mut self) -> ButtonState {
        self.buttons.sample()
    }
}

// ── Startup ───────────────────────────────────────────────────

impl InputSetupPort for HardwareAdapter {
    fn configure_inputs(&mut self, light_resolution_bits: u8) -> Result<(), Error> {
        hw_init::init_light_adc(light_resolution_bits).map_err(|e| {
            log::error!("LDR ADC: {}", e);
            Error::Init("light ADC")
        })?;
        hw_init::init_button_inputs().map_err(|e| {
            log::error!("Buttons: {}", e);
            Error::Init("button GPIO")
        })?;
        debug!(
            "Inputs configured: LDR raw max {}",
            self.sensor_hub.light.raw_max()
        );
        Ok(())
    }
}
