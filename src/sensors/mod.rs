//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].

pub mod dht22;
pub mod light;

use dht22::Dht22;
use light::LightSensor;

use crate::app::reading::ClimateSample;
use crate::error::SensorError;

/// Owns the climate and light drivers.
pub struct SensorHub {
    pub climate: Dht22,
    pub light: LightSensor,
}

impl SensorHub {
    /// Pass in pre-built drivers (built in main where pin ownership is
    /// established).
    pub fn new(climate: Dht22, light: LightSensor) -> Self {
        Self { climate, light }
    }

    /// Climate sample; `now_us` drives the DHT22 sampling interval.
    pub fn read_climate(&mut self, now_us: u64) -> Result<ClimateSample, SensorError> {
        self.climate.read(now_us)
    }

    pub fn read_light_raw(&self) -> u16 {
        self.light.read_raw()
    }
}
