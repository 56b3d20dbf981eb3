//! Light-dependent resistor on ADC1.
//!
//! The LDR sits in a voltage divider; brighter light gives a higher count.
//! Counts are reported raw, `0..=2^bits - 1`; the lux estimate is derived
//! in the application core.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot ADC1 read via hw_init.
//! On host/test: reads from a static atomic for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LIGHT_RAW: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_raw(raw: u16) {
    SIM_LIGHT_RAW.store(raw, Ordering::Relaxed);
}

pub struct LightSensor {
    adc_channel: u32,
    raw_max: u16,
}

impl LightSensor {
    pub fn new(adc_channel: u32, resolution_bits: u8) -> Self {
        let bits = u32::from(resolution_bits.clamp(1, 16));
        Self {
            adc_channel,
            raw_max: ((1u32 << bits) - 1) as u16,
        }
    }

    /// Raw counts, never above the configured resolution.
    pub fn read_raw(&self) -> u16 {
        self.read_adc().min(self.raw_max)
    }

    pub fn raw_max(&self) -> u16 {
        self.raw_max
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        let _ = self.adc_channel;
        SIM_LIGHT_RAW.load(Ordering::Relaxed)
    }
}
