//! DHT22 (AM2302) temperature / humidity sensor on a single-wire bus.
//!
//! The host pulls the line low for ~1 ms, releases it, and the sensor
//! answers with an 80 µs low / 80 µs high preamble followed by 40 bits.
//! Each bit is a ~50 µs low followed by a high pulse: ~26 µs for a 0,
//! ~70 µs for a 1.
//!
//! Frame layout: humidity (u16, tenths of %), temperature (15-bit tenths of
//! °C, MSB = sign), checksum = low byte of the sum of the first four bytes.
//!
//! The sensor needs 2 s between conversions. A read inside that window
//! returns the previous result, failure included.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain GPIO configured by hw_init.
//! On host/test: decodes a frame injected through a static atomic.

use core::sync::atomic::AtomicU64;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::reading::ClimateSample;
use crate::error::SensorError;

/// Minimum spacing between two bus transactions.
pub const MIN_SAMPLE_INTERVAL_US: u64 = 2_000_000;

const FRAME_PRESENT: u64 = 1 << 63;

const fn pack_frame(frame: [u8; 5]) -> u64 {
    let mut packed = FRAME_PRESENT;
    let mut i = 0;
    while i < 5 {
        packed |= (frame[i] as u64) << (8 * i);
        i += 1;
    }
    packed
}

/// 25.0 °C, 60.0 %.
static SIM_FRAME: AtomicU64 = AtomicU64::new(pack_frame([0x02, 0x58, 0x00, 0xFA, 0x54]));

/// Inject the next frame the simulated sensor returns. `None` makes the
/// sensor stop answering.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_frame(frame: Option<[u8; 5]>) {
    let packed = frame.map_or(0, pack_frame);
    SIM_FRAME.store(packed, Ordering::Relaxed);
}

/// Decode a 40-bit frame into `(temperature_c, humidity_pct)`.
pub fn decode_frame(frame: &[u8; 5]) -> Result<(f32, f32), SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;

    let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
    let temperature = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok((temperature, humidity))
}

pub struct Dht22 {
    gpio: i32,
    last: Option<(u64, Result<ClimateSample, SensorError>)>,
}

impl Dht22 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, last: None }
    }

    /// Read the sensor. `now_us` is monotonic time since boot.
    pub fn read(&mut self, now_us: u64) -> Result<ClimateSample, SensorError> {
        if let Some((at_us, result)) = self.last {
            if now_us.wrapping_sub(at_us) < MIN_SAMPLE_INTERVAL_US {
                return result;
            }
        }

        let result = self
            .read_frame()
            .and_then(|frame| decode_frame(&frame))
            .and_then(|(t, h)| ClimateSample::from_float(t, h));
        self.last = Some((now_us, result));
        result
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&self) -> Result<[u8; 5], SensorError> {
        use esp_idf_svc::sys::{ets_delay_us, gpio_set_level};

        const START_LOW_US: u32 = 1_100;
        const RELEASE_US: u32 = 40;
        // A high pulse longer than this is a 1.
        const ONE_THRESHOLD_US: u32 = 40;

        // SAFETY: the line was configured as open-drain input/output by
        // hw_init; only the main loop touches it.
        unsafe {
            gpio_set_level(self.gpio, 0);
            ets_delay_us(START_LOW_US);
            gpio_set_level(self.gpio, 1);
            ets_delay_us(RELEASE_US);
        }

        // Preamble: 80 µs low, 80 µs high.
        self.wait_while(0, 85)?;
        self.wait_while(1, 85)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(0, 56)?;
            let high_us = self.wait_while(1, 75)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait while the line sits at `level`. Returns the time spent.
    #[cfg(target_os = "espidf")]
    fn wait_while(&self, level: i32, max_us: u32) -> Result<u32, SensorError> {
        use esp_idf_svc::sys::{ets_delay_us, gpio_get_level};

        let mut waited = 0;
        // SAFETY: read-only level access on a configured pin.
        while unsafe { gpio_get_level(self.gpio) } == level {
            if waited > max_us {
                return Err(SensorError::Timeout);
            }
            waited += 1;
            unsafe { ets_delay_us(1) };
        }
        Ok(waited)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&self) -> Result<[u8; 5], SensorError> {
        let _ = self.gpio;
        let packed = SIM_FRAME.load(Ordering::Relaxed);
        if packed & FRAME_PRESENT == 0 {
            return Err(SensorError::Timeout);
        }
        let mut frame = [0u8; 5];
        for (i, byte) in frame.iter_mut().enumerate() {
            *byte = (packed >> (8 * i)) as u8;
        }
        Ok(frame)
    }
}
