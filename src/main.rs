//! SensorPanel Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-period polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter           GraphicsDisplay     SerialEventSink │
//! │  (Climate+Light+Buttons)   (DisplayPort)       (EventSink)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  pace · read · report · render                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use sensorpanel::adapters::display::GraphicsDisplay;
use sensorpanel::adapters::hardware::HardwareAdapter;
use sensorpanel::adapters::serial_sink::SerialEventSink;
use sensorpanel::adapters::time::MonotonicClock;
use sensorpanel::app::service::MonitorService;
use sensorpanel::config::MonitorConfig;
use sensorpanel::drivers::button::ButtonPair;
use sensorpanel::drivers::hw_init;
use sensorpanel::drivers::oled::new_oled;
use sensorpanel::pacing::halt;
use sensorpanel::pins;
use sensorpanel::sensors::dht22::Dht22;
use sensorpanel::sensors::light::LightSensor;
use sensorpanel::sensors::SensorHub;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = MonitorConfig::default();
    config.validate()?;
    log::set_max_level(config.log_level);

    info!("╔══════════════════════════════════════╗");
    info!("║  SensorPanel v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Serial console ─────────────────────────────────────
    if let Err(e) = hw_init::init_console(config.serial_baud) {
        warn!("Console baud not applied: {}", e);
    }
    let mut sink = SerialEventSink::new(std::io::stdout());

    // ── 3. Buses and sensors ──────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio22,
        peripherals.pins.gpio21,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;

    if let Err(e) = hw_init::init_dht_line() {
        warn!("DHT22 line setup failed: {}", e);
    }

    let sensor_hub = SensorHub::new(
        Dht22::new(pins::DHT_GPIO),
        LightSensor::new(hw_init::ADC1_CH_LDR, config.light_resolution_bits),
    );
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ButtonPair::new(pins::BUTTON_P_GPIO, pins::BUTTON_K_GPIO),
        MonotonicClock::new(),
    );

    let mut display = GraphicsDisplay::new(new_oled(i2c, config.display_i2c_address));

    // ── 4. Panel and inputs ───────────────────────────────────
    let mut monitor = MonitorService::new(config);
    if monitor.start(&mut hw, &mut display, &mut sink).is_err() {
        halt(&mut FreeRtos);
    }

    info!("System ready. Entering monitor loop.");

    // ── 5. Monitor loop ───────────────────────────────────────
    monitor.run(&mut FreeRtos, &mut hw, &mut display, &mut sink)
}
