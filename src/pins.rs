//! GPIO / peripheral pin assignments for the ESP32 DevKit board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. The I2C pins are also the typed pins picked in
//! `main.rs`; keep both in step.

// ---------------------------------------------------------------------------
// Climate sensor (DHT22, single-wire)
// ---------------------------------------------------------------------------

/// DHT22 data line. Open-drain with the module's pull-up.
pub const DHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Light sensor (LDR voltage divider, ADC1)
// ---------------------------------------------------------------------------

/// LDR divider output. Input-only pin, ADC1 channel 6 on the ESP32.
pub const LDR_ADC_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// Push-buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Button "P". LOW = pressed.
pub const BUTTON_P_GPIO: i32 = 27;
/// Button "K". LOW = pressed.
pub const BUTTON_K_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 22;
pub const I2C_SCL_GPIO: i32 = 21;
/// Bus clock for the OLED (fast mode).
pub const I2C_FREQ_HZ: u32 = 400_000;
