//! One-shot hardware peripheral initialization.
//!
//! Configures the DHT22 line, the LDR ADC channel and the button GPIOs
//! using raw ESP-IDF sys calls, and exposes the raw read helpers the
//! sensor and button drivers use. On the host every function is a no-op
//! stub.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UnsupportedResolution(u8),
    UartConfigFailed(i32),
    InvalidBaud(u32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UnsupportedResolution(bits) => {
                write!(f, "ADC resolution {} bits not supported (9-12)", bits)
            }
            Self::UartConfigFailed(rc) => write!(f, "console UART config failed (rc={})", rc),
            Self::InvalidBaud(baud) => write!(f, "baud rate {} not supported", baud),
        }
    }
}

/// ADC1 channel wired to the LDR (GPIO 34 on the ESP32).
#[cfg(target_os = "espidf")]
pub const ADC1_CH_LDR: u32 = adc_channel_t_ADC_CHANNEL_6;
#[cfg(not(target_os = "espidf"))]
pub const ADC1_CH_LDR: u32 = 6;

// ── Console UART ──────────────────────────────────────────────

/// Run the console UART at `baud`. The IDF brings the port up before
/// `main`; this only retunes its divider.
#[cfg(target_os = "espidf")]
pub fn init_console(baud: u32) -> Result<(), HwInitError> {
    if baud == 0 {
        return Err(HwInitError::InvalidBaud(baud));
    }
    // SAFETY: called once from main() before any protocol output.
    let ret = unsafe { uart_set_baudrate(CONFIG_ESP_CONSOLE_UART_NUM as _, baud) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartConfigFailed(ret));
    }
    info!("hw_init: console UART{} at {} baud", CONFIG_ESP_CONSOLE_UART_NUM, baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_console(baud: u32) -> Result<(), HwInitError> {
    if baud == 0 {
        return Err(HwInitError::InvalidBaud(baud));
    }
    log::info!("hw_init(sim): console at {} baud", baud);
    Ok(())
}

// ── DHT22 line ────────────────────────────────────────────────

/// Idle the DHT22 data line high (open-drain, pulled up).
#[cfg(target_os = "espidf")]
pub fn init_dht_line() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: called once from main() before the loop; single-threaded.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::DHT_GPIO, 1) };
    info!("hw_init: DHT22 line on GPIO{}", pins::DHT_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_dht_line() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): DHT22 line init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// `ESP_OK`.
const ADC_READ_OK: i32 = 0;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. `init_light_adc()` completes before the loop
/// starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
fn adc_bitwidth(bits: u8) -> Result<adc_bitwidth_t, HwInitError> {
    match bits {
        9 => Ok(adc_bitwidth_t_ADC_BITWIDTH_9),
        10 => Ok(adc_bitwidth_t_ADC_BITWIDTH_10),
        11 => Ok(adc_bitwidth_t_ADC_BITWIDTH_11),
        12 => Ok(adc_bitwidth_t_ADC_BITWIDTH_12),
        other => Err(HwInitError::UnsupportedResolution(other)),
    }
}

/// Configure ADC1 for the LDR at `bits` resolution, 12 dB attenuation
/// (full 0 – 3.3 V divider swing).
#[cfg(target_os = "espidf")]
pub fn init_light_adc(bits: u8) -> Result<(), HwInitError> {
    let bitwidth = adc_bitwidth(bits)?;
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LDR, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 CH6 (LDR) at {} bits", bits);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_light_adc(bits: u8) -> Result<(), HwInitError> {
    if !(9..=12).contains(&bits) {
        return Err(HwInitError::UnsupportedResolution(bits));
    }
    log::info!("hw_init(sim): ADC init skipped ({} bits)", bits);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    adc_counts(ret, raw)
}

/// Counts from a oneshot read result. A failed read yields 0 and is logged
/// below the default level so the console protocol stays clean.
pub fn adc_counts(ret: i32, raw: i32) -> u16 {
    if ret != ADC_READ_OK {
        log::debug!("ADC1 read failed (rc={}), reporting 0", ret);
        return 0;
    }
    raw.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── Button inputs ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_button_inputs() -> Result<(), HwInitError> {
    for &pin in &[pins::BUTTON_P_GPIO, pins::BUTTON_K_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    info!("hw_init: buttons configured (pull-up, active-low)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_inputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}
