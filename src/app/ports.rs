//! Port traits — the hexagonal boundary between the monitor loop and the
//! board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, buttons, panel, serial console) implement these
//! traits. The [`MonitorService`](super::service::MonitorService) consumes
//! them via generics, so the loop never touches hardware directly.

use crate::error::{DisplayError, Error, SensorError};

use super::events::MonitorEvent;
use super::reading::{ButtonState, ClimateSample};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Temperature / humidity source.
pub trait ClimatePort {
    /// Read both values. Any failure, including a NaN from the driver,
    /// comes back as a [`SensorError`].
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError>;
}

/// Light-dependent resistor on the ADC.
pub trait LightPort {
    /// Raw counts. Hardware-bounded, never fails.
    fn read_light_raw(&mut self) -> u16;
}

/// The two active-low push-buttons.
pub trait ButtonPort {
    /// Sample both buttons once. `true` = pressed (pin LOW).
    fn sample_buttons(&mut self) -> ButtonState;
}

/// One-shot input configuration run during startup, after the panel.
pub trait InputSetupPort {
    /// Set the light ADC width and put both buttons in pulled-up input mode.
    fn configure_inputs(&mut self, light_resolution_bits: u8) -> Result<(), Error>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// A text-capable monochrome surface backed by a frame buffer.
///
/// Draws land in the buffer only; nothing reaches the glass until
/// [`present`](DisplayPort::present). The buffer is never cleared implicitly.
pub trait DisplayPort {
    /// Bring the panel up. Failure here is terminal.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blank the frame buffer.
    fn clear(&mut self);

    /// Draw `text` with its top-left corner at pixel `(x, y)`, text size 1,
    /// foreground pixels only.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Push the frame buffer to the panel.
    fn present(&mut self) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial console)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`MonitorEvent`]s through this port. The serial
/// adapter writes each as one protocol line.
pub trait EventSink {
    fn emit(&mut self, event: &MonitorEvent);
}
