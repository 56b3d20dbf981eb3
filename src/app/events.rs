//! Outbound monitor events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Each event's `Display`
//! form is exactly one serial protocol line, without the line terminator.

use core::fmt;

use super::reading::Reading;

/// The two push-buttons on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    P,
    K,
}

impl Button {
    pub const ALL: [Button; 2] = [Button::P, Button::K];

    /// Single-letter name used in both the serial line and the panel label.
    pub fn letter(self) -> char {
        match self {
            Self::P => 'P',
            Self::K => 'K',
        }
    }
}

/// Structured events emitted by the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// A successful reading: `Temp:<t>\tUmid:<h>\tLUX:<l>`.
    Reading(Reading),
    /// Climate read failed; the rest of the cycle is skipped.
    SensorFault,
    /// A button was low when sampled.
    ButtonPressed(Button),
    /// Panel init failed at startup; the firmware halts after this.
    DisplayInitFailed,
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reading(r) => write!(
                f,
                "Temp:{}\tUmid:{}\tLUX:{}",
                r.temperature_c, r.humidity_pct, r.lux
            ),
            Self::SensorFault => f.write_str("Falha ao ler o sensor DHT!"),
            Self::ButtonPressed(b) => write!(f, "Botao {} pressionado", b.letter()),
            Self::DisplayInitFailed => f.write_str("Falha ao inicializar o display OLED!"),
        }
    }
}
