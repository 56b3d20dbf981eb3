//! Peripheral drivers and one-shot hardware initialisation.

pub mod button;
pub mod hw_init;
#[cfg(target_os = "espidf")]
pub mod oled;
