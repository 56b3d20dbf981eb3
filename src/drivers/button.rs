//! Active-low push-button pair.
//!
//! ## Hardware
//!
//! Two momentary switches to ground on pulled-up inputs. A pin reading LOW
//! means the button is held at the instant of sampling.
//!
//! There is no debounce and no edge detection: a held button reads as
//! pressed on every sample.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads GPIO levels via hw_init helpers.
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::AtomicBool;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::events::Button;
use crate::app::reading::ButtonState;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_PRESSED_P: AtomicBool = AtomicBool::new(false);
static SIM_PRESSED_K: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressed(button: Button, pressed: bool) {
    let flag = match button {
        Button::P => &SIM_PRESSED_P,
        Button::K => &SIM_PRESSED_K,
    };
    flag.store(pressed, Ordering::Relaxed);
}

pub struct ButtonPair {
    gpio_p: i32,
    gpio_k: i32,
}

impl ButtonPair {
    pub fn new(gpio_p: i32, gpio_k: i32) -> Self {
        Self { gpio_p, gpio_k }
    }

    /// Sample both buttons once.
    pub fn sample(&self) -> ButtonState {
        ButtonState {
            pressed_p: self.is_pressed(Button::P),
            pressed_k: self.is_pressed(Button::K),
        }
    }

    fn gpio(&self, button: Button) -> i32 {
        match button {
            Button::P => self.gpio_p,
            Button::K => self.gpio_k,
        }
    }

    #[cfg(target_os = "espidf")]
    fn is_pressed(&self, button: Button) -> bool {
        !hw_init::gpio_read(self.gpio(button))
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_pressed(&self, button: Button) -> bool {
        let _ = self.gpio(button);
        match button {
            Button::P => SIM_PRESSED_P.load(Ordering::Relaxed),
            Button::K => SIM_PRESSED_K.load(Ordering::Relaxed),
        }
    }
}
