//! SSD1306 128×64 OLED on I²C.
//!
//! Buffered graphics mode: embedded-graphics draws into the driver's RAM
//! buffer and `flush` pushes the whole frame over the bus.

use esp_idf_hal::i2c::I2cDriver;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::adapters::display::Panel;
use crate::error::DisplayError;

pub type Oled = Ssd1306<
    I2CInterface<I2cDriver<'static>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Wrap the bus in an SSD1306 driver at `address`. Nothing is sent until
/// [`Panel::init_panel`].
pub fn new_oled(i2c: I2cDriver<'static>, address: u8) -> Oled {
    let interface = I2CDisplayInterface::new_custom_address(i2c, address);
    Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode()
}

impl Panel for Oled {
    fn init_panel(&mut self) -> Result<(), DisplayError> {
        self.init().map_err(|_| DisplayError::InitFailed)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Bus)
    }
}
