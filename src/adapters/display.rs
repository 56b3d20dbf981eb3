//! Text display adapter over any monochrome embedded-graphics panel.
//!
//! [`GraphicsDisplay`] implements [`DisplayPort`] by rendering text with a
//! 6-pixel-wide monospace font onto a [`Panel`]. Text is drawn with a
//! transparent background: only glyph pixels are set, nothing is erased, so
//! successive frames accumulate in the panel buffer until it is cleared.
//!
//! [`FrameBuffer`] is an in-memory 128×64 panel used on the host. It keeps
//! the draw buffer and the last presented frame apart so tests can inspect
//! what would be on the glass.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use log::warn;

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

pub const PANEL_WIDTH: u32 = 128;
pub const PANEL_HEIGHT: u32 = 64;
const BUFFER_LEN: usize = (PANEL_WIDTH * PANEL_HEIGHT / 8) as usize;

/// Classic 5×7 glyphs in a 6×8 cell: one column of spacing per character.
pub const PANEL_FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

/// A buffered monochrome panel.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Send the controller init sequence.
    fn init_panel(&mut self) -> Result<(), DisplayError>;

    /// Push the draw buffer to the glass.
    fn present(&mut self) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// GraphicsDisplay
// ───────────────────────────────────────────────────────────────

pub struct GraphicsDisplay<P> {
    panel: P,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<P: Panel> GraphicsDisplay<P> {
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            style: MonoTextStyle::new(&PANEL_FONT, BinaryColor::On),
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

impl<P: Panel> DisplayPort for GraphicsDisplay<P> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.panel.init_panel()
    }

    fn clear(&mut self) {
        if self.panel.clear(BinaryColor::Off).is_err() {
            warn!("Panel clear failed");
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top)
            .draw(&mut self.panel)
            .map(|_| ())
            .map_err(|_| DisplayError::Bus)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.panel.present()
    }
}

// ───────────────────────────────────────────────────────────────
// FrameBuffer (host panel)
// ───────────────────────────────────────────────────────────────

/// 128×64, 1 bit per pixel, SSD1306 page layout (8 vertical pixels per
/// byte, 128 bytes per page).
pub struct FrameBuffer {
    draw: [u8; BUFFER_LEN],
    glass: [u8; BUFFER_LEN],
    presents: u32,
    init_fails: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            draw: [0; BUFFER_LEN],
            glass: [0; BUFFER_LEN],
            presents: 0,
            init_fails: false,
        }
    }

    /// A panel that never acknowledges its init sequence.
    pub fn unresponsive() -> Self {
        Self {
            init_fails: true,
            ..Self::new()
        }
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= PANEL_WIDTH as i32 || y >= PANEL_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / 8) * PANEL_WIDTH as usize, 1 << (y % 8)))
    }

    fn lit(frame: &[u8; BUFFER_LEN], x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(i, mask)| frame[i] & mask != 0)
    }

    fn count_lit(frame: &[u8; BUFFER_LEN], area: &Rectangle) -> usize {
        area.points().filter(|p| Self::lit(frame, p.x, p.y)).count()
    }

    /// Pixel state in the draw buffer.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::lit(&self.draw, x, y)
    }

    /// Pixel state on the glass as of the last present.
    pub fn presented_pixel(&self, x: i32, y: i32) -> bool {
        Self::lit(&self.glass, x, y)
    }

    /// Lit pixels inside `area` on the glass.
    pub fn presented_lit_in(&self, area: &Rectangle) -> usize {
        Self::count_lit(&self.glass, area)
    }

    /// Lit pixels inside `area` in the draw buffer.
    pub fn lit_in(&self, area: &Rectangle) -> usize {
        Self::count_lit(&self.draw, area)
    }

    /// Number of completed presents.
    pub fn presents(&self) -> u32 {
        self.presents
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((i, mask)) = Self::index(point.x, point.y) {
                if color.is_on() {
                    self.draw[i] |= mask;
                } else {
                    self.draw[i] &= !mask;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.draw.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl Panel for FrameBuffer {
    fn init_panel(&mut self) -> Result<(), DisplayError> {
        if self.init_fails {
            return Err(DisplayError::InitFailed);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.glass = self.draw;
        self.presents += 1;
        Ok(())
    }
}
