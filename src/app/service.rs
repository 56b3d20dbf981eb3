//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the configuration, the pacer and the loop
//! statistics. All I/O flows through port traits injected at call sites,
//! which keeps the whole loop testable with mock adapters.
//!
//! ```text
//!  ClimatePort ──▶ ┌────────────────────────┐ ──▶ DisplayPort
//!    LightPort ──▶ │     MonitorService     │
//!   ButtonPort ──▶ │  pace · read · render  │ ──▶ EventSink
//!                  └────────────────────────┘
//! ```

use core::fmt::{self, Write as _};

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::{Error, SensorError};
use crate::pacing::Pacer;

use super::events::{Button, MonitorEvent};
use super::ports::{ButtonPort, ClimatePort, DisplayPort, EventSink, InputSetupPort, LightPort};
use super::reading::{ButtonState, LuxScale, Reading, ThresholdStatus};

// ───────────────────────────────────────────────────────────────
// Panel layout (pixels, text size 1)
// ───────────────────────────────────────────────────────────────

pub const TEXT_COLUMN: i32 = 0;
pub const ROW_TEMPERATURE: i32 = 0;
pub const ROW_HUMIDITY: i32 = 10;
pub const ROW_LUX: i32 = 20;
pub const ROW_BUTTON_P: i32 = 30;
pub const ROW_BUTTON_K: i32 = 40;

/// Longest line the panel fits: 128 px / 6 px per glyph.
const LINE_CAPACITY: usize = 21;

impl Button {
    /// Row the press annotation is drawn on.
    pub fn row(self) -> i32 {
        match self {
            Self::P => ROW_BUTTON_P,
            Self::K => ROW_BUTTON_K,
        }
    }

    /// Press annotation text.
    pub fn panel_label(self) -> &'static str {
        match self {
            Self::P => "Botao P press.",
            Self::K => "Botao K press.",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Outcome and statistics
// ───────────────────────────────────────────────────────────────

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Reading emitted and frame rendered.
    Reported { reading: Reading, buttons: ButtonState },
    /// Climate read failed; light, buttons and render were skipped.
    SensorFault(SensorError),
}

/// Counters since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub readings: u64,
    pub sensor_faults: u64,
    /// Faults since the last good reading. Never escalates.
    pub consecutive_faults: u32,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    config: MonitorConfig,
    lux_scale: LuxScale,
    pacer: Pacer,
    stats: LoopStats,
}

impl MonitorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware. Call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        let lux_scale = LuxScale::from_config(&config);
        let pacer = Pacer::new(config.cycle_period_ms);
        Self {
            config,
            lux_scale,
            pacer,
            stats: LoopStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the startup steps that follow bus and sensor bring-up.
    ///
    /// A panel init failure emits the failure line and returns the error;
    /// the caller must then halt. Input setup failures are logged and
    /// startup continues.
    pub fn start(
        &mut self,
        inputs: &mut impl InputSetupPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        if let Err(e) = display.init() {
            // The failure line is the last console output before the halt.
            debug!("OLED init failed: {}", e);
            sink.emit(&MonitorEvent::DisplayInitFailed);
            return Err(e.into());
        }

        if let Err(e) = inputs.configure_inputs(self.config.light_resolution_bits) {
            warn!("Input setup failed ({}), continuing", e);
        }

        display.clear();
        info!(
            "Monitor started: period={}ms lux=0..{}→{}..{} clear_each_frame={}",
            self.config.cycle_period_ms,
            self.lux_scale.raw_max,
            self.lux_scale.lux_min,
            self.lux_scale.lux_max,
            self.config.clear_each_frame,
        );
        Ok(())
    }

    /// Cycle forever. Only a reset ends this.
    pub fn run(
        &mut self,
        delay: &mut impl DelayNs,
        hw: &mut (impl ClimatePort + LightPort + ButtonPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.cycle(delay, hw, display, sink);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One full iteration: pace → read climate → read light → report →
    /// buttons → render → present.
    ///
    /// The `hw` parameter satisfies all three sensor ports, which avoids a
    /// triple mutable borrow of the same adapter.
    pub fn cycle(
        &mut self,
        delay: &mut impl DelayNs,
        hw: &mut (impl ClimatePort + LightPort + ButtonPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        // 1. Pace
        self.pacer.wait(delay);
        self.stats.cycles += 1;

        // 2-3. Climate, or abandon the cycle
        let climate = match hw.read_climate() {
            Ok(sample) => {
                if self.stats.consecutive_faults > 0 {
                    debug!(
                        "Climate sensor recovered after {} failed cycles",
                        self.stats.consecutive_faults
                    );
                }
                self.stats.consecutive_faults = 0;
                sample
            }
            Err(e) => {
                self.stats.sensor_faults += 1;
                self.stats.consecutive_faults += 1;
                // Below the default level: the fault line stands alone.
                debug!(
                    "Climate read failed: {} ({} consecutive)",
                    e, self.stats.consecutive_faults
                );
                sink.emit(&MonitorEvent::SensorFault);
                return CycleOutcome::SensorFault(e);
            }
        };

        // 4-6. Light, lux, serial line
        let light_raw = hw.read_light_raw();
        let reading = Reading::new(climate, light_raw, &self.lux_scale);
        self.stats.readings += 1;
        sink.emit(&MonitorEvent::Reading(reading));

        let status = ThresholdStatus::evaluate(&reading, &self.config);
        if status.any() {
            debug!(
                "Thresholds: temp_high={} humidity_low={} (T={} H={})",
                status.temp_high, status.humidity_low, reading.temperature_c, reading.humidity_pct
            );
        }

        if self.config.clear_each_frame {
            display.clear();
        }

        // 7. Buttons: annotation + serial line per pressed button
        let buttons = hw.sample_buttons();
        for button in Button::ALL {
            if buttons.is_pressed(button) {
                draw_line(display, button.row(), format_args!("{}", button.panel_label()));
                sink.emit(&MonitorEvent::ButtonPressed(button));
            }
        }

        // 8. Readings
        render_reading(display, &reading);

        // 9. Present
        if let Err(e) = display.present() {
            warn!("Frame present failed: {}", e);
        }

        CycleOutcome::Reported { reading, buttons }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn lux_scale(&self) -> LuxScale {
        self.lux_scale
    }
}

// ── Internal ──────────────────────────────────────────────────

fn render_reading(display: &mut impl DisplayPort, reading: &Reading) {
    draw_line(display, ROW_TEMPERATURE, format_args!("Temp: {} C", reading.temperature_c));
    draw_line(display, ROW_HUMIDITY, format_args!("Umid: {} %", reading.humidity_pct));
    draw_line(display, ROW_LUX, format_args!("LUX: {}", reading.lux));
}

fn draw_line(display: &mut impl DisplayPort, row: i32, args: fmt::Arguments<'_>) {
    let mut line: String<LINE_CAPACITY> = String::new();
    if line.write_fmt(args).is_err() {
        warn!("Panel line truncated at row {}", row);
    }
    if let Err(e) = display.draw_text(TEXT_COLUMN, row, &line) {
        warn!("Draw at row {} failed: {}", row, e);
    }
}
