//! Integration tests for the MonitorService startup and cycle pipeline.
//!
//! These run on the host (x86_64) and drive the service through mock
//! ports, asserting on the exact serial bytes and the panel call history.

use sensorpanel::app::service::{CycleOutcome, LoopStats, MonitorService};
use sensorpanel::config::MonitorConfig;
use sensorpanel::error::{DisplayError, Error, SensorError};

use crate::mock_hw::{
    output, serial, DisplayCall, MockHardware, RecordingDelay, RecordingDisplay, SerialCapture,
};

struct Rig {
    svc: MonitorService,
    hw: MockHardware,
    display: RecordingDisplay,
    sink: SerialCapture,
    delay: RecordingDelay,
}

impl Rig {
    fn started(config: MonitorConfig) -> Self {
        let mut rig = Self {
            svc: MonitorService::new(config),
            hw: MockHardware::new(),
            display: RecordingDisplay::new(),
            sink: serial(),
            delay: RecordingDelay::default(),
        };
        rig.svc
            .start(&mut rig.hw, &mut rig.display, &mut rig.sink)
            .expect("startup with a working panel");
        rig
    }

    fn cycle(&mut self) -> CycleOutcome {
        self.svc
            .cycle(&mut self.delay, &mut self.hw, &mut self.display, &mut self.sink)
    }

    fn output(&self) -> String {
        output(&self.sink)
    }
}

fn texts(pairs: &[(i32, &str)]) -> Vec<(i32, String)> {
    pairs.iter().map(|(y, t)| (*y, (*t).to_owned())).collect()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_inits_panel_then_inputs_then_clears() {
    let rig = Rig::started(MonitorConfig::default());

    assert_eq!(rig.display.calls, vec![DisplayCall::Init, DisplayCall::Clear]);
    assert_eq!(rig.hw.configured_bits, Some(12));
    assert!(rig.output().is_empty(), "nothing on serial during a clean start");
}

#[test]
fn panel_init_failure_emits_line_and_aborts_startup() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    let mut display = RecordingDisplay::unresponsive();
    let mut sink = serial();

    let result = svc.start(&mut hw, &mut display, &mut sink);

    assert_eq!(result, Err(Error::Display(DisplayError::InitFailed)));
    assert_eq!(output(&sink), "Falha ao inicializar o display OLED!\n");
    assert_eq!(display.calls, vec![DisplayCall::Init]);
    assert_eq!(hw.configured_bits, None, "inputs are not configured after a panel failure");
}

#[test]
fn input_setup_failure_is_not_fatal() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    hw.fail_input_setup = true;
    let mut display = RecordingDisplay::new();
    let mut sink = serial();

    assert!(svc.start(&mut hw, &mut display, &mut sink).is_ok());
    assert_eq!(display.calls, vec![DisplayCall::Init, DisplayCall::Clear]);
    assert!(output(&sink).is_empty());
}

// ── Reading line and panel rows ───────────────────────────────

#[test]
fn reading_line_is_exact() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_climate(25, 60);
    rig.hw.light_raw = 0;

    let outcome = rig.cycle();

    assert_eq!(rig.output(), "Temp:25\tUmid:60\tLUX:0\n");
    match outcome {
        CycleOutcome::Reported { reading, buttons } => {
            assert_eq!(reading.lux, 0);
            assert!(!buttons.pressed_p && !buttons.pressed_k);
        }
        other => panic!("expected a report, got {:?}", other),
    }
}

#[test]
fn lux_follows_light_counts() {
    let mut rig = Rig::started(MonitorConfig::default());

    rig.hw.light_raw = 2048;
    rig.cycle();
    rig.hw.light_raw = 4095;
    rig.cycle();

    assert_eq!(
        rig.output(),
        "Temp:25\tUmid:60\tLUX:500\nTemp:25\tUmid:60\tLUX:1000\n"
    );
}

#[test]
fn negative_temperature_keeps_sign_on_both_outputs() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_climate(-12, 95);
    rig.hw.light_raw = 1000;

    rig.cycle();

    assert_eq!(rig.output(), "Temp:-12\tUmid:95\tLUX:244\n");
    assert_eq!(
        rig.display.last_frame_texts(),
        texts(&[(0, "Temp: -12 C"), (10, "Umid: 95 %"), (20, "LUX: 244")])
    );
}

#[test]
fn reading_rows_are_drawn_then_presented() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.cycle();

    assert_eq!(
        rig.display.last_frame_texts(),
        texts(&[(0, "Temp: 25 C"), (10, "Umid: 60 %"), (20, "LUX: 0")])
    );
    assert_eq!(rig.display.calls.last(), Some(&DisplayCall::Present));
    assert!(rig
        .display
        .calls
        .iter()
        .all(|c| !matches!(c, DisplayCall::Text { x, .. } if *x != 0)));
}

// ── Sensor fault ──────────────────────────────────────────────

#[test]
fn sensor_fault_skips_everything_after_the_failure_line() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_fault(SensorError::Timeout);
    rig.hw.press(true, true);

    let outcome = rig.cycle();

    assert_eq!(outcome, CycleOutcome::SensorFault(SensorError::Timeout));
    assert_eq!(rig.output(), "Falha ao ler o sensor DHT!\n");
    assert_eq!(rig.hw.light_reads, 0);
    assert_eq!(rig.hw.button_samples, 0);
    assert_eq!(rig.display.calls, vec![DisplayCall::Init, DisplayCall::Clear]);
}

#[test]
fn not_a_number_counts_as_sensor_fault() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_fault(SensorError::NotANumber);

    assert_eq!(rig.cycle(), CycleOutcome::SensorFault(SensorError::NotANumber));
    assert_eq!(rig.output(), "Falha ao ler o sensor DHT!\n");
}

#[test]
fn fault_does_not_escalate_and_next_cycle_recovers() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_fault(SensorError::Timeout);
    rig.hw.push_fault(SensorError::ChecksumMismatch);
    rig.hw.push_climate(21, 40);

    rig.cycle();
    rig.cycle();
    assert_eq!(rig.svc.stats().consecutive_faults, 2);
    rig.cycle();

    assert_eq!(
        rig.output(),
        "Falha ao ler o sensor DHT!\nFalha ao ler o sensor DHT!\nTemp:21\tUmid:40\tLUX:0\n"
    );
    assert_eq!(
        rig.svc.stats(),
        LoopStats {
            cycles: 3,
            readings: 1,
            sensor_faults: 2,
            consecutive_faults: 0,
        }
    );
}

// ── Buttons ───────────────────────────────────────────────────

#[test]
fn button_p_alone() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.press(true, false);

    rig.cycle();

    assert_eq!(rig.output(), "Temp:25\tUmid:60\tLUX:0\nBotao P pressionado\n");
    assert_eq!(
        rig.display.last_frame_texts(),
        texts(&[
            (30, "Botao P press."),
            (0, "Temp: 25 C"),
            (10, "Umid: 60 %"),
            (20, "LUX: 0"),
        ])
    );
}

#[test]
fn both_buttons_report_p_before_k() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.press(true, true);

    rig.cycle();

    assert_eq!(
        rig.output(),
        "Temp:25\tUmid:60\tLUX:0\nBotao P pressionado\nBotao K pressionado\n"
    );
    let frame = rig.display.last_frame_texts();
    assert_eq!(frame[0], (30, "Botao P press.".to_owned()));
    assert_eq!(frame[1], (40, "Botao K press.".to_owned()));
}

#[test]
fn no_buttons_no_annotations() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.cycle();

    assert!(!rig.output().contains("Botao"));
    assert!(rig.display.last_frame_texts().iter().all(|(y, _)| *y < 30));
}

#[test]
fn held_button_reports_every_cycle() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.press(false, true);

    for _ in 0..3 {
        rig.cycle();
    }

    assert_eq!(rig.output().matches("Botao K pressionado\n").count(), 3);
    assert_eq!(rig.hw.button_samples, 3);
}

// ── Frame buffer policy ───────────────────────────────────────

#[test]
fn default_policy_never_clears_between_frames() {
    let mut rig = Rig::started(MonitorConfig::default());
    for _ in 0..3 {
        rig.cycle();
    }
    assert_eq!(rig.display.count(&DisplayCall::Clear), 1, "only the startup clear");
    assert_eq!(rig.display.count(&DisplayCall::Present), 3);
}

#[test]
fn clear_each_frame_blanks_before_drawing() {
    let config = MonitorConfig {
        clear_each_frame: true,
        ..MonitorConfig::default()
    };
    let mut rig = Rig::started(config);
    rig.hw.press(true, false);
    rig.cycle();

    assert_eq!(rig.display.count(&DisplayCall::Clear), 2);
    let start = rig
        .display
        .calls
        .iter()
        .rposition(|c| *c == DisplayCall::Clear)
        .expect("a clear this cycle");
    assert!(matches!(
        rig.display.calls[start + 1],
        DisplayCall::Text { y: 30, .. }
    ));
}

#[test]
fn present_failure_does_not_stop_reporting() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.display.fail_present = true;

    assert!(matches!(rig.cycle(), CycleOutcome::Reported { .. }));
    assert!(matches!(rig.cycle(), CycleOutcome::Reported { .. }));
    assert_eq!(rig.output().lines().count(), 2);
}

// ── Pacing ────────────────────────────────────────────────────

#[test]
fn every_cycle_waits_one_period_first() {
    let mut rig = Rig::started(MonitorConfig::default());
    rig.hw.push_fault(SensorError::Timeout);

    rig.cycle();
    assert_eq!(rig.delay.total_ms(), 1000, "fault cycles are paced too");
    rig.cycle();
    rig.cycle();
    assert_eq!(rig.delay.total_ms(), 3000);
}

#[test]
fn custom_period_is_honoured() {
    let config = MonitorConfig {
        cycle_period_ms: 250,
        ..MonitorConfig::default()
    };
    let mut rig = Rig::started(config);
    rig.cycle();
    rig.cycle();
    assert_eq!(rig.delay.total_ms(), 500);
}
