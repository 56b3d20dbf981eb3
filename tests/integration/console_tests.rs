//! Integration tests for console hygiene.
//!
//! On the board the `log` backend and the protocol sink share one UART, so
//! at the default level the monitor must log nothing alongside its protocol
//! lines once startup is over. A capturing logger records every enabled
//! record together with the thread that produced it, which keeps these
//! tests independent of whatever other tests log in parallel.

use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, Log, Metadata, Record};
use sensorpanel::app::service::{CycleOutcome, MonitorService};
use sensorpanel::config::MonitorConfig;
use sensorpanel::error::SensorError;

use crate::mock_hw::{output, serial, MockHardware, RecordingDelay, RecordingDisplay};

struct CaptureLog {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.records.lock().unwrap().push((
                thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLog = CaptureLog {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

fn install_at_default_level() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger in this test binary");
    });
    log::set_max_level(MonitorConfig::default().log_level);
}

/// Records logged by the calling thread so far.
fn logged_here() -> Vec<(Level, String)> {
    let me = thread::current().id();
    CAPTURE
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, ..)| *id == me)
        .map(|(_, level, msg)| (*level, msg.clone()))
        .collect()
}

#[test]
fn loop_cycles_log_nothing_at_default_level() {
    install_at_default_level();

    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    let mut display = RecordingDisplay::new();
    let mut sink = serial();
    let mut delay = RecordingDelay::default();
    svc.start(&mut hw, &mut display, &mut sink)
        .expect("startup with a working panel");
    let after_startup = logged_here().len();

    hw.push_fault(SensorError::NotANumber);
    hw.push_fault(SensorError::Timeout);
    hw.push_climate(35, 20);
    hw.press(true, true);
    for _ in 0..3 {
        svc.cycle(&mut delay, &mut hw, &mut display, &mut sink);
    }

    assert_eq!(
        output(&sink),
        "Falha ao ler o sensor DHT!\nFalha ao ler o sensor DHT!\n\
         Temp:35\tUmid:20\tLUX:0\nBotao P pressionado\nBotao K pressionado\n"
    );
    let in_loop = &logged_here()[after_startup..];
    assert!(
        in_loop.is_empty(),
        "fault, recovery and threshold diagnostics stay below the default level: {:?}",
        in_loop
    );
}

#[test]
fn display_init_failure_line_is_the_only_output() {
    install_at_default_level();

    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    let mut display = RecordingDisplay::unresponsive();
    let mut sink = serial();

    assert!(svc.start(&mut hw, &mut display, &mut sink).is_err());
    assert_eq!(output(&sink), "Falha ao inicializar o display OLED!\n");
    let logged = logged_here();
    assert!(logged.is_empty(), "console must fall silent: {:?}", logged);
}

#[test]
fn fault_cycle_still_counts_without_logging() {
    install_at_default_level();

    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    let mut display = RecordingDisplay::new();
    let mut sink = serial();
    let mut delay = RecordingDelay::default();
    svc.start(&mut hw, &mut display, &mut sink)
        .expect("startup with a working panel");
    let after_startup = logged_here().len();

    hw.push_fault(SensorError::ChecksumMismatch);
    let outcome = svc.cycle(&mut delay, &mut hw, &mut display, &mut sink);

    assert_eq!(outcome, CycleOutcome::SensorFault(SensorError::ChecksumMismatch));
    assert_eq!(svc.stats().consecutive_faults, 1);
    assert_eq!(logged_here().len(), after_startup);
}
