//! Serial console event sink.
//!
//! Implements [`EventSink`] by writing each [`MonitorEvent`] as one
//! `\n`-terminated protocol line. These lines bypass the `log` facade so
//! the host sees exactly the protocol text, with no level or timestamp
//! prefix.

use std::io::Write;

use log::warn;

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that writes every [`MonitorEvent`] to a byte stream (UART0
/// console on target, a `Vec<u8>` in tests).
pub struct SerialEventSink<W> {
    out: W,
}

impl<W: Write> SerialEventSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for SerialEventSink<W> {
    fn emit(&mut self, event: &MonitorEvent) {
        let written = writeln!(self.out, "{}", event).and_then(|()| self.out.flush());
        if let Err(e) = written {
            warn!("Serial write failed: {}", e);
        }
    }
}
