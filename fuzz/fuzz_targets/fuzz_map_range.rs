//! Fuzz target: `map_range` / `LuxScale::to_lux`
//!
//! Arbitrary `i32` source and target ranges must never panic, endpoints
//! must map to endpoints, and a lux scale must always land inside its
//! configured range.
//!
//! cargo fuzz run fuzz_map_range

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensorpanel::app::reading::{map_range, LuxScale};

fuzz_target!(|data: &[u8]| {
    if data.len() < 20 {
        return;
    }
    let word = |i: usize| [data[i], data[i + 1]];
    let dword = |i: usize| i32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);

    let (value, from, to) = (dword(0), (dword(4), dword(8)), (dword(12), dword(16)));
    let mapped = map_range(value, from, to);
    if from.0 == from.1 || value == from.0 {
        assert_eq!(mapped, to.0);
    } else if value == from.1 {
        assert_eq!(mapped, to.1);
    }

    let raw = u16::from_le_bytes(word(0));
    let raw_max = u16::from_le_bytes(word(2)).max(1);
    let (a, b) = (u16::from_le_bytes(word(4)), u16::from_le_bytes(word(6)));
    let scale = LuxScale {
        raw_max,
        lux_min: a.min(b),
        lux_max: a.max(b),
    };
    let lux = scale.to_lux(raw);
    assert!(lux >= scale.lux_min && lux <= scale.lux_max);
});
