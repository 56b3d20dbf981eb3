//! Fuzz target: `decode_frame` + `ClimateSample::from_float`
//!
//! Feeds arbitrary 5-byte frames through the DHT22 decoder and checks:
//! - No panics under any bit pattern
//! - A frame is accepted iff its checksum byte matches
//! - Accepted frames stay inside the 16-bit wire range
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensorpanel::app::reading::ClimateSample;
use sensorpanel::error::SensorError;
use sensorpanel::sensors::dht22::decode_frame;

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let frame = [data[0], data[1], data[2], data[3], data[4]];

    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    match decode_frame(&frame) {
        Ok((t, h)) => {
            assert_eq!(sum, frame[4], "bad checksum accepted");
            assert!((0.0..=6553.5).contains(&h));
            assert!(t.abs() <= 3276.7);
            let sample = ClimateSample::from_float(t, h).unwrap();
            assert!(sample.humidity_pct >= 0);
        }
        Err(e) => {
            assert_eq!(e, SensorError::ChecksumMismatch);
            assert_ne!(sum, frame[4], "good checksum rejected");
        }
    }
});
