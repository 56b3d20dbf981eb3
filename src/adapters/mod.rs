//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements                      | Connects to              |
//! |----------------|---------------------------------|--------------------------|
//! | `hardware`     | ClimatePort, LightPort,         | DHT22, ADC1, GPIO        |
//! |                | ButtonPort, InputSetupPort      |                          |
//! | `display`      | DisplayPort                     | SSD1306 / host buffer    |
//! | `serial_sink`  | EventSink                       | UART0 console            |
//! | `time`         | —                               | ESP32 system timer       |

pub mod display;
pub mod hardware;
pub mod serial_sink;
pub mod time;
