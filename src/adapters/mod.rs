//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                 |
//! |------------|---------------|-----------------------------|
//! | `time`     | Clock         | OS monotonic clock / manual |
//! | `log_sink` | EventSink     | `log` facade                |
//! | `settings` | SettingsPort  | remote JSON settings        |
//! | `admin`    | —             | operator console            |

pub mod admin;
pub mod log_sink;
pub mod settings;
pub mod time;
