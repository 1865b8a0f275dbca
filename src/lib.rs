//! # Laureline console
//!
//! Operator command line of the Laureline GPS NTP server.
//!
//! ## Architecture
//!
//! ```text
//! UART RX ──▶ Console::feed ──▶ command table ──▶ handler
//!                                                  │
//!                     ConfigRecord ◀── variables ◀─┤
//!                     ConfigStore  ◀── save/defaults
//!                     System       ◀── info/uptime/reset
//! ```
//!
//! The console owns the live [`ConfigRecord`]; storage and platform
//! services sit behind the [`ConfigStore`] and [`System`] traits so the
//! same engine runs on the device and on a host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod log_globals;
pub mod logging;
pub mod system;
pub mod uart_logger;

pub use config::{ConfigRecord, ConfigStore, MemoryStore, StoreError};
pub use console::{Console, ConsoleError, VARIABLES};
pub use log_globals::CONSOLE_LOG_STREAM;
pub use logging::LogStream;
pub use system::System;
