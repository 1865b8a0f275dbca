//! Diagnostic log output.
//!
//! Drains a [`LogStream`] into any text sink. On the device that sink is
//! a TX-only debug UART, separate from the operator console.
//!
//! ```text
//! ESP32 GPIO6 (TX) ──────▶ USB-UART RX
//!                           └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// UART configuration for logging. The TX pin is passed to
/// [`init_uart_logger`] as a peripheral.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
        }
    }
}

/// Write one entry as `[timestamp_us] LEVEL: message\r\n`.
pub fn write_log_entry(entry: &LogEntry, out: &mut dyn Write) -> core::fmt::Result {
    write!(
        out,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain every pending entry of `stream` into `out`.
///
/// Reports and clears the dropped-message counter afterwards.
/// Returns the number of entries written.
pub fn drain_log<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let _ = write_log_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = write!(out, "[WARN] Dropped: {}\r\n", dropped);
        stream.reset_dropped();
    }

    count
}

/// Initialize a TX-only UART for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = esp_idf_svc::hal::uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// `fmt::Write` adapter over a TX-only UART.
#[cfg(target_os = "espidf")]
pub struct UartLogWriter<'a, 'd>(pub &'a mut UartTxDriver<'d>);

#[cfg(target_os = "espidf")]
impl Write for UartLogWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0
            .write(s.as_bytes())
            .map(|_| ())
            .map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    #[test]
    fn test_logger_config_default() {
        assert_eq!(UartLoggerConfig::default().baud_rate, 115_200);
    }

    #[test]
    fn test_write_log_entry() {
        let entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            len: 11,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..11].copy_from_slice(b"config save");
                msg
            },
        };

        let mut out = String::new();
        write_log_entry(&entry, &mut out).unwrap();
        assert!(out.contains("1234567"));
        assert!(out.contains("INFO"));
        assert!(out.ends_with("config save\r\n"));
    }

    #[test]
    fn test_drain_reports_dropped() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Info, b"one");
        stream.push(2, LogLevel::Error, b"two");
        stream.push(3, LogLevel::Error, b"three");

        let mut out = String::new();
        assert_eq!(drain_log(&stream, &mut out), 2);
        assert!(out.contains("one"));
        assert!(out.contains("ERROR: two"));
        assert!(!out.contains("three"));
        assert!(out.contains("Dropped: 1"));
        assert_eq!(stream.dropped(), 0);
    }
}
