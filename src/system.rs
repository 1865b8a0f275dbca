//! Device collaborators used by the console.
//!
//! Uptime, hardware address, clock, delay and reset are thin calls into
//! the platform. The console only ever sees the [`System`] trait.

use core::fmt::{self, Write};
use core::time::Duration;

/// Board revision reported by `version`
#[cfg(feature = "esp32p4")]
pub const BOARD_REV: &str = "ESP32-P4";
/// Board revision reported by `version`
#[cfg(not(feature = "esp32p4"))]
pub const BOARD_REV: &str = "ESP32-S3";

/// Nominal CPU clock in Hz
#[cfg(feature = "esp32p4")]
pub const NOMINAL_CLOCK_HZ: u32 = 360_000_000;
/// Nominal CPU clock in Hz
#[cfg(not(feature = "esp32p4"))]
pub const NOMINAL_CLOCK_HZ: u32 = 240_000_000;

/// Platform services the console depends on
pub trait System {
    /// Microseconds since boot
    fn uptime_us(&self) -> i64;

    /// Write the uptime as human readable text
    fn write_uptime(&self, out: &mut dyn Write) -> fmt::Result {
        format_uptime(self.uptime_us(), out)
    }

    /// Write the network hardware address
    fn write_hwaddr(&self, out: &mut dyn Write) -> fmt::Result;

    /// Nominal system clock in Hz
    fn clock_hz(&self) -> u32 {
        NOMINAL_CLOCK_HZ
    }

    /// Cooperative sleep
    fn delay(&mut self, duration: Duration);

    /// Restart the device.
    ///
    /// Does not return on hardware. Test doubles may return, callers
    /// must not do anything afterwards.
    fn reset(&mut self);
}

/// Format an uptime as `<days>d HH:MM:SS`.
pub fn format_uptime(uptime_us: i64, out: &mut dyn Write) -> fmt::Result {
    let secs = (uptime_us.max(0) / 1_000_000) as u64;
    let days = secs / 86_400;
    let hours = (secs / 3600) % 24;
    let mins = (secs / 60) % 60;
    write!(out, "{}d {:02}:{:02}:{:02}", days, hours, mins, secs % 60)
}

/// Format a MAC address as `aa:bb:cc:dd:ee:ff`.
pub fn format_hwaddr(mac: &[u8; 6], out: &mut dyn Write) -> fmt::Result {
    write!(
        out,
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// ESP-IDF implementation of [`System`].
#[cfg(target_os = "espidf")]
pub struct EspSystem {
    mac: [u8; 6],
}

#[cfg(target_os = "espidf")]
impl EspSystem {
    /// Read the Ethernet MAC once at startup.
    pub fn new() -> Self {
        use esp_idf_svc::sys::{self as esp_idf_sys, EspError};

        let mut mac = [0u8; 6];
        // SAFETY: buffer is 6 bytes as required by esp_read_mac
        let err = unsafe {
            esp_idf_sys::esp_read_mac(mac.as_mut_ptr(), esp_idf_sys::esp_mac_type_t_ESP_MAC_ETH)
        };
        if EspError::convert(err).is_err() {
            mac = [0u8; 6];
        }
        Self { mac }
    }
}

#[cfg(target_os = "espidf")]
impl System for EspSystem {
    fn uptime_us(&self) -> i64 {
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    fn write_hwaddr(&self, out: &mut dyn Write) -> fmt::Result {
        format_hwaddr(&self.mac, out)
    }

    fn delay(&mut self, duration: Duration) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(duration.as_millis() as u32);
    }

    fn reset(&mut self) {
        unsafe {
            esp_idf_svc::sys::esp_restart();
        }
    }
}
