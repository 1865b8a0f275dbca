//! save / defaults tests

mod common;

use std::time::Duration;

use common::{enabled_console, run_line};
use laureline_cli::{ConfigRecord, StoreError};

fn save_failing_with(error: StoreError) -> (String, common::TestConsole) {
    let mut console = enabled_console();
    console.store_mut().fail_next_write(error);
    let out = run_line(&mut console, "save");
    (out, console)
}

#[test]
fn test_save_timeout_does_not_reset() {
    let (out, console) = save_failing_with(StoreError::Timeout);
    assert!(out.contains("Writing EEPROM...\r\nERROR: timeout while writing EEPROM\r\n"));
    assert!(!out.contains("OK"));
    assert_eq!(console.system().resets, 0);
    assert!(console.system().delays.is_empty());
    assert!(console.is_enabled());
}

#[test]
fn test_save_failure_messages() {
    let cases = [
        (StoreError::NotAcknowledged, "ERROR: EEPROM is faulty or missing"),
        (StoreError::Fault, "ERROR: EEPROM is faulty\r\n"),
        (StoreError::Failed, "FAIL: unable to write EEPROM"),
    ];

    for (error, message) in cases {
        let (out, console) = save_failing_with(error);
        assert!(out.contains(message), "{:?} should print {:?}", error, message);
        assert_eq!(console.system().resets, 0);
        assert!(console.store().image().is_none());
    }
}

#[test]
fn test_save_ok_delays_then_resets_once() {
    let mut console = enabled_console();
    run_line(&mut console, "set gps_baud_rate=38400");
    let out = run_line(&mut console, "save");

    assert!(out.contains("Writing EEPROM...\r\nOK\r\n"));
    assert_eq!(console.system().delays, vec![Duration::from_secs(1)]);
    assert_eq!(console.system().resets, 1);

    let stored = ConfigRecord::from_image(console.store().image().unwrap()).unwrap();
    assert_eq!(stored.gps_baud_rate, 38400);
}

#[test]
fn test_defaults_wipes_and_saves() {
    let mut console = enabled_console();
    run_line(&mut console, "set gps_baud_rate=38400");
    run_line(&mut console, "set ip_addr=10.1.2.3");

    let out = run_line(&mut console, "defaults");
    assert!(out.contains("OK"));
    assert_eq!(*console.config(), ConfigRecord::factory());
    assert_eq!(console.system().resets, 1);

    let stored = ConfigRecord::from_image(console.store().image().unwrap()).unwrap();
    assert_eq!(stored, ConfigRecord::factory());
}

#[test]
fn test_defaults_failure_leaves_memory_wiped() {
    let mut console = enabled_console();
    run_line(&mut console, "set gps_baud_rate=38400");
    console.store_mut().fail_next_write(StoreError::Timeout);

    let out = run_line(&mut console, "defaults");
    assert!(out.contains("ERROR: timeout while writing EEPROM"));
    assert_eq!(console.config().gps_baud_rate, 0);
    assert_eq!(console.system().resets, 0);
}
