//! `set` command and variable registry tests

mod common;

use common::{enabled_console, run_line};
use laureline_cli::logging::{LogLevel, LogStream};
use laureline_cli::VARIABLES;

const LISTING_DEFAULTS: &str = "Current settings:\r\n\
    gps_baud_rate = 0\r\n\
    ip_addr = 0.0.0.0\r\n\
    ip_gateway = 0.0.0.0\r\n\
    ip_netmask = 0.0.0.0\r\n";

#[test]
fn test_variable_table_order() {
    let names: Vec<_> = VARIABLES.iter().map(|v| v.name).collect();
    assert_eq!(names, ["gps_baud_rate", "ip_addr", "ip_gateway", "ip_netmask"]);
}

#[test]
fn test_set_without_argument_lists_all() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "set");
    assert_eq!(out, format!("set\r\n{}\r\n# ", LISTING_DEFAULTS));
}

#[test]
fn test_set_star_lists_all() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "set *");
    assert!(out.contains(LISTING_DEFAULTS));
}

#[test]
fn test_set_ip_then_list() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "set ip_addr=10.0.0.1");
    assert!(out.contains("ip_addr set to 10.0.0.1"));
    assert_eq!(console.config().ip_addr, [10, 0, 0, 1]);

    let out = run_line(&mut console, "set");
    assert!(out.contains("ip_addr = 10.0.0.1\r\n"));
}

#[test]
fn test_set_baud_rate() {
    let mut console = enabled_console();
    run_line(&mut console, "set gps_baud_rate=9600");
    assert_eq!(console.config().gps_baud_rate, 9600);
    assert!(run_line(&mut console, "set").contains("gps_baud_rate = 9600"));

    let out = run_line(&mut console, "set gps_baud_rate=abc");
    assert!(out.contains("gps_baud_rate set to 0"));
    assert_eq!(console.config().gps_baud_rate, 0);
}

#[test]
fn test_set_is_case_insensitive_and_skips_spaces() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "SET IP_NETMASK =   255.255.255.0");
    assert!(out.contains("ip_netmask set to 255.255.255.0"));
    assert_eq!(console.config().ip_netmask, [255, 255, 255, 0]);
}

#[test]
fn test_set_octet_above_255_wraps() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "set ip_gateway=10.0.0.256");
    assert!(out.contains("ip_gateway set to 10.0.0.0"));
}

#[test]
fn test_set_unknown_variable() {
    let mut console = enabled_console();
    let before = *console.config();
    let out = run_line(&mut console, "set ntp_server=1.2.3.4");
    assert!(out.contains("ERR: Unknown variable name\r\n"));
    assert_eq!(*console.config(), before);
}

#[test]
fn test_set_unknown_variable_logs_code() {
    static LOG: LogStream = LogStream::new();

    let mut console = common::new_console().with_log(&LOG);
    console.feed(b'\r');
    run_line(&mut console, "set ntp_server=1.2.3.4");

    let entries: Vec<_> = core::iter::from_fn(|| LOG.drain())
        .map(|e| (e.level, e.message().to_string()))
        .collect();
    assert!(entries.contains(&(LogLevel::Warn, "set ntp_server=1.2.3.4 failed: E02".to_string())));
}

#[test]
fn test_set_without_equals_is_silent() {
    let mut console = enabled_console();
    let out = run_line(&mut console, "set ip_addr");
    assert_eq!(out, "set ip_addr\r\n\r\n# ");
}

#[test]
fn test_set_only_touches_matching_variable() {
    let mut console = enabled_console();
    run_line(&mut console, "set ip_gateway=192.168.1.1");
    let cfg = console.config();
    assert_eq!(cfg.ip_gateway, [192, 168, 1, 1]);
    assert_eq!(cfg.ip_addr, [0, 0, 0, 0]);
    assert_eq!(cfg.ip_netmask, [0, 0, 0, 0]);
}

#[test]
fn test_exit_keeps_unsaved_changes() {
    let mut console = enabled_console();
    run_line(&mut console, "set gps_baud_rate=4800");
    run_line(&mut console, "exit");
    console.feed(b'\r');
    console.output_mut().take();

    assert!(run_line(&mut console, "set").contains("gps_baud_rate = 4800"));
    assert_eq!(console.store().writes(), 0);
}
