//! Typed variable registry
//!
//! Maps a console name onto one field of [`ConfigRecord`]. Each kind
//! carries its own typed accessors, so formatting and parsing never touch
//! raw memory.

use core::fmt::Write;

use super::parser::{parse_decimal, strictly_before};
use crate::config::ConfigRecord;

/// Longest rendered value ("255.255.255.255" / "4294967295")
pub const VALUE_TEXT_LEN: usize = 16;

/// Rendered variable value
pub type ValueText = heapless::String<VALUE_TEXT_LEN>;

/// Value kind with accessors into the configuration record
#[derive(Clone, Copy)]
pub enum VarKind {
    /// Unsigned 32-bit integer
    UInt32 {
        get: fn(&ConfigRecord) -> u32,
        set: fn(&mut ConfigRecord, u32),
    },
    /// Boolean stored as a byte
    Bool {
        get: fn(&ConfigRecord) -> u8,
        set: fn(&mut ConfigRecord, u8),
    },
    /// IPv4 address, first octet at index 0
    Ipv4 {
        get: fn(&ConfigRecord) -> [u8; 4],
        set: fn(&mut ConfigRecord, [u8; 4]),
    },
}

/// Variable descriptor
#[derive(Clone, Copy)]
pub struct Variable {
    pub name: &'static str,
    pub kind: VarKind,
}

/// All console variables. Keep sorted.
pub const VARIABLES: &[Variable] = &[
    Variable {
        name: "gps_baud_rate",
        kind: VarKind::UInt32 {
            get: |c| c.gps_baud_rate,
            set: |c, v| c.gps_baud_rate = v,
        },
    },
    Variable {
        name: "ip_addr",
        kind: VarKind::Ipv4 {
            get: |c| c.ip_addr,
            set: |c, v| c.ip_addr = v,
        },
    },
    Variable {
        name: "ip_gateway",
        kind: VarKind::Ipv4 {
            get: |c| c.ip_gateway,
            set: |c, v| c.ip_gateway = v,
        },
    },
    Variable {
        name: "ip_netmask",
        kind: VarKind::Ipv4 {
            get: |c| c.ip_netmask,
            set: |c, v| c.ip_netmask = v,
        },
    },
];

const fn table_is_unambiguous(table: &[Variable]) -> bool {
    let mut i = 1;
    while i < table.len() {
        if !strictly_before(table[i - 1].name, table[i].name) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    table_is_unambiguous(VARIABLES),
    "VARIABLES must be sorted and no name may prefix another"
);

/// Render the current value of `var`.
///
/// `verbose` is reserved; every kind renders the same either way.
pub fn format_value(var: &Variable, config: &ConfigRecord, verbose: bool) -> ValueText {
    let _ = verbose;
    let mut text = ValueText::new();
    // Capacity covers the longest rendering of every kind
    let _ = match var.kind {
        VarKind::UInt32 { get, .. } => write!(text, "{}", get(config)),
        VarKind::Bool { get, .. } => write!(text, "{}", u8::from(get(config) != 0)),
        VarKind::Ipv4 { get, .. } => {
            let a = get(config);
            write!(text, "{}.{}.{}.{}", a[0], a[1], a[2], a[3])
        }
    };
    text
}

/// Parse `text` according to the kind of `var` and store it.
///
/// Never fails: malformed text degrades to whatever the scan produced.
pub fn set_value(var: &Variable, config: &mut ConfigRecord, text: &str) {
    match var.kind {
        VarKind::UInt32 { set, .. } => set(config, parse_decimal(text)),
        VarKind::Bool { set, .. } => set(config, u8::from(parse_decimal(text) != 0)),
        VarKind::Ipv4 { set, .. } => set(config, parse_ipv4(text)),
    }
}

/// Scan a dotted quad.
///
/// Digits accumulate into the current octet modulo 256, each `.` shifts
/// the completed octets up one byte, anything else is skipped. The octet
/// count is not checked: missing octets leave leading zeros, extra ones
/// push the oldest out.
pub fn parse_ipv4(text: &str) -> [u8; 4] {
    let mut addr: u32 = 0;
    let mut octet: u8 = 0;
    for b in text.bytes() {
        match b {
            b'.' => {
                addr = (addr << 8) | u32::from(octet);
                octet = 0;
            }
            b'0'..=b'9' => octet = octet.wrapping_mul(10).wrapping_add(b - b'0'),
            _ => {}
        }
    }
    addr = (addr << 8) | u32::from(octet);
    addr.to_be_bytes()
}

/// First variable whose name prefixes `key` (case-insensitive)
pub fn find_variable(key: &str) -> Option<&'static Variable> {
    VARIABLES
        .iter()
        .find(|v| super::parser::matches_prefix(v.name, key))
}
