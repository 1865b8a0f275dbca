//! Main console struct integrating all components

use core::fmt::Write;

use super::commands::{execute, write_hwaddr_line, write_version, CommandContext};
use super::line_buffer::{LineBuffer, LINE_SIZE};
use super::ConsoleError;
use crate::config::{ConfigRecord, ConfigStore};
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::LogStream;
use crate::system::System;
use crate::{log_info, log_warn};

/// Prompt, preceded by a fresh line
const PROMPT: &str = "\r\n# ";

/// ANSI clear screen and home cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// End of transmission (Ctrl+D)
const EOF: u8 = 0x04;

/// Form feed (Ctrl+L)
const FORM_FEED: u8 = 0x0C;

/// Console state machine.
///
/// Fed one byte at a time. Owns the session state, the output sink and
/// the live configuration record, so several independent consoles can
/// coexist (and be driven from tests).
///
/// A new console is disabled: everything except a line terminator is
/// ignored until the operator presses Enter.
pub struct Console<W, S, Y> {
    line: LineBuffer,
    enabled: bool,
    /// Last byte was a carriage return ending a line
    held_cr: bool,
    out: W,
    store: S,
    system: Y,
    config: ConfigRecord,
    log: &'static LogStream,
}

impl<W: Write, S: ConfigStore, Y: System> Console<W, S, Y> {
    /// Create new console, initially disabled
    pub fn new(out: W, store: S, system: Y, config: ConfigRecord) -> Self {
        Self {
            line: LineBuffer::new(),
            enabled: false,
            held_cr: false,
            out,
            store,
            system,
            config,
            log: &CONSOLE_LOG_STREAM,
        }
    }

    /// Record console events into `log` instead of the global stream
    pub fn with_log(mut self, log: &'static LogStream) -> Self {
        self.log = log;
        self
    }

    /// Bind a new output sink, returning the previous one
    pub fn set_output(&mut self, out: W) -> W {
        core::mem::replace(&mut self.out, out)
    }

    /// Process a single input byte
    pub fn feed(&mut self, byte: u8) {
        let terminator = byte == b'\r' || byte == b'\n';
        if !self.enabled && !terminator {
            return;
        }

        if !self.enabled {
            self.enabled = true;
            log_info!(self.log, self.system.uptime_us(), "session enabled");
        }

        // CR LF: the LF belongs to the line ending already handled
        if byte == b'\n' && self.held_cr && self.line.is_empty() {
            self.held_cr = false;
            return;
        }

        match byte {
            // Completion is not supported
            b'\t' | b'?' => {}

            EOF if self.line.is_empty() => self.dispatch("exit"),

            FORM_FEED => {
                let _ = self.out.write_str(CLEAR_SCREEN);
                self.show_prompt();
            }

            b'\r' | b'\n' => {
                if !self.line.is_empty() {
                    let _ = self.out.write_str("\r\n");
                    // Copy out so the handler may borrow the rest of the console
                    let mut held = [0u8; LINE_SIZE];
                    let len = self.line.len();
                    held[..len].copy_from_slice(self.line.as_bytes());
                    self.line.clear();

                    self.dispatch(core::str::from_utf8(&held[..len]).unwrap_or(""));
                }
                if self.enabled {
                    self.show_prompt();
                }
                self.held_cr = byte == b'\r';
            }

            // Backspace / DEL
            0x08 | 0x7F => {
                if self.line.backspace() {
                    self.held_cr = false;
                    let _ = self.out.write_str("\x08 \x08");
                }
            }

            0x20..=0x7E if !self.line.is_full() => {
                // Drop leading blanks
                if self.line.is_empty() && byte == b' ' {
                    return;
                }
                self.line.push(byte);
                self.held_cr = false;
                let _ = self.out.write_char(byte as char);
            }

            _ => {}
        }
    }

    /// Run `line` through the command table, reporting any error
    fn dispatch(&mut self, line: &str) {
        let mut ctx = CommandContext {
            out: &mut self.out,
            config: &mut self.config,
            store: &mut self.store,
            system: &mut self.system,
            log: self.log,
            enabled: self.enabled,
        };

        let result = execute(line, &mut ctx);
        self.enabled = ctx.enabled;

        if let Err(e) = result {
            let _ = write!(self.out, "{}\r\n", e);
            if e == ConsoleError::UnknownCommand {
                log_warn!(self.log, self.system.uptime_us(), "unknown command '{}'", line);
            } else {
                log_warn!(self.log, self.system.uptime_us(), "{} failed: {}", line, e.code());
            }
        }

        if !self.enabled {
            self.line.clear();
        }
    }

    /// Reset the line, enable the session and print the prompt
    fn show_prompt(&mut self) {
        self.line.clear();
        self.enabled = true;
        let _ = self.out.write_str(PROMPT);
    }

    /// Print welcome banner
    pub fn print_banner(&mut self) {
        let _ = self.out.write_str("\r\n\r\nLaureline GPS NTP Server\r\n");
        write_version(&mut self.out);
        write_hwaddr_line(&mut self.out, &self.system);
        let _ = self.out.write_str("\r\nPress Enter to enable command-line\r\n");
    }

    /// Session currently interprets input
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Text typed since the last terminator
    pub fn pending_line(&self) -> &str {
        self.line.as_str()
    }

    /// Live configuration record
    pub fn config(&self) -> &ConfigRecord {
        &self.config
    }

    /// Live configuration record, mutable
    pub fn config_mut(&mut self) -> &mut ConfigRecord {
        &mut self.config
    }

    /// Output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Output sink, mutable
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Configuration store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configuration store, mutable
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// System collaborator
    pub fn system(&self) -> &Y {
        &self.system
    }
}
