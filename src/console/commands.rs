//! Command handlers

use core::fmt::Write;
use core::time::Duration;

use super::parser::{argument_tail, prefix_cmp, split_assignment, strictly_before};
use super::variables::{find_variable, format_value, set_value, VARIABLES};
use super::ConsoleError;
use crate::config::{ConfigRecord, ConfigStore};
use crate::logging::LogStream;
use crate::system::{System, BOARD_REV};
use crate::{log_debug, log_error, log_info};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Pause between reporting a successful save and resetting, so the
/// message leaves the UART
pub const RESET_DELAY: Duration = Duration::from_secs(1);

/// Everything a handler may touch
pub struct CommandContext<'a> {
    pub out: &'a mut dyn Write,
    pub config: &'a mut ConfigRecord,
    pub store: &'a mut dyn ConfigStore,
    pub system: &'a mut dyn System,
    pub log: &'a LogStream,
    /// Session stays enabled after the command returns
    pub enabled: bool,
}

/// Command handler; receives the argument tail of the line
pub type Handler = fn(&str, &mut CommandContext<'_>) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands. Keep sorted.
pub const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "defaults", brief: "reset to factory defaults and reboot", handler: cmd_defaults },
    CommandDescriptor { name: "exit", brief: "leave command mode", handler: cmd_exit },
    CommandDescriptor { name: "help", brief: "list commands", handler: cmd_help },
    CommandDescriptor { name: "info", brief: "show runtime information", handler: cmd_info },
    CommandDescriptor { name: "save", brief: "save changes and reboot", handler: cmd_save },
    CommandDescriptor { name: "set", brief: "name=value or blank or * for list", handler: cmd_set },
    CommandDescriptor { name: "uptime", brief: "show the system uptime", handler: cmd_uptime },
    CommandDescriptor { name: "version", brief: "show version", handler: cmd_version },
];

const fn table_is_unambiguous(table: &[CommandDescriptor]) -> bool {
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
    table_is_unambiguous(COMMANDS),
    "COMMANDS must be sorted and no name may prefix another"
);

/// Find the command whose name prefixes `line`
pub fn find_command(line: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS
        .binary_search_by(|c| prefix_cmp(c.name, line))
        .ok()
        .map(|idx| &COMMANDS[idx])
}

/// Execute a completed line
pub fn execute(line: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let cmd = find_command(line).ok_or(ConsoleError::UnknownCommand)?;
    log_debug!(ctx.log, ctx.system.uptime_us(), "exec {}", cmd.name);
    (cmd.handler)(argument_tail(line, cmd.name), ctx)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Shared output ---

pub(crate) fn write_version(out: &mut dyn Write) {
    let _ = write!(out, "Hardware:       {}\r\n", BOARD_REV);
    let _ = write!(out, "Software:       {}\r\n", VERSION);
}

pub(crate) fn write_hwaddr_line(out: &mut dyn Write, system: &dyn System) {
    let _ = out.write_str("MAC Address:    ");
    let _ = system.write_hwaddr(out);
    let _ = out.write_str("\r\n");
}

fn write_uptime_line(out: &mut dyn Write, system: &dyn System) {
    let _ = out.write_str("Uptime:         ");
    let _ = system.write_uptime(out);
    let _ = out.write_str("\r\n");
}

/// Persist the configuration, then reboot on success.
///
/// On failure the device stays up and the record stays unsaved.
fn write_config_and_reset(ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let _ = ctx.out.write_str("Writing EEPROM...\r\n");

    if let Err(e) = ctx.store.write_config(ctx.config) {
        log_error!(ctx.log, ctx.system.uptime_us(), "config write failed: {:?}", e);
        return Err(e.into());
    }

    log_info!(ctx.log, ctx.system.uptime_us(), "config written, resetting");
    let _ = ctx.out.write_str("OK\r\n");
    ctx.system.delay(RESET_DELAY);
    ctx.system.reset();
    Ok(())
}

// --- Command Implementations ---

fn cmd_defaults(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    ctx.config.reset_to_factory();
    write_config_and_reset(ctx)
}

fn cmd_exit(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    ctx.enabled = false;
    let _ = ctx.out.write_str(
        "Exiting cmdline mode.\r\n\
         Configuration changes have not been saved.\r\n\
         Press Enter to enable cmdline.\r\n",
    );
    log_info!(ctx.log, ctx.system.uptime_us(), "session disabled");
    Ok(())
}

fn cmd_help(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    let _ = ctx.out.write_str("Available commands:\r\n");
    for c in COMMANDS {
        let _ = write!(ctx.out, "{:<10}{}\r\n", c.name, c.brief);
    }
    Ok(())
}

fn cmd_info(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    write_version(ctx.out);
    write_hwaddr_line(ctx.out, ctx.system);
    write_uptime_line(ctx.out, ctx.system);
    let _ = write!(ctx.out, "System clock:   {} Hz (nominal)\r\n", ctx.system.clock_hz());
    Ok(())
}

fn cmd_save(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    write_config_and_reset(ctx)
}

fn cmd_set(args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    if args.is_empty() || args == "*" {
        let _ = ctx.out.write_str("Current settings:\r\n");
        for var in VARIABLES {
            let value = format_value(var, ctx.config, !args.is_empty());
            let _ = write!(ctx.out, "{} = {}\r\n", var.name, value);
        }
        return Ok(());
    }

    // Text without '=' is silently ignored
    let Some((key, value)) = split_assignment(args) else {
        return Ok(());
    };

    let var = find_variable(key).ok_or(ConsoleError::UnknownVariable)?;
    set_value(var, ctx.config, value);

    let shown = format_value(var, ctx.config, false);
    let _ = write!(ctx.out, "{} set to {}", var.name, shown);
    log_info!(ctx.log, ctx.system.uptime_us(), "{} = {}", var.name, shown);
    Ok(())
}

fn cmd_uptime(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    write_uptime_line(ctx.out, ctx.system);
    Ok(())
}

fn cmd_version(_args: &str, ctx: &mut CommandContext<'_>) -> Result<(), ConsoleError> {
    write_version(ctx.out);
    Ok(())
}
