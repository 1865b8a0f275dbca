//! Serial console for configuration and diagnostics
//!
//! Byte-driven: the transport calls [`Console::feed`] once per received
//! byte. Zero heap allocation, all buffers are fixed size.

pub mod commands;
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod variables;

pub use commands::{command_names, execute, find_command, CommandContext, COMMANDS, VERSION};
pub use console::Console;
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use variables::{find_variable, format_value, set_value, VarKind, Variable, VARIABLES};
