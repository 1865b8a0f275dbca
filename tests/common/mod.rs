//! Shared test doubles for console integration tests

#![allow(dead_code)]

use core::fmt::{self, Write};
use core::time::Duration;

use laureline_cli::system::format_hwaddr;
use laureline_cli::{Console, ConfigRecord, MemoryStore, System};

pub const TEST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

/// Captures everything the console prints
#[derive(Default)]
pub struct TestOutput {
    pub text: String,
}

impl TestOutput {
    pub fn contains(&self, s: &str) -> bool {
        self.text.contains(s)
    }

    /// Return and forget everything printed so far
    pub fn take(&mut self) -> String {
        core::mem::take(&mut self.text)
    }
}

impl Write for TestOutput {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

/// Records delays and resets instead of performing them
#[derive(Default)]
pub struct MockSystem {
    pub uptime_us: i64,
    pub delays: Vec<Duration>,
    pub resets: u32,
}

impl System for MockSystem {
    fn uptime_us(&self) -> i64 {
        self.uptime_us
    }

    fn write_hwaddr(&self, out: &mut dyn Write) -> fmt::Result {
        format_hwaddr(&TEST_MAC, out)
    }

    fn clock_hz(&self) -> u32 {
        48_000_000
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

pub type TestConsole = Console<TestOutput, MemoryStore, MockSystem>;

/// Console with factory config, not yet enabled
pub fn new_console() -> TestConsole {
    console_with_system(MockSystem::default())
}

/// Console with factory config and the given system double
pub fn console_with_system(system: MockSystem) -> TestConsole {
    Console::new(
        TestOutput::default(),
        MemoryStore::new(),
        system,
        ConfigRecord::factory(),
    )
}

/// Console that has already been woken up with Enter, output cleared
pub fn enabled_console() -> TestConsole {
    let mut console = new_console();
    console.feed(b'\r');
    console.output_mut().take();
    console
}

pub fn feed_str(console: &mut TestConsole, s: &str) {
    for b in s.bytes() {
        console.feed(b);
    }
}

/// Feed `line` plus CR and return what was printed
pub fn run_line(console: &mut TestConsole, line: &str) -> String {
    feed_str(console, line);
    console.feed(b'\r');
    console.output_mut().take()
}
