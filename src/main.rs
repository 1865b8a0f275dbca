//! Laureline console - Main entry point
//!
//! On the device:
//! 1. Open the console UART and the debug log UART
//! 2. Load the configuration record from NVS
//! 3. Print the banner, then feed every received byte to the console
//!
//! On any other target the same console runs over stdin/stdout against an
//! in-memory store, logging to stderr.

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    device::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run();
}

#[cfg(target_os = "espidf")]
mod device {
    use core::fmt;

    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::sys::EspError;

    use laureline_cli::config::{load_config, NvsConfigStore};
    use laureline_cli::system::EspSystem;
    use laureline_cli::uart_logger::{drain_log, init_uart_logger, UartLogWriter, UartLoggerConfig};
    use laureline_cli::{log_info, Console, System, CONSOLE_LOG_STREAM};

    const CONSOLE_BAUD: u32 = 115_200;

    /// Ticks to wait for a console byte before servicing the log drain
    const RX_WAIT_TICKS: u32 = 10;

    /// `fmt::Write` adapter over the console UART
    struct SerialOut<'a, 'd>(&'a UartDriver<'d>);

    impl fmt::Write for SerialOut<'_, '_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut bytes = s.as_bytes();
            while !bytes.is_empty() {
                let n = self.0.write(bytes).map_err(|_| fmt::Error)?;
                bytes = &bytes[n..];
            }
            Ok(())
        }
    }

    pub fn run() -> Result<(), EspError> {
        esp_idf_svc::sys::link_patches();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        let serial_config = uart::config::Config::default().baudrate(Hertz(CONSOLE_BAUD));
        let serial = UartDriver::new(
            peripherals.uart0,
            pins.gpio43,
            pins.gpio44,
            Option::<gpio::AnyIOPin>::None,
            Option::<gpio::AnyIOPin>::None,
            &serial_config,
        )?;

        let mut log_uart =
            init_uart_logger(peripherals.uart1, pins.gpio6, &UartLoggerConfig::default())?;

        let system = EspSystem::new();
        let mut store = NvsConfigStore::new(EspDefaultNvsPartition::take()?)?;
        let (config, outcome) = load_config(&mut store);
        log_info!(CONSOLE_LOG_STREAM, system.uptime_us(), "config load: {:?}", outcome);

        let mut console = Console::new(SerialOut(&serial), store, system, config);
        console.print_banner();

        let mut byte = [0u8; 1];
        loop {
            if let Ok(1) = serial.read(&mut byte, RX_WAIT_TICKS) {
                console.feed(byte[0]);
            }
            drain_log(&CONSOLE_LOG_STREAM, &mut UartLogWriter(&mut log_uart));
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::fmt;
    use std::io::{self, Read, Write};
    use std::time::{Duration, Instant};

    use laureline_cli::config::load_config;
    use laureline_cli::system::format_hwaddr;
    use laureline_cli::uart_logger::drain_log;
    use laureline_cli::{log_info, Console, MemoryStore, System, CONSOLE_LOG_STREAM};

    /// Locally administered address for the simulator
    const HOST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x4c, 0x41, 0x55];

    struct StdoutSink;

    impl fmt::Write for StdoutSink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut stdout = io::stdout().lock();
            stdout.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
            stdout.flush().map_err(|_| fmt::Error)
        }
    }

    struct StderrSink;

    impl fmt::Write for StderrSink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            io::stderr().write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }

    struct HostSystem {
        boot: Instant,
    }

    impl System for HostSystem {
        fn uptime_us(&self) -> i64 {
            self.boot.elapsed().as_micros() as i64
        }

        fn write_hwaddr(&self, out: &mut dyn fmt::Write) -> fmt::Result {
            format_hwaddr(&HOST_MAC, out)
        }

        fn delay(&mut self, duration: Duration) {
            std::thread::sleep(duration);
        }

        fn reset(&mut self) {
            eprintln!("[reset]");
            std::process::exit(0);
        }
    }

    pub fn run() {
        let system = HostSystem { boot: Instant::now() };
        let mut store = MemoryStore::new();
        let (config, outcome) = load_config(&mut store);
        log_info!(CONSOLE_LOG_STREAM, system.uptime_us(), "config load: {:?}", outcome);

        let mut console = Console::new(StdoutSink, store, system, config);
        console.print_banner();

        for byte in io::stdin().lock().bytes() {
            match byte {
                Ok(b) => console.feed(b),
                Err(_) => break,
            }
            drain_log(&CONSOLE_LOG_STREAM, &mut StderrSink);
        }
        drain_log(&CONSOLE_LOG_STREAM, &mut StderrSink);
    }
}
