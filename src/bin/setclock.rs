use clap::Parser;
use env_logger::Builder as LoggerBuilder;
use std::{env, ffi::OsString, io, process};

use setclock::{
    serial::SerialConnector, ClockSetter, Invocation, SystemClock, ThreadDelay, BAUD_RATE,
    DEFAULT_PORT,
};

/// First arguments that request the usage text instead of a clock update.
const HELP_TOKENS: [&str; 3] = ["?", "-h", "--help"];

/// Set date and time of a real-time clock attached to a serial port.
#[derive(Debug, Parser)]
#[command(version, about, disable_help_flag = true)]
struct Cli {
    /// Serial port of the clock device, e.g. COM5 or /dev/ttyUSB0
    #[arg(default_value = DEFAULT_PORT)]
    portname: String,

    /// Baud rate of the serial connection
    #[arg(default_value_t = BAUD_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    baudrate: u32,

    /// Microsecond correction sent after the date and time
    microseconds: Option<u64>,
}

impl From<Cli> for Invocation {
    fn from(from: Cli) -> Self {
        Self {
            port: from.portname,
            baud_rate: from.baudrate,
            microseconds: from.microseconds,
        }
    }
}

fn init_logger() {
    let mut logger_builder = LoggerBuilder::new();
    // Silent unless asked for, the console output is the user interface
    logger_builder.filter_level(log::LevelFilter::Off);
    if let Ok(rust_log) = env::var("RUST_LOG") {
        logger_builder.parse_filters(&rust_log);
    }
    logger_builder.init();
}

fn wants_help(args: &[OsString]) -> bool {
    args.get(1)
        .map_or(false, |first| HELP_TOKENS.iter().any(|token| first == *token))
}

pub fn main() {
    init_logger();

    let args: Vec<OsString> = env::args_os().collect();
    if wants_help(&args) {
        let program = args
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
        println!("Usage: {} [portname [baudrate [microseconds]]]", program);
        process::exit(1);
    }

    let invocation = Invocation::from(Cli::parse_from(args));
    log::debug!("{:?}", invocation);

    let mut setter = ClockSetter::new(
        SerialConnector::default(),
        SystemClock,
        ThreadDelay,
        io::stdout(),
    );
    if let Err(err) = setter.run(&invocation) {
        println!("{}", err);
        process::exit(err.exit_code());
    }
}
