/// Command encoding and link parameters
pub mod core;

pub use self::core::*;

pub mod setter;

pub use self::setter::{ClockSetter, Invocation, Settings};

#[cfg(feature = "serial")]
pub mod serial;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

use chrono::NaiveDateTime;
use std::{io, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not open port '{port}': {source}")]
    Open { port: String, source: io::Error },

    #[error("Could not write {command} command to port '{port}': {source}")]
    Write {
        port: String,
        command: &'static str,
        source: io::Error,
    },
}

impl Error {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Open { .. } => -2,
            Error::Write { .. } => -1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Opens the byte channel that leads to the clock device.
pub trait Connector {
    type Port: io::Write;

    fn open(&mut self, port: &str, baud_rate: u32) -> io::Result<Self::Port>;
}

/// Source of the local wall clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Blocks the current thread.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// The local system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Sleeps on the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
