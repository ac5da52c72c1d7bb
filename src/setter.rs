use super::*;

use std::{
    fmt,
    io::{self, Write},
    time::Duration,
};

/// Resolved command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub port: String,
    pub baud_rate: u32,
    pub microseconds: Option<u64>,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_owned(),
            baud_rate: BAUD_RATE,
            microseconds: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub warm_up_steps: u32,
    pub warm_up_step: Duration,
}

impl Settings {
    pub fn warm_up(&self) -> Duration {
        self.warm_up_step * self.warm_up_steps
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            warm_up_steps: WARM_UP_STEPS,
            warm_up_step: WARM_UP_STEP,
        }
    }
}

/// Opens the port, waits for the device and sends the clock commands.
///
/// Progress is reported on `console` in the same line-oriented style as
/// an interactive terminal session; diagnostics go to the logger.
pub struct ClockSetter<C, K, D, W> {
    connector: C,
    clock: K,
    delay: D,
    console: W,
    settings: Settings,
}

impl<C, K, D, W> ClockSetter<C, K, D, W>
where
    C: Connector,
    K: Clock,
    D: Delay,
    W: Write,
{
    pub fn new(connector: C, clock: K, delay: D, console: W) -> Self {
        Self {
            connector,
            clock,
            delay,
            console,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_console(self) -> W {
        self.console
    }

    pub fn run(&mut self, invocation: &Invocation) -> Result<()> {
        let Invocation {
            port: port_name,
            baud_rate,
            microseconds,
        } = invocation;

        self.report(format_args!(
            "Opening port '{}' ({} baud) ...",
            port_name, baud_rate
        ));
        log::info!("Opening serial port {} at {} baud", port_name, baud_rate);
        let mut port = match self.connector.open(port_name, *baud_rate) {
            Ok(port) => port,
            Err(source) => {
                log::error!("Failed to open serial port {}: {}", port_name, source);
                self.report(format_args!(" failed!\n"));
                return Err(Error::Open {
                    port: port_name.clone(),
                    source,
                });
            }
        };

        self.warm_up();

        let now = self.clock.now();
        self.send(&mut port, port_name, Command::SetDateTime(now))?;
        self.report(format_args!(" done.\nDate and time have been set.\n"));

        if let Some(us) = microseconds {
            self.send(&mut port, port_name, Command::SetMicroseconds(*us))?;
            self.report(format_args!("Microseconds have been set.\n"));
        }
        Ok(())
    }

    fn warm_up(&mut self) {
        let Settings {
            warm_up_steps,
            warm_up_step,
        } = self.settings;
        for step in 1..=warm_up_steps {
            self.delay.delay(warm_up_step);
            log::trace!("Warm-up step {}/{}", step, warm_up_steps);
            self.report(format_args!("."));
        }
    }

    fn send(&mut self, port: &mut C::Port, port_name: &str, command: Command) -> Result<()> {
        log::debug!("Sending {} command {:?}", command.name(), command.to_string());
        // The firmware reads its UART one character at a time
        for byte in command.encode() {
            if let Err(source) = port.write_all(&[byte]) {
                log::error!(
                    "Failed to send {} command to {}: {}",
                    command.name(),
                    port_name,
                    source
                );
                self.report(format_args!(" failed!\n"));
                return Err(Error::Write {
                    port: port_name.to_owned(),
                    command: command.name(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn report(&mut self, args: fmt::Arguments<'_>) {
        let res: io::Result<()> = self
            .console
            .write_fmt(args)
            .and_then(|()| self.console.flush());
        if let Err(err) = res {
            log::warn!("Failed to write to console: {}", err);
        }
    }
}
