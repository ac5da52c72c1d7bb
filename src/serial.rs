use super::*;

use serialport::SerialPort;
use std::io;

/// Connects to local serial ports through the operating system driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerialConnector {
    timeout: Duration,
}

impl SerialConnector {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SerialConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Connector for SerialConnector {
    type Port = Box<dyn SerialPort>;

    fn open(&mut self, port: &str, baud_rate: u32) -> io::Result<Self::Port> {
        log::debug!("Connecting to serial port {}", port);
        let port = serialport::new(port, baud_rate)
            .data_bits(DATA_BITS)
            .stop_bits(STOP_BITS)
            .parity(PARITY)
            .flow_control(FLOW_CONTROL)
            .timeout(self.timeout)
            .open()?;
        Ok(port)
    }
}
