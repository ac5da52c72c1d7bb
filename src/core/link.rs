use core::time::Duration;

#[cfg(feature = "serial")]
use serialport::{DataBits, FlowControl, Parity, StopBits};

pub const DEFAULT_PORT: &str = "COM5";

pub const BAUD_RATE: u32 = 9600;

#[cfg(feature = "serial")]
pub const DATA_BITS: DataBits = DataBits::Eight;
#[cfg(feature = "serial")]
pub const STOP_BITS: StopBits = StopBits::One;
#[cfg(feature = "serial")]
pub const PARITY: Parity = Parity::None;
#[cfg(feature = "serial")]
pub const FLOW_CONTROL: FlowControl = FlowControl::None;

/// Number of warm-up steps between opening the port and the first write.
///
/// Many boards reset when the port is opened and need a few seconds to boot.
pub const WARM_UP_STEPS: u32 = 5;

pub const WARM_UP_STEP: Duration = Duration::from_secs(1);
