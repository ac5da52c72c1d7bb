pub mod link;

pub use self::link::*;

use chrono::{Datelike, NaiveDateTime, Timelike};
use core::fmt;

/// Commands understood by the clock firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the calendar date and the wall clock time.
    SetDateTime(NaiveDateTime),

    /// Apply a microsecond correction.
    SetMicroseconds(u64),
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Command::SetDateTime(_) => "date/time",
            Command::SetMicroseconds(_) => "microseconds",
        }
    }

    /// Encode the command as transmitted on the wire.
    ///
    /// Characters outside of 7-bit ASCII are dropped.
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().bytes().filter(u8::is_ascii).collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;
        match self {
            SetDateTime(ts) => write!(
                f,
                "D {:04} {:02} {:02} C {:02} {:02} {:02} ",
                ts.year(),
                ts.month(),
                ts.day(),
                ts.hour(),
                ts.minute(),
                ts.second()
            ),
            SetMicroseconds(us) => write!(f, "A {} ", us),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn encode_date_time() {
        assert_eq!(
            b"D 2018 03 07 C 09 05 01 ".to_vec(),
            Command::SetDateTime(ts(2018, 3, 7, 9, 5, 1)).encode()
        );
        assert_eq!(
            b"D 1999 12 31 C 23 59 59 ".to_vec(),
            Command::SetDateTime(ts(1999, 12, 31, 23, 59, 59)).encode()
        );
    }

    #[test]
    fn encode_microseconds() {
        assert_eq!(b"A 0 ".to_vec(), Command::SetMicroseconds(0).encode());
        assert_eq!(
            b"A 123456 ".to_vec(),
            Command::SetMicroseconds(123_456).encode()
        );
    }

    #[test]
    fn encoded_date_time_is_fixed_width() {
        let cmd = Command::SetDateTime(ts(2024, 1, 1, 0, 0, 0));
        let encoded = cmd.encode();
        assert_eq!(24, encoded.len());
        assert!(encoded.iter().all(u8::is_ascii));
        assert_eq!(b' ', *encoded.last().unwrap());
    }
}
