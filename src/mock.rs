use super::*;

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    io::{self, Write},
    rc::Rc,
};

/// Simulated wall clock that only advances when a delay is requested.
#[derive(Clone, Debug)]
pub struct Timeline {
    now: Rc<Cell<NaiveDateTime>>,
}

impl Timeline {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        self.now.set(self.now.get() + step);
    }
}

impl Clock for Timeline {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl Delay for Timeline {
    fn delay(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Everything that happened on the mock link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub opened: Vec<(String, u32)>,
    pub opened_at: Vec<NaiveDateTime>,
    pub writes: Vec<(NaiveDateTime, Vec<u8>)>,
}

impl Record {
    /// All bytes written so far, in order.
    pub fn bytes(&self) -> Vec<u8> {
        self.writes
            .iter()
            .flat_map(|(_, chunk)| chunk.iter().copied())
            .collect()
    }
}

pub struct MockConnector {
    timeline: Timeline,
    unavailable: HashSet<String>,
    fail_after: Option<usize>,
    record: Rc<RefCell<Record>>,
}

impl MockConnector {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            unavailable: HashSet::new(),
            fail_after: None,
            record: Default::default(),
        }
    }

    /// Opening `port` fails as if the device was absent.
    pub fn unavailable(mut self, port: impl Into<String>) -> Self {
        self.unavailable.insert(port.into());
        self
    }

    /// Writes fail once `count` bytes have been accepted.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn record(&self) -> Rc<RefCell<Record>> {
        Rc::clone(&self.record)
    }
}

impl Connector for MockConnector {
    type Port = MockPort;

    fn open(&mut self, port: &str, baud_rate: u32) -> io::Result<MockPort> {
        if self.unavailable.contains(port) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such device: {}", port),
            ));
        }
        let mut record = self.record.borrow_mut();
        record.opened.push((port.to_owned(), baud_rate));
        record.opened_at.push(self.timeline.now());
        Ok(MockPort {
            timeline: self.timeline.clone(),
            remaining: self.fail_after,
            record: Rc::clone(&self.record),
        })
    }
}

pub struct MockPort {
    timeline: Timeline,
    remaining: Option<usize>,
    record: Rc<RefCell<Record>>,
}

impl Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = match self.remaining {
            Some(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "Device disconnected",
                ))
            }
            Some(remaining) => buf.len().min(remaining),
            None => buf.len(),
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= len;
        }
        self.record
            .borrow_mut()
            .writes
            .push((self.timeline.now(), buf[..len].to_vec()));
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
