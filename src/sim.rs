//! Test doubles shared by the unit tests: a recording [`Bus`], a register-file I2C device, and
//! control lines and a delay that log into the same event list so ordering can be checked.
extern crate std;

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};

use crate::bus::Bus;
use crate::preamble::Preamble;
use crate::reset::ControlLine;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Transmit {
        preamble: Vec<u8>,
        ctrl_mask: u16,
        payload: Vec<u8>,
    },
    Receive {
        preamble: Vec<u8>,
        ctrl_mask: u16,
        length: usize,
    },
    I2cWrite {
        address: u8,
        bytes: Vec<u8>,
    },
    I2cRead {
        address: u8,
        register: Vec<u8>,
    },
    Line {
        line: ControlLine,
        high: bool,
    },
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Records preambles as built by the transport.
pub struct RecordingBus {
    log: Log,
    responses: VecDeque<u8>,
    transmits: usize,
    fail_transmits: Vec<usize>,
    fail_next: bool,
}

impl RecordingBus {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            responses: VecDeque::new(),
            transmits: 0,
            fail_transmits: Vec::new(),
            fail_next: false,
        }
    }

    /// Bytes handed out by later receives; zero once exhausted.
    pub fn respond_with(&mut self, bytes: &[u8]) {
        self.responses.extend(bytes.iter().copied());
    }

    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Fails the `index`th transmit (counting from zero).
    pub fn fail_transmit(&mut self, index: usize) {
        self.fail_transmits.push(index);
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn outcome(&mut self) -> Result<(), ErrorKind> {
        if core::mem::take(&mut self.fail_next) {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

impl Bus for RecordingBus {
    type Error = ErrorKind;

    fn transmit(&mut self, preamble: &Preamble, payload: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Transmit {
            preamble: preamble.bytes().to_vec(),
            ctrl_mask: preamble.ctrl_mask(),
            payload: payload.to_vec(),
        });
        let index = self.transmits;
        self.transmits += 1;
        if self.fail_transmits.contains(&index) {
            return Err(ErrorKind::Other);
        }
        self.outcome()
    }

    fn receive(&mut self, preamble: &Preamble, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Receive {
            preamble: preamble.bytes().to_vec(),
            ctrl_mask: preamble.ctrl_mask(),
            length: buffer.len(),
        });
        self.outcome()?;
        for byte in buffer.iter_mut() {
            *byte = self.responses.pop_front().unwrap_or(0);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SimState {
    registers: BTreeMap<(u8, u16), u8>,
    nack: Vec<u8>,
    fail_writes: Vec<usize>,
    writes: usize,
}

/// An I2C bus with register-file devices behind it.  Registers start at zero, writes stick and
/// reads return what was last written, with the register pointer auto-incrementing.
#[derive(Clone)]
pub struct SimI2c {
    log: Log,
    state: Rc<RefCell<SimState>>,
    register_width: usize,
}

impl SimI2c {
    pub fn new(log: Log, register_width: usize) -> Self {
        Self {
            log,
            state: Rc::new(RefCell::new(SimState::default())),
            register_width,
        }
    }

    /// NACK every transaction addressed to the 7-bit `address`.
    pub fn nack(&self, address: u8) {
        self.state.borrow_mut().nack.push(address);
    }

    /// Fail the `index`th plain write transaction (counting from zero).  The write is still
    /// recorded but does not reach the register file.
    pub fn fail_write(&self, index: usize) {
        self.state.borrow_mut().fail_writes.push(index);
    }

    pub fn register(&self, address: u8, register: u16) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_register(&self, address: u8, register: u16, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((address, register), value);
    }

    fn pointer(&self, bytes: &[u8]) -> u16 {
        bytes[..self.register_width]
            .iter()
            .fold(0, |pointer, byte| (pointer << 8) | u16::from(*byte))
    }
}

impl i2c::ErrorType for SimI2c {
    type Error = ErrorKind;
}

impl I2c for SimI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let reads = operations
            .iter()
            .any(|operation| matches!(operation, Operation::Read(_)));
        let written: Vec<u8> = operations
            .iter()
            .filter_map(|operation| match operation {
                Operation::Write(bytes) => Some(bytes.to_vec()),
                Operation::Read(_) => None,
            })
            .flatten()
            .collect();

        if reads {
            self.log.borrow_mut().push(Event::I2cRead {
                address,
                register: written.clone(),
            });
        } else {
            self.log.borrow_mut().push(Event::I2cWrite {
                address,
                bytes: written.clone(),
            });
        }

        let mut state = self.state.borrow_mut();
        let failed = if reads {
            false
        } else {
            let index = state.writes;
            state.writes += 1;
            state.fail_writes.contains(&index)
        };
        if state.nack.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if failed {
            return Err(ErrorKind::Other);
        }
        if !written.is_empty() && written.len() < self.register_width {
            return Err(ErrorKind::Other);
        }

        let mut pointer = if written.is_empty() {
            0
        } else {
            self.pointer(&written)
        };
        for byte in written.iter().skip(self.register_width) {
            state.registers.insert((address, pointer), *byte);
            pointer = pointer.wrapping_add(1);
        }
        for operation in operations.iter_mut() {
            if let Operation::Read(buffer) = operation {
                for byte in buffer.iter_mut() {
                    *byte = state
                        .registers
                        .get(&(address, pointer))
                        .copied()
                        .unwrap_or(0);
                    pointer = pointer.wrapping_add(1);
                }
            }
        }
        Ok(())
    }
}

pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// A control line that logs every level it is driven to.  A failing line logs nothing.
pub struct RecordingLine {
    line: ControlLine,
    log: Log,
    fail: bool,
}

impl RecordingLine {
    pub fn new(line: ControlLine, log: Log) -> Self {
        Self {
            line,
            log,
            fail: false,
        }
    }

    pub fn failing(line: ControlLine, log: Log) -> Self {
        Self {
            line,
            log,
            fail: true,
        }
    }

    fn drive(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::Line {
            line: self.line,
            high,
        });
        Ok(())
    }
}

impl digital::ErrorType for RecordingLine {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}
