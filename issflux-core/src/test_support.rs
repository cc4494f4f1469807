//! Deterministic test doubles for the relay traits.
//!
//! None of these perform I/O or sleep, so behaviour tests can drive the
//! pipeline one iteration at a time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::{FetchError, LineSink, Reading, ReadingSource, Ticker, WriteError};

/// `ReadingSource` that replays queued results.
///
/// Once the queue is exhausted the fallback is returned for every call.
#[derive(Debug)]
pub struct StubReadingSource {
    queue: RefCell<VecDeque<Result<Reading, FetchError>>>,
    fallback: Result<Reading, FetchError>,
    calls: Cell<usize>,
}

impl StubReadingSource {
    /// Return `reading` on every call.
    #[must_use]
    pub fn repeating(reading: Reading) -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            fallback: Ok(reading),
            calls: Cell::new(0),
        }
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn failing_with(error: FetchError) -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            fallback: Err(error),
            calls: Cell::new(0),
        }
    }

    /// Replay `results` in order, then report the source as unavailable.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<Reading, FetchError>>,
    {
        Self {
            queue: RefCell::new(results.into_iter().collect()),
            fallback: Err(FetchError::Network {
                url: "stub://exhausted".to_owned(),
                message: "no more queued readings".to_owned(),
            }),
            calls: Cell::new(0),
        }
    }

    /// Number of `fetch` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ReadingSource for StubReadingSource {
    fn fetch(&self) -> Result<Reading, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// `LineSink` that records every body it is asked to write.
#[derive(Debug, Default)]
pub struct RecordingSink {
    bodies: RefCell<Vec<String>>,
    attempts: Cell<usize>,
    failure: Option<WriteError>,
}

impl RecordingSink {
    /// Reject every write with `error` without recording the body.
    #[must_use]
    pub fn failing_with(error: WriteError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Bodies written successfully, oldest first.
    #[must_use]
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.borrow().clone()
    }

    /// Number of write calls, successful or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl LineSink for RecordingSink {
    fn write(&self, body: &str) -> Result<(), WriteError> {
        self.attempts.set(self.attempts.get() + 1);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.bodies.borrow_mut().push(body.to_owned());
        Ok(())
    }
}

/// `Ticker` that allows a fixed number of further iterations without sleeping.
#[derive(Debug, Clone, Copy)]
pub struct CountedTicker {
    remaining: usize,
}

impl CountedTicker {
    /// Permit `ticks` more iterations after the first.
    #[must_use]
    pub const fn new(ticks: usize) -> Self {
        Self { remaining: ticks }
    }
}

impl Ticker for CountedTicker {
    fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
