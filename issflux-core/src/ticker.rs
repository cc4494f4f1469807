//! Pace loop iterations with a cancellable tick source.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::debug;

/// Delay between polls unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Decide when the next loop iteration may start.
pub trait Ticker {
    /// Block until the next iteration is due.
    ///
    /// Returns `false` once the ticker has been cancelled; the caller should
    /// stop looping.
    fn tick(&mut self) -> bool;
}

impl<T: Ticker + ?Sized> Ticker for &mut T {
    fn tick(&mut self) -> bool {
        (**self).tick()
    }
}

/// Fixed-interval ticker that can be stopped from another thread.
///
/// Waiting is a timed receive on a channel, so a stop request interrupts the
/// current wait instead of running out the interval. Dropping every
/// [`StopHandle`] also cancels the ticker.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    stop: Receiver<()>,
    stopped: bool,
}

/// Cancels the [`IntervalTicker`] it was created with.
#[derive(Debug, Clone)]
pub struct StopHandle(Sender<()>);

impl StopHandle {
    /// Request the ticker to stop at its next wait.
    pub fn stop(&self) {
        if self.0.send(()).is_err() {
            debug!("stop requested after ticker was dropped");
        }
    }
}

impl IntervalTicker {
    /// Create a ticker that fires every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> (Self, StopHandle) {
        let (sender, receiver) = mpsc::channel();
        let ticker = Self {
            interval,
            stop: receiver,
            stopped: false,
        };
        (ticker, StopHandle(sender))
    }

    /// Configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        match self.stop.recv_timeout(self.interval) {
            Err(RecvTimeoutError::Timeout) => true,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                self.stopped = true;
                false
            }
        }
    }
}
