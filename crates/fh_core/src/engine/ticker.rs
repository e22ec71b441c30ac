//! The match ticker: a cancellable scheduled task driving the clock.
//!
//! The core itself never sleeps; `MatchState::tick` is an ordinary input.
//! This module owns the one autonomous piece, a background thread that
//! applies a tick through the shared handle once per interval. The sleep
//! is an mpsc `recv_timeout`, so a stop request that lands mid-sleep wins
//! the race: the thread wakes on the message and exits without ticking.
//! `stop` joins the thread, so no tick can be applied after it returns.

use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::state::SharedMatch;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct MatchTicker {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl MatchTicker {
    /// Spawn the tick thread. `interval` is injectable so tests never wait
    /// on the wall clock; production callers pass [`TICK_INTERVAL`].
    pub fn spawn(shared: SharedMatch, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel();
        let thread = thread::spawn(move || {
            debug!("ticker started");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let Ok(mut slot) = shared.write() else { break };
                        if let Some(state) = slot.as_mut() {
                            state.tick();
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("ticker stopped");
        });
        Self { stop_tx, thread: Some(thread) }
    }

    /// Cancel the ticker. Synchronous: when this returns the thread has
    /// exited and no further tick will be applied.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MatchTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
