use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};

use super::{ListingCache, purge_expired};

/// Background thread purging expired listings on a fixed interval
#[derive(Debug)]
pub(super) struct Sweeper {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub(super) fn spawn(listings: ListingCache, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let handle = std::thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        purge_expired(&listings);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self { stop_tx, handle }
    }

    /// Signal the thread and wait for it to exit
    pub(super) fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}
