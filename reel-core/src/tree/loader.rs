use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use super::media_tree::MediaTree;
use crate::error::{ReelError, Result};
use crate::indexer::{IndexStats, LoadMessage};

/// Handle on a running warm-up scan
///
/// Messages arrive on [`LoadTask::receiver`]; the channel closes after the
/// single [`LoadMessage::Completed`].
#[derive(Debug)]
pub struct LoadTask {
    rx: Receiver<LoadMessage>,
    handle: JoinHandle<IndexStats>,
}

impl LoadTask {
    pub fn receiver(&self) -> &Receiver<LoadMessage> {
        &self.rx
    }

    /// Next pending message, without blocking
    pub fn try_recv(&self) -> Option<LoadMessage> {
        self.rx.try_recv().ok()
    }

    /// Block until the warm-up is done and return the final counts
    pub fn wait(self) -> Result<IndexStats> {
        self.handle.join().map_err(|_| ReelError::WarmupPanicked)
    }
}

/// Spawn the warm-up thread plus a heartbeat publishing progress
pub(super) fn spawn(tree: MediaTree, progress_interval: Duration) -> LoadTask {
    let (tx, rx) = crossbeam_channel::unbounded();

    let handle = std::thread::spawn(move || {
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let heartbeat = {
            let tree = tree.clone();
            let tx = tx.clone();
            std::thread::spawn(move || heartbeat(&tree, &tx, &done_rx, progress_interval))
        };

        let stats = tree.warm_up(&tx);

        // Stop heartbeat thread
        drop(done_tx);
        let _ = heartbeat.join();

        let _ = tx.send(LoadMessage::Completed(stats.clone()));
        stats
    });

    LoadTask { rx, handle }
}

fn heartbeat(
    tree: &MediaTree,
    tx: &Sender<LoadMessage>,
    done_rx: &Receiver<()>,
    interval: Duration,
) {
    // Runs until the done channel is dropped
    while let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(interval) {
        if tx.send(LoadMessage::Progress(tree.stats())).is_err() {
            break;
        }
    }
}
