//! Snapshot persistence — dedicated writer thread with a bounded
//! crossbeam channel. Best-effort by contract: the cart never waits on a
//! write, and a failed write never rolls back in-memory state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use crate::store::CartState;

const CHANNEL_BOUND: usize = 64;

/// A command sent to the snapshot writer thread.
#[derive(Debug)]
pub enum PersistCommand {
    /// Write this snapshot.
    Persist(CartState),
    /// Signal completion via the provided sender once every queued
    /// snapshot has been written (used by tests and shutdown paths).
    FlushSync(SyncSender<()>),
    /// Shut down the writer thread.
    Shutdown,
}

/// Writes cart snapshots to disk on a dedicated thread.
pub struct SnapshotWriter {
    tx: Sender<PersistCommand>,
    handle: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    /// Create a writer persisting to the given path.
    pub fn new(path: PathBuf) -> Self {
        let (tx, rx) = bounded(CHANNEL_BOUND);

        let handle = thread::Builder::new()
            .name("cart-snapshot-writer".to_string())
            .spawn(move || writer_loop(&path, &rx))
            .expect("failed to spawn snapshot writer thread");

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot, fire-and-forget. A full or disconnected channel
    /// drops the snapshot; a later mutation will persist a newer one.
    pub fn persist(&self, snapshot: CartState) {
        match self.tx.try_send(PersistCommand::Persist(snapshot)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("cart snapshot dropped: writer queue full"),
            Err(TrySendError::Disconnected(_)) => {
                warn!("cart snapshot dropped: writer thread gone");
            }
        }
    }

    /// Block until every queued snapshot has been written.
    pub fn flush_sync(&self) {
        let (tx, rx) = std::sync::mpsc::sync_channel(0);
        if self.tx.send(PersistCommand::FlushSync(tx)).is_ok() {
            let _ = rx.recv();
        }
    }

    /// Shut down the writer thread and wait for completion.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(PersistCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        // Signal shutdown if not already done
        let _ = self.tx.send(PersistCommand::Shutdown);
    }
}

fn writer_loop(path: &Path, rx: &Receiver<PersistCommand>) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            PersistCommand::Persist(state) => {
                if let Err(e) = write_snapshot(path, &state) {
                    warn!("failed to persist cart snapshot: {e}");
                }
            }
            PersistCommand::FlushSync(done_tx) => {
                let _ = done_tx.send(());
            }
            PersistCommand::Shutdown => break,
        }
    }
}

/// Serialize and write atomically: temp file in the same directory, then
/// rename over the target.
fn write_snapshot(path: &Path, state: &CartState) -> std::io::Result<()> {
    let json = serde_json::to_string(state)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;

    debug!("cart snapshot persisted to {}", path.display());
    Ok(())
}

/// Load the snapshot written by a previous run. A missing or unreadable
/// file yields the empty initial state — the cart starts fresh rather
/// than failing startup.
pub fn load_snapshot(path: &Path) -> CartState {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CartState::default(),
        Err(e) => {
            warn!("failed to read cart snapshot: {e}");
            return CartState::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("failed to parse cart snapshot, starting empty: {e}");
            CartState::default()
        }
    }
}
