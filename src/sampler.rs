//! Two-snapshot sampling over a fixed window.

use crate::collectors::{diskstats, process_io, CollectError};
use crate::delta;
use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// Delta collections from one completed sampling window.
pub struct Sample {
    pub processes: Vec<ProcessIo>,
    pub devices:   HashMap<String, DeviceIo>,
}

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// SIGINT arrived during the wait. Reported separately from failures so
    /// the caller can exit with the conventional interrupted status (130).
    #[error("interrupted during sampling")]
    Interrupted,

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Snapshot processes and devices, wait out the window, snapshot again, and
/// return the deltas. No retries: a collection failure at either end is the
/// failure of the whole observation window.
///
/// The caller guarantees a positive window; the zero-duration single-shot
/// mode never enters here.
pub fn sample_over_window(
    window: Duration,
    exclude: &[String],
) -> Result<Sample, SampleError> {
    let (tx, interrupt) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;

    let before_processes = process_io::read_all()?;
    let before_devices = diskstats::read_all(exclude)?;

    match interrupt.recv_timeout(window) {
        Ok(()) => return Err(SampleError::Interrupted),
        Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
    }

    let after_processes = process_io::read_all()?;
    let after_devices = diskstats::read_all(exclude)?;

    Ok(Sample {
        processes: delta::process_deltas(&before_processes, &after_processes),
        devices:   delta::device_deltas(&before_devices, &after_devices),
    })
}
