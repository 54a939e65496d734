//! Ranking and rate normalization over computed deltas.

use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use std::collections::HashMap;

/// The device table is always capped at this many rows, independent of the
/// user-configurable process limit.
pub const DEVICE_LIMIT: usize = 10;

/// Sort processes by storage-level bytes moved (read_bytes + write_bytes),
/// busiest first, and keep the top `limit`. The sort is stable, so equal
/// scores keep their snapshot order.
pub fn top_processes(mut deltas: Vec<ProcessIo>, limit: usize) -> Vec<ProcessIo> {
    deltas.sort_by(|a, b| b.total_bytes().cmp(&a.total_bytes()));
    deltas.truncate(limit);
    deltas
}

/// Sort devices by sectors moved, busiest first, capped at [`DEVICE_LIMIT`].
/// A map has no input order to be stable against, so ties fall back to the
/// device name to keep the report deterministic.
pub fn top_devices(devices: HashMap<String, DeviceIo>) -> Vec<DeviceIo> {
    let mut ranked: Vec<DeviceIo> = devices.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_sectors()
            .cmp(&a.total_sectors())
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(DEVICE_LIMIT);
    ranked
}

/// Normalize a delta count to a per-second rate. With no sampling window
/// (zero or unknown) the raw count passes through unconverted.
pub fn per_second(count: u64, window_secs: f64) -> f64 {
    if window_secs > 0.0 {
        count as f64 / window_secs
    } else {
        count as f64
    }
}
