//! Snapshot differencing.
//!
//! Takes two point-in-time counter snapshots and produces one collection of
//! deltas: one entry per entity present in the *later* snapshot, each
//! monotonic counter clamped to a non-negative change. Entities that
//! appeared between the snapshots report their later values verbatim;
//! entities that disappeared are dropped entirely, so activity from a
//! process that exited mid-window is not reported.

use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use std::collections::HashMap;

/// Diff two process snapshots, keyed by pid.
///
/// Pure function over in-memory data; neither input is mutated. The result
/// never holds a pid absent from `after`, and every counter field is ≥ 0.
pub fn process_deltas(before: &[ProcessIo], after: &[ProcessIo]) -> Vec<ProcessIo> {
    let earlier: HashMap<u32, &ProcessIo> = before.iter().map(|p| (p.pid, p)).collect();

    after
        .iter()
        .map(|cur| match earlier.get(&cur.pid) {
            Some(prev) => cur.delta_since(prev),
            // Appeared during the window — the cumulative values are the delta.
            None => cur.clone(),
        })
        .collect()
}

/// Diff two device snapshots, keyed by device name.
///
/// Same contract as [`process_deltas`]; the in-flight gauge is carried from
/// `after`, never subtracted.
pub fn device_deltas(
    before: &HashMap<String, DeviceIo>,
    after: &HashMap<String, DeviceIo>,
) -> HashMap<String, DeviceIo> {
    after
        .iter()
        .map(|(name, cur)| {
            let delta = match before.get(name) {
                Some(prev) => cur.delta_since(prev),
                None => cur.clone(),
            };
            (name.clone(), delta)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Counter, Gauge};

    fn proc_io(pid: u32, rb: u64, wb: u64) -> ProcessIo {
        ProcessIo {
            pid,
            comm:    format!("p{}", pid),
            command: String::new(),
            rchar:       Counter::new(rb.saturating_add(10)),
            wchar:       Counter::new(wb.saturating_add(10)),
            read_bytes:  Counter::new(rb),
            write_bytes: Counter::new(wb),
            syscr:       Counter::new(rb / 100),
            syscw:       Counter::new(wb / 100),
        }
    }

    fn dev_io(name: &str, rs: u64, ws: u64, in_flight: u64) -> DeviceIo {
        DeviceIo {
            name:  name.to_string(),
            major: 8,
            minor: 0,
            reads:         Counter::new(rs / 8),
            read_merges:   Counter::new(0),
            read_sectors:  Counter::new(rs),
            read_time_ms:  Counter::new(rs / 10),
            writes:        Counter::new(ws / 8),
            write_merges:  Counter::new(0),
            write_sectors: Counter::new(ws),
            write_time_ms: Counter::new(ws / 10),
            in_flight:     Gauge::new(in_flight),
            io_time_ms:          Counter::new(5),
            weighted_io_time_ms: Counter::new(6),
        }
    }

    #[test]
    fn deltas_for_survivors_and_newcomers() {
        let before = vec![proc_io(1, 1000, 0)];
        let after = vec![proc_io(1, 1500, 0), proc_io(2, 200, 0)];

        let deltas = process_deltas(&before, &after);
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].pid, 1);
        assert_eq!(deltas[0].read_bytes.get(), 500);
        // pid 2 appeared mid-window: identity delta.
        assert_eq!(deltas[1].pid, 2);
        assert_eq!(deltas[1].read_bytes.get(), 200);
    }

    #[test]
    fn exited_processes_are_dropped() {
        let before = vec![proc_io(1, 1000, 0), proc_io(2, 9_999_999, 0)];
        let after = vec![proc_io(1, 1200, 0)];

        let deltas = process_deltas(&before, &after);
        assert_eq!(deltas.len(), 1);
        assert!(deltas.iter().all(|d| d.pid != 2));
    }

    #[test]
    fn counter_reset_clamps_to_zero() {
        let before = vec![proc_io(1, 5000, 400)];
        let after = vec![proc_io(1, 3000, 600)];

        let deltas = process_deltas(&before, &after);
        assert_eq!(deltas[0].read_bytes.get(), 0);
        // Only the wrapped field clamps; the others still report real change.
        assert_eq!(deltas[0].write_bytes.get(), 200);
    }

    #[test]
    fn every_field_is_non_negative_under_adversarial_input() {
        let before = vec![proc_io(3, u64::MAX, u64::MAX)];
        let after = vec![proc_io(3, 0, 0)];

        let d = &process_deltas(&before, &after)[0];
        assert_eq!(d.rchar.get(), 0);
        assert_eq!(d.wchar.get(), 0);
        assert_eq!(d.read_bytes.get(), 0);
        assert_eq!(d.write_bytes.get(), 0);
        assert_eq!(d.syscr.get(), 0);
        assert_eq!(d.syscw.get(), 0);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let before = vec![proc_io(1, 1000, 0)];
        let after = vec![proc_io(1, 1500, 0)];
        let before_copy = before.clone();
        let after_copy = after.clone();

        let _ = process_deltas(&before, &after);
        assert_eq!(before, before_copy);
        assert_eq!(after, after_copy);
    }

    #[test]
    fn new_device_yields_identity_delta() {
        let before = HashMap::new();
        let mut after = HashMap::new();
        after.insert("sda".to_string(), dev_io("sda", 100, 50, 2));

        let deltas = device_deltas(&before, &after);
        let sda = &deltas["sda"];
        assert_eq!(sda.read_sectors.get(), 100);
        assert_eq!(sda.write_sectors.get(), 50);
        assert_eq!(sda.total_sectors() * 512, 76_800);
    }

    #[test]
    fn unplugged_device_is_dropped_and_gauge_passes_through() {
        let mut before = HashMap::new();
        before.insert("sda".to_string(), dev_io("sda", 800, 800, 7));
        before.insert("sdb".to_string(), dev_io("sdb", 10, 10, 0));
        let mut after = HashMap::new();
        after.insert("sda".to_string(), dev_io("sda", 1000, 900, 4));

        let deltas = device_deltas(&before, &after);
        assert_eq!(deltas.len(), 1);
        assert!(!deltas.contains_key("sdb"));
        assert_eq!(deltas["sda"].read_sectors.get(), 200);
        assert_eq!(deltas["sda"].in_flight.get(), 4);
    }
}
