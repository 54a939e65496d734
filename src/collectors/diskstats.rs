use crate::collectors::CollectError;
use crate::models::device::DeviceIo;
use crate::models::{Counter, Gauge};
use log::debug;
use std::collections::HashMap;
use std::fs;

const DISKSTATS: &str = "/proc/diskstats";

/// Read /proc/diskstats into a map of device name → snapshot.
///
/// `exclude` holds glob-lite patterns from config ("loop*" or exact names);
/// matching devices are dropped here so they never enter a snapshot.
pub fn read_all(exclude: &[String]) -> Result<HashMap<String, DeviceIo>, CollectError> {
    let text = fs::read_to_string(DISKSTATS).map_err(|e| CollectError::from_io(DISKSTATS, e))?;
    let devices = parse_diskstats(&text, exclude);
    debug!("device snapshot: {} entries", devices.len());
    Ok(devices)
}

/// Parse diskstats text. A record with fewer than 14 whitespace-separated
/// fields, or any field that fails integer parsing, is skipped whole — no
/// record is ever half-populated.
fn parse_diskstats(text: &str, exclude: &[String]) -> HashMap<String, DeviceIo> {
    let mut devices = HashMap::new();
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 14 {
            continue;
        }
        let name = fields[2];
        if exclude.iter().any(|pat| matches_pattern(name, pat)) {
            continue;
        }
        if let Some(dev) = parse_record(name, &fields) {
            devices.insert(name.to_string(), dev);
        }
    }
    devices
}

fn parse_record(name: &str, fields: &[&str]) -> Option<DeviceIo> {
    Some(DeviceIo {
        name:  name.to_string(),
        major: fields[0].parse().ok()?,
        minor: fields[1].parse().ok()?,

        reads:         Counter::new(fields[3].parse().ok()?),
        read_merges:   Counter::new(fields[4].parse().ok()?),
        read_sectors:  Counter::new(fields[5].parse().ok()?),
        read_time_ms:  Counter::new(fields[6].parse().ok()?),
        writes:        Counter::new(fields[7].parse().ok()?),
        write_merges:  Counter::new(fields[8].parse().ok()?),
        write_sectors: Counter::new(fields[9].parse().ok()?),
        write_time_ms: Counter::new(fields[10].parse().ok()?),
        in_flight:     Gauge::new(fields[11].parse().ok()?),
        io_time_ms:          Counter::new(fields[12].parse().ok()?),
        weighted_io_time_ms: Counter::new(fields[13].parse().ok()?),
    })
}

/// "loop*" matches any name with that prefix; anything else matches exactly.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}
