use crate::models::{Counter, Gauge};

/// Kernel sector unit used by /proc/diskstats sector counters.
pub const SECTOR_BYTES: u64 = 512;

/// Cumulative I/O counters for one block device — one /proc/diskstats line.
///
/// Field order mirrors the diskstats record. Every field is a monotonic
/// counter except `in_flight`, which is a gauge: it reads the current queue
/// and is carried through a delta untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIo {
    pub name:  String,
    pub major: u32,
    pub minor: u32,

    pub reads:         Counter,
    pub read_merges:   Counter,
    pub read_sectors:  Counter,
    pub read_time_ms:  Counter,
    pub writes:        Counter,
    pub write_merges:  Counter,
    pub write_sectors: Counter,
    pub write_time_ms: Counter,
    pub in_flight:     Gauge,
    pub io_time_ms:          Counter,
    pub weighted_io_time_ms: Counter,
}

impl DeviceIo {
    pub fn read_bytes(&self) -> u64 {
        self.read_sectors.get() * SECTOR_BYTES
    }

    pub fn write_bytes(&self) -> u64 {
        self.write_sectors.get() * SECTOR_BYTES
    }

    /// Activity score used for ranking devices.
    pub fn total_sectors(&self) -> u64 {
        self.read_sectors.get() + self.write_sectors.get()
    }

    /// Counter-wise change since an earlier snapshot of the same device.
    /// Identity fields and the in-flight gauge come from `self`.
    pub fn delta_since(&self, before: &DeviceIo) -> DeviceIo {
        DeviceIo {
            name:  self.name.clone(),
            major: self.major,
            minor: self.minor,

            reads:         self.reads.delta_since(before.reads),
            read_merges:   self.read_merges.delta_since(before.read_merges),
            read_sectors:  self.read_sectors.delta_since(before.read_sectors),
            read_time_ms:  self.read_time_ms.delta_since(before.read_time_ms),
            writes:        self.writes.delta_since(before.writes),
            write_merges:  self.write_merges.delta_since(before.write_merges),
            write_sectors: self.write_sectors.delta_since(before.write_sectors),
            write_time_ms: self.write_time_ms.delta_since(before.write_time_ms),
            in_flight:     self.in_flight,
            io_time_ms:          self.io_time_ms.delta_since(before.io_time_ms),
            weighted_io_time_ms: self.weighted_io_time_ms.delta_since(before.weighted_io_time_ms),
        }
    }
}
