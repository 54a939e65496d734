use crate::models::Counter;

/// Cumulative I/O counters for one process, as read from /proc/<pid>/io.
///
/// Built once per snapshot and never mutated; a delta is a new value of the
/// same shape, not an update in place. A pid may belong to a different
/// process in two snapshots taken far apart — matching pids are treated as
/// the same logical entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIo {
    pub pid:     u32,
    /// Short name from /proc/<pid>/comm; may be empty.
    pub comm:    String,
    /// First token of /proc/<pid>/cmdline, truncated for display.
    pub command: String,

    pub rchar:       Counter,
    pub wchar:       Counter,
    pub read_bytes:  Counter,
    pub write_bytes: Counter,
    pub syscr:       Counter,
    pub syscw:       Counter,
}

impl ProcessIo {
    /// Storage-level bytes moved (not the rchar/wchar syscall-buffer view).
    pub fn total_bytes(&self) -> u64 {
        self.read_bytes.get() + self.write_bytes.get()
    }

    /// Counter-wise change since an earlier snapshot of the same pid.
    /// Identity fields come from `self` (the later reading).
    pub fn delta_since(&self, before: &ProcessIo) -> ProcessIo {
        ProcessIo {
            pid:     self.pid,
            comm:    self.comm.clone(),
            command: self.command.clone(),

            rchar:       self.rchar.delta_since(before.rchar),
            wchar:       self.wchar.delta_since(before.wchar),
            read_bytes:  self.read_bytes.delta_since(before.read_bytes),
            write_bytes: self.write_bytes.delta_since(before.write_bytes),
            syscr:       self.syscr.delta_since(before.syscr),
            syscw:       self.syscw.delta_since(before.syscw),
        }
    }
}
