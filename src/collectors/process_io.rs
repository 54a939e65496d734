use crate::collectors::CollectError;
use crate::models::process::ProcessIo;
use crate::models::Counter;
use log::debug;
use std::fs;

/// Longest command string kept for display; longer ones are cut to 57
/// characters plus an ellipsis marker.
const COMMAND_MAX: usize = 60;

/// Read /proc/<pid>/io for every process we can access.
///
/// Unreadable processes (gone between listing and reading, permission
/// denied, no io file) are skipped; one opaque pid never aborts the
/// snapshot. Only a missing or unreadable /proc itself is an error.
pub fn read_all() -> Result<Vec<ProcessIo>, CollectError> {
    let dir = fs::read_dir("/proc").map_err(|e| CollectError::from_io("/proc", e))?;

    let mut processes = Vec::new();
    for entry in dir.flatten() {
        let name = entry.file_name();
        let pid: u32 = match name.to_string_lossy().parse() {
            Ok(p) => p,
            Err(_) => continue,
        };
        if let Some(proc_io) = read_one(pid) {
            processes.push(proc_io);
        }
    }

    debug!("process snapshot: {} readable entries", processes.len());
    Ok(processes)
}

/// Read one process's counters, or None if any piece is unavailable.
fn read_one(pid: u32) -> Option<ProcessIo> {
    let io_text = fs::read_to_string(format!("/proc/{}/io", pid)).ok()?;
    let counters = parse_io_counters(&io_text);

    let comm = fs::read_to_string(format!("/proc/{}/comm", pid))
        .unwrap_or_default()
        .trim()
        .to_string();

    let command = fs::read_to_string(format!("/proc/{}/cmdline", pid))
        .map(|raw| truncate_command(first_arg(&raw)))
        .unwrap_or_default();

    Some(ProcessIo {
        pid,
        comm,
        command,
        rchar:       Counter::new(counters.rchar),
        wchar:       Counter::new(counters.wchar),
        read_bytes:  Counter::new(counters.read_bytes),
        write_bytes: Counter::new(counters.write_bytes),
        syscr:       Counter::new(counters.syscr),
        syscw:       Counter::new(counters.syscw),
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct IoCounters {
    rchar:       u64,
    wchar:       u64,
    syscr:       u64,
    syscw:       u64,
    read_bytes:  u64,
    write_bytes: u64,
}

/// Parse the "key: value" lines of /proc/<pid>/io. Unknown keys and
/// unparseable values are ignored; missing keys stay zero.
fn parse_io_counters(text: &str) -> IoCounters {
    let mut c = IoCounters::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else { continue };
        let Ok(value) = value.trim().parse::<u64>() else { continue };
        match key.trim() {
            "rchar"       => c.rchar = value,
            "wchar"       => c.wchar = value,
            "syscr"       => c.syscr = value,
            "syscw"       => c.syscw = value,
            "read_bytes"  => c.read_bytes = value,
            "write_bytes" => c.write_bytes = value,
            _ => {}
        }
    }
    c
}

/// First NUL-separated token of a /proc/<pid>/cmdline blob.
fn first_arg(raw: &str) -> &str {
    raw.trim_matches('\0').split('\0').next().unwrap_or("")
}

fn truncate_command(arg: &str) -> String {
    if arg.chars().count() > COMMAND_MAX {
        let head: String = arg.chars().take(COMMAND_MAX - 3).collect();
        format!("{}...", head)
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_six_counters() {
        let text = "rchar: 4292247\n\
                    wchar: 405670\n\
                    syscr: 10590\n\
                    syscw: 2206\n\
                    read_bytes: 8192000\n\
                    write_bytes: 409600\n\
                    cancelled_write_bytes: 0\n";
        let c = parse_io_counters(text);
        assert_eq!(c.rchar, 4_292_247);
        assert_eq!(c.wchar, 405_670);
        assert_eq!(c.syscr, 10_590);
        assert_eq!(c.syscw, 2_206);
        assert_eq!(c.read_bytes, 8_192_000);
        assert_eq!(c.write_bytes, 409_600);
    }

    #[test]
    fn garbage_lines_leave_counters_at_zero() {
        let c = parse_io_counters("read_bytes: not-a-number\nnonsense\nwchar 12\n");
        assert_eq!(c, IoCounters::default());
    }

    #[test]
    fn cmdline_takes_first_nul_token() {
        assert_eq!(first_arg("/usr/bin/rsync\0-a\0/src\0/dst\0"), "/usr/bin/rsync");
        assert_eq!(first_arg(""), "");
    }

    #[test]
    fn long_commands_are_cut_with_ellipsis() {
        let long = "x".repeat(80);
        let cut = truncate_command(&long);
        assert_eq!(cut.chars().count(), COMMAND_MAX);
        assert!(cut.ends_with("..."));

        let short = truncate_command("/usr/bin/cat");
        assert_eq!(short, "/usr/bin/cat");
    }
}
