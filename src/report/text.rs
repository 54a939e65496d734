use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use crate::rank::per_second;
use crate::report::{summary, ReportOptions};
use crate::util::human::{fmt_bytes, fmt_bytes_raw, fmt_rate};
use colored::Colorize;

/// Color helpers gated on one explicit enabled flag.
struct Palette {
    enabled: bool,
}

impl Palette {
    fn header(&self, s: &str) -> String {
        if self.enabled { s.cyan().bold().to_string() } else { s.to_string() }
    }

    fn table_head(&self, s: &str) -> String {
        if self.enabled { s.blue().bold().to_string() } else { s.to_string() }
    }

    fn pid(&self, s: &str) -> String {
        if self.enabled { s.green().bold().to_string() } else { s.to_string() }
    }

    fn device(&self, s: &str) -> String {
        if self.enabled { s.cyan().to_string() } else { s.to_string() }
    }

    fn diagnosis(&self, s: &str) -> String {
        if self.enabled { s.yellow().bold().to_string() } else { s.to_string() }
    }
}

/// Render the full text report: header, top-process table, optional device
/// table, diagnosis summary.
pub fn render(processes: &[ProcessIo], devices: &[DeviceIo], opts: &ReportOptions) -> String {
    let palette = Palette { enabled: opts.color };
    let mut out = String::new();

    out.push_str(&format!("{}\n", palette.header("=== I/O Activity Analysis ===")));
    match opts.duration {
        Some(d) if d > 0.0 => {
            out.push_str(&format!("Sampling window: {:.1} seconds\n", d));
            out.push_str("(Values are deltas over the sampling window)\n");
        }
        _ => out.push_str("(Values are cumulative since process start)\n"),
    }
    out.push('\n');

    if processes.is_empty() {
        out.push_str("No process I/O statistics available.\n");
        return out;
    }

    out.push_str(&format!("Top {} processes by I/O:\n\n", processes.len()));

    let head = format!(
        "{:<8} {:<20} {:<25} {:<25} {:<12} {:<12}",
        "PID", "Process", "Read", "Write", "Read Ops", "Write Ops"
    );
    out.push_str(&format!("{}\n", palette.table_head(&head)));
    out.push_str(&format!("{}\n", "-".repeat(head.len())));

    for proc in processes {
        out.push_str(&format!(
            "{} {:<20} {:<25} {:<25} {:<12} {:<12}\n",
            palette.pid(&format!("{:<8}", proc.pid)),
            display_name(&proc.comm),
            fmt_bytes_raw(proc.read_bytes.get()),
            fmt_bytes_raw(proc.write_bytes.get()),
            proc.syscr.get(),
            proc.syscw.get(),
        ));
    }
    out.push('\n');

    if opts.by_device && !devices.is_empty() {
        render_devices(&mut out, devices, opts, &palette);
    }

    out.push_str("Summary:\n\n");
    out.push_str(&format!(
        "{}\n",
        palette.diagnosis(&summary(processes, devices, opts.duration))
    ));

    out
}

fn render_devices(out: &mut String, devices: &[DeviceIo], opts: &ReportOptions, palette: &Palette) {
    out.push_str("Device I/O Statistics:\n\n");

    let head = format!(
        "{:<15} {:<12} {:<12} {:<15} {:<15}",
        "Device", "Reads", "Writes", "Read", "Write"
    );
    out.push_str(&format!("{}\n", palette.table_head(&head)));
    out.push_str(&format!("{}\n", "-".repeat(head.len())));

    let window = opts.window();
    for dev in devices {
        let (reads, writes, read_vol, write_vol) = if window > 0.0 {
            (
                format!("{:.1}/s", per_second(dev.reads.get(), window)),
                format!("{:.1}/s", per_second(dev.writes.get(), window)),
                fmt_rate(per_second(dev.read_bytes(), window)),
                fmt_rate(per_second(dev.write_bytes(), window)),
            )
        } else {
            (
                dev.reads.get().to_string(),
                dev.writes.get().to_string(),
                fmt_bytes(dev.read_bytes()),
                fmt_bytes(dev.write_bytes()),
            )
        };
        out.push_str(&format!(
            "{} {:<12} {:<12} {:<15} {:<15}\n",
            palette.device(&format!("{:<15}", dev.name)),
            reads,
            writes,
            read_vol,
            write_vol,
        ));
    }
    out.push('\n');
}

/// Column-width trim for the process name, ellipsized past 18 characters.
fn display_name(comm: &str) -> String {
    if comm.chars().count() <= 18 {
        comm.to_string()
    } else {
        let head: String = comm.chars().take(15).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{dev_io, proc_io};

    fn opts(duration: Option<f64>, by_device: bool) -> ReportOptions {
        ReportOptions { duration, by_device, color: false }
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let procs = vec![proc_io(1, "rsync", 1024, 2048)];
        let devs = vec![dev_io("sda", 100, 50)];
        let text = render(&procs, &devs, &opts(Some(2.0), true));
        assert!(!text.contains("\x1b["));
        assert!(text.contains("rsync"));
        assert!(text.contains("Sampling window: 2.0 seconds"));
    }

    #[test]
    fn cumulative_mode_says_so() {
        let procs = vec![proc_io(1, "cat", 10, 0)];
        let text = render(&procs, &[], &opts(None, false));
        assert!(text.contains("cumulative since process start"));
        assert!(!text.contains("Device I/O"));
    }

    #[test]
    fn device_table_appears_only_when_requested() {
        let procs = vec![proc_io(1, "dd", 512, 512)];
        let devs = vec![dev_io("nvme0n1", 10, 10)];
        let with = render(&procs, &devs, &opts(Some(1.0), true));
        let without = render(&procs, &devs, &opts(Some(1.0), false));
        assert!(with.contains("nvme0n1"));
        assert!(!without.contains("Device I/O"));
    }

    #[test]
    fn empty_process_list_renders_a_notice() {
        let text = render(&[], &[], &opts(None, false));
        assert!(text.contains("No process I/O statistics available."));
    }

    #[test]
    fn long_process_names_are_ellipsized() {
        assert_eq!(display_name("short"), "short");
        assert_eq!(display_name("a-very-long-process-name"), "a-very-long-pro...");
    }
}
