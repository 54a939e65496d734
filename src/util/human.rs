/// Format a raw byte count into a human-readable string: "12.5 MB"
pub fn fmt_bytes(bytes: u64) -> String {
    fmt_bytes_f(bytes as f64)
}

/// Format bytes with the exact count alongside: "12.5 MB (13107200)"
pub fn fmt_bytes_raw(bytes: u64) -> String {
    format!("{} ({})", fmt_bytes(bytes), bytes)
}

/// Format bytes/s into a human-readable string: "12.5 MB/s"
pub fn fmt_rate(bytes_per_sec: f64) -> String {
    fmt_bytes_f(bytes_per_sec) + "/s"
}

/// Format an operation count: "1.2K"
pub fn fmt_ops(ops: f64) -> String {
    let v = ops as u64;
    if v >= 1_000_000 { format!("{:.1}M", v as f64 / 1_000_000.0) }
    else if v >= 1_000 { format!("{:.1}K", v as f64 / 1_000.0) }
    else { format!("{}", v) }
}

fn fmt_bytes_f(b: f64) -> String {
    const TB: f64 = 1_099_511_627_776.0;
    const GB: f64 = 1_073_741_824.0;
    const MB: f64 = 1_048_576.0;
    const KB: f64 = 1_024.0;
    if b >= TB      { format!("{:.1} TB", b / TB) }
    else if b >= GB { format!("{:.1} GB", b / GB) }
    else if b >= MB { format!("{:.1} MB", b / MB) }
    else if b >= KB { format!("{:.1} KB", b / KB) }
    else            { format!("{:.0} B",  b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ladder() {
        assert_eq!(fmt_bytes(512), "512 B");
        assert_eq!(fmt_bytes(1536), "1.5 KB");
        assert_eq!(fmt_bytes(13_107_200), "12.5 MB");
        assert_eq!(fmt_bytes(1_610_612_736), "1.5 GB");
        assert_eq!(fmt_bytes(2_199_023_255_552), "2.0 TB");
    }

    #[test]
    fn raw_variant_appends_exact_count() {
        assert_eq!(fmt_bytes_raw(1536), "1.5 KB (1536)");
    }

    #[test]
    fn rates_and_ops() {
        assert_eq!(fmt_rate(1_048_576.0), "1.0 MB/s");
        assert_eq!(fmt_ops(950.0), "950");
        assert_eq!(fmt_ops(10_590.0), "10.6K");
        assert_eq!(fmt_ops(2_500_000.0), "2.5M");
    }
}
