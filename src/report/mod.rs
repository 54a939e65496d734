//! Report rendering over ranked delta data.
//!
//! Renderers consume already-ranked collections plus [`ReportOptions`]; all
//! delta and ranking arithmetic happens upstream, only display math (unit
//! formatting, per-second division) lives here.

pub mod json;
pub mod text;

use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use crate::rank::per_second;
use crate::util::human::{fmt_bytes_raw, fmt_rate};

/// Presentation configuration, passed to the renderers by the caller.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Sampling window in seconds; None when a single cumulative snapshot
    /// was taken.
    pub duration: Option<f64>,
    pub by_device: bool,
    pub color: bool,
}

impl ReportOptions {
    fn window(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }
}

/// One-paragraph diagnosis shared by the text and JSON renderers.
fn summary(processes: &[ProcessIo], devices: &[DeviceIo], duration: Option<f64>) -> String {
    let Some(top) = processes.first() else {
        return "No I/O activity detected or insufficient permissions to read process statistics."
            .to_string();
    };

    let mut lines = Vec::new();
    let total = top.total_bytes();

    match duration {
        Some(d) if d > 0.0 => lines.push(format!(
            "Highest I/O activity: process '{}' (PID {}) with {} ({} in {:.1}s)",
            top.comm,
            top.pid,
            fmt_rate(per_second(total, d)),
            fmt_bytes_raw(total),
            d,
        )),
        _ => lines.push(format!(
            "Highest I/O activity: process '{}' (PID {}) with {} total",
            top.comm,
            top.pid,
            fmt_bytes_raw(total),
        )),
    }

    if let Some(second) = processes.get(1) {
        // Only worth mentioning above 10% of the leader.
        if second.total_bytes() * 10 > total {
            lines.push(format!(
                "Secondary contributor: process '{}' (PID {}) with {}",
                second.comm,
                second.pid,
                fmt_bytes_raw(second.total_bytes()),
            ));
        }
    }

    if let Some(busiest) = devices.first() {
        let bytes = busiest.read_bytes() + busiest.write_bytes();
        match duration {
            Some(d) if d > 0.0 => lines.push(format!(
                "Most active device: {} ({}, {} in {:.1}s)",
                busiest.name,
                fmt_rate(per_second(bytes, d)),
                fmt_bytes_raw(bytes),
                d,
            )),
            _ => lines.push(format!(
                "Most active device: {} ({} total)",
                busiest.name,
                fmt_bytes_raw(bytes),
            )),
        }
        lines.push(format!(
            "I/O seems concentrated on /dev/{} by process '{}'",
            busiest.name, top.comm,
        ));
    }

    lines.join("\n")
}
