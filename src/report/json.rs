use crate::models::device::DeviceIo;
use crate::models::process::ProcessIo;
use crate::rank::per_second;
use crate::report::{summary, ReportOptions};
use crate::util::human::fmt_bytes;
use anyhow::Result;
use serde_json::{json, Map, Value};

/// Render the machine-readable report.
pub fn render(processes: &[ProcessIo], devices: &[DeviceIo], opts: &ReportOptions) -> Result<String> {
    let top_processes: Vec<Value> = processes
        .iter()
        .map(|p| {
            json!({
                "pid":          p.pid,
                "name":         p.comm,
                "command":      p.command,
                "read_bytes":   p.read_bytes.get(),
                "write_bytes":  p.write_bytes.get(),
                "read_bytes_hr":  fmt_bytes(p.read_bytes.get()),
                "write_bytes_hr": fmt_bytes(p.write_bytes.get()),
                "read_operations":  p.syscr.get(),
                "write_operations": p.syscw.get(),
                "total_io_bytes": p.total_bytes(),
            })
        })
        .collect();

    let mut doc = Map::new();
    doc.insert("timestamp".into(), json!(chrono::Local::now().to_rfc3339()));
    doc.insert("sampling_duration_seconds".into(), json!(opts.duration));
    doc.insert("top_processes".into(), Value::Array(top_processes));
    doc.insert("summary".into(), json!(summary(processes, devices, opts.duration)));

    if opts.by_device {
        let window = opts.window();
        let devices_out: Vec<Value> = devices
            .iter()
            .map(|dev| device_entry(dev, window))
            .collect();
        doc.insert("devices".into(), Value::Array(devices_out));
    }

    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}

fn device_entry(dev: &DeviceIo, window: f64) -> Value {
    let mut entry = Map::new();
    entry.insert("name".into(), json!(dev.name));
    entry.insert("major".into(), json!(dev.major));
    entry.insert("minor".into(), json!(dev.minor));
    entry.insert("reads".into(), json!(dev.reads.get()));
    entry.insert("writes".into(), json!(dev.writes.get()));
    entry.insert("read_sectors".into(), json!(dev.read_sectors.get()));
    entry.insert("write_sectors".into(), json!(dev.write_sectors.get()));
    entry.insert("read_bytes".into(), json!(dev.read_bytes()));
    entry.insert("write_bytes".into(), json!(dev.write_bytes()));
    entry.insert("read_bytes_hr".into(), json!(fmt_bytes(dev.read_bytes())));
    entry.insert("write_bytes_hr".into(), json!(fmt_bytes(dev.write_bytes())));
    entry.insert("ios_in_progress".into(), json!(dev.in_flight.get()));

    if window > 0.0 {
        entry.insert("reads_per_second".into(), json!(per_second(dev.reads.get(), window)));
        entry.insert("writes_per_second".into(), json!(per_second(dev.writes.get(), window)));
        entry.insert("read_bytes_per_second".into(), json!(per_second(dev.read_bytes(), window)));
        entry.insert("write_bytes_per_second".into(), json!(per_second(dev.write_bytes(), window)));
    }

    Value::Object(entry)
}
