mod collectors;
mod config;
mod delta;
mod models;
mod rank;
mod report;
mod sampler;
mod util;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use report::ReportOptions;
use sampler::SampleError;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ioblame", about = "Find out which processes and disks are behind your I/O load", version = "0.1")]
struct Cli {
    /// Number of top processes to show
    #[arg(short = 'n', long, value_name = "N")]
    top: Option<usize>,

    /// Sampling window in seconds; 0 reports cumulative counters instead
    #[arg(short, long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Include a per-device I/O breakdown
    #[arg(long)]
    by_device: bool,

    /// Emit JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    if let Err(err) = run(cli) {
        if matches!(err.downcast_ref::<SampleError>(), Some(SampleError::Interrupted)) {
            eprintln!("Interrupted");
            std::process::exit(130);
        }
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::Config::load();

    let top = cli.top.unwrap_or(cfg.general.top);
    let duration = cli.duration.unwrap_or(cfg.general.duration_secs);
    if top < 1 {
        bail!("--top must be at least 1");
    }
    if !duration.is_finite() || duration < 0.0 {
        bail!("--duration must be a non-negative number of seconds");
    }

    let sampling = duration > 0.0;
    let (processes, devices) = if sampling {
        let sample =
            sampler::sample_over_window(Duration::from_secs_f64(duration), &cfg.devices.exclude)?;
        (sample.processes, sample.devices)
    } else {
        // Degenerate single-snapshot mode: no delta, raw cumulative counters.
        let processes = collectors::process_io::read_all()?;
        let devices = if cli.by_device {
            collectors::diskstats::read_all(&cfg.devices.exclude)?
        } else {
            HashMap::new()
        };
        (processes, devices)
    };

    if processes.is_empty() && unsafe { libc::geteuid() } != 0 {
        log::warn!("no readable process counters — /proc/<pid>/io usually needs root");
    }

    let ranked = rank::top_processes(processes, top);
    let device_table = if cli.by_device {
        rank::top_devices(devices)
    } else {
        Vec::new()
    };

    let opts = ReportOptions {
        duration: sampling.then_some(duration),
        by_device: cli.by_device,
        color: !cli.no_color && cfg.output.color,
    };

    if cli.json {
        println!("{}", report::json::render(&ranked, &device_table, &opts)?);
    } else {
        print!("{}", report::text::render(&ranked, &device_table, &opts));
    }

    Ok(())
}
