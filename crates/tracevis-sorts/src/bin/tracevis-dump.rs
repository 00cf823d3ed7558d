//! Tracevis Snapshot Dump
//!
//! Reads a JSON array of integers on stdin, replays its bubble sort trace and
//! writes one JSON snapshot per line to stdout, starting with snapshot #0.

use std::io::{self, BufWriter, Read, Write};

use tracevis_core::{Player, PlayerConfig, StepOutcome};
use tracevis_sorts::{BubbleSort, TraceAdapter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let values: Vec<i64> = serde_json::from_str(&input)?;

    let trace = BubbleSort.produce_trace(&values);
    tracing::info!(
        algorithm = BubbleSort.name(),
        values = values.len(),
        events = trace.len(),
        "trace produced"
    );

    let mut player = Player::with_config(values, PlayerConfig::default());
    player.load(trace);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    serde_json::to_writer(&mut out, player.current())?;
    writeln!(out)?;
    while let StepOutcome::Advanced(snapshot) = player.step_forward()? {
        serde_json::to_writer(&mut out, snapshot)?;
        writeln!(out)?;
    }
    out.flush()?;

    tracing::info!(steps = player.len(), "replay complete");
    Ok(())
}
