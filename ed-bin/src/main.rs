mod cli;
mod stats;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use log::{info, warn};
use pa_types::Aligner;
use stats::RunStats;
use std::{ops::ControlFlow, time::Instant};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let cm = args.costs.cost_model()?;
    let mut aligner = args.algorithm.build(cm);
    info!("Aligner: {aligner:?}");

    let mut avg_result = RunStats::default();
    if args.silent <= 1 {
        avg_result.print_header();
    }
    let start = Instant::now();

    // Process the input.
    args.process_input_pairs(|a, b| {
        let t = Instant::now();
        let (distance, _) = aligner.align(a, b);
        let r = RunStats::new(a, b, distance, t.elapsed().as_secs_f64());

        // Record and print stats.
        if args.silent == 0 {
            r.print();
        }
        avg_result += r;
        if args.silent == 1 {
            avg_result.print_no_newline();
        }

        match args.timeout {
            Some(d) if start.elapsed() > d => {
                warn!("Timeout of {d:?} reached after {} pairs", avg_result.sample_size);
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    })?;

    if avg_result.sample_size > 0 {
        if args.silent == 1 {
            println!();
        }
        if args.silent == 2 {
            avg_result.print_header();
        }
        avg_result.print();

        if let Some(output) = &args.output {
            let json = serde_json::to_string_pretty(&avg_result)?;
            std::fs::write(output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
    } else {
        warn!("No sequence pairs in the input.");
    }
    Ok(())
}
