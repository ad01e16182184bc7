//! One-dimensional automaton demo.
//!
//! Runs a line of qubits under a built-in cell rule and prints the
//! state after every tick.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use pqca::{Automaton, UpdateFrame, make_evaluator, one_dimensional, random_bits};
use pqca_adapter_sim::SimulatorBackend;
use pqca_demos::{cells, print_header, print_result, print_section, print_success, render_state};

#[derive(Parser, Debug)]
#[command(name = "demo-line")]
#[command(about = "Run a one-dimensional partitioned quantum cellular automaton")]
struct Args {
    /// Number of qubits in the line (must be even)
    #[arg(short = 'n', long, default_value = "16")]
    qubits: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value = "10")]
    ticks: usize,

    /// Cell rule: cx, swap, or coin
    #[arg(short, long, default_value = "swap")]
    rule: String,

    /// Seed for the initial state and the simulator
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Add a second frame on the shifted tessellation
    #[arg(long)]
    shifted: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("One-Dimensional PQCA Demo");

    let cell = match args.rule.as_str() {
        "cx" => cells::cx_cell(),
        "swap" => cells::swap_cell(),
        "coin" => cells::coin_cell(),
        other => bail!("unknown rule '{other}' (expected cx, swap, or coin)"),
    }
    .context("building cell circuit")?;

    let tessellation = one_dimensional(args.qubits, 2)
        .context("the number of qubits must be divisible by the cell size")?;

    print_section("Setup");
    print_result("Qubits", args.qubits);
    print_result("Rule", &args.rule);
    print_result("Tessellation", &tessellation);

    let mut frames = vec![UpdateFrame::from_circuit(tessellation.clone(), cell.clone())?];
    if args.shifted {
        frames.push(UpdateFrame::from_circuit(
            tessellation.shifted_by(1),
            cell,
        )?);
    }
    print_result("Frames", frames.len());

    let evaluator = make_evaluator(Arc::new(SimulatorBackend::new().with_seed(args.seed)));
    let initial_state = random_bits(args.qubits, args.seed);

    print_section("Evolution");
    println!("  t=0   {}", render_state(&initial_state));

    let mut automaton = Automaton::new(initial_state, frames, evaluator)?;
    for tick in 1..=args.ticks {
        automaton.tick()?;
        println!("  t={tick:<3} {}", render_state(automaton.state()));
    }

    println!();
    print_success("Line demo complete!");
    Ok(())
}
