//! QASM-driven automaton demo.
//!
//! Loads a cell circuit from an OpenQASM 2 file (or a built-in rule if
//! no file is given), winds it around a line of qubits, and runs it.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pqca::{Automaton, UpdateFrame, make_evaluator, one_dimensional, random_bits};
use pqca_adapter_sim::SimulatorBackend;
use pqca_demos::{
    create_progress_bar, print_header, print_result, print_section, print_success, render_state,
};

const DEFAULT_CELL: &str = r#"
OPENQASM 2.0;
include "qelib1.inc";
qreg q[2];
cx q[0], q[1];
cx q[1], q[0];
"#;

#[derive(Parser, Debug)]
#[command(name = "demo-qasm")]
#[command(about = "Run an automaton whose cell rule is loaded from QASM")]
struct Args {
    /// Path to a QASM file holding the cell circuit
    #[arg(short, long)]
    file: Option<std::path::PathBuf>,

    /// Number of qubits in the line
    #[arg(short = 'n', long, default_value = "16")]
    qubits: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value = "20")]
    ticks: usize,

    /// Seed for the initial state and the simulator
    #[arg(short, long, default_value = "7")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("QASM Cell Rule Demo");

    let cell = match &args.file {
        Some(path) => pqca_qasm::parse_file(path)
            .with_context(|| format!("parsing {}", path.display()))?,
        None => pqca_qasm::parse(DEFAULT_CELL).context("parsing built-in cell")?,
    };

    print_section("Cell Circuit");
    print_result("Name", cell.name());
    print_result("Qubits", cell.num_qubits());
    print_result("Operations", cell.len());

    let tessellation = one_dimensional(args.qubits, cell.num_qubits())
        .context("the cell must evenly divide the line")?;
    let frame = UpdateFrame::from_circuit(tessellation, cell)?;
    print_result("Frame", &frame);

    let evaluator = make_evaluator(Arc::new(SimulatorBackend::new().with_seed(args.seed)));
    let initial_state = random_bits(args.qubits, args.seed);

    print_section("Evolution");
    println!("  t=0   {}", render_state(&initial_state));

    let mut automaton = Automaton::new(initial_state, vec![frame], evaluator)?;
    let pb = create_progress_bar(args.ticks as u64, "ticking");
    let mut history = Vec::with_capacity(args.ticks);
    for _ in 0..args.ticks {
        automaton.tick()?;
        history.push(automaton.state().to_vec());
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (tick, state) in history.iter().enumerate() {
        println!("  t={:<3} {}", tick + 1, render_state(state));
    }

    println!();
    print_success("QASM demo complete!");
    Ok(())
}
