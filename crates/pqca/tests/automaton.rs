//! End-to-end automaton runs against the local simulator.

use std::sync::Arc;

use pqca::{Automaton, UpdateFrame, default_evaluator, make_evaluator, one_dimensional};
use pqca_adapter_sim::SimulatorBackend;
use pqca_ir::{Circuit, QubitId};

fn cx_frame(num_qubits: usize) -> UpdateFrame {
    let mut cell = Circuit::new("cx", 2);
    cell.cx(QubitId(0), QubitId(1)).unwrap();
    UpdateFrame::from_circuit(one_dimensional(num_qubits, 2).unwrap(), cell).unwrap()
}

#[test]
fn cx_automaton_clears_second_qubit_of_each_cell() {
    let mut automaton =
        Automaton::new(vec![1, 1, 1, 1], vec![cx_frame(4)], default_evaluator()).unwrap();

    automaton.tick().unwrap();
    assert_eq!(automaton.state(), &[1, 0, 1, 0]);
}

#[test]
fn shifted_frames_compose_in_order() {
    let tessellation = one_dimensional(4, 2).unwrap();
    let mut cell = Circuit::new("cx", 2);
    cell.cx(QubitId(0), QubitId(1)).unwrap();

    let first = UpdateFrame::from_circuit(tessellation.clone(), cell.clone()).unwrap();
    let second = UpdateFrame::from_circuit(tessellation.shifted_by(1), cell).unwrap();

    let mut automaton =
        Automaton::new(vec![1, 0, 0, 0], vec![first, second], default_evaluator()).unwrap();

    // Frame one: CX on [0,1] and [2,3] gives [1,1,0,0].
    // Frame two: CX on [1,2] and [3,0] gives [1,1,1,0].
    automaton.tick().unwrap();
    assert_eq!(automaton.state(), &[1, 1, 1, 0]);
}

#[test]
fn iterate_returns_every_state() {
    let mut cell = Circuit::new("swap", 2);
    cell.swap(QubitId(0), QubitId(1)).unwrap();
    let frame = UpdateFrame::from_circuit(one_dimensional(2, 2).unwrap(), cell).unwrap();

    let mut automaton = Automaton::new(vec![1, 0], vec![frame], default_evaluator()).unwrap();
    let states = automaton.iterate(3).unwrap();
    assert_eq!(states, vec![vec![0, 1], vec![1, 0], vec![0, 1]]);
    assert_eq!(automaton.state(), &[0, 1]);
}

#[test]
fn qasm_frame_drives_an_automaton() {
    let qasm = r#"
        OPENQASM 2.0;
        include "qelib1.inc";
        qreg q[2];
        x q[0];
        x q[1];
    "#;
    let frame = UpdateFrame::from_qasm_str(one_dimensional(4, 2).unwrap(), qasm).unwrap();

    let mut automaton = Automaton::new(vec![0, 1, 0, 1], vec![frame], default_evaluator()).unwrap();
    automaton.tick().unwrap();
    assert_eq!(automaton.state(), &[1, 0, 1, 0]);
}

#[test]
fn seeded_backend_gives_identical_histories() {
    // A Hadamard cell makes each tick genuinely random; identical seeds
    // must give identical histories.
    let mut cell = Circuit::new("h", 1);
    cell.h(QubitId(0)).unwrap();

    let run = |seed: u64| {
        let frame =
            UpdateFrame::from_circuit(one_dimensional(4, 1).unwrap(), cell.clone()).unwrap();
        let evaluator = make_evaluator(Arc::new(SimulatorBackend::new().with_seed(seed)));
        let mut automaton = Automaton::new(vec![0, 0, 0, 0], vec![frame], evaluator).unwrap();
        automaton.iterate(5).unwrap()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn state_length_tracks_qubit_count() {
    let mut automaton =
        Automaton::new(vec![0; 10], vec![cx_frame(10)], default_evaluator()).unwrap();
    automaton.tick().unwrap();
    assert_eq!(automaton.state().len(), 10);
    assert!(automaton.state().iter().all(|&bit| bit <= 1));
}
