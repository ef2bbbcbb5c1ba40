// src/bin/qreg-demo.rs

//! Walks through a few classic register scenarios and prints the vector and
//! sampled state table for each.
//!
//! With a file argument, runs that JSON program instead and prints the JSON
//! result. Set `RUST_LOG=qreg=debug` to see the interpreter's logging.

use num_complex::Complex64;
use qreg::core::FRAC_1_SQRT_2;
use qreg::{Executor, Operation, ProgramBuilder, Register};
use std::error::Error;
use std::f64::consts::PI;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = std::env::args().nth(1) {
        let body = std::fs::read_to_string(&path)?;
        println!("{}", Executor::new().run_json(&body)?);
        return Ok(());
    }

    let mut rng = rand::rng();

    println!("Simple Register");
    let mut simple = Register::new(3, 10_000)?;
    simple.amplitudes_mut()[1] = Complex64::new(1.0, 0.0);
    print_result(&simple, &mut rng);

    println!("Cat States");
    let mut cat = Register::new(3, 10_000)?;
    cat.amplitudes_mut()[0] = Complex64::new(FRAC_1_SQRT_2, 0.0);
    cat.amplitudes_mut()[7] = Complex64::new(FRAC_1_SQRT_2, 0.0);
    print_result(&cat, &mut rng);

    println!("Full Superposition");
    let mut full = Register::new(3, 1000)?;
    let even = Complex64::new(1.0 / (full.state_count() as f64).sqrt(), 0.0);
    full.set_amplitudes(vec![even; full.state_count()])?;
    print_result(&full, &mut rng);

    for qubit in 1..=3 {
        println!("Hadamard Gate {}", qubit);
        let mut hadamard = Register::with_basis_state(3, 1000, 0)?;
        hadamard.hadamard_gate(qubit)?;
        print_result(&hadamard, &mut rng);
    }

    println!("Phase Shift");
    let mut phase = Register::with_basis_state(3, 10_000, 0)?;
    phase.hadamard_gate(3)?;
    phase.phase_gate(3, PI)?;
    phase.hadamard_gate(3)?;
    print_result(&phase, &mut rng);

    println!("Grover Search for |101>");
    let hadamards = || (1..=3).map(|qubit| Operation::Hadamard { qubit });
    let iteration = hadamards()
        .chain([Operation::Oracle { target_index: 0b101 }])
        .chain(hadamards())
        .chain([Operation::J])
        .chain(hadamards())
        .collect();
    let mut initial = vec![Complex64::new(0.0, 0.0); 8];
    initial[0] = Complex64::new(1.0, 0.0);
    let program = ProgramBuilder::new()
        .qubits(3)
        .measurements(10_000)
        .initial_vector(initial)
        .add_many(hadamards())
        .add(Operation::Repeat { count: 2, operations: iteration })
        .build()?;
    print!("{}", program);
    let result = Executor::new().run_with_rng(&program, &mut rng)?;
    println!("{}", result.states);

    Ok(())
}

fn print_result<R: rand::Rng>(register: &Register, rng: &mut R) {
    println!("after  {}", register);
    println!("{}", register.estimate_distribution(rng));
    println!();
}
