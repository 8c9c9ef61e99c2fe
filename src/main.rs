//! Trains a 2-bit adder and reports how many sums it gets wrong.
//!
//! Usage:
//!   sigmoid-mlp [b|f] [--config <train.json>]
//!
//! `b` trains with back-propagation (default), `f` with finite differences.
//! Set `RUST_LOG=debug` to see the cost as training progresses.

use std::process::ExitCode;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sigmoid_mlp::data::{adder_model, adder_table, evaluate_adder, predict_sum, AdderOutcome};
use sigmoid_mlp::{GradientMethod, Result, TrainConfig, Trainer};

const BITS: usize = 2;
const SEED: u64 = 100;

fn parse_args() -> Result<TrainConfig> {
    let mut config = TrainConfig::default().with_report_every(1000);
    let mut method = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => config = TrainConfig::load_json(path)?,
                None => warn!("--config needs a path; ignoring"),
            }
        } else {
            method = Some(arg.parse::<GradientMethod>().unwrap_or_else(|e| {
                warn!("{}; falling back to back-propagation", e);
                GradientMethod::BackProp
            }));
        }
    }

    if let Some(method) = method {
        config.method = method;
    }
    Ok(config)
}

fn run() -> Result<()> {
    let config = parse_args()?;
    let (inputs, targets) = adder_table(BITS);

    let mut trainer = Trainer::new(&adder_model(BITS)?)?;
    trainer.randomize(&mut StdRng::seed_from_u64(SEED), 0.0, 1.0);

    println!("Cost Before Training: {:.6}", trainer.cost(&inputs, &targets));
    let cost = trainer.train(&inputs, &targets, &config, |stats| {
        println!("{}: Cost(Training): {:.6}", stats.step, stats.cost);
    })?;
    println!("Cost After Training: {:.6}", cost);
    println!("\nGradient used: {}\n", config.method);

    let network = trainer.network_mut();
    let n = 1usize << BITS;
    for x in 0..n {
        for y in 0..n {
            let outcome = predict_sum(network, BITS, x, y);
            let verdict = if outcome.is_correct(x, y, BITS) { "" } else { "  (wrong answer)" };
            match outcome {
                AdderOutcome::Overflow => println!("{} + {} = overflow{}", x, y, verdict),
                AdderOutcome::Sum(z) => println!("{} + {} = {}{}", x, y, z, verdict),
            }
        }
    }

    let report = evaluate_adder(network, BITS);
    println!("\nfails/total = error rate");
    println!(
        "{} / {} = {:.2}%",
        report.fails,
        report.total,
        report.error_rate() * 100.0
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
