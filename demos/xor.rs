//! XOR with a 2-2-1 sigmoid network trained by back-propagation.
//!
//! Run with:
//!   cargo run --example xor
//!
//! Pass `f` to train with finite differences instead.
use rand::rngs::StdRng;
use rand::SeedableRng;

use sigmoid_mlp::data::{split_columns, xor_table};
use sigmoid_mlp::{GradientMethod, ModelSpec, TrainConfig, Trainer};

fn main() -> sigmoid_mlp::Result<()> {
    env_logger::init();

    let method = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<GradientMethod>()?,
        None => GradientMethod::BackProp,
    };

    let table = xor_table();
    let (inputs, targets) = split_columns(&table, 2);

    let mut trainer = Trainer::new(&ModelSpec::new(vec![2, 2, 1])?)?;
    trainer.randomize(&mut StdRng::seed_from_u64(100), 0.0, 1.0);

    println!("Cost {:.6}", trainer.cost(&inputs, &targets));
    let config = TrainConfig::new(5000, 1.0, method);
    let cost = trainer.train(&inputs, &targets, &config, |_| {})?;
    println!("{}", trainer.gradient());
    println!("Cost {:.6}", cost);

    let network = trainer.network_mut();
    for a in 0..2 {
        for b in 0..2 {
            let out = network.predict(&[a as f64, b as f64])[0];
            println!("{} | {} = {:.6}", a, b, out);
        }
    }
    Ok(())
}
