use rand::Rng;

use crate::error::Result;
use crate::grad::method::GradientMethod;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::spec::ModelSpec;
use crate::optim::sgd::Sgd;
use crate::train::loop_fn::{train_loop, train_step};
use crate::train::step_stats::StepStats;
use crate::train::train_config::TrainConfig;

/// Pairs a live network with the same-shaped gradient network it trains with.
pub struct Trainer {
    network: Network,
    gradient: Network,
}

impl Trainer {
    /// Allocates both networks for `spec`. Parameters start at zero; call
    /// `randomize` before training.
    pub fn new(spec: &ModelSpec) -> Result<Trainer> {
        Ok(Trainer {
            network: Network::new(spec)?,
            gradient: Network::new(spec)?,
        })
    }

    /// Wraps an existing network, allocating a matching gradient network.
    pub fn from_network(network: Network) -> Result<Trainer> {
        let gradient = Network::new(network.spec())?;
        Ok(Trainer { network, gradient })
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, lo: f64, hi: f64) {
        self.network.randomize(rng, lo, hi);
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Gradient computed by the most recent step.
    pub fn gradient(&self) -> &Network {
        &self.gradient
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn cost<A, B>(&mut self, inputs: &Matrix<A>, targets: &Matrix<B>) -> f64
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        MseLoss::cost(&mut self.network, inputs, targets)
    }

    /// One gradient computation followed by one parameter update.
    pub fn step<A, B>(
        &mut self,
        inputs: &Matrix<A>,
        targets: &Matrix<B>,
        method: GradientMethod,
        learning_rate: f64,
    ) where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        train_step(
            &mut self.network,
            &mut self.gradient,
            inputs,
            targets,
            method,
            &Sgd::new(learning_rate),
        );
    }

    /// Runs `train_loop` on the owned networks.
    pub fn train<A, B, F>(
        &mut self,
        inputs: &Matrix<A>,
        targets: &Matrix<B>,
        config: &TrainConfig,
        on_report: F,
    ) -> Result<f64>
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
        F: FnMut(&StepStats),
    {
        train_loop(
            &mut self.network,
            &mut self.gradient,
            inputs,
            targets,
            config,
            on_report,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_trainer_pairs_same_shape() {
        let spec = ModelSpec::new(vec![3, 4, 2]).unwrap();
        let trainer = Trainer::new(&spec).unwrap();
        assert!(trainer.network().same_shape(trainer.gradient()));

        let trainer = Trainer::from_network(Network::from_widths(&[2, 5, 1]).unwrap()).unwrap();
        assert_eq!(trainer.gradient().spec().widths, vec![2, 5, 1]);
    }

    #[test]
    fn test_step_fills_gradient_and_moves_parameters() {
        let spec = ModelSpec::new(vec![2, 2, 1]).unwrap();
        let mut trainer = Trainer::new(&spec).unwrap();
        trainer.randomize(&mut StdRng::seed_from_u64(17), 0.0, 1.0);
        let before = trainer.network().clone();

        let inputs = Matrix::from_vec(2, 2, vec![1.0, 0.0, 0.0, 1.0]);
        let targets = Matrix::from_vec(2, 1, vec![0.0, 1.0]);
        trainer.step(&inputs, &targets, GradientMethod::BackProp, 1.0);

        let moved = trainer.network().biases()[1][(0, 0)];
        let expected = before.biases()[1][(0, 0)] - trainer.gradient().biases()[1][(0, 0)];
        assert_eq!(moved, expected);
        assert_ne!(trainer.gradient().biases()[1][(0, 0)], 0.0);
    }

    #[test]
    fn test_into_network_keeps_trained_parameters() {
        let spec = ModelSpec::new(vec![1, 1]).unwrap();
        let mut trainer = Trainer::new(&spec).unwrap();
        let inputs = Matrix::from_vec(1, 1, vec![1.0]);
        let targets = Matrix::from_vec(1, 1, vec![1.0]);

        let config = TrainConfig::new(50, 1.0, GradientMethod::FiniteDiff { eps: 1e-3 });
        let cost = trainer.train(&inputs, &targets, &config, |_| {}).unwrap();
        assert!(cost < 0.25);

        let mut net = trainer.into_network();
        assert!(net.predict(&[1.0])[0] > 0.5);
    }
}
