use crate::network::network::Network;

/// Plain gradient descent: no momentum, no decay, no step-size adaptation.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update `param -= learning_rate * grad` to every weight and bias.
    pub fn step(&self, network: &mut Network, gradient: &Network) {
        network.apply_gradient(gradient, self.learning_rate);
    }
}
