use rand::Rng;
use std::fmt;

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::spec::ModelSpec;

/// A fully connected sigmoid network.
///
/// `layers[0]` is the input row written by the caller, `layers[layer_count]`
/// the output row read after `forward()`. `weights[i]` (`widths[i] x
/// widths[i+1]`) and `biases[i]` (`1 x widths[i+1]`) connect `layers[i]` to
/// `layers[i+1]`.
///
/// The same type doubles as the gradient network used during training: its
/// weights and biases then hold gradients and its layers hold the
/// back-propagated error terms.
#[derive(Debug, Clone)]
pub struct Network {
    spec: ModelSpec,
    layers: Vec<Matrix>,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
}

impl Network {
    /// Allocates every layer, weight and bias matrix for `spec`, zero-filled.
    pub fn new(spec: &ModelSpec) -> Result<Network> {
        spec.validate()?;
        let widths = &spec.widths;

        let mut layers = Vec::with_capacity(widths.len());
        let mut weights = Vec::with_capacity(widths.len() - 1);
        let mut biases = Vec::with_capacity(widths.len() - 1);

        layers.push(Matrix::try_zeros(1, widths[0])?);
        for pair in widths.windows(2) {
            weights.push(Matrix::try_zeros(pair[0], pair[1])?);
            biases.push(Matrix::try_zeros(1, pair[1])?);
            layers.push(Matrix::try_zeros(1, pair[1])?);
        }

        Ok(Network {
            spec: spec.clone(),
            layers,
            weights,
            biases,
        })
    }

    /// Validates `widths` and builds the network in one go.
    pub fn from_widths(widths: &[usize]) -> Result<Network> {
        Network::new(&ModelSpec::new(widths.to_vec())?)
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Number of weight layers; the output layer is `layers()[layer_count()]`.
    pub fn layer_count(&self) -> usize {
        self.weights.len()
    }

    pub fn parameter_count(&self) -> usize {
        self.spec.parameter_count()
    }

    pub fn input(&self) -> &Matrix {
        &self.layers[0]
    }

    pub fn input_mut(&mut self) -> &mut Matrix {
        &mut self.layers[0]
    }

    pub fn output(&self) -> &Matrix {
        &self.layers[self.layer_count()]
    }

    pub fn layers(&self) -> &[Matrix] {
        &self.layers
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn layers_mut(&mut self) -> &mut [Matrix] {
        &mut self.layers
    }

    pub fn weights_mut(&mut self) -> &mut [Matrix] {
        &mut self.weights
    }

    pub fn biases_mut(&mut self) -> &mut [Matrix] {
        &mut self.biases
    }

    /// True when `other` was built from the same widths, so it can serve as
    /// this network's gradient network.
    pub fn same_shape(&self, other: &Network) -> bool {
        self.spec == other.spec
    }

    /// Draws every weight and bias uniformly from `[lo, hi)`, layer by layer
    /// (weights before biases). Layer activations are left untouched.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, lo: f64, hi: f64) {
        for (w, b) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            w.randomize(rng, lo, hi);
            b.randomize(rng, lo, hi);
        }
    }

    /// Forward pass: `layers[i+1] = sigmoid(layers[i] * weights[i] + biases[i])`.
    pub fn forward(&mut self) {
        for i in 0..self.layer_count() {
            let (prev, next) = self.layers.split_at_mut(i + 1);
            let dst = &mut next[0];
            dst.dot_into(&prev[i], &self.weights[i]);
            dst.add_assign_from(&self.biases[i]);
            dst.apply_sigmoid();
        }
    }

    /// Writes `input` into the input layer, runs `forward()` and returns the
    /// output row.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the input width.
    pub fn predict(&mut self, input: &[f64]) -> &[f64] {
        self.input_mut().row_slice_mut(0).copy_from_slice(input);
        self.forward();
        self.output().row_slice(0)
    }

    /// Zeroes every weight, bias and layer matrix.
    pub fn reset(&mut self) {
        for m in self
            .weights
            .iter_mut()
            .chain(self.biases.iter_mut())
            .chain(self.layers.iter_mut())
        {
            m.fill(0.0);
        }
    }

    /// `param -= learn_rate * gradient` for every weight and bias.
    ///
    /// # Panics
    /// Panics if `gradient` was built from different widths.
    pub fn apply_gradient(&mut self, gradient: &Network, learn_rate: f64) {
        assert!(
            self.same_shape(gradient),
            "gradient network {:?} does not match network {:?}",
            gradient.spec.widths,
            self.spec.widths
        );

        let params = self.weights.iter_mut().chain(self.biases.iter_mut());
        let grads = gradient.weights.iter().chain(gradient.biases.iter());
        for (param, grad) in params.zip(grads) {
            for i in 0..param.rows {
                for j in 0..param.cols {
                    param[(i, j)] -= learn_rate * grad[(i, j)];
                }
            }
        }
    }

    /// Checks the training-data contract: one target row per input row, input
    /// columns matching the input width and target columns the output width.
    pub fn check_batch<A, B>(&self, inputs: &Matrix<A>, targets: &Matrix<B>) -> Result<()>
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        if inputs.rows == 0 {
            return Err(NetworkError::EmptyBatch);
        }
        if targets.rows != inputs.rows {
            return Err(NetworkError::dimension_mismatch(
                "target rows",
                inputs.rows,
                targets.rows,
            ));
        }
        if inputs.cols != self.spec.input_width() {
            return Err(NetworkError::dimension_mismatch(
                "input columns",
                self.spec.input_width(),
                inputs.cols,
            ));
        }
        if targets.cols != self.spec.output_width() {
            return Err(NetworkError::dimension_mismatch(
                "target columns",
                self.spec.output_width(),
                targets.cols,
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- Network {:?} --", self.spec.widths)?;
        for (i, (w, b)) in self.weights.iter().zip(self.biases.iter()).enumerate() {
            writeln!(f, "ws{}", i)?;
            write!(f, "{}", w)?;
            writeln!(f, "bs{}", i)?;
            write!(f, "{}", b)?;
        }
        writeln!(f, "-- --")
    }
}
