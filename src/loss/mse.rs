use crate::math::matrix::Matrix;
use crate::network::network::Network;

pub struct MseLoss;

impl MseLoss {
    /// Squared error of one prediction: `sum((predicted - expected)²)`.
    ///
    /// Summed over the outputs, not averaged; `cost` averages over rows only.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }

    /// Runs every input row through `network` and returns the summed squared
    /// error averaged over the rows of the batch.
    ///
    /// Overwrites the network's layer activations as scratch.
    ///
    /// # Panics
    /// Panics if the batch is empty, does not match the network's input/output
    /// widths, or the row counts differ.
    pub fn cost<A, B>(network: &mut Network, inputs: &Matrix<A>, targets: &Matrix<B>) -> f64
    where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        assert!(inputs.rows > 0, "batch must have at least one row");
        assert_eq!(inputs.rows, targets.rows, "inputs and targets must have equal rows");
        assert_eq!(
            targets.cols,
            network.output().cols,
            "target columns must match the output layer"
        );

        let mut total = 0.0;
        for i in 0..inputs.rows {
            network.input_mut().copy_from(&inputs.row(i));
            network.forward();
            total += MseLoss::loss(network.output().row_slice(0), targets.row_slice(i));
        }

        total / inputs.rows as f64
    }
}
