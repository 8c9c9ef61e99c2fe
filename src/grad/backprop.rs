use crate::activation::sigmoid_derivative;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Computes the batch gradient of the cost by back-propagation.
///
/// `gradient` is used as scratch: its weights and biases accumulate the
/// per-row gradients (averaged over the batch at the end), its layers hold
/// the error flowing back into each activation for the current row.
///
/// The output error is seeded with the raw difference `a - y`; the factor 2
/// of the squared-error derivative is applied together with the sigmoid
/// derivative `a (1 - a)` each time a layer is processed. For the last weight
/// layer this is the exact gradient of `MseLoss::cost`; every layer further
/// back picks up one more factor 2, and training rates are tuned to that
/// scaling.
///
/// # Panics
/// Panics if `gradient` does not share `network`'s widths, the batch is
/// empty, or it does not fit the network.
pub fn back_prop<A, B>(
    network: &mut Network,
    gradient: &mut Network,
    inputs: &Matrix<A>,
    targets: &Matrix<B>,
) where
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
    assert!(
        gradient.same_shape(network),
        "gradient network {:?} does not match network {:?}",
        gradient.spec().widths,
        network.spec().widths
    );

    let rows = inputs.rows;
    let count = network.layer_count();

    gradient.reset();

    for i in 0..rows {
        network.input_mut().copy_from(&inputs.row(i));
        network.forward();

        // Error terms are per row; weight and bias sums carry over.
        for layer in gradient.layers_mut() {
            layer.fill(0.0);
        }

        for j in 0..targets.cols {
            gradient.layers_mut()[count][(0, j)] = network.output()[(0, j)] - targets[(i, j)];
        }

        for l in (1..=count).rev() {
            for j in 0..network.layers()[l].cols {
                let a = network.layers()[l][(0, j)];
                let da = gradient.layers()[l][(0, j)];
                let delta = 2.0 * da * sigmoid_derivative(a);

                gradient.biases_mut()[l - 1][(0, j)] += delta;

                for k in 0..network.layers()[l - 1].cols {
                    let pa = network.layers()[l - 1][(0, k)];
                    let w = network.weights()[l - 1][(k, j)];

                    gradient.weights_mut()[l - 1][(k, j)] += delta * pa;
                    gradient.layers_mut()[l - 1][(0, k)] += delta * w;
                }
            }
        }
    }

    let n = rows as f64;
    for m in gradient.weights_mut() {
        m.map_in_place(|x| x / n);
    }
    for m in gradient.biases_mut() {
        m.map_in_place(|x| x / n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::sigmoid;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_back_prop_single_neuron() {
        let mut net = Network::from_widths(&[1, 1]).unwrap();
        let mut grad = Network::from_widths(&[1, 1]).unwrap();
        let inputs = Matrix::from_vec(1, 1, vec![1.0]);
        let targets = Matrix::from_vec(1, 1, vec![1.0]);

        back_prop(&mut net, &mut grad, &inputs, &targets);

        let a = sigmoid(0.0);
        let expected = 2.0 * (a - 1.0) * sigmoid_derivative(a);
        assert_relative_eq!(grad.biases()[0][(0, 0)], expected, epsilon = 1e-12);
        assert_relative_eq!(grad.weights()[0][(0, 0)], expected, epsilon = 1e-12);
        // Raw output error is left in the gradient's output layer.
        assert_relative_eq!(grad.output()[(0, 0)], a - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_back_prop_averages_over_rows() {
        let mut net = Network::from_widths(&[1, 1]).unwrap();
        let mut grad = Network::from_widths(&[1, 1]).unwrap();

        // Row 0 input 0 contributes nothing to the weight gradient.
        let inputs = Matrix::from_vec(2, 1, vec![0.0, 1.0]);
        let targets = Matrix::from_vec(2, 1, vec![1.0, 1.0]);
        back_prop(&mut net, &mut grad, &inputs, &targets);

        let per_row = 2.0 * (0.5 - 1.0) * 0.25;
        assert_relative_eq!(grad.biases()[0][(0, 0)], per_row, epsilon = 1e-12);
        assert_relative_eq!(grad.weights()[0][(0, 0)], per_row / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_back_prop_overwrites_stale_gradient() {
        let mut net = Network::from_widths(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(8), 0.0, 1.0);
        let inputs = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]);
        let targets = Matrix::from_vec(2, 1, vec![1.0, 1.0]);

        let mut fresh = Network::from_widths(&[2, 2, 1]).unwrap();
        back_prop(&mut net, &mut fresh, &inputs, &targets);

        let mut stale = Network::from_widths(&[2, 2, 1]).unwrap();
        stale.randomize(&mut StdRng::seed_from_u64(99), 5.0, 6.0);
        back_prop(&mut net, &mut stale, &inputs, &targets);

        for (a, b) in fresh.weights().iter().zip(stale.weights()) {
            assert_eq!(a, b);
        }
        for (a, b) in fresh.biases().iter().zip(stale.biases()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    #[should_panic(expected = "at least one row")]
    fn test_back_prop_empty_batch_panics() {
        let mut net = Network::from_widths(&[2, 1]).unwrap();
        let mut grad = Network::from_widths(&[2, 1]).unwrap();
        back_prop(&mut net, &mut grad, &Matrix::zeros(0, 2), &Matrix::zeros(0, 1));
    }

    #[test]
    #[should_panic(expected = "target columns")]
    fn test_back_prop_target_width_mismatch_panics() {
        let mut net = Network::from_widths(&[2, 1]).unwrap();
        let mut grad = Network::from_widths(&[2, 1]).unwrap();
        back_prop(&mut net, &mut grad, &Matrix::zeros(1, 2), &Matrix::zeros(1, 2));
    }
}
