use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

#[derive(Debug, Clone, Copy)]
enum Params {
    Weights,
    Biases,
}

fn params(network: &Network, kind: Params) -> &[Matrix] {
    match kind {
        Params::Weights => network.weights(),
        Params::Biases => network.biases(),
    }
}

fn params_mut(network: &mut Network, kind: Params) -> &mut [Matrix] {
    match kind {
        Params::Weights => network.weights_mut(),
        Params::Biases => network.biases_mut(),
    }
}

/// Estimates the cost gradient by forward differences.
///
/// Every weight and bias is nudged by `eps` in turn, the batch cost is
/// recomputed, and `(cost(p + eps) - cost(p)) / eps` is written into the
/// matching cell of `gradient`. The parameter is restored afterwards. This
/// costs one full batch evaluation per parameter, so it is only practical for
/// small models or for checking `back_prop`.
///
/// # Panics
/// Panics if `gradient` does not share `network`'s widths or the batch does
/// not fit the network.
pub fn finite_diff<A, B>(
    network: &mut Network,
    gradient: &mut Network,
    eps: f64,
    inputs: &Matrix<A>,
    targets: &Matrix<B>,
) where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    assert!(
        gradient.same_shape(network),
        "gradient network {:?} does not match network {:?}",
        gradient.spec().widths,
        network.spec().widths
    );

    let base = MseLoss::cost(network, inputs, targets);

    for index in 0..network.layer_count() {
        for kind in [Params::Weights, Params::Biases] {
            let (rows, cols) = params(network, kind)[index].shape();
            for i in 0..rows {
                for j in 0..cols {
                    let saved = params(network, kind)[index][(i, j)];
                    params_mut(network, kind)[index][(i, j)] = saved + eps;

                    let nudged = MseLoss::cost(network, inputs, targets);
                    params_mut(gradient, kind)[index][(i, j)] = (nudged - base) / eps;

                    params_mut(network, kind)[index][(i, j)] = saved;
                }
            }
        }
    }
}
