use log::{debug, info, trace};
use std::time::Instant;

use crate::error::{NetworkError, Result};
use crate::grad::method::GradientMethod;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::step_stats::StepStats;
use crate::train::train_config::TrainConfig;

/// One training iteration: fill `gradient` with `method`, then let
/// `optimizer` move `network` against it.
pub fn train_step<A, B>(
    network: &mut Network,
    gradient: &mut Network,
    inputs: &Matrix<A>,
    targets: &Matrix<B>,
    method: GradientMethod,
    optimizer: &Sgd,
) where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    method.compute(network, gradient, inputs, targets);
    optimizer.step(network, gradient);
}

/// Trains `network` for `config.steps` full-batch steps and returns the cost
/// after the last one.
///
/// # Arguments
/// - `network`   — the live network; modified in place
/// - `gradient`  — scratch network with the same widths as `network`
/// - `inputs`    — one training sample per row
/// - `targets`   — expected outputs, one row per input row
/// - `config`    — step count, learning rate, gradient method, report interval
/// - `on_report` — called with a `StepStats` every `config.report_every` steps
///
/// The batch shape is validated before any work is done; a mismatch comes
/// back as an error instead of a panic from inside the kernels.
pub fn train_loop<A, B, F>(
    network: &mut Network,
    gradient: &mut Network,
    inputs: &Matrix<A>,
    targets: &Matrix<B>,
    config: &TrainConfig,
    mut on_report: F,
) -> Result<f64>
where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
    F: FnMut(&StepStats),
{
    network.check_batch(inputs, targets)?;
    if !gradient.same_shape(network) {
        return Err(NetworkError::invalid_model(
            &gradient.spec().widths,
            format!("gradient network must match {:?}", network.spec().widths),
        ));
    }

    info!(
        "training {:?} on {} rows for {} steps (lr = {}, {})",
        network.spec().widths,
        inputs.rows,
        config.steps,
        config.learning_rate,
        config.method
    );

    let optimizer = Sgd::new(config.learning_rate);
    let t_start = Instant::now();

    for step in 1..=config.steps {
        train_step(network, gradient, inputs, targets, config.method, &optimizer);
        trace!("step {} done", step);

        if config.report_every > 0 && step % config.report_every == 0 {
            let stats = StepStats {
                step,
                total_steps: config.steps,
                cost: MseLoss::cost(network, inputs, targets),
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            debug!("step {}/{}: cost = {:.6}", stats.step, stats.total_steps, stats.cost);
            on_report(&stats);
        }
    }

    let cost = MseLoss::cost(network, inputs, targets);
    info!(
        "finished {} steps in {} ms, cost = {:.6}",
        config.steps,
        t_start.elapsed().as_millis(),
        cost
    );
    Ok(cost)
}
