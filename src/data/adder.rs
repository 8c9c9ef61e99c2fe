use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::spec::ModelSpec;

/// Builds the truth table of a `bits`-bit adder.
///
/// Row `i` adds `x = i / 2^bits` and `y = i % 2^bits`. Inputs hold the bits of
/// `x` then the bits of `y`, lowest bit first; targets hold the low `bits`
/// bits of `x + y` followed by a carry column set when `x + y >= 2^bits`.
///
/// # Panics
/// Panics unless `1 <= bits <= 8`.
pub fn adder_table(bits: usize) -> (Matrix, Matrix) {
    assert!((1..=8).contains(&bits), "adder width must be 1..=8 bits, got {}", bits);

    let n = 1usize << bits;
    let rows = n * n;
    let mut inputs = Matrix::zeros(rows, 2 * bits);
    let mut targets = Matrix::zeros(rows, bits + 1);

    for i in 0..rows {
        let x = i / n;
        let y = i % n;
        let z = x + y;

        for j in 0..bits {
            inputs[(i, j)] = ((x >> j) & 1) as f64;
            inputs[(i, j + bits)] = ((y >> j) & 1) as f64;
            targets[(i, j)] = ((z >> j) & 1) as f64;
        }
        targets[(i, bits)] = if z >= n { 1.0 } else { 0.0 };
    }

    (inputs, targets)
}

/// Topology used for the adder: `[2·bits, 2·bits + 1, bits + 1]`.
pub fn adder_model(bits: usize) -> Result<ModelSpec> {
    ModelSpec::new(vec![2 * bits, 2 * bits + 1, bits + 1])
}

/// What the network claims `x + y` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdderOutcome {
    /// The carry output fired.
    Overflow,
    /// The sum bits, each thresholded at 0.5.
    Sum(usize),
}

impl AdderOutcome {
    /// Whether this prediction is right for `x + y` on a `bits`-bit adder.
    pub fn is_correct(&self, x: usize, y: usize, bits: usize) -> bool {
        let sum = x + y;
        match *self {
            AdderOutcome::Overflow => sum >= 1 << bits,
            AdderOutcome::Sum(z) => z == sum,
        }
    }
}

/// Runs `x + y` through `network` and decodes its output layer.
pub fn predict_sum(network: &mut Network, bits: usize, x: usize, y: usize) -> AdderOutcome {
    let mut input = vec![0.0; 2 * bits];
    for j in 0..bits {
        input[j] = ((x >> j) & 1) as f64;
        input[j + bits] = ((y >> j) & 1) as f64;
    }

    let output = network.predict(&input);
    if output[bits] > 0.5 {
        return AdderOutcome::Overflow;
    }

    let z = (0..bits)
        .filter(|&j| output[j] > 0.5)
        .fold(0, |z, j| z | (1 << j));
    AdderOutcome::Sum(z)
}

/// Tally of wrong answers over every `x + y` with `x, y < 2^bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderReport {
    pub fails: usize,
    pub total: usize,
}

impl AdderReport {
    /// `fails / total`, in [0, 1].
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.fails as f64 / self.total as f64
        }
    }
}

pub fn evaluate_adder(network: &mut Network, bits: usize) -> AdderReport {
    let n = 1usize << bits;
    let mut report = AdderReport { fails: 0, total: 0 };

    for x in 0..n {
        for y in 0..n {
            report.total += 1;
            if !predict_sum(network, bits, x, y).is_correct(x, y, bits) {
                report.fails += 1;
            }
        }
    }

    report
}
