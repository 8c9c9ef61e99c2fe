use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;
use crate::grad::backprop::back_prop;
use crate::grad::finite_diff::finite_diff;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Perturbation used by `FiniteDiff` when none is given explicitly.
pub const DEFAULT_EPS: f64 = 1e-1;

/// Selects how the training loop computes the gradient network.
///
/// - `BackProp`   — analytic back-propagation; the default.
/// - `FiniteDiff` — forward differences with perturbation `eps`; one batch
///   evaluation per parameter, mostly useful to cross-check `BackProp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GradientMethod {
    BackProp,
    FiniteDiff { eps: f64 },
}

impl GradientMethod {
    /// Fills `gradient` with the gradient of the batch cost at `network`'s
    /// current parameters.
    pub fn compute<A, B>(
        &self,
        network: &mut Network,
        gradient: &mut Network,
        inputs: &Matrix<A>,
        targets: &Matrix<B>,
    ) where
        A: AsRef<[f64]>,
        B: AsRef<[f64]>,
    {
        match *self {
            GradientMethod::BackProp => back_prop(network, gradient, inputs, targets),
            GradientMethod::FiniteDiff { eps } => finite_diff(network, gradient, eps, inputs, targets),
        }
    }
}

impl Default for GradientMethod {
    fn default() -> Self {
        GradientMethod::BackProp
    }
}

impl FromStr for GradientMethod {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "backprop" | "back-prop" => Ok(GradientMethod::BackProp),
            "f" | "finite-diff" | "finitediff" => Ok(GradientMethod::FiniteDiff { eps: DEFAULT_EPS }),
            _ => Err(NetworkError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for GradientMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientMethod::BackProp => write!(f, "Back Propagation"),
            GradientMethod::FiniteDiff { eps } => write!(f, "Finite Difference (eps = {})", eps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!("b".parse::<GradientMethod>().unwrap(), GradientMethod::BackProp);
        assert_eq!(
            "F".parse::<GradientMethod>().unwrap(),
            GradientMethod::FiniteDiff { eps: DEFAULT_EPS }
        );
        assert!(matches!(
            "x".parse::<GradientMethod>(),
            Err(NetworkError::InvalidMethod(name)) if name == "x"
        ));
    }

    #[test]
    fn test_default_is_back_prop() {
        assert_eq!(GradientMethod::default(), GradientMethod::BackProp);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&GradientMethod::FiniteDiff { eps: 0.01 }).unwrap();
        assert_eq!(json, r#"{"type":"finite_diff","eps":0.01}"#);

        let parsed: GradientMethod = serde_json::from_str(r#"{"type":"back_prop"}"#).unwrap();
        assert_eq!(parsed, GradientMethod::BackProp);
    }

    #[test]
    fn test_compute_dispatches() {
        let inputs = Matrix::from_vec(1, 1, vec![1.0]);
        let targets = Matrix::from_vec(1, 1, vec![0.0]);

        let mut net = Network::from_widths(&[1, 1]).unwrap();
        let mut by_bp = Network::from_widths(&[1, 1]).unwrap();
        let mut by_fd = Network::from_widths(&[1, 1]).unwrap();
        GradientMethod::BackProp.compute(&mut net, &mut by_bp, &inputs, &targets);
        GradientMethod::FiniteDiff { eps: 1e-6 }.compute(&mut net, &mut by_fd, &inputs, &targets);

        let bp = by_bp.biases()[0][(0, 0)];
        let fd = by_fd.biases()[0][(0, 0)];
        assert!(bp > 0.0);
        assert!((bp - fd).abs() < 1e-5);
    }
}
