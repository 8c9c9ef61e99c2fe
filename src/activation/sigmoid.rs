/// Logistic activation `1 / (1 + e^-x)`, squashing any input into (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its output `a = sigmoid(x)`.
///
/// Back-propagation only keeps post-activation values, so the derivative is
/// taken from `a` rather than from the pre-activation input.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert!(sigmoid(40.0) <= 1.0 && sigmoid(40.0) > 0.999);
        assert!(sigmoid(-40.0) >= 0.0 && sigmoid(-40.0) < 0.001);
        assert_relative_eq!(sigmoid(1.5) + sigmoid(-1.5), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_derivative_matches_numeric() {
        let h = 1e-6;
        for &x in &[-3.0, -0.5, 0.0, 0.7, 2.5] {
            let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert_relative_eq!(sigmoid_derivative(sigmoid(x)), numeric, epsilon = 1e-8);
        }
    }
}
