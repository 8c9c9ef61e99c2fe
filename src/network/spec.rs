use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Layer widths of a network, input first and output last.
///
/// `[2, 2, 1]` describes two inputs, one hidden layer of two neurons and a
/// single output. The widths are fixed for the lifetime of any `Network`
/// built from them.
///
/// Deserialized specs go through the same validation as `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawModelSpec")]
pub struct ModelSpec {
    pub widths: Vec<usize>,
}

#[derive(Deserialize)]
struct RawModelSpec {
    widths: Vec<usize>,
}

impl TryFrom<RawModelSpec> for ModelSpec {
    type Error = NetworkError;

    fn try_from(raw: RawModelSpec) -> Result<ModelSpec> {
        ModelSpec::new(raw.widths)
    }
}

impl ModelSpec {
    /// Validates `widths`: at least an input and an output layer, none empty.
    pub fn new(widths: Vec<usize>) -> Result<ModelSpec> {
        let spec = ModelSpec { widths };
        spec.validate()?;
        Ok(spec)
    }

    /// Rejects fewer than two widths or any zero width.
    pub fn validate(&self) -> Result<()> {
        if self.widths.len() < 2 {
            return Err(NetworkError::invalid_model(
                &self.widths,
                "a model needs at least an input and an output width",
            ));
        }
        if let Some(pos) = self.widths.iter().position(|&w| w == 0) {
            return Err(NetworkError::invalid_model(
                &self.widths,
                format!("layer {} has zero width", pos),
            ));
        }
        Ok(())
    }

    /// Number of weight layers (every layer except the input).
    pub fn layer_count(&self) -> usize {
        self.widths.len() - 1
    }

    pub fn input_width(&self) -> usize {
        self.widths[0]
    }

    pub fn output_width(&self) -> usize {
        self.widths[self.widths.len() - 1]
    }

    /// Total number of trainable weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.widths
            .windows(2)
            .map(|pair| pair[0] * pair[1] + pair[1])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        let spec = ModelSpec::new(vec![4, 5, 3]).unwrap();
        assert_eq!(spec.layer_count(), 2);
        assert_eq!(spec.input_width(), 4);
        assert_eq!(spec.output_width(), 3);
        assert_eq!(spec.parameter_count(), 4 * 5 + 5 + 5 * 3 + 3);
    }

    #[test]
    fn test_too_few_widths() {
        assert!(matches!(
            ModelSpec::new(vec![3]),
            Err(NetworkError::InvalidModel { .. })
        ));
        assert!(ModelSpec::new(vec![]).is_err());
    }

    #[test]
    fn test_zero_width() {
        let err = ModelSpec::new(vec![2, 0, 1]).unwrap_err();
        assert!(err.to_string().contains("layer 1 has zero width"));
    }

    #[test]
    fn test_json_with_zero_width_is_rejected() {
        let err = serde_json::from_str::<ModelSpec>(r#"{"widths":[2,0,1]}"#).unwrap_err();
        assert!(err.to_string().contains("layer 1 has zero width"));
        assert!(serde_json::from_str::<ModelSpec>(r#"{"widths":[4]}"#).is_err());
    }

    #[test]
    fn test_validate_struct_literal() {
        assert!(ModelSpec { widths: vec![2, 0, 1] }.validate().is_err());
        assert!(ModelSpec { widths: vec![2, 3, 1] }.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let spec: ModelSpec = serde_json::from_str(r#"{"widths":[2,2,1]}"#).unwrap();
        assert_eq!(spec, ModelSpec::new(vec![2, 2, 1]).unwrap());
    }
}
