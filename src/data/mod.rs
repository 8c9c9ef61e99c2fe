//! Small boolean datasets used by the demos and tests.

pub mod adder;
pub mod xor;

pub use adder::{adder_model, adder_table, evaluate_adder, predict_sum, AdderOutcome, AdderReport};
pub use xor::{split_columns, xor_table};
