pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod grad;
pub mod optim;
pub mod train;
pub mod data;
pub mod error;

// Convenience re-exports
pub use math::matrix::{Matrix, MatrixView, MatrixViewMut};
pub use activation::sigmoid::sigmoid;
pub use network::network::Network;
pub use network::spec::ModelSpec;
pub use loss::mse::MseLoss;
pub use grad::{back_prop, finite_diff, GradientMethod};
pub use optim::sgd::Sgd;
pub use train::{train_loop, StepStats, TrainConfig, Trainer};
pub use error::{NetworkError, Result};
