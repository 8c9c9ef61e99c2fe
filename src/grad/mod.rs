pub mod backprop;
pub mod finite_diff;
pub mod method;

pub use backprop::back_prop;
pub use finite_diff::finite_diff;
pub use method::{GradientMethod, DEFAULT_EPS};
