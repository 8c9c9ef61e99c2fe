pub mod loop_fn;
pub mod step_stats;
pub mod train_config;
pub mod trainer;

pub use loop_fn::{train_loop, train_step};
pub use step_stats::StepStats;
pub use train_config::TrainConfig;
pub use trainer::Trainer;
