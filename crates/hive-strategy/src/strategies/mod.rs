mod composite;
mod critique;
mod debate;
mod sampling;
mod single_call;
mod tree;

pub use composite::{mixture, progressive};
pub use critique::{reflection, step_verify};
pub use debate::debate;
pub use sampling::{best_of_n, self_consistency};
pub use single_call::{chain_of_thought, direct};
pub use tree::tree_of_thoughts;
