//! Byte-level mutation of seed buffers

mod mutator;
mod rules;

pub use mutator::{MutationStats, Mutator};
pub use rules::MutationRules;
