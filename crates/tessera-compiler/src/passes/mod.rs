//! Function passes.

mod constant_fold;
mod print_graph;

pub use constant_fold::ConstantFoldPass;
pub use print_graph::PrintGraphPass;
