//! Individual operator implementations that don't fit into families.

pub mod divrem;
pub mod for_op;
pub mod return_op;

// Re-export all operators
pub use divrem::DivRemOp;
pub use for_op::ForOp;
pub use return_op::ReturnOp;
