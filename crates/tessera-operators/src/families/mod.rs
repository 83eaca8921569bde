//! Collapsed operator families that eliminate code duplication.
//!
//! These families group similar operators together, implementing shared logic once
//! and parameterizing only the differences (name, fold functions).

pub mod binary_arith;

pub use binary_arith::BinaryArithOp;
