//! Standard operation kinds for Tessera.
//!
//! This crate gives the core IR its concrete operation kinds and their
//! constant-folding semantics.
//!
//! # Operator Families
//!
//! - **Binary arithmetic**: addi, subi, muli, divsi, remsi, addf, subf, mulf, divf
//!
//! # Individual Operators
//!
//! Kinds that don't fit into families:
//! - Constant (`constant`, from `tessera-core`)
//! - Combined quotient/remainder (`divrem`, two results)
//! - Terminator (`return`)
//! - Structured loop (`for`, one region binding an induction variable)

pub mod build;
pub mod families;
pub mod operators;

mod registry;

// Re-export operator types
pub use families::BinaryArithOp;
pub use operators::{DivRemOp, ForOp, ReturnOp};
pub use registry::core_operator_registry;

/// Result type for operator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for operator operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Operator error: {0}")]
    Operator(String),

    #[error(transparent)]
    Core(#[from] tessera_core::Error),
}
