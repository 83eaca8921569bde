//! Core intermediate representation for Tessera.
//!
//! This crate provides the value/use substrate every transformation builds on:
//! - Per-function stores of values, uses, operations, blocks and regions (`Function`)
//! - Use-def ledgers with O(1) link/unlink and `replace_all_uses_with`
//! - Operator trait and registry for per-kind constant and fold capabilities
//! - Pass trait and an explicit pass registry
//! - A ledger verifier, a DOT view of the def-use graph and a nested pattern matcher

pub mod builder;
pub mod constant;
pub mod context;
pub mod dot;
pub mod function;
pub mod location;
pub mod matcher;
pub mod operation;
pub mod operator;
pub mod pass;
pub mod region;
pub mod registry;
pub mod store;
pub mod types;
pub mod use_list;
pub mod value;
pub mod verify;

// Re-export commonly used types
pub use builder::{Builder, InsertPoint};
pub use constant::{CONSTANT_OP, ConstantOp, VALUE_ATTR};
pub use context::FoldCtx;
pub use dot::{GraphPrintOptions, to_def_use_dot};
pub use function::{Function, FunctionKind, Module};
pub use location::Location;
pub use matcher::{NestedMatch, NestedPattern};
pub use operation::{OpId, Operation, OperationState};
pub use operator::Operator;
pub use pass::{Pass, PassInfo, PassRegistry};
pub use region::{Block, BlockId, Region, RegionId};
pub use registry::OperatorRegistry;
pub use store::{EntityId, EntityStore};
pub use types::{Attribute, Type, TypeContext, TypeKind};
pub use use_list::{Use, UseId, Uses};
pub use value::{ValueData, ValueId, ValueKind, ValueOwner};

/// Result type using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tessera-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid IR: {0}")]
    InvalidIr(String),

    #[error("Cannot erase {op} ('{name}'): {uses} use(s) of its values remain outside it")]
    OperationInUse {
        op: OpId,
        name: String,
        uses: usize,
    },

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error("Function '{0}' is already defined in the module")]
    DuplicateFunction(String),

    #[error("Pass '{0}' is already registered")]
    DuplicatePass(String),

    #[error("No pass registered under the name '{0}'")]
    UnknownPass(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
