//! SSA values.
//!
//! A value is a single computed result with a type and a kind tag. It is
//! either the result of an operation or an argument of a block. Each value
//! roots its own use-def ledger (see [`crate::use_list`]).

use crate::operation::OpId;
use crate::region::BlockId;
use crate::store::entity_id;
use crate::types::Type;
use crate::use_list::UseId;

entity_id!(
    /// Handle to a value in a function's value store.
    ValueId,
    "%"
);

/// The closed set of value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Argument of a block in a CFG function.
    BlockArgument,

    /// Result of an operation in a CFG function.
    InstructionResult,

    /// Parameter of a structured function.
    FunctionArgument,

    /// Result of an operation in a structured function.
    StatementResult,

    /// Loop variable bound by a region nested under a structured operation.
    InductionVariable,
}

impl ValueKind {
    /// Check if values of this kind are produced by an operation.
    pub fn is_result(self) -> bool {
        matches!(
            self,
            ValueKind::InstructionResult | ValueKind::StatementResult
        )
    }

    /// Check if values of this kind are bound by a block.
    pub fn is_argument(self) -> bool {
        !self.is_result()
    }
}

/// What a value hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOwner {
    /// The `index`th result of `op`.
    Op { op: OpId, index: u32 },

    /// The `index`th argument of `block`.
    Block { block: BlockId, index: u32 },
}

/// Storage for one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueData {
    kind: ValueKind,
    ty: Type,
    owner: ValueOwner,

    /// Head of the ledger: most recently linked use of this value.
    pub(crate) first_use: Option<UseId>,
}

impl ValueData {
    pub(crate) fn new(kind: ValueKind, ty: Type, owner: ValueOwner) -> Self {
        Self {
            kind,
            ty,
            owner,
            first_use: None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn owner(&self) -> ValueOwner {
        self.owner
    }

    /// The operation that produced this value, if it is a result.
    pub fn defining_op(&self) -> Option<OpId> {
        match self.owner {
            ValueOwner::Op { op, .. } => Some(op),
            ValueOwner::Block { .. } => None,
        }
    }

    /// Check if no operand slot currently reads this value.
    pub fn use_empty(&self) -> bool {
        self.first_use.is_none()
    }
}
