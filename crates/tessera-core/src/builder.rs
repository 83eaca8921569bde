//! Operation builder.

use crate::constant::{CONSTANT_OP, VALUE_ATTR};
use crate::function::Function;
use crate::location::Location;
use crate::operation::{OpId, OperationState};
use crate::region::BlockId;
use crate::types::{Attribute, Type};
use crate::value::ValueId;
use crate::{Error, Result};

/// Where the builder places new operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPoint {
    /// Append to the end of a block.
    End(BlockId),

    /// Insert immediately before an existing operation.
    Before(OpId),
}

/// Creates operations at an insertion point inside a function.
///
/// New operations are inserted in order: creating `a` then `b` before the
/// same anchor yields `a, b, anchor`.
pub struct Builder<'f> {
    func: &'f mut Function,
    point: InsertPoint,
}

impl<'f> Builder<'f> {
    pub fn new(func: &'f mut Function, point: InsertPoint) -> Self {
        Self { func, point }
    }

    pub fn at_end(func: &'f mut Function, block: BlockId) -> Self {
        Self::new(func, InsertPoint::End(block))
    }

    pub fn before(func: &'f mut Function, op: OpId) -> Self {
        Self::new(func, InsertPoint::Before(op))
    }

    pub fn insertion_point(&self) -> InsertPoint {
        self.point
    }

    pub fn set_insertion_point(&mut self, point: InsertPoint) {
        self.point = point;
    }

    /// The function being built.
    pub fn function(&self) -> &Function {
        self.func
    }

    pub fn function_mut(&mut self) -> &mut Function {
        self.func
    }

    /// Create an operation at the insertion point.
    pub fn create(&mut self, state: OperationState) -> Result<OpId> {
        let (block, position) = match self.point {
            InsertPoint::End(block) => (block, self.func.block(block)?.ops().len()),
            InsertPoint::Before(anchor) => {
                let block = self.func.op(anchor)?.parent_block().ok_or_else(|| {
                    Error::InvalidIr(format!("Operation {} is not placed in a block", anchor))
                })?;
                let position = self
                    .func
                    .block(block)?
                    .ops()
                    .iter()
                    .position(|&op| op == anchor)
                    .ok_or_else(|| {
                        Error::InvalidIr(format!(
                            "Operation {} missing from block {}",
                            anchor, block
                        ))
                    })?;
                (block, position)
            }
        };

        let op = self.func.insert_operation(state, block, position)?;
        tracing::trace!(%op, %block, position, "created operation");
        Ok(op)
    }

    /// Create a `constant` operation carrying `value` and return its result.
    pub fn create_constant(
        &mut self,
        location: Location,
        ty: Type,
        value: Attribute,
    ) -> Result<ValueId> {
        let op = self.create(
            OperationState::new(CONSTANT_OP, location)
                .with_attribute(VALUE_ATTR, value)
                .with_result_types([ty]),
        )?;
        self.func.result(op, 0)
    }
}
