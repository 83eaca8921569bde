//! Structural verification of a function's ledgers.

use crate::function::Function;
use crate::region::BlockId;
use crate::use_list::UseId;
use crate::value::ValueOwner;
use crate::{Error, Result};
use std::collections::HashSet;

impl Function {
    /// Check that every ledger and parent link in the function is consistent.
    ///
    /// Verifies that:
    /// - every live use sits in the ledger of the value it reads, exactly once,
    ///   with `prev`/`next` agreeing in both directions
    /// - every ledger entry is a live use
    /// - operand slot `i` of operation `o` names a use owned by `o` at index `i`
    /// - every value's owner lists it at the recorded index
    /// - every live operation is listed by its parent block
    pub fn verify(&self) -> Result<()> {
        let mut linked: HashSet<UseId> = HashSet::with_capacity(self.uses.len());

        for (value_id, value) in self.values.iter() {
            let mut prev: Option<UseId> = None;
            let mut cursor = value.first_use;
            while let Some(current) = cursor {
                let record = self.uses.get(current).ok_or_else(|| {
                    fail(format!("ledger of {} links to dead use {}", value_id, current))
                })?;
                if !linked.insert(current) {
                    return Err(fail(format!(
                        "use {} is linked more than once (ledger of {})",
                        current, value_id
                    )));
                }
                if record.value != value_id {
                    return Err(fail(format!(
                        "use {} reads {} but is linked into the ledger of {}",
                        current, record.value, value_id
                    )));
                }
                if record.prev != prev {
                    return Err(fail(format!(
                        "use {} has prev {:?}, expected {:?}",
                        current, record.prev, prev
                    )));
                }
                prev = Some(current);
                cursor = record.next;
            }

            match value.owner() {
                ValueOwner::Op { op, index } => {
                    let listed = self.ops.get(op).and_then(|o| o.result(index as usize));
                    if listed != Some(value_id) {
                        return Err(fail(format!(
                            "{} claims to be result {} of {}",
                            value_id, index, op
                        )));
                    }
                }
                ValueOwner::Block { block, index } => {
                    let listed = self
                        .blocks
                        .get(block)
                        .and_then(|b| b.arguments.get(index as usize).copied());
                    if listed != Some(value_id) {
                        return Err(fail(format!(
                            "{} claims to be argument {} of {}",
                            value_id, index, block
                        )));
                    }
                }
            }
        }

        for (use_id, record) in self.uses.iter() {
            if !linked.contains(&use_id) {
                return Err(fail(format!(
                    "use {} of {} is not linked into any ledger",
                    use_id, record.value
                )));
            }
            let slot = self
                .ops
                .get(record.owner())
                .and_then(|op| op.operands.get(record.operand_index()).copied());
            if slot != Some(use_id) {
                return Err(fail(format!(
                    "use {} claims operand {} of {}",
                    use_id,
                    record.operand_index(),
                    record.owner()
                )));
            }
        }

        for (op_id, op) in self.ops.iter() {
            for (index, &use_id) in op.operands.iter().enumerate() {
                let record = self.uses.get(use_id).ok_or_else(|| {
                    fail(format!("operand {} of {} is dead use {}", index, op_id, use_id))
                })?;
                if record.owner() != op_id || record.operand_index() != index {
                    return Err(fail(format!(
                        "operand {} of {} points at {}, owned by {} at {}",
                        index,
                        op_id,
                        use_id,
                        record.owner(),
                        record.operand_index()
                    )));
                }
            }

            let parent: Option<BlockId> = op.parent;
            let listed = parent
                .and_then(|block| self.blocks.get(block))
                .is_some_and(|block| block.ops.contains(&op_id));
            if !listed {
                return Err(fail(format!(
                    "{} ('{}') is not listed by its parent block",
                    op_id, op.name
                )));
            }
        }

        Ok(())
    }
}

fn fail(message: String) -> Error {
    Error::Verification(message)
}
