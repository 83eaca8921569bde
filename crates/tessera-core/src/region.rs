//! Blocks and regions.
//!
//! A region is an ordered list of blocks. A block binds arguments and holds an
//! ordered list of operations. A function body is a region with no parent
//! operation; any other region belongs to exactly one operation.

use crate::operation::OpId;
use crate::store::entity_id;
use crate::value::ValueId;

entity_id!(
    /// Handle to a block in a function's block store.
    BlockId,
    "^bb"
);

entity_id!(
    /// Handle to a region in a function's region store.
    RegionId,
    "region"
);

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub(crate) arguments: Vec<ValueId>,
    pub(crate) ops: Vec<OpId>,
    pub(crate) parent: RegionId,
}

impl Block {
    pub(crate) fn new(parent: RegionId) -> Self {
        Self {
            arguments: Vec::new(),
            ops: Vec::new(),
            parent,
        }
    }

    pub fn arguments(&self) -> &[ValueId] {
        &self.arguments
    }

    /// Operations in program order.
    pub fn ops(&self) -> &[OpId] {
        &self.ops
    }

    pub fn parent(&self) -> RegionId {
        self.parent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub(crate) blocks: Vec<BlockId>,
    pub(crate) parent: Option<OpId>,
}

impl Region {
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// The first block, if the region has any.
    pub fn entry_block(&self) -> Option<BlockId> {
        self.blocks.first().copied()
    }

    /// The operation owning this region, or `None` for a function body.
    pub fn parent_op(&self) -> Option<OpId> {
        self.parent
    }
}
