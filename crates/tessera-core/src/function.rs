//! Functions and modules.
//!
//! A [`Function`] owns every entity of its body in typed stores: values, uses,
//! operations, blocks and regions. All cross references are handles into those
//! stores, so the cyclic value/use/operation graph needs no shared pointers.

use crate::operation::{OpId, Operation, OperationState};
use crate::region::{Block, BlockId, Region, RegionId};
use crate::store::EntityStore;
use crate::types::Type;
use crate::use_list::{Use, UseId};
use crate::value::{ValueData, ValueId, ValueKind, ValueOwner};
use crate::{Error, Result};
use std::collections::HashSet;

/// The flavour of a function body, which fixes the kinds of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Blocks of instructions. Results are `InstructionResult`s and every
    /// block argument, parameters included, is a `BlockArgument`.
    Cfg,

    /// Nested statements. Results are `StatementResult`s, parameters are
    /// `FunctionArgument`s and arguments of regions nested under an operation
    /// are `InductionVariable`s.
    Structured,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    kind: FunctionKind,
    body: RegionId,
    entry: BlockId,

    pub(crate) values: EntityStore<ValueId, ValueData>,
    pub(crate) uses: EntityStore<UseId, Use>,
    pub(crate) ops: EntityStore<OpId, Operation>,
    pub(crate) blocks: EntityStore<BlockId, Block>,
    pub(crate) regions: EntityStore<RegionId, Region>,
}

impl Function {
    /// Create a function with an empty body region holding one entry block.
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        let mut regions = EntityStore::new();
        let mut blocks = EntityStore::new();

        let body = regions.alloc(Region {
            blocks: Vec::new(),
            parent: None,
        });
        let entry = blocks.alloc(Block::new(body));
        if let Some(region) = regions.get_mut(body) {
            region.blocks.push(entry);
        }

        Self {
            name: name.into(),
            kind,
            body,
            entry,
            values: EntityStore::new(),
            uses: EntityStore::new(),
            ops: EntityStore::new(),
            blocks,
            regions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The body region.
    pub fn body(&self) -> RegionId {
        self.body
    }

    /// The first block of the body; its arguments are the parameters.
    pub fn entry_block(&self) -> BlockId {
        self.entry
    }

    /// Function parameters.
    pub fn arguments(&self) -> &[ValueId] {
        self.blocks
            .get(self.entry)
            .map(|block| block.arguments.as_slice())
            .unwrap_or(&[])
    }

    // ── Entity access ──

    pub fn op(&self, id: OpId) -> Result<&Operation> {
        self.ops
            .get(id)
            .ok_or_else(|| Error::InvalidIr(format!("Operation {} not found", id)))
    }

    pub(crate) fn op_mut(&mut self, id: OpId) -> Result<&mut Operation> {
        self.ops
            .get_mut(id)
            .ok_or_else(|| Error::InvalidIr(format!("Operation {} not found", id)))
    }

    pub fn value(&self, id: ValueId) -> Result<&ValueData> {
        self.values
            .get(id)
            .ok_or_else(|| Error::InvalidIr(format!("Value {} not found", id)))
    }

    pub(crate) fn value_mut(&mut self, id: ValueId) -> Result<&mut ValueData> {
        self.values
            .get_mut(id)
            .ok_or_else(|| Error::InvalidIr(format!("Value {} not found", id)))
    }

    pub fn block(&self, id: BlockId) -> Result<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| Error::InvalidIr(format!("Block {} not found", id)))
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Result<&mut Block> {
        self.blocks
            .get_mut(id)
            .ok_or_else(|| Error::InvalidIr(format!("Block {} not found", id)))
    }

    pub fn region(&self, id: RegionId) -> Result<&Region> {
        self.regions
            .get(id)
            .ok_or_else(|| Error::InvalidIr(format!("Region {} not found", id)))
    }

    /// Check whether an operation is still part of the function.
    pub fn contains_op(&self, id: OpId) -> bool {
        self.ops.contains(id)
    }

    /// Iterate over all live operations in creation order.
    pub fn ops(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.ops.iter()
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of use records (operand slots) in the function.
    pub fn num_uses(&self) -> usize {
        self.uses.len()
    }

    // ── Value queries ──

    pub fn value_kind(&self, id: ValueId) -> Result<ValueKind> {
        Ok(self.value(id)?.kind())
    }

    pub fn value_type(&self, id: ValueId) -> Result<&Type> {
        Ok(self.value(id)?.ty())
    }

    /// The operation that produced `id`, or `None` for block arguments,
    /// function arguments and induction variables.
    pub fn defining_op(&self, id: ValueId) -> Result<Option<OpId>> {
        Ok(self.value(id)?.defining_op())
    }

    /// The value read by operand slot `index` of `op`.
    pub fn operand(&self, op: OpId, index: usize) -> Result<ValueId> {
        let use_id = self.op(op)?.operands.get(index).copied().ok_or_else(|| {
            Error::InvalidIr(format!("Operation {} has no operand {}", op, index))
        })?;
        Ok(self.use_data(use_id)?.value())
    }

    /// The values read by every operand slot of `op`, in order.
    pub fn operands(&self, op: OpId) -> Result<Vec<ValueId>> {
        self.op(op)?
            .operands
            .iter()
            .map(|&use_id| self.use_data(use_id).map(Use::value))
            .collect()
    }

    pub fn result(&self, op: OpId, index: usize) -> Result<ValueId> {
        self.op(op)?
            .result(index)
            .ok_or_else(|| Error::InvalidIr(format!("Operation {} has no result {}", op, index)))
    }

    /// The operation whose region contains `op`, if any.
    pub fn parent_op(&self, op: OpId) -> Result<Option<OpId>> {
        match self.op(op)?.parent {
            Some(block) => {
                let region = self.block(block)?.parent;
                Ok(self.region(region)?.parent)
            }
            None => Ok(None),
        }
    }

    // ── Structure mutation ──

    /// Append a new block to `region`.
    pub fn add_block(&mut self, region: RegionId) -> Result<BlockId> {
        self.region(region)?;
        let block = self.blocks.alloc(Block::new(region));
        self.regions
            .get_mut(region)
            .ok_or_else(|| Error::InvalidIr(format!("Region {} not found", region)))?
            .blocks
            .push(block);
        Ok(block)
    }

    /// Append an argument of type `ty` to `block`.
    ///
    /// The argument's kind follows from where the block sits: see
    /// [`FunctionKind`].
    pub fn add_argument(&mut self, block: BlockId, ty: Type) -> Result<ValueId> {
        let kind = self.argument_kind(block)?;
        let index = self.block(block)?.arguments.len() as u32;
        let value = self
            .values
            .alloc(ValueData::new(kind, ty, ValueOwner::Block { block, index }));
        self.block_mut(block)?.arguments.push(value);
        Ok(value)
    }

    fn argument_kind(&self, block: BlockId) -> Result<ValueKind> {
        let region = self.region(self.block(block)?.parent)?;
        Ok(match self.kind {
            FunctionKind::Cfg => ValueKind::BlockArgument,
            FunctionKind::Structured if region.parent.is_some() => ValueKind::InductionVariable,
            FunctionKind::Structured if block == self.entry => ValueKind::FunctionArgument,
            FunctionKind::Structured => ValueKind::BlockArgument,
        })
    }

    fn result_kind(&self) -> ValueKind {
        match self.kind {
            FunctionKind::Cfg => ValueKind::InstructionResult,
            FunctionKind::Structured => ValueKind::StatementResult,
        }
    }

    /// Create an operation from `state` and place it at `position` in `block`.
    ///
    /// Every operand is linked into the ledger of the value it reads.
    pub(crate) fn insert_operation(
        &mut self,
        state: OperationState,
        block: BlockId,
        position: usize,
    ) -> Result<OpId> {
        let len = self.block(block)?.ops.len();
        if position > len {
            return Err(Error::InvalidIr(format!(
                "Insertion position {} is past the end of block {} ({} operations)",
                position, block, len
            )));
        }
        for &operand in &state.operands {
            self.value(operand)?;
        }

        let op = self.ops.alloc(Operation {
            name: state.name,
            location: state.location,
            attributes: state.attributes,
            operands: Vec::new(),
            results: Vec::new(),
            regions: Vec::new(),
            parent: Some(block),
        });
        let result_kind = self.result_kind();

        let results: Vec<ValueId> = state
            .result_types
            .into_iter()
            .enumerate()
            .map(|(index, ty)| {
                self.values.alloc(ValueData::new(
                    result_kind,
                    ty,
                    ValueOwner::Op {
                        op,
                        index: index as u32,
                    },
                ))
            })
            .collect();

        let mut regions = Vec::with_capacity(state.num_regions);
        for _ in 0..state.num_regions {
            let region = self.regions.alloc(Region {
                blocks: Vec::new(),
                parent: Some(op),
            });
            self.add_block(region)?;
            regions.push(region);
        }

        let mut operands = Vec::with_capacity(state.operands.len());
        for (index, value) in state.operands.into_iter().enumerate() {
            let use_id = self.uses.alloc(Use::new(value, op, index));
            self.link_use(use_id)?;
            operands.push(use_id);
        }

        let operation = self.op_mut(op)?;
        operation.results = results;
        operation.regions = regions;
        operation.operands = operands;

        self.block_mut(block)?.ops.insert(position, op);
        Ok(op)
    }

    /// Erase an operation together with everything nested in its regions.
    ///
    /// Fails with [`Error::OperationInUse`] if a value defined by the
    /// operation or inside its regions is still read by an operation outside
    /// of it. On success all of its operand slots have been removed from the
    /// ledgers they were linked into, and its results, regions, blocks and
    /// nested operations no longer exist.
    pub fn erase_op(&mut self, op: OpId) -> Result<()> {
        let subtree = self.subtree(op)?;
        let inside: HashSet<OpId> = subtree.iter().copied().collect();

        let mut outside_uses = 0;
        for &id in &subtree {
            for value in self.defined_values(id)? {
                for use_id in self.uses(value)? {
                    if !inside.contains(&self.use_data(use_id)?.owner()) {
                        outside_uses += 1;
                    }
                }
            }
        }
        if outside_uses > 0 {
            return Err(Error::OperationInUse {
                op,
                name: self.op(op)?.name.clone(),
                uses: outside_uses,
            });
        }

        if let Some(parent) = self.op(op)?.parent {
            self.block_mut(parent)?.ops.retain(|&other| other != op);
        }

        // Drop every operand reference first so values defined and used
        // inside the subtree can be freed in any order.
        for &id in &subtree {
            let operands = std::mem::take(&mut self.op_mut(id)?.operands);
            for use_id in operands {
                self.unlink_use(use_id)?;
                self.uses.remove(use_id);
            }
        }

        for &id in &subtree {
            let Some(operation) = self.ops.remove(id) else {
                continue;
            };
            for value in operation.results {
                self.values.remove(value);
            }
            for region in operation.regions {
                let Some(region) = self.regions.remove(region) else {
                    continue;
                };
                for block in region.blocks {
                    if let Some(block) = self.blocks.remove(block) {
                        for argument in block.arguments {
                            self.values.remove(argument);
                        }
                    }
                }
            }
        }

        tracing::trace!(%op, nested = subtree.len() - 1, "erased operation");
        Ok(())
    }

    /// `op` followed by every operation nested in its regions, pre-order.
    fn subtree(&self, op: OpId) -> Result<Vec<OpId>> {
        let mut ops = vec![op];
        for &region in self.op(op)?.regions() {
            self.collect_region(region, &mut ops)?;
        }
        Ok(ops)
    }

    /// Results of `op` plus arguments of the blocks directly in its regions.
    fn defined_values(&self, op: OpId) -> Result<Vec<ValueId>> {
        let operation = self.op(op)?;
        let mut values = operation.results.clone();
        for &region in &operation.regions {
            for &block in &self.region(region)?.blocks {
                values.extend_from_slice(&self.block(block)?.arguments);
            }
        }
        Ok(values)
    }

    // ── Traversal ──

    /// Every operation of the body in top-down pre-order: an operation comes
    /// before the operations nested in its regions.
    ///
    /// The result is a snapshot, so callers may mutate the function while
    /// iterating it.
    pub fn preorder(&self) -> Result<Vec<OpId>> {
        let mut ops = Vec::with_capacity(self.ops.len());
        self.collect_region(self.body, &mut ops)?;
        Ok(ops)
    }

    /// Pre-order snapshot of the operations nested in `region`.
    pub fn preorder_in(&self, region: RegionId) -> Result<Vec<OpId>> {
        let mut ops = Vec::new();
        self.collect_region(region, &mut ops)?;
        Ok(ops)
    }

    fn collect_region(&self, region: RegionId, out: &mut Vec<OpId>) -> Result<()> {
        for &block in &self.region(region)?.blocks {
            for &op in &self.block(block)?.ops {
                out.push(op);
                for &nested in &self.op(op)?.regions {
                    self.collect_region(nested, out)?;
                }
            }
        }
        Ok(())
    }
}

/// An ordered collection of uniquely named functions.
#[derive(Debug, Clone, Default)]
pub struct Module {
    functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function. Names must be unique within the module.
    pub fn add_function(&mut self, function: Function) -> Result<()> {
        if self.function(function.name()).is_some() {
            return Err(Error::DuplicateFunction(function.name().to_string()));
        }
        self.functions.push(function);
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name() == name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.iter_mut().find(|f| f.name() == name)
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut [Function] {
        &mut self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
