//! Operations: the nodes of the def-use graph.

use crate::location::Location;
use crate::region::{BlockId, RegionId};
use crate::store::entity_id;
use crate::types::{Attribute, Type};
use crate::use_list::UseId;
use crate::value::ValueId;
use std::collections::HashMap;

entity_id!(
    /// Handle to an operation in a function's operation store.
    OpId,
    "op"
);

/// An operation in a function body.
///
/// Operand slots are [`UseId`]s: the use record is the single place that says
/// which value the slot reads, and it is also linked into that value's ledger.
/// Operand and result counts are fixed when the operation is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub(crate) name: String,
    pub(crate) location: Location,
    pub(crate) attributes: HashMap<String, Attribute>,
    pub(crate) operands: Vec<UseId>,
    pub(crate) results: Vec<ValueId>,
    pub(crate) regions: Vec<RegionId>,
    pub(crate) parent: Option<BlockId>,
}

impl Operation {
    /// Get the operation name (e.g., "constant", "addi").
    ///
    /// The name is the key used to look the operation kind up in an
    /// [`OperatorRegistry`](crate::OperatorRegistry).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn attributes(&self) -> &HashMap<String, Attribute> {
        &self.attributes
    }

    /// Get an attribute.
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Operand slots in order. Resolve them with
    /// [`Function::operand`](crate::Function::operand).
    pub fn operand_uses(&self) -> &[UseId] {
        &self.operands
    }

    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    pub fn results(&self) -> &[ValueId] {
        &self.results
    }

    pub fn result(&self, index: usize) -> Option<ValueId> {
        self.results.get(index).copied()
    }

    pub fn num_results(&self) -> usize {
        self.results.len()
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// The block this operation is placed in.
    pub fn parent_block(&self) -> Option<BlockId> {
        self.parent
    }
}

/// Everything needed to create an operation.
///
/// # Example
///
/// ```ignore
/// let state = OperationState::new("addi", Location::Unknown)
///     .with_operands([lhs, rhs])
///     .with_result_types([i32]);
/// let op = Builder::at_end(&mut func, entry).create(state)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OperationState {
    pub name: String,
    pub location: Location,
    pub operands: Vec<ValueId>,
    pub result_types: Vec<Type>,
    pub attributes: HashMap<String, Attribute>,
    pub num_regions: usize,
}

impl OperationState {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            ..Self::default()
        }
    }

    pub fn with_operands(mut self, operands: impl IntoIterator<Item = ValueId>) -> Self {
        self.operands.extend(operands);
        self
    }

    pub fn with_result_types(mut self, types: impl IntoIterator<Item = Type>) -> Self {
        self.result_types.extend(types);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Attribute) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Request `count` empty regions, each created with one entry block.
    pub fn with_regions(mut self, count: usize) -> Self {
        self.num_regions = count;
        self
    }
}
