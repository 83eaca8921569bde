//! The use-def ledger.
//!
//! Every value roots an intrusive doubly linked list of [`Use`] records, one
//! per operand slot that reads it. The records live in the function's use
//! store and link to each other by [`UseId`], so the list is a plain index
//! chain with O(1) insertion and removal.
//!
//! The ledger is only changed through the operations in this module and
//! through operation creation/erasure, which keeps three facts in step:
//!
//! - a use is in the ledger of `v` iff its operand slot reads `v`;
//! - each use is in exactly one ledger;
//! - `prev`/`next` are mutually consistent and the head has no `prev`.

use crate::function::Function;
use crate::operation::OpId;
use crate::store::entity_id;
use crate::value::ValueId;
use crate::{Error, Result};

entity_id!(
    /// Handle to a use record, i.e. one operand slot.
    UseId,
    "use"
);

/// One operand slot of one operation, linked into the ledger of the value it
/// reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Use {
    pub(crate) value: ValueId,
    owner: OpId,
    operand_index: u32,
    pub(crate) prev: Option<UseId>,
    pub(crate) next: Option<UseId>,
}

impl Use {
    pub(crate) fn new(value: ValueId, owner: OpId, operand_index: usize) -> Self {
        Self {
            value,
            owner,
            operand_index: operand_index as u32,
            prev: None,
            next: None,
        }
    }

    /// The value this slot reads.
    pub fn value(&self) -> ValueId {
        self.value
    }

    /// The operation owning this slot.
    pub fn owner(&self) -> OpId {
        self.owner
    }

    pub fn operand_index(&self) -> usize {
        self.operand_index as usize
    }
}

/// Iterator over the ledger of one value, most recently linked first.
pub struct Uses<'a> {
    function: &'a Function,
    cursor: Option<UseId>,
}

impl Iterator for Uses<'_> {
    type Item = UseId;

    fn next(&mut self) -> Option<UseId> {
        let current = self.cursor?;
        self.cursor = self.function.uses.get(current).and_then(|u| u.next);
        Some(current)
    }
}

impl Function {
    pub fn use_data(&self, id: UseId) -> Result<&Use> {
        self.uses
            .get(id)
            .ok_or_else(|| Error::InvalidIr(format!("Use {} not found", id)))
    }

    fn use_mut(&mut self, id: UseId) -> Result<&mut Use> {
        self.uses
            .get_mut(id)
            .ok_or_else(|| Error::InvalidIr(format!("Use {} not found", id)))
    }

    /// Walk the ledger of `value`.
    ///
    /// The iterator borrows the function; collect it first to mutate while
    /// visiting.
    pub fn uses(&self, value: ValueId) -> Result<Uses<'_>> {
        Ok(Uses {
            function: self,
            cursor: self.value(value)?.first_use,
        })
    }

    /// Operations reading `value`, one entry per operand slot.
    pub fn users(&self, value: ValueId) -> Result<Vec<OpId>> {
        self.uses(value)?
            .map(|id| self.use_data(id).map(Use::owner))
            .collect()
    }

    pub fn use_count(&self, value: ValueId) -> Result<usize> {
        Ok(self.uses(value)?.count())
    }

    pub fn use_empty(&self, value: ValueId) -> Result<bool> {
        Ok(self.value(value)?.use_empty())
    }

    /// Redirect every operand slot reading `old` to read `new`.
    ///
    /// Afterwards `old` has no uses and `new` has gained all of them. When
    /// `old == new` nothing changes. Types are not compared; callers are
    /// responsible for substituting a value of a compatible type.
    pub fn replace_all_uses_with(&mut self, old: ValueId, new: ValueId) -> Result<()> {
        self.value(old)?;
        self.value(new)?;
        if old == new {
            return Ok(());
        }

        let mut moved = 0usize;
        let mut cursor = self.value(old)?.first_use;
        while let Some(current) = cursor {
            // Unlinking clears `next`, so read it first.
            cursor = self.use_data(current)?.next;
            self.unlink_use(current)?;
            self.use_mut(current)?.value = new;
            self.link_use(current)?;
            moved += 1;
        }

        tracing::trace!(%old, %new, moved, "replaced all uses");
        Ok(())
    }

    /// Make operand slot `index` of `op` read `value`.
    pub fn set_operand(&mut self, op: OpId, index: usize, value: ValueId) -> Result<()> {
        self.value(value)?;
        let use_id = self.op(op)?.operands.get(index).copied().ok_or_else(|| {
            Error::InvalidIr(format!("Operation {} has no operand {}", op, index))
        })?;
        if self.use_data(use_id)?.value == value {
            return Ok(());
        }

        self.unlink_use(use_id)?;
        self.use_mut(use_id)?.value = value;
        self.link_use(use_id)
    }

    /// Push `id` onto the front of the ledger of the value it reads.
    pub(crate) fn link_use(&mut self, id: UseId) -> Result<()> {
        let value = self.use_data(id)?.value;
        let head = self.value(value)?.first_use;

        if let Some(head) = head {
            self.use_mut(head)?.prev = Some(id);
        }
        let record = self.use_mut(id)?;
        record.prev = None;
        record.next = head;
        self.value_mut(value)?.first_use = Some(id);
        Ok(())
    }

    /// Remove `id` from the ledger it is linked into.
    pub(crate) fn unlink_use(&mut self, id: UseId) -> Result<()> {
        let (value, prev, next) = {
            let record = self.use_data(id)?;
            (record.value, record.prev, record.next)
        };

        match prev {
            Some(prev) => self.use_mut(prev)?.next = next,
            None => self.value_mut(value)?.first_use = next,
        }
        if let Some(next) = next {
            self.use_mut(next)?.prev = prev;
        }

        let record = self.use_mut(id)?;
        record.prev = None;
        record.next = None;
        Ok(())
    }
}
