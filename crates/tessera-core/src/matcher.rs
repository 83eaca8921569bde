//! Nested operation patterns.
//!
//! A [`NestedPattern`] matches an operation by name and/or predicate and can
//! require child patterns to match operations nested in its regions, e.g. "a
//! `for` whose body contains a `for`".

use crate::function::Function;
use crate::operation::OpId;
use crate::Result;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Function, OpId) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct NestedPattern {
    name: Option<String>,
    predicate: Option<Predicate>,
    children: Vec<NestedPattern>,
}

/// One matched operation and the matches of each child pattern beneath it,
/// flattened in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedMatch {
    pub op: OpId,
    pub children: Vec<NestedMatch>,
}

impl NestedPattern {
    /// A pattern matching every operation.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Function, OpId) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NestedPattern>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn children(&self) -> &[NestedPattern] {
        &self.children
    }

    /// Nesting depth: 1 for a pattern without children.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(NestedPattern::depth)
            .max()
            .unwrap_or(0)
    }

    /// All matches in the function body, in pre-order.
    ///
    /// An operation nested inside a match is still tried on its own, so
    /// matches may overlap.
    pub fn match_function(&self, function: &Function) -> Result<Vec<NestedMatch>> {
        let mut matches = Vec::new();
        for op in function.preorder()? {
            if let Some(found) = self.match_op(function, op)? {
                matches.push(found);
            }
        }
        Ok(matches)
    }

    /// Match `op` itself against the pattern.
    pub fn match_op(&self, function: &Function, op: OpId) -> Result<Option<NestedMatch>> {
        let operation = function.op(op)?;
        if self.name.as_deref().is_some_and(|name| name != operation.name()) {
            return Ok(None);
        }
        if self.predicate.as_ref().is_some_and(|p| !p(function, op)) {
            return Ok(None);
        }

        let mut nested = Vec::new();
        for &region in operation.regions() {
            nested.extend(function.preorder_in(region)?);
        }

        let mut children = Vec::new();
        for child in &self.children {
            let mut found = false;
            for &inner in &nested {
                if let Some(m) = child.match_op(function, inner)? {
                    children.push(m);
                    found = true;
                }
            }
            if !found {
                return Ok(None);
            }
        }

        Ok(Some(NestedMatch { op, children }))
    }
}

impl fmt::Debug for NestedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedPattern")
            .field("name", &self.name)
            .field("predicate", &self.predicate.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Pattern matching any operation satisfying `predicate`.
pub fn op<F>(predicate: F) -> NestedPattern
where
    F: Fn(&Function, OpId) -> bool + Send + Sync + 'static,
{
    NestedPattern::any().with_predicate(predicate)
}

/// Pattern matching operations named `name` that contain every child.
pub fn named(name: &str, children: impl IntoIterator<Item = NestedPattern>) -> NestedPattern {
    NestedPattern::any().with_name(name).with_children(children)
}
