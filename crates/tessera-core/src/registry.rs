//! Name-keyed lookup of per-kind capabilities.

use crate::operation::Operation;
use crate::operator::Operator;
use crate::types::Attribute;
use std::collections::HashMap;

/// Maps operation names to the [`Operator`] describing that kind.
///
/// Passes never match on operation names themselves. They ask the registry
/// whether an operation is a constant ([`constant_value`]) or how it folds
/// ([`operator_for`]), and an unregistered name is simply neither.
///
/// [`constant_value`]: OperatorRegistry::constant_value
/// [`operator_for`]: OperatorRegistry::operator_for
pub struct OperatorRegistry {
    operators: HashMap<String, Box<dyn Operator>>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    /// Bind `name` to `operator`, replacing any earlier binding.
    pub fn register<O>(&mut self, name: &str, operator: O) -> &mut Self
    where
        O: Operator + 'static,
    {
        self.operators.insert(name.to_string(), Box::new(operator));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.operators.get(name).map(|op| op.as_ref())
    }

    /// The operator for `op`'s kind.
    pub fn operator_for(&self, op: &Operation) -> Option<&dyn Operator> {
        self.get(op.name())
    }

    /// The constant payload of `op`, if its kind is constant-producing.
    pub fn constant_value<'a>(&self, op: &'a Operation) -> Option<&'a Attribute> {
        self.operator_for(op)?.constant_value(op)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn operator_names(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(|s| s.as_str())
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
