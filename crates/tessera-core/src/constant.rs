//! The distinguished constant-producing operation kind.

use crate::operation::Operation;
use crate::operator::Operator;
use crate::types::Attribute;

/// Name of the zero-operand, single-result constant operation.
pub const CONSTANT_OP: &str = "constant";

/// Attribute holding the constant payload.
pub const VALUE_ATTR: &str = "value";

/// Operator for `constant`: produces its `value` attribute.
pub struct ConstantOp;

impl Operator for ConstantOp {
    fn name(&self) -> &str {
        CONSTANT_OP
    }

    fn constant_value<'a>(&self, op: &'a Operation) -> Option<&'a Attribute> {
        if op.num_operands() != 0 || op.num_results() != 1 {
            return None;
        }
        op.attribute(VALUE_ATTR)
    }
}
