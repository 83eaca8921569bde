//! Core operator registry.
//!
//! Provides a pre-populated registry with every standard operation kind.

use tessera_core::{CONSTANT_OP, ConstantOp, Operator, OperatorRegistry};

use crate::families::BinaryArithOp;
use crate::operators::{DivRemOp, ForOp, ReturnOp};

/// Returns an operator registry pre-populated with the standard kinds.
///
/// The registry includes:
/// - `constant`
/// - 9 binary arithmetic operators (addi, subi, muli, divsi, remsi, addf, subf, mulf, divf)
/// - `divrem`, `return` and `for`
///
/// Custom operators can be added to the returned registry via
/// `registry.register(name, operator)`.
pub fn core_operator_registry() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();

    registry.register(CONSTANT_OP, ConstantOp);

    // Binary arithmetic operators
    for op in BinaryArithOp::all() {
        let name = op.name().to_string();
        registry.register(&name, op);
    }

    registry.register("divrem", DivRemOp);
    registry.register("return", ReturnOp);
    registry.register("for", ForOp);

    tracing::debug!(operators = registry.len(), "built core operator registry");
    registry
}
