//! Common test utilities for operator tests.

use tessera_core::{
    Attribute, Builder, FoldCtx, Function, FunctionKind, Location, OpId, OperationState, Type,
};

// Re-export types commonly used in tests
pub use tessera_core::{Operator, OperatorRegistry, TypeContext};
pub use tessera_operators::core_operator_registry;

/// Create a CFG function holding one `op_type` operation over fresh
/// parameters of the given types.
pub fn make_operation(op_type: &str, operands: &[Type], results: &[Type]) -> (Function, OpId) {
    let mut func = Function::new("test", FunctionKind::Cfg);
    let entry = func.entry_block();
    let params: Vec<_> = operands
        .iter()
        .map(|ty| func.add_argument(entry, ty.clone()).unwrap())
        .collect();
    let op = Builder::at_end(&mut func, entry)
        .create(
            OperationState::new(op_type, Location::Unknown)
                .with_operands(params)
                .with_result_types(results.iter().cloned()),
        )
        .unwrap();
    (func, op)
}

/// Fold `op_type` through the core registry with the given operand payloads.
pub fn fold_with(
    op_type: &str,
    operand_types: &[Type],
    result_types: &[Type],
    payloads: &[Option<Attribute>],
) -> Option<Vec<Attribute>> {
    let (func, op) = make_operation(op_type, operand_types, result_types);
    let registry = core_operator_registry();
    let operator = registry.get(op_type)?;
    let ctx = FoldCtx::new(&func, op, func.op(op).unwrap(), payloads);
    operator.try_fold(&ctx)
}
