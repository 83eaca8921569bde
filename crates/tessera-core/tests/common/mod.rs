//! Common test utilities for IR tests.

use tessera_core::{
    Builder, Function, FunctionKind, Location, OpId, OperationState, Type, TypeContext, ValueId,
};

/// Install a tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// A CFG function with `params` integer parameters.
pub fn cfg_function(types: &mut TypeContext, params: usize) -> (Function, Vec<ValueId>) {
    let i32 = types.integer(32);
    let mut func = Function::new("test", FunctionKind::Cfg);
    let entry = func.entry_block();
    let args = (0..params)
        .map(|_| func.add_argument(entry, i32.clone()).unwrap())
        .collect();
    (func, args)
}

/// Append `name(operands) -> ty` to the entry block and return its result.
pub fn append(func: &mut Function, name: &str, operands: &[ValueId], ty: Type) -> ValueId {
    let op = append_op(func, name, operands, &[ty]);
    func.result(op, 0).unwrap()
}

/// Append `name(operands) -> results` to the entry block.
pub fn append_op(
    func: &mut Function,
    name: &str,
    operands: &[ValueId],
    results: &[Type],
) -> OpId {
    let entry = func.entry_block();
    Builder::at_end(func, entry)
        .create(
            OperationState::new(name, Location::Unknown)
                .with_operands(operands.iter().copied())
                .with_result_types(results.iter().cloned()),
        )
        .unwrap()
}

/// Sum of the ledger sizes of every live value.
pub fn total_ledger_size(func: &Function) -> usize {
    func.ops()
        .flat_map(|(_, op)| op.results().to_vec())
        .chain(all_block_arguments(func))
        .map(|value| func.use_count(value).unwrap())
        .sum()
}

fn all_block_arguments(func: &Function) -> Vec<ValueId> {
    let mut args = func.arguments().to_vec();
    for (_, op) in func.ops() {
        for &region in op.regions() {
            for &block in func.region(region).unwrap().blocks() {
                args.extend_from_slice(func.block(block).unwrap().arguments());
            }
        }
    }
    args
}
