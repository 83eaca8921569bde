//! Common test utilities for pass tests.
//!
//! Builds the small functions the folding scenarios run on, using the
//! standard operation kinds from `tessera-operators`.

use tessera_core::{
    Attribute, Builder, Function, FunctionKind, Location, OpId, Type, TypeContext, ValueId,
};
use tessera_operators::build;

// Re-export types commonly used in tests
pub use tessera_compiler::{ConstantFoldPass, PassRunner, RunnerOptions};
pub use tessera_core::{OperatorRegistry, Pass};
pub use tessera_operators::core_operator_registry;

/// Install a tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_test_writer()
        .try_init();
}

/// Append a constant to the entry block.
pub fn constant(func: &mut Function, ty: &Type, value: i64) -> ValueId {
    let entry = func.entry_block();
    build::constant(
        &mut Builder::at_end(func, entry),
        ty.clone(),
        Attribute::Integer(value),
    )
    .unwrap()
}

/// Append a binary operation to the entry block.
pub fn binary(func: &mut Function, name: &str, lhs: ValueId, rhs: ValueId) -> ValueId {
    let entry = func.entry_block();
    build::binary(
        &mut Builder::at_end(func, entry),
        name,
        lhs,
        rhs,
        Location::Unknown,
    )
    .unwrap()
}

/// Append a `return` to the entry block.
pub fn ret(func: &mut Function, values: &[ValueId]) -> OpId {
    let entry = func.entry_block();
    build::ret(
        &mut Builder::at_end(func, entry),
        values.iter().copied(),
        Location::Unknown,
    )
    .unwrap()
}

/// The payload of the constant defining `value`, if any.
pub fn constant_payload(func: &Function, value: ValueId) -> Option<Attribute> {
    let op = func.defining_op(value).ok()??;
    core_operator_registry()
        .constant_value(func.op(op).ok()?)
        .cloned()
}

/// Names of the entry block's operations in order.
pub fn op_names(func: &Function) -> Vec<String> {
    func.block(func.entry_block())
        .unwrap()
        .ops()
        .iter()
        .map(|&op| func.op(op).unwrap().name().to_string())
        .collect()
}

/// `%0 = const 3; %1 = const 4; %2 = addi(%0, %1); return %2`
pub struct Scenario {
    pub func: Function,
    pub c3: ValueId,
    pub c4: ValueId,
    pub sum: ValueId,
    pub ret: OpId,
}

pub fn add_of_constants(types: &mut TypeContext) -> Scenario {
    let i32 = types.integer(32);
    let mut func = Function::new("add_of_constants", FunctionKind::Cfg);
    let c3 = constant(&mut func, &i32, 3);
    let c4 = constant(&mut func, &i32, 4);
    let sum = binary(&mut func, "addi", c3, c4);
    let ret_op = ret(&mut func, &[sum]);
    Scenario {
        func,
        c3,
        c4,
        sum,
        ret: ret_op,
    }
}
