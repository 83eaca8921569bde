//! End-to-end tests for the constant folding pass.

mod common;

use common::*;
use tessera_core::{
    Attribute, Builder, Function, FunctionKind, Location, Module, PassRegistry, TypeContext,
    ValueKind,
};
use tessera_operators::build;

fn fold(func: &mut Function) -> bool {
    ConstantFoldPass::new()
        .run(func, &core_operator_registry())
        .expect("constant folding should succeed")
}

#[test]
fn test_fold_add_of_constants() {
    init_tracing();
    let mut types = TypeContext::new();
    let Scenario {
        mut func,
        c3,
        c4,
        sum,
        ret,
    } = add_of_constants(&mut types);

    assert!(fold(&mut func));

    assert_eq!(op_names(&func), vec!["constant", "return"]);
    let folded = func.operand(ret, 0).unwrap();
    assert_eq!(constant_payload(&func, folded), Some(Attribute::Integer(7)));
    assert_eq!(func.value_type(folded).unwrap(), &types.integer(32));
    for erased in [c3, c4, sum] {
        assert!(func.value(erased).is_err(), "{} should be erased", erased);
    }
    func.verify().unwrap();
}

#[test]
fn test_parameter_operand_blocks_folding() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("with_param", FunctionKind::Cfg);
    let entry = func.entry_block();
    let param = func.add_argument(entry, i32.clone()).unwrap();
    let c5 = constant(&mut func, &i32, 5);
    let sum = binary(&mut func, "addi", param, c5);
    ret(&mut func, &[sum]);
    let before = func.clone();

    assert!(!fold(&mut func));
    assert_eq!(func, before);
}

#[test]
fn test_unused_constant_is_swept() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("dead", FunctionKind::Cfg);
    constant(&mut func, &i32, 9);

    assert!(fold(&mut func));
    assert_eq!(func.op_count(), 0);
    assert_eq!(func.value_count(), 0);
    func.verify().unwrap();
}

#[test]
fn test_multi_result_fold_materializes_used_results_only() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("divrem", FunctionKind::Cfg);
    let entry = func.entry_block();
    let c17 = constant(&mut func, &i32, 17);
    let c5 = constant(&mut func, &i32, 5);
    let (quotient, _remainder) = build::divrem(
        &mut Builder::at_end(&mut func, entry),
        c17,
        c5,
        Location::Unknown,
    )
    .unwrap();
    let ret_op = ret(&mut func, &[quotient]);

    assert!(fold(&mut func));

    assert_eq!(op_names(&func), vec!["constant", "return"]);
    let folded = func.operand(ret_op, 0).unwrap();
    assert_eq!(constant_payload(&func, folded), Some(Attribute::Integer(3)));
    func.verify().unwrap();
}

#[test]
fn test_second_run_is_noop() {
    init_tracing();
    let mut types = TypeContext::new();
    let mut func = add_of_constants(&mut types).func;

    assert!(fold(&mut func));
    let after_first = func.clone();

    assert!(!fold(&mut func));
    assert_eq!(func, after_first);
}

#[test]
fn test_chained_folds_in_one_run() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("chain", FunctionKind::Cfg);
    let c3 = constant(&mut func, &i32, 3);
    let c4 = constant(&mut func, &i32, 4);
    let c2 = constant(&mut func, &i32, 2);
    let sum = binary(&mut func, "addi", c3, c4);
    let product = binary(&mut func, "muli", sum, c2);
    let ret_op = ret(&mut func, &[product]);

    assert!(fold(&mut func));

    assert_eq!(op_names(&func), vec!["constant", "return"]);
    let folded = func.operand(ret_op, 0).unwrap();
    assert_eq!(constant_payload(&func, folded), Some(Attribute::Integer(14)));
    func.verify().unwrap();
}

#[test]
fn test_folding_leaves_unrelated_operations_alone() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("mixed", FunctionKind::Cfg);
    let entry = func.entry_block();
    let param = func.add_argument(entry, i32.clone()).unwrap();

    let c1 = constant(&mut func, &i32, 1);
    let kept = binary(&mut func, "addi", param, c1);
    let c2 = constant(&mut func, &i32, 2);
    let c3 = constant(&mut func, &i32, 3);
    let product = binary(&mut func, "muli", c2, c3);
    let ret_op = ret(&mut func, &[kept, product]);

    let kept_op = func.defining_op(kept).unwrap().unwrap();
    let kept_before = func.op(kept_op).unwrap().clone();

    assert!(fold(&mut func));

    assert_eq!(func.op(kept_op).unwrap(), &kept_before);
    assert_eq!(func.operands(kept_op).unwrap(), vec![param, c1]);
    assert_eq!(func.operand(ret_op, 0).unwrap(), kept);
    let folded = func.operand(ret_op, 1).unwrap();
    assert_eq!(constant_payload(&func, folded), Some(Attribute::Integer(6)));
    assert_eq!(func.use_count(param).unwrap(), 1);
    func.verify().unwrap();
}

#[test]
fn test_declined_folds_keep_operands_alive() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("div_by_zero", FunctionKind::Cfg);
    let c1 = constant(&mut func, &i32, 1);
    let c0 = constant(&mut func, &i32, 0);
    let quotient = binary(&mut func, "divsi", c1, c0);
    ret(&mut func, &[quotient]);
    let before = func.clone();

    assert!(!fold(&mut func));
    assert_eq!(func, before);
}

#[test]
fn test_unregistered_operation_is_untouched() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("mystery", FunctionKind::Cfg);
    let c1 = constant(&mut func, &i32, 1);
    let c2 = constant(&mut func, &i32, 2);
    let mystery = common::binary(&mut func, "mystery", c1, c2);
    ret(&mut func, &[mystery]);
    let before = func.clone();

    assert!(!fold(&mut func));
    assert_eq!(func, before);
}

#[test]
fn test_folds_inside_nested_regions() {
    init_tracing();
    let mut types = TypeContext::new();
    let index = types.index();
    let mut func = Function::new("loop", FunctionKind::Structured);
    let entry = func.entry_block();
    let n = func.add_argument(entry, index.clone()).unwrap();
    assert_eq!(func.value_kind(n).unwrap(), ValueKind::FunctionArgument);

    let c0 = constant(&mut func, &index, 0);
    let c1 = constant(&mut func, &index, 1);
    let c2 = constant(&mut func, &index, 2);
    let handles = build::for_loop(
        &mut Builder::at_end(&mut func, entry),
        c0,
        n,
        c1,
        Location::Unknown,
    )
    .unwrap();

    let mut body = Builder::at_end(&mut func, handles.body);
    let folded_sum = build::binary(&mut body, "addi", c1, c2, Location::Unknown).unwrap();
    let stepped = build::binary(
        &mut body,
        "addi",
        handles.induction_var,
        folded_sum,
        Location::Unknown,
    )
    .unwrap();
    let yield_op = build::ret(&mut body, [stepped], Location::Unknown).unwrap();
    let stepped_op = func.defining_op(stepped).unwrap().unwrap();

    assert!(fold(&mut func));

    let new_constant = func.operand(stepped_op, 1).unwrap();
    assert_eq!(
        constant_payload(&func, new_constant),
        Some(Attribute::Integer(3))
    );
    let constant_op = func.defining_op(new_constant).unwrap().unwrap();
    assert_eq!(func.parent_op(constant_op).unwrap(), Some(handles.op));
    assert_eq!(func.operand(stepped_op, 0).unwrap(), handles.induction_var);
    assert_eq!(func.operand(yield_op, 0).unwrap(), stepped);

    // c2 only fed the folded addition; c0 and c1 still feed the loop.
    assert!(func.value(c2).is_err());
    assert!(func.value(c0).is_ok());
    assert!(func.value(c1).is_ok());
    func.verify().unwrap();
}

#[test]
fn test_float_folding() {
    init_tracing();
    let mut types = TypeContext::new();
    let f32 = types.float(32);
    let mut func = Function::new("floats", FunctionKind::Cfg);
    let entry = func.entry_block();

    let mut builder = Builder::at_end(&mut func, entry);
    let a = builder
        .create_constant(Location::Unknown, f32.clone(), Attribute::Float(1.5))
        .unwrap();
    let b = builder
        .create_constant(Location::Unknown, f32, Attribute::Float(2.25))
        .unwrap();
    let sum = build::binary(&mut builder, "addf", a, b, Location::Unknown).unwrap();
    let ret_op = build::ret(&mut builder, [sum], Location::Unknown).unwrap();

    assert!(fold(&mut func));
    let folded = func.operand(ret_op, 0).unwrap();
    assert_eq!(constant_payload(&func, folded), Some(Attribute::Float(3.75)));
}

#[test]
fn test_materialized_constant_keeps_location() {
    init_tracing();
    let mut types = TypeContext::new();
    let i32 = types.integer(32);
    let mut func = Function::new("located", FunctionKind::Cfg);
    let entry = func.entry_block();
    let c3 = constant(&mut func, &i32, 3);
    let c4 = constant(&mut func, &i32, 4);
    let loc = Location::file_line_col("input.ir", 12, 5);
    let mut builder = Builder::at_end(&mut func, entry);
    let sum = build::binary(&mut builder, "addi", c3, c4, loc.clone()).unwrap();
    let ret_op = ret(&mut func, &[sum]);

    assert!(fold(&mut func));
    let folded = func.operand(ret_op, 0).unwrap();
    let constant_op = func.defining_op(folded).unwrap().unwrap();
    assert_eq!(func.op(constant_op).unwrap().location(), &loc);
}

#[test]
fn test_runner_folds_every_function_and_verifies() {
    init_tracing();
    let mut types = TypeContext::new();
    let mut module = Module::new();
    module.add_function(add_of_constants(&mut types).func).unwrap();

    let i32 = types.integer(32);
    let mut dead = Function::new("dead", FunctionKind::Cfg);
    constant(&mut dead, &i32, 9);
    module.add_function(dead).unwrap();

    let mut passes = PassRegistry::new();
    tessera_compiler::register_builtin_passes(&mut passes).unwrap();
    let runner = PassRunner::with_options(RunnerOptions::new().with_verify_after_run(true));
    let operators = core_operator_registry();

    assert!(runner.run_named(&passes, "constant-fold", &mut module, &operators).unwrap());
    assert_eq!(
        op_names(module.function("add_of_constants").unwrap()),
        vec!["constant", "return"]
    );
    assert_eq!(module.function("dead").unwrap().op_count(), 0);

    assert!(!runner.run_named(&passes, "constant-fold", &mut module, &operators).unwrap());
}
