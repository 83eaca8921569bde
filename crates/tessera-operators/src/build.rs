//! Typed construction helpers for the standard kinds.
//!
//! These wrap [`Builder::create`] and check operand types before anything is
//! inserted.

use crate::{Error, Result};
use tessera_core::{
    Attribute, BlockId, Builder, Location, OpId, OperationState, Type, ValueId,
};

/// Handles produced by [`for_loop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopHandles {
    pub op: OpId,
    pub body: BlockId,
    pub induction_var: ValueId,
}

/// Create a `constant` of type `ty`.
pub fn constant(builder: &mut Builder, ty: Type, value: Attribute) -> Result<ValueId> {
    Ok(builder.create_constant(Location::Unknown, ty, value)?)
}

/// Create a binary arithmetic operation such as `addi`.
pub fn binary(
    builder: &mut Builder,
    name: &str,
    lhs: ValueId,
    rhs: ValueId,
    location: Location,
) -> Result<ValueId> {
    let ty = same_type(builder, name, &[lhs, rhs])?;
    let op = builder.create(
        OperationState::new(name, location)
            .with_operands([lhs, rhs])
            .with_result_types([ty]),
    )?;
    Ok(builder.function().result(op, 0)?)
}

/// Create a `divrem` and return its quotient and remainder.
pub fn divrem(
    builder: &mut Builder,
    lhs: ValueId,
    rhs: ValueId,
    location: Location,
) -> Result<(ValueId, ValueId)> {
    let ty = same_type(builder, "divrem", &[lhs, rhs])?;
    let op = builder.create(
        OperationState::new("divrem", location)
            .with_operands([lhs, rhs])
            .with_result_types([ty.clone(), ty]),
    )?;
    let func = builder.function();
    Ok((func.result(op, 0)?, func.result(op, 1)?))
}

/// Create a `return` of `values`.
pub fn ret(
    builder: &mut Builder,
    values: impl IntoIterator<Item = ValueId>,
    location: Location,
) -> Result<OpId> {
    Ok(builder.create(OperationState::new("return", location).with_operands(values))?)
}

/// Create a `for` loop over `[lower, upper)` by `step`.
///
/// The body block binds one induction variable of the bounds' type. Only
/// meaningful in structured functions.
pub fn for_loop(
    builder: &mut Builder,
    lower: ValueId,
    upper: ValueId,
    step: ValueId,
    location: Location,
) -> Result<LoopHandles> {
    let ty = same_type(builder, "for", &[lower, upper, step])?;
    let op = builder.create(
        OperationState::new("for", location)
            .with_operands([lower, upper, step])
            .with_regions(1),
    )?;

    let func = builder.function_mut();
    let body = func
        .op(op)?
        .regions()
        .first()
        .and_then(|&region| func.region(region).ok()?.entry_block())
        .ok_or_else(|| Error::Operator(format!("'for' {} has no body block", op)))?;
    let induction_var = func.add_argument(body, ty)?;

    Ok(LoopHandles {
        op,
        body,
        induction_var,
    })
}

fn same_type(builder: &Builder, name: &str, operands: &[ValueId]) -> Result<Type> {
    let func = builder.function();
    let (first, rest) = operands
        .split_first()
        .ok_or_else(|| Error::Operator(format!("'{}' needs operands", name)))?;
    let ty = func.value_type(*first)?.clone();
    for &operand in rest {
        let other = func.value_type(operand)?;
        if *other != ty {
            return Err(Error::Operator(format!(
                "'{}' operands have mismatched types {} and {}",
                name, ty, other
            )));
        }
    }
    Ok(ty)
}
