//! Context handed to operators during constant folding.

use crate::function::Function;
use crate::operation::{OpId, Operation};
use crate::types::{Attribute, Type};

/// Read-only view of one operation being folded.
///
/// Provides:
/// - The constant payload of each operand, when known
/// - The operation's attributes and result types
/// - Helpers for the common binary integer/float cases
pub struct FoldCtx<'a> {
    function: &'a Function,
    op_id: OpId,
    op: &'a Operation,
    operands: &'a [Option<Attribute>],
}

impl<'a> FoldCtx<'a> {
    /// Create a fold context.
    ///
    /// `operands` must hold one entry per operand slot of `op`.
    pub fn new(
        function: &'a Function,
        op_id: OpId,
        op: &'a Operation,
        operands: &'a [Option<Attribute>],
    ) -> Self {
        debug_assert_eq!(operands.len(), op.num_operands());
        Self {
            function,
            op_id,
            op,
            operands,
        }
    }

    pub fn function(&self) -> &'a Function {
        self.function
    }

    pub fn op_id(&self) -> OpId {
        self.op_id
    }

    pub fn operation(&self) -> &'a Operation {
        self.op
    }

    /// The constant payload of operand `index`, if its producer is a constant.
    pub fn operand(&self, index: usize) -> Option<&'a Attribute> {
        self.operands.get(index).and_then(Option::as_ref)
    }

    pub fn operands(&self) -> &'a [Option<Attribute>] {
        self.operands
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    pub fn result_count(&self) -> usize {
        self.op.num_results()
    }

    /// Type of result `index`.
    pub fn result_type(&self, index: usize) -> Option<&'a Type> {
        let value = self.op.result(index)?;
        self.function.value_type(value).ok()
    }

    pub fn attribute(&self, key: &str) -> Option<&'a Attribute> {
        self.op.attribute(key)
    }

    /// All operand payloads, or `None` if any operand is not constant.
    pub fn all_operands(&self) -> Option<Vec<&'a Attribute>> {
        self.operands.iter().map(Option::as_ref).collect()
    }

    /// The two operand payloads of a binary operation.
    pub fn binary_operands(&self) -> Option<(&'a Attribute, &'a Attribute)> {
        if self.operands.len() != 2 {
            return None;
        }
        Some((self.operand(0)?, self.operand(1)?))
    }

    /// Fold a binary integer operation into a single-result payload.
    ///
    /// Declines unless both operands are integer constants and result 0 has an
    /// integer-like type. The computed value is truncated to that type's width
    /// and sign-extended back.
    pub fn binary_fold_int<F>(&self, op: F) -> Option<Vec<Attribute>>
    where
        F: Fn(i64, i64) -> Option<i64>,
    {
        let (lhs, rhs) = self.binary_operands()?;
        let (lhs, rhs) = (lhs.as_integer()?, rhs.as_integer()?);

        let ty = self.result_type(0)?;
        if !ty.is_integer_like() {
            return None;
        }
        let width = ty.bit_width()?;

        Some(vec![Attribute::Integer(truncate_to_width(
            op(lhs, rhs)?,
            width,
        ))])
    }

    /// Fold a binary float operation into a single-result payload.
    ///
    /// `f32` results are rounded through `f32`.
    pub fn binary_fold_float<F>(&self, op: F) -> Option<Vec<Attribute>>
    where
        F: Fn(f64, f64) -> f64,
    {
        let (lhs, rhs) = self.binary_operands()?;
        let (lhs, rhs) = (lhs.as_float()?, rhs.as_float()?);

        let ty = self.result_type(0)?;
        if !ty.is_float() {
            return None;
        }

        let result = op(lhs, rhs);
        let result = match ty.bit_width() {
            Some(32) => result as f32 as f64,
            _ => result,
        };
        Some(vec![Attribute::Float(result)])
    }
}

/// Wrap `value` to a signed integer of `width` bits.
pub fn truncate_to_width(value: i64, width: u32) -> i64 {
    if width == 0 || width >= 64 {
        return value;
    }
    let shift = 64 - width;
    (value << shift) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::function::FunctionKind;
    use crate::location::Location;
    use crate::operation::OperationState;
    use crate::types::TypeContext;

    fn binary(result: Type) -> (Function, OpId) {
        let mut func = Function::new("f", FunctionKind::Cfg);
        let entry = func.entry_block();
        let a = func.add_argument(entry, result.clone()).unwrap();
        let b = func.add_argument(entry, result.clone()).unwrap();
        let op = Builder::at_end(&mut func, entry)
            .create(
                OperationState::new("binary", Location::Unknown)
                    .with_operands([a, b])
                    .with_result_types([result]),
            )
            .unwrap();
        (func, op)
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width(127 + 1, 8), -128);
        assert_eq!(truncate_to_width(-1, 1), -1);
        assert_eq!(truncate_to_width(2, 1), 0);
        assert_eq!(truncate_to_width(i64::MAX, 64), i64::MAX);
        assert_eq!(truncate_to_width(1 << 32, 32), 0);
    }

    #[test]
    fn test_binary_fold_int_wraps_to_result_width() {
        let mut types = TypeContext::new();
        let (func, op) = binary(types.integer(8));
        let operands = [Some(Attribute::Integer(100)), Some(Attribute::Integer(100))];
        let ctx = FoldCtx::new(&func, op, func.op(op).unwrap(), &operands);

        assert_eq!(
            ctx.binary_fold_int(|a, b| Some(a + b)),
            Some(vec![Attribute::Integer(-56)])
        );
    }

    #[test]
    fn test_binary_fold_declines_on_unknown_operand() {
        let mut types = TypeContext::new();
        let (func, op) = binary(types.integer(32));
        let operands = [Some(Attribute::Integer(1)), None];
        let ctx = FoldCtx::new(&func, op, func.op(op).unwrap(), &operands);

        assert!(ctx.all_operands().is_none());
        assert!(ctx.binary_fold_int(|a, b| Some(a + b)).is_none());
    }

    #[test]
    fn test_binary_fold_declines_on_kind_mismatch() {
        let mut types = TypeContext::new();
        let (func, op) = binary(types.float(64));
        let operands = [Some(Attribute::Integer(1)), Some(Attribute::Integer(2))];
        let ctx = FoldCtx::new(&func, op, func.op(op).unwrap(), &operands);

        assert!(ctx.binary_fold_float(|a, b| a + b).is_none());
        assert!(ctx.binary_fold_int(|a, b| Some(a + b)).is_none());
    }

    #[test]
    fn test_binary_fold_float_rounds_f32() {
        let mut types = TypeContext::new();
        let (func, op) = binary(types.float(32));
        let operands = [Some(Attribute::Float(0.1)), Some(Attribute::Float(0.2))];
        let ctx = FoldCtx::new(&func, op, func.op(op).unwrap(), &operands);

        assert_eq!(
            ctx.binary_fold_float(|a, b| a + b),
            Some(vec![Attribute::Float((0.1f64 + 0.2f64) as f32 as f64)])
        );
    }
}
