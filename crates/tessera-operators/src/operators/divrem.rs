//! Combined signed quotient and remainder.

use tessera_core::{Attribute, FoldCtx, Operator, context::truncate_to_width};

/// `divrem(a, b) -> (a / b, a % b)` over signed integers.
///
/// Folds to two payloads, one per result. Division by zero is not folded.
pub struct DivRemOp;

impl Operator for DivRemOp {
    fn name(&self) -> &str {
        "divrem"
    }

    fn try_fold(&self, ctx: &FoldCtx) -> Option<Vec<Attribute>> {
        if ctx.result_count() != 2 {
            return None;
        }
        let (lhs, rhs) = ctx.binary_operands()?;
        let (lhs, rhs) = (lhs.as_integer()?, rhs.as_integer()?);
        if rhs == 0 {
            return None;
        }

        let mut results = Vec::with_capacity(2);
        for (index, value) in [lhs.wrapping_div(rhs), lhs.wrapping_rem(rhs)]
            .into_iter()
            .enumerate()
        {
            let ty = ctx.result_type(index)?;
            if !ty.is_integer_like() {
                return None;
            }
            results.push(Attribute::Integer(truncate_to_width(value, ty.bit_width()?)));
        }
        Some(results)
    }
}
