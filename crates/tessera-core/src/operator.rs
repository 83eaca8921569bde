//! Operator trait for per-kind capabilities.

use crate::context::FoldCtx;
use crate::operation::Operation;
use crate::types::Attribute;

/// Trait for implementing operation kinds.
///
/// An operator describes what the rest of the compiler may assume about every
/// operation carrying its name. Both capabilities default to "no": a kind that
/// does not override them is neither constant-producing nor foldable.
///
/// # Example
///
/// ```ignore
/// struct AddOperator;
///
/// impl Operator for AddOperator {
///     fn name(&self) -> &str {
///         "addi"
///     }
///
///     fn try_fold(&self, ctx: &FoldCtx) -> Option<Vec<Attribute>> {
///         ctx.binary_fold_int(|a, b| Some(a.wrapping_add(b)))
///     }
/// }
/// ```
pub trait Operator: Send + Sync {
    /// Get the operation name this operator handles (e.g., "addi").
    fn name(&self) -> &str;

    /// The constant payload of `op`, if this kind produces a compile-time
    /// constant.
    ///
    /// Only zero-operand single-result kinds should answer `Some`.
    fn constant_value<'a>(&self, _op: &'a Operation) -> Option<&'a Attribute> {
        None
    }

    /// Attempt to evaluate the operation at compile time.
    ///
    /// `ctx` carries one `Option<Attribute>` per operand, `None` when the
    /// operand is not produced by a constant. On success the returned vector
    /// holds exactly one payload per result, in result order. Returning `None`
    /// leaves the operation untouched.
    fn try_fold(&self, _ctx: &FoldCtx) -> Option<Vec<Attribute>> {
        None
    }
}
