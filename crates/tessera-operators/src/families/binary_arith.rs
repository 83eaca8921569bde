//! Binary arithmetic operator family.
//!
//! Covers: addi, subi, muli, divsi, remsi, addf, subf, mulf, divf

use tessera_core::{Attribute, FoldCtx, Operator};

/// Binary arithmetic operator family.
///
/// All members take two operands of the same type and produce one result of
/// that type. They differ only in name and in the CPU function used for
/// folding:
/// - Integer kinds compute in `i64` with wrapping semantics and are truncated
///   to the result width; a fold function returning `None` declines the fold
///   (division by zero).
/// - Float kinds compute in `f64` and round `f32` results.
pub struct BinaryArithOp {
    name: &'static str,
    fold_fn_int: Option<fn(i64, i64) -> Option<i64>>,
    fold_fn_float: Option<fn(f64, f64) -> f64>,
}

impl BinaryArithOp {
    /// Create an integer addition operator.
    pub fn addi() -> Self {
        Self::integer("addi", |a, b| Some(a.wrapping_add(b)))
    }

    /// Create an integer subtraction operator.
    pub fn subi() -> Self {
        Self::integer("subi", |a, b| Some(a.wrapping_sub(b)))
    }

    /// Create an integer multiplication operator.
    pub fn muli() -> Self {
        Self::integer("muli", |a, b| Some(a.wrapping_mul(b)))
    }

    /// Create a signed integer division operator. Division by zero is not folded.
    pub fn divsi() -> Self {
        Self::integer("divsi", |a, b| (b != 0).then(|| a.wrapping_div(b)))
    }

    /// Create a signed integer remainder operator. Division by zero is not folded.
    pub fn remsi() -> Self {
        Self::integer("remsi", |a, b| (b != 0).then(|| a.wrapping_rem(b)))
    }

    pub fn addf() -> Self {
        Self::float("addf", |a, b| a + b)
    }

    pub fn subf() -> Self {
        Self::float("subf", |a, b| a - b)
    }

    pub fn mulf() -> Self {
        Self::float("mulf", |a, b| a * b)
    }

    pub fn divf() -> Self {
        Self::float("divf", |a, b| a / b)
    }

    /// Every member of the family, for bulk registration.
    pub fn all() -> Vec<Self> {
        vec![
            Self::addi(),
            Self::subi(),
            Self::muli(),
            Self::divsi(),
            Self::remsi(),
            Self::addf(),
            Self::subf(),
            Self::mulf(),
            Self::divf(),
        ]
    }

    fn integer(name: &'static str, fold: fn(i64, i64) -> Option<i64>) -> Self {
        Self {
            name,
            fold_fn_int: Some(fold),
            fold_fn_float: None,
        }
    }

    fn float(name: &'static str, fold: fn(f64, f64) -> f64) -> Self {
        Self {
            name,
            fold_fn_int: None,
            fold_fn_float: Some(fold),
        }
    }
}

impl Operator for BinaryArithOp {
    fn name(&self) -> &str {
        self.name
    }

    fn try_fold(&self, ctx: &FoldCtx) -> Option<Vec<Attribute>> {
        if ctx.result_count() != 1 {
            return None;
        }

        if let Some(fold_fn) = self.fold_fn_int {
            if let Some(result) = ctx.binary_fold_int(fold_fn) {
                return Some(result);
            }
        }

        if let Some(fold_fn) = self.fold_fn_float {
            if let Some(result) = ctx.binary_fold_float(fold_fn) {
                return Some(result);
            }
        }

        tracing::trace!(op = self.name, "operands not foldable");
        None
    }
}
