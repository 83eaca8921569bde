//! Structured counted loop.

use tessera_core::Operator;

/// `for(lower, upper, step) { ^body(%iv) }`.
///
/// Carries one region whose entry block binds the induction variable. The
/// loop itself produces no results and is never folded; constant folding
/// still reaches the operations nested in its body.
pub struct ForOp;

impl Operator for ForOp {
    fn name(&self) -> &str {
        "for"
    }
}
