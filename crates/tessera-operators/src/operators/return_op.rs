//! Function terminator.

use tessera_core::Operator;

/// `return(values...)`: hands values back to the caller.
///
/// Has no results and is never folded.
pub struct ReturnOp;

impl Operator for ReturnOp {
    fn name(&self) -> &str {
        "return"
    }
}
