//! Constant folding pass.
//!
//! Single top-down pre-order walk that replaces operations with constants
//! when every fold input is known, followed by deferred erasure and one sweep
//! of dead constants.

use tessera_core::{
    Attribute, Builder, FoldCtx, Function, OpId, OperatorRegistry, Pass, Result,
};

/// Pass that folds operations into constants.
///
/// Walks a snapshot of the function body in pre-order. For each operation:
/// 1. Constant-producing kinds are remembered and skipped
/// 2. Operand payloads are gathered from constant producers (`None` otherwise)
/// 3. The operator's `try_fold()` is asked for one payload per result
/// 4. Each used result gets a new constant placed just before the operation,
///    and all of its uses are redirected to that constant
/// 5. The folded operation is queued for erasure
///
/// After the walk every queued operation is erased, then constants left
/// without uses are swept once. Operations whose name is not registered are
/// never touched.
///
/// The sweep runs once per invocation: a constant that only becomes dead as a
/// consequence of this sweep survives until the next run.
pub struct ConstantFoldPass;

impl ConstantFoldPass {
    /// Create a new constant folding pass.
    pub fn new() -> Self {
        Self
    }

    /// Ask the operator of `op_id` to fold it.
    ///
    /// Returns the payloads to materialize, or `None` if the operation stays.
    fn try_fold_op(
        &self,
        function: &Function,
        registry: &OperatorRegistry,
        op_id: OpId,
    ) -> Result<Option<Vec<Attribute>>> {
        let op = function.op(op_id)?;
        let Some(operator) = registry.operator_for(op) else {
            return Ok(None);
        };

        let mut operands = Vec::with_capacity(op.num_operands());
        for value in function.operands(op_id)? {
            let payload = match function.defining_op(value)? {
                Some(def) => registry.constant_value(function.op(def)?).cloned(),
                None => None,
            };
            operands.push(payload);
        }

        let ctx = FoldCtx::new(function, op_id, op, &operands);
        let Some(folded) = operator.try_fold(&ctx) else {
            return Ok(None);
        };

        assert_eq!(
            folded.len(),
            op.num_results(),
            "operator '{}' folded {} into {} payloads but it has {} results",
            operator.name(),
            op_id,
            folded.len(),
            op.num_results()
        );
        Ok(Some(folded))
    }

    /// Materialize `folded` for every used result of `op_id` and redirect the
    /// result's uses. Returns the new constant operations.
    fn replace_results(
        &self,
        function: &mut Function,
        op_id: OpId,
        folded: Vec<Attribute>,
    ) -> Result<Vec<OpId>> {
        let op = function.op(op_id)?;
        let results = op.results().to_vec();
        let location = op.location().clone();

        let mut constants = Vec::new();
        for (result, payload) in results.into_iter().zip(folded) {
            if function.use_empty(result)? {
                continue;
            }
            let ty = function.value_type(result)?.clone();
            let constant =
                Builder::before(function, op_id).create_constant(location.clone(), ty, payload)?;
            function.replace_all_uses_with(result, constant)?;

            if let Some(constant_op) = function.defining_op(constant)? {
                tracing::trace!(%op_id, %result, %constant, "materialized constant");
                constants.push(constant_op);
            }
        }
        Ok(constants)
    }
}

impl Default for ConstantFoldPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ConstantFoldPass {
    fn name(&self) -> &str {
        "constant-fold"
    }

    fn description(&self) -> &str {
        "Constant fold operations in functions"
    }

    #[tracing::instrument(
        skip_all,
        fields(function = function.name(), num_ops = function.op_count())
    )]
    fn run(&self, function: &mut Function, registry: &OperatorRegistry) -> Result<bool> {
        let mut existing_constants: Vec<OpId> = Vec::new();
        let mut to_erase: Vec<OpId> = Vec::new();

        for op_id in function.preorder()? {
            let op = function.op(op_id)?;
            if registry.constant_value(op).is_some() {
                existing_constants.push(op_id);
                continue;
            }

            let Some(folded) = self.try_fold_op(function, registry, op_id)? else {
                continue;
            };
            tracing::debug!(%op_id, name = function.op(op_id)?.name(), "folded operation");

            let constants = self.replace_results(function, op_id, folded)?;
            existing_constants.extend(constants);
            to_erase.push(op_id);
        }

        // Erasing a folded op also erases folded ops nested in its regions.
        for &op_id in &to_erase {
            if function.contains_op(op_id) {
                function.erase_op(op_id)?;
            }
        }

        let mut swept = 0usize;
        for op_id in existing_constants {
            if !function.contains_op(op_id) {
                continue;
            }
            let unused = function
                .op(op_id)?
                .results()
                .iter()
                .map(|&result| function.use_empty(result))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .all(|empty| empty);
            if unused {
                function.erase_op(op_id)?;
                swept += 1;
            }
        }

        tracing::debug!(folded = to_erase.len(), swept, "constant folding complete");
        Ok(!to_erase.is_empty() || swept > 0)
    }
}
