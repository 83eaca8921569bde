//! Function passes for Tessera.
//!
//! This crate provides the built-in transformations over `tessera-core`
//! functions and a small driver that applies a pass to every function of a
//! module:
//! - **constant-fold** - Replace operations with constants when their inputs are known
//! - **print-graph** - Write each function's def-use graph in DOT format
//!
//! Nothing is registered implicitly. The host builds a [`PassRegistry`] and
//! calls [`register_builtin_passes`] on it.
//!
//! # Example
//!
//! ```no_run
//! use tessera_compiler::{PassRunner, register_builtin_passes};
//! use tessera_core::{Module, OperatorRegistry, PassRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut passes = PassRegistry::new();
//! register_builtin_passes(&mut passes)?;
//!
//! let mut module = Module::new();
//! let operators = OperatorRegistry::new();
//! let changed = PassRunner::new().run_named(&passes, "constant-fold", &mut module, &operators)?;
//! println!("changed: {}", changed);
//! # Ok(())
//! # }
//! ```

pub mod passes;

pub use passes::{ConstantFoldPass, PrintGraphPass};

// Re-export commonly used types from tessera-core
pub use tessera_core::{Function, Module, Pass, PassRegistry, Result};

use tessera_core::OperatorRegistry;

/// Register every built-in pass with `registry`.
///
/// Fails with `Error::DuplicatePass` if any of their names is already taken.
pub fn register_builtin_passes(registry: &mut PassRegistry) -> Result<()> {
    let fold = ConstantFoldPass::new();
    registry.register(fold.name(), fold.description(), || {
        Box::new(ConstantFoldPass::new())
    })?;

    let print = PrintGraphPass::new();
    registry.register(print.name(), print.description(), || {
        Box::new(PrintGraphPass::new())
    })?;

    Ok(())
}

/// Options for [`PassRunner`].
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Run the ledger verifier on each function after the pass.
    pub verify_after_run: bool,
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_after_run(mut self, verify: bool) -> Self {
        self.verify_after_run = verify;
        self
    }
}

/// Applies a pass to function bodies, one function at a time.
#[derive(Debug, Clone, Default)]
pub struct PassRunner {
    options: RunnerOptions,
}

impl PassRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run `pass` once on every function of `module`.
    ///
    /// Returns whether any function changed. Stops at the first error.
    #[tracing::instrument(skip_all, fields(pass = pass.name(), num_functions = module.len()))]
    pub fn run(
        &self,
        pass: &dyn Pass,
        module: &mut Module,
        registry: &OperatorRegistry,
    ) -> Result<bool> {
        let mut changed = false;
        for function in module.functions_mut() {
            changed |= self.run_on_function(pass, function, registry)?;
        }
        Ok(changed)
    }

    /// Run `pass` once on a single function.
    pub fn run_on_function(
        &self,
        pass: &dyn Pass,
        function: &mut Function,
        registry: &OperatorRegistry,
    ) -> Result<bool> {
        let _span =
            tracing::debug_span!("pass", name = pass.name(), function = function.name()).entered();

        let changed = pass.run(function, registry)?;
        if self.options.verify_after_run {
            function.verify()?;
        }

        tracing::debug!(changed, num_ops = function.op_count(), "pass finished");
        Ok(changed)
    }

    /// Instantiate the pass registered as `name` and run it on `module`.
    pub fn run_named(
        &self,
        passes: &PassRegistry,
        name: &str,
        module: &mut Module,
        registry: &OperatorRegistry,
    ) -> Result<bool> {
        let pass = passes.create(name)?;
        self.run(pass.as_ref(), module, registry)
    }
}
