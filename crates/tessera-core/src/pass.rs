//! Transformation pass trait and the pass registry.

use crate::function::Function;
use crate::registry::OperatorRegistry;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Trait for implementing function passes.
///
/// A pass transforms one function body at a time. Passes are standalone
/// objects (not owned by operators) so a single pass can work across every
/// operation kind by querying the registry.
///
/// # Return Value
///
/// The `run()` method returns `Ok(true)` if the pass made changes to the
/// function, or `Ok(false)` if no changes were made.
///
/// # Example
///
/// ```ignore
/// struct NoOpPass;
///
/// impl Pass for NoOpPass {
///     fn name(&self) -> &str {
///         "noop"
///     }
///
///     fn description(&self) -> &str {
///         "Do nothing"
///     }
///
///     fn run(&self, function: &mut Function, registry: &OperatorRegistry) -> Result<bool> {
///         Ok(false)
///     }
/// }
/// ```
pub trait Pass: Send + Sync {
    /// Get the pass name (used for registration, logging and debugging).
    fn name(&self) -> &str;

    /// One-line human readable summary.
    fn description(&self) -> &str;

    /// Run the pass on one function body.
    ///
    /// # Arguments
    ///
    /// * `function` - The function to transform (exclusively borrowed).
    /// * `registry` - The operator registry (for capability queries).
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the pass made changes to the function.
    /// * `Ok(false)` if no changes were made.
    /// * `Err(_)` if the pass encountered an error.
    fn run(&self, function: &mut Function, registry: &OperatorRegistry) -> Result<bool>;
}

type PassFactory = Box<dyn Fn() -> Box<dyn Pass> + Send + Sync>;

/// A registered pass: its name, description and a constructor.
pub struct PassInfo {
    name: String,
    description: String,
    factory: PassFactory,
}

impl PassInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Create a fresh instance of the pass.
    pub fn create(&self) -> Box<dyn Pass> {
        (self.factory)()
    }
}

impl fmt::Debug for PassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name-indexed catalogue of available passes.
///
/// The registry is an ordinary value owned by the host: nothing is
/// registered until the host fills it, typically through
/// `tessera_compiler::register_builtin_passes`.
#[derive(Default)]
pub struct PassRegistry {
    passes: BTreeMap<String, PassInfo>,
}

impl PassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pass under `name`.
    ///
    /// Returns [`Error::DuplicatePass`] if the name is taken.
    pub fn register<F>(&mut self, name: &str, description: &str, factory: F) -> Result<&mut Self>
    where
        F: Fn() -> Box<dyn Pass> + Send + Sync + 'static,
    {
        if self.passes.contains_key(name) {
            return Err(Error::DuplicatePass(name.to_string()));
        }
        self.passes.insert(
            name.to_string(),
            PassInfo {
                name: name.to_string(),
                description: description.to_string(),
                factory: Box::new(factory),
            },
        );
        tracing::debug!(pass = name, "registered pass");
        Ok(self)
    }

    /// Instantiate the pass registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Pass>> {
        self.info(name)
            .map(PassInfo::create)
            .ok_or_else(|| Error::UnknownPass(name.to_string()))
    }

    pub fn info(&self, name: &str) -> Option<&PassInfo> {
        self.passes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.passes.contains_key(name)
    }

    /// Registered passes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &PassInfo> {
        self.passes.values()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl fmt::Debug for PassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.passes.keys()).finish()
    }
}
