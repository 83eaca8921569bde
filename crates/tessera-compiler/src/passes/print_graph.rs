//! Def-use graph printing pass.

use std::io::Write;
use std::sync::Mutex;
use tessera_core::{
    Function, GraphPrintOptions, OperatorRegistry, Pass, Result, to_def_use_dot,
};

/// Pass that writes the def-use graph of each function in DOT format.
///
/// Output goes to stderr unless another sink is supplied. The function is
/// never modified. Without an explicit title, each graph is titled with the
/// function name.
pub struct PrintGraphPass {
    options: GraphPrintOptions,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl PrintGraphPass {
    /// Create a pass printing to stderr.
    pub fn new() -> Self {
        Self::with_sink(std::io::stderr())
    }

    /// Create a pass printing to `sink`.
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            options: GraphPrintOptions::default(),
            sink: Mutex::new(Box::new(sink)),
        }
    }

    pub fn with_options(mut self, options: GraphPrintOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for PrintGraphPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for PrintGraphPass {
    fn name(&self) -> &str {
        "print-graph"
    }

    fn description(&self) -> &str {
        "Print the def-use graph of each function in DOT format"
    }

    #[tracing::instrument(skip_all, fields(function = function.name()))]
    fn run(&self, function: &mut Function, _registry: &OperatorRegistry) -> Result<bool> {
        let mut options = self.options.clone();
        if options.title.is_none() {
            options.title = Some(function.name().to_string());
        }
        let dot = to_def_use_dot(function, &options)?;

        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.write_all(dot.as_bytes())?;
        sink.flush()?;

        tracing::debug!(bytes = dot.len(), "printed def-use graph");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tessera_core::{Builder, FunctionKind, Location, OperationState, TypeContext};

    /// Sink sharing its buffer with the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prints_without_changing_function() {
        let mut types = TypeContext::new();
        let i32 = types.integer(32);
        let mut func = Function::new("main", FunctionKind::Cfg);
        let entry = func.entry_block();
        let a = func.add_argument(entry, i32).unwrap();
        Builder::at_end(&mut func, entry)
            .create(OperationState::new("return", Location::Unknown).with_operands([a]))
            .unwrap();
        let before = func.clone();

        let captured = Captured::default();
        let pass = PrintGraphPass::with_sink(captured.clone());
        let changed = pass.run(&mut func, &OperatorRegistry::new()).unwrap();

        assert!(!changed);
        assert_eq!(func, before);
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with("// main\n"));
        assert!(text.contains("op0 = return"));
        assert_eq!(text.matches("->").count(), 1);
    }
}
