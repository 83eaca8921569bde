//! DOT graph visualization of a function's def-use edges.
//!
//! Generates Graphviz DOT format with one node per block argument and per
//! operation, and one edge per use running from the value's definition to the
//! operation reading it.

use crate::function::Function;
use crate::operation::OpId;
use crate::value::{ValueId, ValueOwner};
use crate::Result;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Options for [`to_def_use_dot`].
#[derive(Debug, Clone, Default)]
pub struct GraphPrintOptions {
    /// Label nodes with the operation name only and drop edge labels.
    pub short_names: bool,

    /// Emitted as a comment line above the graph.
    pub title: Option<String>,
}

impl GraphPrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_short_names(mut self, short_names: bool) -> Self {
        self.short_names = short_names;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Generate a DOT graph of the def-use edges of `function`.
///
/// # Example
///
/// ```ignore
/// let dot = to_def_use_dot(&func, &GraphPrintOptions::new().with_title("main"))?;
/// std::fs::write("main.dot", dot)?;
/// // Render with: dot -Tpng main.dot -o main.png
/// ```
pub fn to_def_use_dot(function: &Function, options: &GraphPrintOptions) -> Result<String> {
    let mut graph: DiGraph<String, String> = DiGraph::new();
    let mut op_nodes: HashMap<OpId, NodeIndex> = HashMap::new();
    let mut arg_nodes: HashMap<ValueId, NodeIndex> = HashMap::new();

    for &arg in function.arguments() {
        let label = format!("{} : {}", arg, function.value_type(arg)?);
        arg_nodes.insert(arg, graph.add_node(label));
    }

    let order = function.preorder()?;
    for &op_id in &order {
        let op = function.op(op_id)?;
        let label = if options.short_names {
            op.name().to_string()
        } else {
            format!("{} = {}", op_id, op.name())
        };
        op_nodes.insert(op_id, graph.add_node(label));

        // Arguments of nested blocks, e.g. induction variables.
        for &region in op.regions() {
            for &block in function.region(region)?.blocks() {
                for &arg in function.block(block)?.arguments() {
                    let label = format!("{} : {}", arg, function.value_type(arg)?);
                    arg_nodes.insert(arg, graph.add_node(label));
                }
            }
        }
    }

    for &op_id in &order {
        let target = op_nodes[&op_id];
        for (index, value) in function.operands(op_id)?.into_iter().enumerate() {
            let source = match function.value(value)?.owner() {
                ValueOwner::Op { op, .. } => op_nodes.get(&op),
                ValueOwner::Block { .. } => arg_nodes.get(&value),
            };
            if let Some(&source) = source {
                graph.add_edge(source, target, index.to_string());
            }
        }
    }

    let mut dot = String::new();
    if let Some(title) = &options.title {
        dot.push_str(&format!("// {}\n", title));
    }
    let config: &[Config] = if options.short_names {
        &[Config::EdgeNoLabel]
    } else {
        &[]
    };
    dot.push_str(&Dot::with_config(&graph, config).to_string());
    Ok(dot)
}
