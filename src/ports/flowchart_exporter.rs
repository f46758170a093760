//! Flowchart DOT Exporter
//!
//! Renders a trace's control flow as Graphviz DOT with flowchart styling.

use std::collections::BTreeSet;

use crate::domain::flowgraph::{ControlFlowEdge, FlowKind};
use crate::domain::trace::Step;
use super::TraceExporter;

pub struct FlowchartExporter;

impl TraceExporter for FlowchartExporter {
    fn render(&self, steps: &[Step]) -> anyhow::Result<String> {
        Ok(Self::to_dot(steps))
    }
}

impl FlowchartExporter {
    /// Convert a trace to a DOT string. Edges come from the last step, whose
    /// control-flow list is the complete one.
    pub fn to_dot(steps: &[Step]) -> String {
        let mut lines = Vec::new();

        lines.push("digraph ControlFlow {".to_string());
        lines.push("    rankdir=TB;".to_string());
        lines.push("    nodesep=0.6;".to_string());
        lines.push(
            "    node [fontname=\"Helvetica\", fontsize=12, shape=box, style=\"filled,rounded\", \
             fillcolor=\"#e6e9ef\"];"
                .to_string(),
        );
        lines.push("    edge [fontname=\"Helvetica\", fontsize=10];".to_string());
        lines.push("".to_string());

        let edges: &[ControlFlowEdge] =
            steps.last().map(|s| s.control_flow.as_slice()).unwrap_or(&[]);

        // Highlighted lines plus any edge endpoint, in line order
        let mut nodes: BTreeSet<usize> = steps.iter().filter_map(|s| s.line_highlight).collect();
        for edge in edges {
            nodes.insert(edge.from_line);
            nodes.insert(edge.to_line);
        }

        for line in &nodes {
            let label = steps
                .iter()
                .find(|s| s.line_highlight == Some(*line))
                .map(|s| format!("{}: {}", line, Self::escape_label(&s.description)))
                .unwrap_or_else(|| format!("{}", line));
            lines.push(format!("    \"L{}\" [label=\"{}\"];", line, label));
        }

        lines.push("".to_string());

        for edge in edges {
            let (color, style) = Self::edge_style(edge.kind);
            let label = match edge.condition {
                Some(taken) => format!("{} [{}]", edge.kind.as_str(), taken),
                None => edge.kind.as_str().to_string(),
            };
            lines.push(format!(
                "    \"L{}\" -> \"L{}\" [label=\"{}\", color=\"{}\", style=\"{}\"];",
                edge.from_line, edge.to_line, label, color, style
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn edge_style(kind: FlowKind) -> (&'static str, &'static str) {
        match kind {
            FlowKind::Sequential => ("#5c5f77", "solid"),
            FlowKind::Branch => ("#df8e1d", "bold"),   // Yellow
            FlowKind::Loop => ("#8839ef", "bold"),     // Purple
            FlowKind::Return => ("#d20f39", "dashed"), // Red
            FlowKind::Call => ("#1e66f5", "solid"),    // Blue
        }
    }

    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}
