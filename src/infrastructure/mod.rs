// Infrastructure implementations for WhatCode.

pub mod concurrency;
pub mod snippet_loader;

use anyhow::Context;

use crate::domain::trace::Step;
use crate::ports::TraceExporter;

pub struct JsonExporter;
impl TraceExporter for JsonExporter {
    fn render(&self, steps: &[Step]) -> anyhow::Result<String> {
        serde_json::to_string_pretty(steps).context("Failed to serialize trace")
    }
}

/// Plain-text step listing for terminals.
pub struct TextExporter;
impl TraceExporter for TextExporter {
    fn render(&self, steps: &[Step]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        for step in steps {
            let line = step
                .line_highlight
                .map(|l| format!("line {}", l))
                .unwrap_or_else(|| "end".to_string());
            out.push(format!("#{} [{}] {}", step.step_number, line, step.description));

            if !step.variable_states.is_empty() {
                let vars: Vec<String> = step
                    .variable_states
                    .iter()
                    .map(|(name, value)| format!("{} = {}", name, value))
                    .collect();
                out.push(format!("    vars:  {}", vars.join(", ")));
            }
            if !step.stack_frames.is_empty() {
                let frames: Vec<&str> =
                    step.stack_frames.iter().map(|f| f.function_name.as_str()).collect();
                out.push(format!("    stack: {}", frames.join(" > ")));
            }
            if let Some(output) = &step.output {
                for text in output.lines() {
                    out.push(format!("    | {}", text));
                }
            }
        }
        Ok(out.join("\n"))
    }
}
