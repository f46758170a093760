//! Trace Synthesis
//!
//! Sweeps a snippet's significant lines once and emits one [`Step`] per line,
//! plus a final "Execution completed" step. The sweep keeps a single-writer
//! accumulator (environment, call stack, memory objects, control-flow edges,
//! data structures); every step holds its own copy of it.
//!
//! Nothing is executed. Each run builds fresh state, so concurrent runs never
//! interfere with each other.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::debug;

use super::callstack::{CallStack, Frame};
use super::classifier::{
    describe, is_assignment, is_function_definition, is_return, Assignment, FunctionHeader,
};
use super::data_structure::DataStructureInstance;
use super::flowgraph::ControlFlowEdge;
use super::inference::{infer_value, Environment};
use super::language::SupportedLanguage;
use super::memory::{fresh_address, MemoryObject};
use super::value::Value;

/// Physical lines inspected per snippet; the rest is never read.
pub const MAX_LINES: usize = 15;

/// Description of the synthesized final step.
pub const COMPLETION_DESCRIPTION: &str = "Execution completed";

/// One visualization step. Snapshots are copies taken when the step was emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based, contiguous
    pub step_number: usize,
    pub description: String,
    pub variable_states: BTreeMap<String, Value>,
    /// 1-based source line; absent on the completion step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_highlight: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub stack_frames: Vec<Frame>,
    pub memory_objects: Vec<MemoryObject>,
    pub control_flow: Vec<ControlFlowEdge>,
    pub data_structures: Vec<DataStructureInstance>,
    /// Capture time, unix milliseconds
    pub timestamp: u64,
}

/// A line worth a step: non-blank and not a `//` or `#` comment.
pub fn is_significant(line: &str) -> bool {
    let line = line.trim();
    !(line.is_empty() || line.starts_with("//") || line.starts_with('#'))
}

#[derive(Debug, Default)]
struct TraceState {
    env: Environment,
    stack: CallStack,
    memory: Vec<MemoryObject>,
    edges: Vec<ControlFlowEdge>,
    structures: Vec<DataStructureInstance>,
}

impl TraceState {
    fn assign(&mut self, line: &str) {
        let assignment = Assignment::parse(line);
        let value = match assignment.rhs.as_deref() {
            Some(rhs) => infer_value(rhs, &self.env),
            None => Value::Opaque,
        };

        if let Some(structure) = DataStructureInstance::detect(&value) {
            self.structures.push(structure);
        }

        let address = fresh_address(&self.memory);
        self.memory.push(MemoryObject::new(address, &assignment.target, value.clone()));
        self.env.insert(assignment.target, value);
    }

    fn snapshot(&self, step_number: usize, description: String, line: usize) -> Step {
        Step {
            step_number,
            description,
            variable_states: self.env.clone(),
            line_highlight: Some(line),
            output: None,
            stack_frames: self.stack.frames().to_vec(),
            memory_objects: self.memory.clone(),
            control_flow: self.edges.clone(),
            data_structures: self.structures.clone(),
            timestamp: now_millis(),
        }
    }

    fn complete(self, step_number: usize, output: &str) -> Step {
        Step {
            step_number,
            description: COMPLETION_DESCRIPTION.to_string(),
            variable_states: self.env,
            line_highlight: None,
            output: Some(output.to_string()),
            stack_frames: self.stack.into_frames(),
            memory_objects: self.memory,
            control_flow: self.edges,
            data_structures: self.structures,
            timestamp: now_millis(),
        }
    }
}

/// Produce the visualization steps for a snippet.
///
/// Yields no steps when the first [`MAX_LINES`] lines hold nothing significant,
/// otherwise one step per significant line followed by the completion step.
pub fn synthesize(code: &str, language: SupportedLanguage) -> Vec<Step> {
    let lines: Vec<&str> = code.split('\n').take(MAX_LINES).collect();
    let mut state = TraceState::default();
    let mut steps: Vec<Step> = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if !is_significant(line) {
            continue;
        }
        let line_number = index + 1;

        if is_function_definition(line) {
            state.stack.push(Frame::from_header(FunctionHeader::parse(line), line_number));
        }

        if !steps.is_empty() {
            if let Some(edge) = ControlFlowEdge::build(&lines, index) {
                state.edges.push(edge);
            }
        }

        if is_assignment(line) {
            state.assign(line);
        }

        let step = state.snapshot(steps.len() + 1, describe(line), line_number);
        steps.push(step);

        // after the snapshot, so the returning line still shows its frame
        if is_return(line) {
            state.stack.pop();
        }
    }

    if !steps.is_empty() {
        let step_number = steps.len() + 1;
        steps.push(state.complete(step_number, language.canned_output()));
    }

    debug!(language = %language, steps = steps.len(), "synthesized trace");
    steps
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flowgraph::FlowKind;

    #[test]
    fn test_empty_and_comment_only_snippets() {
        assert!(synthesize("", SupportedLanguage::Python).is_empty());
        assert!(synthesize("\n   \n# note\n// other", SupportedLanguage::Java).is_empty());
    }

    #[test]
    fn test_add_function_walkthrough() {
        let code = "def add(a, b):\n    result = a + b\n    return result";
        let steps = synthesize(code, SupportedLanguage::Python);
        assert_eq!(steps.len(), 4);

        let define = &steps[0];
        assert_eq!(define.description, "Defining a function");
        assert_eq!(define.line_highlight, Some(1));
        assert_eq!(define.stack_frames.len(), 1);
        assert_eq!(define.stack_frames[0].function_name, "add");
        assert!(define.memory_objects.is_empty());
        assert!(define.control_flow.is_empty());

        let assign = &steps[1];
        assert_eq!(assign.description, "Assigning value to variable");
        assert_eq!(assign.variable_states.get("result"), Some(&Value::Opaque));
        assert_eq!(assign.memory_objects.len(), 1);
        assert_eq!(assign.memory_objects[0].type_tag, "Object");
        assert_eq!(assign.control_flow[0].kind, FlowKind::Sequential);

        let ret = &steps[2];
        assert_eq!(ret.description, "Returning value");
        assert_eq!(ret.control_flow[1].kind, FlowKind::Return);
        assert_eq!((ret.control_flow[1].from_line, ret.control_flow[1].to_line), (2, 3));
        assert_eq!(ret.stack_frames.len(), 1);

        let done = &steps[3];
        assert_eq!(done.description, COMPLETION_DESCRIPTION);
        assert_eq!(done.line_highlight, None);
        assert_eq!(done.output.as_deref(), Some(SupportedLanguage::Python.canned_output()));
        assert!(done.stack_frames.is_empty());
    }

    #[test]
    fn test_line_cap_is_physical() {
        let code: Vec<String> = (0..20).map(|i| format!("x{i} = {i}")).collect();
        let steps = synthesize(&code.join("\n"), SupportedLanguage::Python);
        assert_eq!(steps.len(), MAX_LINES + 1);

        let mut sparse = vec!["".to_string(); 15];
        sparse.push("late = 1".to_string());
        assert!(synthesize(&sparse.join("\n"), SupportedLanguage::Python).is_empty());
    }

    #[test]
    fn test_reassignment_appends_memory() {
        let steps = synthesize("x = 1\nx = 2\ny = x", SupportedLanguage::Python);
        let last = steps.last().unwrap();
        assert_eq!(last.memory_objects.len(), 3);
        assert_eq!(last.variable_states.get("x"), Some(&Value::Int(2)));
        assert_eq!(last.variable_states.get("y"), Some(&Value::Int(2)));
        assert_eq!(steps[0].variable_states.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_list_assignment_detects_structure() {
        let steps = synthesize("grid = [[1,2],[3,4]]\nnums = [1,2,3]", SupportedLanguage::Python);
        assert_eq!(steps[0].data_structures.len(), 1);
        assert_eq!(steps[1].data_structures.len(), 2);
        assert_eq!(steps[1].memory_objects[1].type_tag, "List/Array");
    }

    #[test]
    fn test_first_significant_line_after_comment_has_no_edge() {
        let steps = synthesize("# header\nx = 1\ny = 2", SupportedLanguage::Python);
        assert!(steps[0].control_flow.is_empty());
        assert_eq!(steps[1].control_flow.len(), 1);
        assert_eq!(steps[1].control_flow[0].from_line, 2);
    }

    #[test]
    fn test_return_without_frame_is_noop() {
        let steps = synthesize("return 1\nreturn 2", SupportedLanguage::TypeScript);
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.stack_frames.is_empty()));
    }
}
