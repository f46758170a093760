//! Control-Flow Edges
//!
//! Derives one directed edge per significant line, anchored at the physical line
//! just before it, and classifies how control got there.

use serde::Serialize;

use super::classifier::{is_condition, is_loop, is_return};

/// How control passed from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Plain fall-through
    Sequential,
    /// Previous line tested a condition
    Branch,
    /// Previous line opened a loop
    Loop,
    /// Current line returns
    Return,
    /// Current line is a bare call
    Call,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Sequential => "sequential",
            FlowKind::Branch => "branch",
            FlowKind::Loop => "loop",
            FlowKind::Return => "return",
            FlowKind::Call => "call",
        }
    }
}

/// An edge in the control flow of a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlFlowEdge {
    /// 1-based source line
    pub from_line: usize,
    /// Always `from_line + 1`
    pub to_line: usize,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    /// Branch outcome, only set for branch edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<bool>,
}

impl ControlFlowEdge {
    /// Classify the edge into `lines[index]` from the line before it.
    ///
    /// `index` is a position in the physical line array, so skipped blank or
    /// comment lines are not compensated for. Returns `None` for the first line.
    pub fn build(lines: &[&str], index: usize) -> Option<ControlFlowEdge> {
        if index == 0 || index >= lines.len() {
            return None;
        }

        let current = lines[index].trim();
        let previous = lines[index - 1].trim();

        let (kind, condition) = if is_condition(previous) {
            (FlowKind::Branch, Some(!current.contains("else")))
        } else if is_loop(previous) {
            (FlowKind::Loop, None)
        } else if is_return(current) {
            (FlowKind::Return, None)
        // Any '=' (including `==`) rules out a call edge.
        } else if current.contains('(') && !current.contains('=') {
            (FlowKind::Call, None)
        } else {
            (FlowKind::Sequential, None)
        };

        Some(ControlFlowEdge {
            from_line: index,
            to_line: index + 1,
            kind,
            condition,
        })
    }
}
