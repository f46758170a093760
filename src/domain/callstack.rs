// Simulated call stack: frames pushed on definitions, popped on returns.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::classifier::FunctionHeader;
use super::value::Value;

/// A simulated activation record. No real call semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub function_name: String,
    /// Parameter name to placeholder, in declaration order
    pub parameters: IndexMap<String, Value>,
    /// Never populated
    pub local_variables: BTreeMap<String, Value>,
    /// Never populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    /// 1-based line where the frame was pushed
    pub line_number: usize,
}

impl Frame {
    pub fn from_header(header: FunctionHeader, line_number: usize) -> Self {
        Self {
            function_name: header.name,
            parameters: header.parameters,
            local_variables: BTreeMap::new(),
            return_value: None,
            line_number,
        }
    }
}

/// LIFO stack of frames; popping an empty stack does nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
