//! Line Classification
//!
//! Decides what a single trimmed source line "is" for visualization purposes.
//! Every check is a plain substring test, applied in a fixed order where the
//! first match wins; the order is part of the observable behavior.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::inference::split_fields;
use super::value::Value;

/// Longest prefix of a line echoed by a generic step description.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// Declaration keywords stripped from an assignment target.
static DECLARATION_MODIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(var|let|const|int|String|double|float|final)\s+").expect("valid modifier pattern")
});

/// What a line is, as far as the step description is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    FunctionDefinition,
    Condition,
    Loop,
    Assignment,
    Print,
    Return,
    Statement,
}

impl LineKind {
    /// Classify a trimmed line.
    pub fn of(line: &str) -> LineKind {
        if line.contains("def ") || line.contains("function ") {
            LineKind::FunctionDefinition
        } else if line.contains("if ") {
            LineKind::Condition
        } else if is_loop(line) {
            LineKind::Loop
        // Bare '=' on purpose: `x == 1` and `a <= b` describe as assignments.
        } else if line.contains('=') {
            LineKind::Assignment
        } else if line.contains("print")
            || line.contains("System.out.println")
            || line.contains("console.log")
        {
            LineKind::Print
        } else if line.contains("return") {
            LineKind::Return
        } else {
            LineKind::Statement
        }
    }
}

/// Human-readable description of a trimmed line.
pub fn describe(line: &str) -> String {
    match LineKind::of(line) {
        LineKind::FunctionDefinition => "Defining a function".to_string(),
        LineKind::Condition => "Checking condition".to_string(),
        LineKind::Loop => "Starting loop iteration".to_string(),
        LineKind::Assignment => "Assigning value to variable".to_string(),
        LineKind::Print => "Printing output".to_string(),
        LineKind::Return => "Returning value".to_string(),
        LineKind::Statement => {
            let preview: String = line.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("Executing line: {preview}")
        }
    }
}

pub fn is_condition(line: &str) -> bool {
    line.contains("if ")
}

pub fn is_loop(line: &str) -> bool {
    line.contains("for ") || line.contains("while ")
}

pub fn is_return(line: &str) -> bool {
    line.contains("return")
}

/// An `=` that is not part of `==`.
pub fn is_assignment(line: &str) -> bool {
    line.contains('=') && !line.contains("==")
}

/// Lines that open a new simulated frame.
pub fn is_function_definition(line: &str) -> bool {
    line.contains("def ") || line.contains("function ") || line.contains("public static")
}

/// A function header: name plus parameter placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHeader {
    pub name: String,
    /// Declaration order
    pub parameters: IndexMap<String, Value>,
}

impl FunctionHeader {
    pub fn parse(line: &str) -> Self {
        Self {
            name: function_name(line),
            parameters: parameters(line),
        }
    }
}

fn function_name(line: &str) -> String {
    let after_keyword = |keyword: &str| -> Option<String> {
        let start = line.find(keyword)? + keyword.len();
        let rest = line[start..].trim();
        Some(first_token(rest, |c| c == '(' || c.is_whitespace()).to_string())
    };

    if let Some(name) = after_keyword("def ") {
        return name;
    }
    if let Some(name) = after_keyword("function ") {
        return name;
    }
    if line.contains("public static") {
        if let Some(part) = line.split_whitespace().find(|part| part.contains('(')) {
            return first_token(part, |c| c == '(').to_string();
        }
    }
    "unknown".to_string()
}

/// Parameter names between the first `(` and the first `)`, each mapped to the
/// placeholder value.
fn parameters(line: &str) -> IndexMap<String, Value> {
    let mut params = IndexMap::new();
    let (Some(open), Some(close)) = (line.find('('), line.find(')')) else {
        return params;
    };
    if close <= open {
        return params;
    }

    for param in line[open + 1..close].split(',') {
        let trimmed = param.trim();
        if trimmed.is_empty() {
            continue;
        }
        let name = first_token(trimmed, |c| c == ':' || c.is_whitespace()).trim();
        params.insert(name.to_string(), Value::Opaque);
    }
    params
}

/// Assignment target and right-hand side text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    /// `None` when nothing follows the `=`.
    pub rhs: Option<String>,
}

impl Assignment {
    /// Split an assignment line on `=`; the right-hand side is the text between
    /// the first and second `=`.
    pub fn parse(line: &str) -> Self {
        let parts = split_fields(line, '=');
        if parts.len() < 2 {
            return Self {
                target: "unknown".to_string(),
                rhs: None,
            };
        }

        let left = parts[0].trim();
        let left = DECLARATION_MODIFIERS.replace_all(left, "");
        let target = first_token(&left, |c| c == '[' || c.is_whitespace()).trim().to_string();

        Self {
            target,
            rhs: Some(parts[1].to_string()),
        }
    }
}

fn first_token(text: &str, is_separator: impl Fn(char) -> bool) -> &str {
    text.split(is_separator).next().unwrap_or("")
}
