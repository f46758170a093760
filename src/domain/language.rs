/// Language Domain Module
///
/// Defines the closed set of languages a snippet can be tagged with, and the
/// canned output each one produces in place of real program output.

use std::path::Path;
use serde::{Serialize, Serializer};
use crate::error::LanguageError;

/// Supported snippet languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    Python,
    Java,
    TypeScript,
    React,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 4] = [
        SupportedLanguage::Python,
        SupportedLanguage::Java,
        SupportedLanguage::TypeScript,
        SupportedLanguage::React,
    ];

    /// Parse a wire identifier (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Result<SupportedLanguage, LanguageError> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(SupportedLanguage::Python),
            "java" => Ok(SupportedLanguage::Java),
            "typescript" => Ok(SupportedLanguage::TypeScript),
            "react" => Ok(SupportedLanguage::React),
            _ => Err(LanguageError::Unsupported(s.to_string())),
        }
    }

    /// Infer language from file extension.
    pub fn from_extension(ext: &str) -> Option<SupportedLanguage> {
        match ext.to_lowercase().as_str() {
            "py" => Some(SupportedLanguage::Python),
            "java" => Some(SupportedLanguage::Java),
            "ts" => Some(SupportedLanguage::TypeScript),
            "tsx" | "jsx" => Some(SupportedLanguage::React),
            _ => None,
        }
    }

    /// Infer language from a file path.
    pub fn from_path(path: &Path) -> Option<SupportedLanguage> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Wire identifier, as accepted by `parse`.
    pub fn id(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => "python",
            SupportedLanguage::Java => "java",
            SupportedLanguage::TypeScript => "typescript",
            SupportedLanguage::React => "react",
        }
    }

    /// Get the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => "Python",
            SupportedLanguage::Java => "Java",
            SupportedLanguage::TypeScript => "TypeScript",
            SupportedLanguage::React => "React",
        }
    }

    /// The placeholder text standing in for "what the program printed".
    ///
    /// Nothing is ever executed; this is a fixed per-language string.
    pub fn canned_output(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => {
                "Code executed successfully\nOutput: [Simulated Python execution]"
            }
            SupportedLanguage::Java => {
                "Code executed successfully\nOutput: [Simulated Java execution]"
            }
            SupportedLanguage::TypeScript => {
                "Code executed successfully\nOutput: [Simulated TypeScript execution]"
            }
            SupportedLanguage::React => {
                "Code executed successfully\nOutput: [Simulated React execution]"
            }
        }
    }

    /// Starter snippet shown for the language in the editor.
    pub fn sample_snippet(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => PYTHON_SAMPLE,
            SupportedLanguage::Java => JAVA_SAMPLE,
            SupportedLanguage::TypeScript => TYPESCRIPT_SAMPLE,
            SupportedLanguage::React => REACT_SAMPLE,
        }
    }
}

/// String-keyed canned output lookup. Fails for identifiers outside the closed set.
pub fn canned_output_for(id: &str) -> Result<&'static str, LanguageError> {
    SupportedLanguage::parse(id).map(|lang| lang.canned_output())
}

impl std::str::FromStr for SupportedLanguage {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for SupportedLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

const PYTHON_SAMPLE: &str = r#"# Python Example
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n-1) + fibonacci(n-2)

result = fibonacci(5)
print(f"Fibonacci of 5 is: {result}")"#;

const JAVA_SAMPLE: &str = r#"public class Main {
    public static void main(String[] args) {
        int[] numbers = {1, 2, 3, 4, 5};
        int sum = 0;

        for (int num : numbers) {
            sum += num;
        }

        System.out.println("Sum: " + sum);
    }
}"#;

const TYPESCRIPT_SAMPLE: &str = r#"function factorial(n: number): number {
    if (n <= 1) {
        return 1;
    }
    return n * factorial(n - 1);
}

const result = factorial(5);
console.log(`Factorial of 5 is: ${result}`);"#;

const REACT_SAMPLE: &str = r#"import React, { useState } from 'react';

function Counter() {
    const [count, setCount] = useState(0);

    return (
        <div>
            <p>Count: {count}</p>
            <button onClick={() => setCount(count + 1)}>
                Increment
            </button>
        </div>
    );
}"#;
