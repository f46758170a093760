use serde::{Deserialize, Serialize};

use crate::domain::language::SupportedLanguage;
use crate::domain::trace::Step;
use crate::error::ValidationError;

/// Inbound request as it arrives on the wire; validated before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeExecutionRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub code: String,
    pub language: SupportedLanguage,
}

impl CodeExecutionRequest {
    pub fn new(code: &str, language: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            language: Some(language.to_string()),
        }
    }

    /// Check every field, collecting one message per failing field.
    pub fn validate(&self) -> Result<Snippet, ValidationError> {
        let mut errors = ValidationError::new();

        let code = match self.code.as_deref() {
            Some(code) if !code.trim().is_empty() => Some(code.to_string()),
            _ => {
                errors.add("code", "Code cannot be blank");
                None
            }
        };

        let language = match self.language.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("language", "Language cannot be null");
                None
            }
            Some(id) => match SupportedLanguage::parse(id) {
                Ok(language) => Some(language),
                Err(e) => {
                    errors.add("language", e.to_string());
                    None
                }
            },
        };

        match (code, language) {
            (Some(code), Some(language)) if errors.is_empty() => Ok(Snippet { code, language }),
            _ => Err(errors),
        }
    }
}

/// Outbound response shared by the execute and visualize operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExecutionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization_steps: Option<Vec<Step>>,
    /// Elapsed milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
}

impl CodeExecutionResponse {
    pub fn executed(output: String, elapsed_ms: u64) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            visualization_steps: None,
            execution_time: Some(elapsed_ms),
        }
    }

    pub fn visualized(steps: Vec<Step>, output: String, elapsed_ms: u64) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            visualization_steps: Some(steps),
            execution_time: Some(elapsed_ms),
        }
    }

    pub fn failed(error: String, elapsed_ms: Option<u64>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error),
            visualization_steps: None,
            execution_time: elapsed_ms,
        }
    }
}

impl From<ValidationError> for CodeExecutionResponse {
    fn from(err: ValidationError) -> Self {
        Self::failed(err.to_string(), None)
    }
}
