// Use cases behind the execute and visualize operations.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::api::dto::{CodeExecutionRequest, CodeExecutionResponse, Snippet};
use crate::domain::trace::{self, Step, COMPLETION_DESCRIPTION};

/// Stateless service; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeExecutionService;

impl CodeExecutionService {
    pub fn new() -> Self {
        Self
    }

    /// Plain execution: the canned output only, no trace.
    pub fn execute(&self, request: &CodeExecutionRequest) -> CodeExecutionResponse {
        match request.validate() {
            Ok(snippet) => self.execute_snippet(&snippet),
            Err(e) => e.into(),
        }
    }

    /// Visualization: the full step sequence plus the derived output text.
    pub fn visualize(&self, request: &CodeExecutionRequest) -> CodeExecutionResponse {
        match request.validate() {
            Ok(snippet) => self.visualize_snippet(&snippet),
            Err(e) => e.into(),
        }
    }

    pub fn execute_snippet(&self, snippet: &Snippet) -> CodeExecutionResponse {
        let start = Instant::now();
        match guarded(|| snippet.language.canned_output().to_string()) {
            Ok(output) => CodeExecutionResponse::executed(output, elapsed_ms(start)),
            Err(message) => {
                warn!(language = %snippet.language, error = %message, "execution failed");
                CodeExecutionResponse::failed(message, Some(elapsed_ms(start)))
            }
        }
    }

    pub fn visualize_snippet(&self, snippet: &Snippet) -> CodeExecutionResponse {
        let start = Instant::now();
        match guarded(|| trace::synthesize(&snippet.code, snippet.language)) {
            Ok(steps) => {
                let output = collect_output(&steps);
                let elapsed = elapsed_ms(start);
                info!(
                    language = %snippet.language,
                    steps = steps.len(),
                    elapsed_ms = elapsed,
                    "visualized snippet"
                );
                CodeExecutionResponse::visualized(steps, output, elapsed)
            }
            Err(message) => {
                warn!(language = %snippet.language, error = %message, "visualization failed");
                CodeExecutionResponse::failed(message, Some(elapsed_ms(start)))
            }
        }
    }

    /// Visualize many snippets on the rayon pool; results keep input order.
    pub fn visualize_batch(&self, snippets: &[Snippet]) -> Vec<CodeExecutionResponse> {
        snippets
            .par_iter()
            .map(|snippet| self.visualize_snippet(snippet))
            .collect()
    }
}

/// Newline-joined step outputs, or the completion text when no step has one.
pub fn collect_output(steps: &[Step]) -> String {
    let outputs: Vec<&str> = steps.iter().filter_map(|s| s.output.as_deref()).collect();
    if outputs.is_empty() {
        COMPLETION_DESCRIPTION.to_string()
    } else {
        outputs.join("\n")
    }
}

/// Run `f`, turning a panic into its message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown internal error".to_string()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
