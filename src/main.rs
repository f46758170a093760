// Command-line entry point for WhatCode.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use whatcode::api::dto::{CodeExecutionResponse, Snippet};
use whatcode::api::server::{self, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use whatcode::application::CodeExecutionService;
use whatcode::domain::language::SupportedLanguage;
use whatcode::infrastructure::concurrency;
use whatcode::infrastructure::snippet_loader::{LoadedSnippet, SnippetLoader};
use whatcode::infrastructure::{JsonExporter, TextExporter};
use whatcode::ports::flowchart_exporter::FlowchartExporter;
use whatcode::ports::TraceExporter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve EXECUTE / VISUALIZE requests as newline-delimited JSON over TCP
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Print the visualization trace of one or more snippets
    Visualize {
        /// Input snippet file (can specify multiple)
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Input folder(s), scanned recursively
        #[arg(short = 'd', long)]
        folder: Vec<PathBuf>,

        /// Language of every input; inferred from the extension when omitted
        #[arg(short, long)]
        language: Option<SupportedLanguage>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Write to this file instead of stdout (single input only)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the simulated program output of a snippet
    Execute {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        language: Option<SupportedLanguage>,
    },

    /// Print a language's starter snippet
    Sample {
        #[arg(short, long)]
        language: SupportedLanguage,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
    Dot,
}

impl Format {
    fn exporter(self) -> Box<dyn TraceExporter> {
        match self {
            Format::Json => Box::new(JsonExporter),
            Format::Text => Box::new(TextExporter),
            Format::Dot => Box::new(FlowchartExporter),
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Serve { host, port } => server::start_server(&ServerConfig { host, port }),
        Command::Visualize { input, folder, language, format, output } => {
            visualize(&input, &folder, language, format, output.as_deref())
        }
        Command::Execute { input, language } => {
            let loader = SnippetLoader::new(language);
            let loaded = loader.load_file(&input)?;
            let response = CodeExecutionService::new().execute_snippet(&loaded.snippet);
            print_outcome(&response)
        }
        Command::Sample { language } => {
            println!("{}", language.sample_snippet());
            Ok(())
        }
    }
}

fn visualize(
    inputs: &[PathBuf],
    folders: &[PathBuf],
    language: Option<SupportedLanguage>,
    format: Format,
    output: Option<&str>,
) -> Result<()> {
    let loader = SnippetLoader::new(language);

    let mut loaded: Vec<LoadedSnippet> = Vec::new();
    for input in inputs {
        match loader.load_file(input) {
            Ok(snippet) => loaded.push(snippet),
            Err(e) => warn!("{:#}", e),
        }
    }
    for folder in folders {
        loaded.extend(loader.load_folder(folder)?);
    }

    if loaded.is_empty() {
        anyhow::bail!("Please provide at least one readable --input <file> or --folder <dir>");
    }
    if output.is_some() && loaded.len() > 1 {
        anyhow::bail!("--output accepts a single input; got {}", loaded.len());
    }

    if loaded.len() > 1 {
        if let Err(e) = concurrency::init_thread_pool() {
            warn!(error = %e, "using default thread pool");
        }
    }

    let snippets: Vec<Snippet> = loaded.iter().map(|l| l.snippet.clone()).collect();
    let responses = CodeExecutionService::new().visualize_batch(&snippets);
    let exporter = format.exporter();

    for (loaded, response) in loaded.iter().zip(responses) {
        let Some(steps) = response.visualization_steps.as_deref() else {
            warn!(path = %loaded.path, error = ?response.error, "no trace produced");
            continue;
        };
        match output {
            Some(path) => exporter.export(steps, path)?,
            None => {
                if snippets.len() > 1 {
                    println!("== {} ({})", loaded.path, loaded.snippet.language);
                }
                println!("{}", exporter.render(steps)?);
            }
        }
    }
    Ok(())
}

fn print_outcome(response: &CodeExecutionResponse) -> Result<()> {
    match (&response.output, &response.error) {
        (Some(output), _) if response.success => {
            println!("{}", output);
            Ok(())
        }
        (_, Some(error)) => anyhow::bail!("{}", error),
        _ => anyhow::bail!("Execution produced no output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_flag_accepts_any_case() {
        let cli =
            Cli::try_parse_from(["whatcode", "sample", "--language", "TypeScript"]).unwrap();
        match cli.command {
            Command::Sample { language } => {
                assert_eq!(language, SupportedLanguage::TypeScript)
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli =
            Cli::try_parse_from(["whatcode", "execute", "-i", "a.txt", "-l", "java"]).unwrap();
        match cli.command {
            Command::Execute { language, .. } => {
                assert_eq!(language, Some(SupportedLanguage::Java))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_language_flag_rejects_unknown_language() {
        let err = Cli::try_parse_from(["whatcode", "sample", "--language", "rust"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Invalid language value: rust"));
    }

    #[test]
    fn test_language_flag_is_optional_for_visualize() {
        let cli = Cli::try_parse_from(["whatcode", "visualize", "-i", "a.py"]).unwrap();
        match cli.command {
            Command::Visualize { language, .. } => assert_eq!(language, None),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
