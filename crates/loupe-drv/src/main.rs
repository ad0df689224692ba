//! loupe CLI - tokenize a file or extract its symbols.
//!
//! ```text
//! loupe <source-file> <token|symbols> [--language | -l <name-or-extension>]
//! ```
//!
//! Successful runs print one JSON object on stdout and exit 0; failures
//! print `{ok:false, error:{code, message}}` on stderr and exit 1 with a
//! stable error code. With no arguments or `--help`, usage is printed and
//! the exit code is 0.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use loupe_drv::{Engine, EngineError};

/// Analyze a source file through a declarative language profile.
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(about = "Tokenize source files and extract structural symbols", long_about = None)]
struct Cli {
    /// Source file to analyze.
    source_file: Option<PathBuf>,

    /// What to extract: `token` or `symbols`.
    extract: Option<String>,

    /// Language name or extension; defaults to the file's extension.
    #[arg(short = 'l', long)]
    language: Option<String>,
}

/// A CLI failure with its stable error code.
struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The success envelope printed on stdout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    ok: bool,
    extract: &'a str,
    source_file: String,
    language: &'a str,
    count: usize,
    result: serde_json::Value,
}

fn main() -> ExitCode {
    init_logging();

    // Bare invocation prints usage and succeeds.
    if std::env::args().len() <= 1 {
        let mut command = Cli::command();
        let _ = command.print_help();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            return fail(CliError::new("INVALID_ARGS", err.to_string()));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(err),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let source_file = cli
        .source_file
        .ok_or_else(|| CliError::new("INVALID_ARGS", "missing <source-file> argument"))?;
    let extract = cli
        .extract
        .ok_or_else(|| CliError::new("INVALID_ARGS", "missing <token|symbols> argument"))?;

    if extract != "token" && extract != "symbols" {
        return Err(CliError::new(
            "INVALID_EXTRACT",
            format!("extract mode must be 'token' or 'symbols', got '{extract}'"),
        ));
    }

    let language = match cli.language {
        Some(language) => language,
        None => language_for_path(&source_file).ok_or_else(|| {
            CliError::new(
                "LANGUAGE_REQUIRED",
                format!(
                    "'{}' has no extension; pass --language <name-or-extension>",
                    source_file.display()
                ),
            )
        })?,
    };

    let source = std::fs::read_to_string(&source_file).map_err(|err| {
        CliError::new(
            "EXECUTION_ERROR",
            format!("cannot read '{}': {err}", source_file.display()),
        )
    })?;

    let engine = Engine::new();
    let (count, result) = match extract.as_str() {
        "token" => {
            let tokens = engine
                .tokenize(&source, &language)
                .map_err(engine_error)?;
            (tokens.len(), to_json(&tokens)?)
        }
        _ => {
            let symbols = engine
                .extract_symbols(&source, &language)
                .map_err(engine_error)?;
            (symbols.len(), to_json(&symbols)?)
        }
    };

    let report = Report {
        ok: true,
        extract: &extract,
        source_file: source_file.display().to_string(),
        language: &language,
        count,
        result,
    };
    let rendered = to_json(&report)?;
    println!("{rendered}");
    Ok(())
}

/// The language identifier implied by a file path: its extension,
/// lowercased, dot included.
fn language_for_path(path: &Path) -> Option<String> {
    let extension = path.extension()?;
    Some(format!(".{}", extension.to_string_lossy().to_lowercase()))
}

fn engine_error(err: EngineError) -> CliError {
    let code = match err {
        EngineError::UnknownLanguage { .. } => "UNKNOWN_LANGUAGE",
        EngineError::Lex(_) => "EXECUTION_ERROR",
    };
    CliError::new(code, err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, CliError> {
    serde_json::to_value(value)
        .map_err(|err| CliError::new("EXECUTION_ERROR", format!("serialization failed: {err}")))
}

fn fail(err: CliError) -> ExitCode {
    let body = json!({
        "ok": false,
        "error": { "code": err.code, "message": err.message },
    });
    eprintln!("{body}");
    ExitCode::FAILURE
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LOUPE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
