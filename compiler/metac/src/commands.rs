//! CLI command implementations.
//!
//! Each command reads a file, drives the pipeline, and owns the process
//! exit code: `main`'s return value on success, 1 for compile errors,
//! 70 for runtime errors.

use std::io::IsTerminal;
use std::process::ExitCode;

use meta_diagnostic::{DiagnosticEmitter, SourceFile, TerminalEmitter};

use crate::pipeline::{self, PipelineError};

/// Exit status for programs that fail at runtime, after compiling
/// cleanly. Follows the BSD `EX_SOFTWARE` convention.
const RUNTIME_FAILURE: u8 = 70;

/// `meta run <file.mt>`: execute a program; exit with `main`'s status.
pub fn run_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    match pipeline::run_program(&source) {
        Ok(status) => exit_status(status),
        Err(error) => report(path, &source, &error),
    }
}

/// `meta check <file.mt>`: lex, parse, and resolve without running.
pub fn check_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    match pipeline::check_program(&source) {
        Ok(()) => {
            println!("{path}: ok");
            ExitCode::SUCCESS
        }
        Err(error) => report(path, &source, &error),
    }
}

/// `meta parse <file.mt>`: print a summary of top-level items.
pub fn parse_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    match pipeline::describe_items(&source) {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(error) => report(path, &source, &error),
    }
}

/// `meta lex <file.mt>`: print the token stream.
pub fn lex_file(path: &str) -> ExitCode {
    let Some(source) = read_source(path) else {
        return ExitCode::FAILURE;
    };
    match pipeline::describe_tokens(&source) {
        Ok(tokens) => {
            print!("{tokens}");
            ExitCode::SUCCESS
        }
        Err(error) => report(path, &source, &error),
    }
}

fn read_source(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(error) => {
            eprintln!("error: cannot read `{path}`: {error}");
            None
        }
    }
}

fn report(path: &str, source: &str, error: &PipelineError) -> ExitCode {
    let file = SourceFile::new(path, source);
    let colors = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::new(std::io::stderr(), colors);
    emitter.emit(&error.to_diagnostic(), &file);
    if error.is_runtime() {
        ExitCode::from(RUNTIME_FAILURE)
    } else {
        ExitCode::FAILURE
    }
}

// The process exit status is a byte; out-of-range values are truncated
// the way the shell would truncate them anyway.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn exit_status(status: i32) -> ExitCode {
    ExitCode::from(status as u8)
}
