//! The lex → parse → resolve → evaluate pipeline.
//!
//! Commands and the integration tests both drive the pipeline through
//! these functions; only the command layer touches the process (exit
//! codes, stderr).

use meta_diagnostic::Diagnostic;
use meta_eval::EvalError;
use meta_ir::StringInterner;
use meta_lexer::LexError;
use meta_parse::ParseError;
use meta_resolve::ResolveError;

/// A failure from any pipeline stage.
#[derive(Debug)]
pub enum PipelineError {
    Lex(LexError),
    Parse(ParseError),
    Resolve(ResolveError),
    Eval(EvalError),
}

impl PipelineError {
    /// Runtime failures exit with a different status than compile
    /// failures.
    pub fn is_runtime(&self) -> bool {
        matches!(self, PipelineError::Eval(_))
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PipelineError::Lex(e) => e.to_diagnostic(),
            PipelineError::Parse(e) => e.to_diagnostic(),
            PipelineError::Resolve(e) => e.to_diagnostic(),
            PipelineError::Eval(e) => e.to_diagnostic(),
        }
    }
}

impl From<LexError> for PipelineError {
    fn from(e: LexError) -> Self {
        PipelineError::Lex(e)
    }
}

impl From<ParseError> for PipelineError {
    fn from(e: ParseError) -> Self {
        PipelineError::Parse(e)
    }
}

impl From<ResolveError> for PipelineError {
    fn from(e: ResolveError) -> Self {
        PipelineError::Resolve(e)
    }
}

impl From<EvalError> for PipelineError {
    fn from(e: EvalError) -> Self {
        PipelineError::Eval(e)
    }
}

/// Run a program from source. Returns `main`'s exit status.
pub fn run_program(source: &str) -> Result<i32, PipelineError> {
    let interner = StringInterner::new();
    let tokens = meta_lexer::lex(source, &interner)?;
    let unit = meta_parse::parse(&tokens, &interner)?;
    let symbols = meta_resolve::resolve(&unit, &interner)?;
    Ok(meta_eval::run(&symbols, &interner)?)
}

/// Validate a program without running it.
pub fn check_program(source: &str) -> Result<(), PipelineError> {
    let interner = StringInterner::new();
    let tokens = meta_lexer::lex(source, &interner)?;
    let unit = meta_parse::parse(&tokens, &interner)?;
    meta_resolve::resolve(&unit, &interner)?;
    Ok(())
}

/// Parse a program and summarize its top-level items, one per line.
pub fn describe_items(source: &str) -> Result<String, PipelineError> {
    use std::fmt::Write;

    let interner = StringInterner::new();
    let tokens = meta_lexer::lex(source, &interner)?;
    let unit = meta_parse::parse(&tokens, &interner)?;

    let mut out = String::new();
    for decl in &unit.structs {
        let _ = writeln!(
            out,
            "struct {} ({} fields)",
            interner.lookup(decl.name),
            decl.fields.len()
        );
    }
    for block in &unit.impls {
        let _ = writeln!(
            out,
            "impl {} ({} procs)",
            interner.lookup(block.type_name),
            block.procs.len()
        );
    }
    for proc in &unit.procs {
        let _ = writeln!(
            out,
            "proc {} ({} params)",
            interner.lookup(proc.name),
            proc.params.len()
        );
    }
    Ok(out)
}

/// Lex a program and render its tokens, one per line.
pub fn describe_tokens(source: &str) -> Result<String, PipelineError> {
    use std::fmt::Write;

    let interner = StringInterner::new();
    let tokens = meta_lexer::lex(source, &interner)?;

    let mut out = String::new();
    for token in &tokens {
        let _ = writeln!(out, "{:?} @ {}", token.kind, token.span);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_program_exit_status() {
        assert_eq!(run_program("proc main(): i32 { return 7; }").unwrap(), 7);
        assert_eq!(run_program("proc main() { }").unwrap(), 0);
    }

    #[test]
    fn test_check_rejects_resolution_errors() {
        let err = check_program("proc main() { ghost(); }").unwrap_err();
        assert!(matches!(err, PipelineError::Resolve(_)));
        assert!(!err.is_runtime());
    }

    #[test]
    fn test_runtime_error_is_flagged() {
        let err = run_program("proc main(): i32 { return 1 / 0; }").unwrap_err();
        assert!(err.is_runtime());
    }

    #[test]
    fn test_describe_items() {
        let out = describe_items(
            "struct Car { year: i32 }\n\
             impl Car { proc new(year: i32): Car { return Car { year: year }; } }\n\
             proc main() {}",
        )
        .unwrap();
        assert_eq!(out, "struct Car (1 fields)\nimpl Car (1 procs)\nproc main (0 params)\n");
    }
}
