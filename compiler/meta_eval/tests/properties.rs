//! Property tests for the evaluator's algebraic guarantees.

use meta_eval::{run, EvalErrorKind};
use meta_ir::StringInterner;

fn run_program(source: &str) -> Result<i32, meta_eval::EvalError> {
    let interner = StringInterner::new();
    let tokens = meta_lexer::lex(source, &interner).unwrap();
    let unit = meta_parse::parse(&tokens, &interner).unwrap();
    let symbols = meta_resolve::resolve(&unit, &interner).unwrap();
    run(&symbols, &interner)
}

proptest::proptest! {
    /// `for x in lo..hi` runs exactly `max(0, hi - lo)` times.
    #[test]
    fn for_range_iteration_count(lo in -200i32..200, hi in -200i32..200) {
        let source = format!(
            "proc main(): i32 {{\n\
                 let count: i32 = 0;\n\
                 for i in {}..{} {{ count += 1; }}\n\
                 return count;\n\
             }}",
            lit(lo),
            lit(hi),
        );
        let expected = (hi - lo).max(0);
        proptest::prop_assert_eq!(run_program(&source), Ok(expected));
    }

    /// Copying a struct then mutating the copy never changes the original.
    #[test]
    fn struct_copies_are_independent(original in -1000i32..1000, mutated in -1000i32..1000) {
        let source = format!(
            "struct P {{ x: i32 }}\n\
             proc main(): i32 {{\n\
                 let a: P = P {{ x: {} }};\n\
                 let b: P = a;\n\
                 b.x = {};\n\
                 return a.x;\n\
             }}",
            lit(original),
            lit(mutated),
        );
        proptest::prop_assert_eq!(run_program(&source), Ok(original));
    }

    /// Addition matches i32 semantics: in-range sums succeed, out-of-range
    /// sums fail with an overflow error instead of wrapping.
    #[test]
    fn addition_is_checked(a in proptest::num::i32::ANY, b in proptest::num::i32::ANY) {
        let source = format!(
            "proc main(): i32 {{\n\
                 let a: i32 = {};\n\
                 let b: i32 = {};\n\
                 let sum: i32 = a + b;\n\
                 return 0;\n\
             }}",
            lit(a),
            lit(b),
        );
        match i32::checked_add(a, b) {
            Some(_) => proptest::prop_assert_eq!(run_program(&source), Ok(0)),
            None => {
                let err = run_program(&source).unwrap_err();
                let is_overflow = matches!(err.kind, EvalErrorKind::Overflow { op: "+" });
                proptest::prop_assert!(is_overflow, "expected overflow, got {}", err);
            }
        }
    }
}

/// Render an i32 as a grammar-legal expression (no unary minus in the
/// language, and `-2147483648` would not lex as a single literal anyway).
fn lit(n: i32) -> String {
    if n >= 0 {
        n.to_string()
    } else if n == i32::MIN {
        "(0 - 2147483647 - 1)".to_string()
    } else {
        format!("(0 - {})", -n)
    }
}
