//! Recursive-descent parser for Meta.
//!
//! Consumes the lexer's [`TokenList`] and produces one
//! [`TranslationUnit`], or fails with the first structural
//! [`ParseError`] (no recovery).
//!
//! # Organization
//!
//! Grammar productions extend [`Parser`] from the `grammar` modules:
//!
//! - `grammar::item`: top-level items (`struct`, `impl`, `proc`)
//! - `grammar::stmt`: statements and blocks
//! - `grammar::expr`: expressions with precedence climbing

mod cursor;
mod error;
mod grammar;

use meta_ir::{StringInterner, TokenList, TranslationUnit};
use tracing::debug;

pub use cursor::Cursor;
pub use error::ParseError;

/// Parser state.
///
/// Holds the token cursor plus the one piece of context-sensitive state:
/// whether a struct literal may start at the current position. Condition
/// headers (`if`/`while`/`for`) disable it so `if x == y {` parses the
/// `{` as the block opener.
pub struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) struct_literals_allowed: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token stream.
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            struct_literals_allowed: true,
        }
    }
}

/// Parse a token stream into a translation unit.
pub fn parse(
    tokens: &TokenList,
    interner: &StringInterner,
) -> Result<TranslationUnit, ParseError> {
    let mut parser = Parser::new(tokens, interner);
    let unit = parser.parse_translation_unit()?;
    debug!(
        structs = unit.structs.len(),
        impls = unit.impls.len(),
        procs = unit.procs.len(),
        "parsed translation unit"
    );
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meta_ir::{ExprKind, StmtKind, Type};
    use meta_lexer::lex;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> (TranslationUnit, StringInterner) {
        let interner = StringInterner::new();
        let tokens = match lex(source, &interner) {
            Ok(t) => t,
            Err(e) => panic!("lex failed: {e}"),
        };
        let unit = match parse(&tokens, &interner) {
            Ok(u) => u,
            Err(e) => panic!("parse failed: {e}"),
        };
        (unit, interner)
    }

    fn parse_err(source: &str) -> ParseError {
        let interner = StringInterner::new();
        let tokens = match lex(source, &interner) {
            Ok(t) => t,
            Err(e) => panic!("lex failed: {e}"),
        };
        match parse(&tokens, &interner) {
            Err(e) => e,
            Ok(_) => panic!("expected parse error"),
        }
    }

    #[test]
    fn test_parse_struct_decl() {
        let (unit, interner) = parse_source(
            "struct Person {\n    name: String,\n    age: i32,\n}\nproc main() {}",
        );
        assert_eq!(unit.structs.len(), 1);
        let person = &unit.structs[0];
        assert_eq!(interner.lookup(person.name), "Person");
        assert_eq!(person.fields.len(), 2);
        assert_eq!(interner.lookup(person.fields[0].name), "name");
        assert_eq!(person.fields[0].ty.ty, Type::Str);
        assert_eq!(person.fields[1].ty.ty, Type::I32);
    }

    #[test]
    fn test_parse_impl_block() {
        let (unit, interner) = parse_source(
            "struct Car { year: i32 }\n\
             impl Car {\n\
                 proc new(year: i32): Car {\n\
                     return Car { year: year };\n\
                 }\n\
             }\n\
             proc main() {}",
        );
        assert_eq!(unit.impls.len(), 1);
        let block = &unit.impls[0];
        assert_eq!(interner.lookup(block.type_name), "Car");
        assert_eq!(block.procs.len(), 1);
        assert_eq!(interner.lookup(block.procs[0].name), "new");
        assert_eq!(
            block.procs[0].return_type.map(|t| t.ty),
            Some(Type::Named(block.type_name))
        );
    }

    #[test]
    fn test_parse_proc_params_and_return() {
        let (unit, interner) = parse_source("proc add(a: i32, b: i32): i32 { return a + b; }");
        let proc = &unit.procs[0];
        assert_eq!(interner.lookup(proc.name), "add");
        assert_eq!(proc.params.len(), 2);
        assert_eq!(proc.return_type.map(|t| t.ty), Some(Type::I32));
        assert!(matches!(proc.body.stmts[0].kind, StmtKind::Return { .. }));
    }

    #[test]
    fn test_parse_let_with_annotation() {
        let (unit, _) = parse_source("proc main() { let x: i32 = 1 + 2 * 3; }");
        let StmtKind::Let { ty, ref value, .. } = unit.procs[0].body.stmts[0].kind else {
            panic!("expected let");
        };
        assert_eq!(ty.map(|t| t.ty), Some(Type::I32));
        // 1 + (2 * 3): multiplication binds tighter
        let ExprKind::Binary { op, ref rhs, .. } = value.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, meta_ir::BinaryOp::Add);
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary {
                op: meta_ir::BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_if_condition_is_not_struct_literal() {
        let (unit, _) = parse_source(
            "proc main() { let year: i32 = 2010; if year == 2010 { year = 2011; } }",
        );
        let StmtKind::If { ref cond, .. } = unit.procs[0].body.stmts[1].kind else {
            panic!("expected if");
        };
        assert!(matches!(cond.kind, ExprKind::Binary { .. }));
    }

    #[test]
    fn test_parse_for_range() {
        let (unit, interner) = parse_source("proc main() { for year in 2010..2024 { } }");
        let StmtKind::ForRange {
            var,
            ref start,
            ref end,
            ..
        } = unit.procs[0].body.stmts[0].kind
        else {
            panic!("expected for");
        };
        assert_eq!(interner.lookup(var), "year");
        assert!(matches!(start.kind, ExprKind::Int(2010)));
        assert!(matches!(end.kind, ExprKind::Int(2024)));
    }

    #[test]
    fn test_parse_field_assignment_chain() {
        let (unit, interner) = parse_source("proc main() { person.name = \"Jack\"; }");
        let StmtKind::Assign { ref target, .. } = unit.procs[0].body.stmts[0].kind else {
            panic!("expected assignment");
        };
        assert_eq!(interner.lookup(target.root), "person");
        assert_eq!(target.fields.len(), 1);
        assert_eq!(interner.lookup(target.fields[0].0), "name");
    }

    #[test]
    fn test_parse_compound_assign_desugars() {
        let (unit, _) = parse_source("proc main() { let year: i32 = 0; year += 1; }");
        let StmtKind::Assign { ref value, .. } = unit.procs[0].body.stmts[1].kind else {
            panic!("expected assignment");
        };
        let ExprKind::Binary { op, ref lhs, .. } = value.kind else {
            panic!("expected desugared binary");
        };
        assert_eq!(op, meta_ir::BinaryOp::Add);
        assert!(matches!(lhs.kind, ExprKind::Var(_)));
    }

    #[test]
    fn test_parse_associated_call() {
        let (unit, interner) =
            parse_source("proc main() { Car::new(\"Honda\", \"Accord\", 2023); }");
        let StmtKind::Expr(ref expr) = unit.procs[0].body.stmts[0].kind else {
            panic!("expected expr stmt");
        };
        let ExprKind::AssociatedCall {
            type_name,
            func,
            ref args,
            ..
        } = expr.kind
        else {
            panic!("expected associated call");
        };
        assert_eq!(interner.lookup(type_name), "Car");
        assert_eq!(interner.lookup(func), "new");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_parse_struct_literal_trailing_comma() {
        let (unit, _) =
            parse_source("proc main() { let p: Person = Person { name: \"Jack\", age: 22, }; }");
        let StmtKind::Let { ref value, .. } = unit.procs[0].body.stmts[0].kind else {
            panic!("expected let");
        };
        let ExprKind::StructLiteral { ref fields, .. } = value.kind else {
            panic!("expected struct literal");
        };
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_parse_field_access_on_call_result() {
        let (unit, _) = parse_source("proc main() { let y: i32 = Car::new(2023).year; }");
        let StmtKind::Let { ref value, .. } = unit.procs[0].body.stmts[0].kind else {
            panic!("expected let");
        };
        assert!(matches!(value.kind, ExprKind::Field { .. }));
    }

    #[test]
    fn test_error_missing_semicolon() {
        let err = parse_err("proc main() { let x: i32 = 1 }");
        assert_eq!(err.expected, "`;`");
    }

    #[test]
    fn test_error_assign_to_non_place() {
        let err = parse_err("proc main() { 1 + 2 = 3; }");
        assert_eq!(err.expected, "a variable or field to assign to");
    }

    #[test]
    fn test_error_item_at_top_level() {
        let err = parse_err("let x: i32 = 1;");
        assert_eq!(err.expected, "`struct`, `impl`, or `proc`");
    }
}
