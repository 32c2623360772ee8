//! The tree-walking interpreter.

mod scope_guard;

use meta_ir::{
    BinaryOp, Block, Expr, ExprKind, Place, ProcDecl, Span, StmtKind, StringInterner,
};
use meta_resolve::Symbols;
use tracing::{debug, trace};

use crate::{Environment, EvalError, StructValue, Value};

pub use scope_guard::ScopedInterpreter;

/// Maximum procedure call depth before execution is aborted.
pub const MAX_CALL_DEPTH: usize = 256;

/// Statement outcome: either fall through or unwind to the call boundary.
///
/// `return` is ordinary control flow, not an error.
enum Flow {
    Normal,
    Return(Value),
}

/// Execute a resolved program, starting at `main`.
///
/// Returns `main`'s `i32`, or `0` when `main` yields unit.
pub fn run(symbols: &Symbols<'_>, interner: &StringInterner) -> Result<i32, EvalError> {
    let mut interpreter = Interpreter::new(symbols, interner);
    let main = symbols.main();
    let value = interpreter.call(main, Vec::new(), main.name_span)?;
    let status = match value {
        Value::Int(n) => n,
        Value::Unit => 0,
        other => {
            // Unreachable for resolved programs: main's return type is
            // restricted to i32 or nothing.
            return Err(EvalError::type_mismatch(
                "i32 or ()",
                other.type_name(interner),
                main.name_span,
            ));
        }
    };
    debug!(status, "program finished");
    Ok(status)
}

/// Interpreter state: symbol tables, the variable environment, and the
/// call depth counter.
pub struct Interpreter<'a> {
    symbols: &'a Symbols<'a>,
    interner: &'a StringInterner,
    pub(crate) env: Environment,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(symbols: &'a Symbols<'a>, interner: &'a StringInterner) -> Self {
        Interpreter {
            symbols,
            interner,
            env: Environment::new(),
            depth: 0,
        }
    }

    /// Call a procedure with already-evaluated arguments.
    ///
    /// Each call runs in a fresh frame; the callee cannot see the caller's
    /// locals. Arguments are bound by value.
    fn call(
        &mut self,
        decl: &ProcDecl,
        args: Vec<Value>,
        span: Span,
    ) -> Result<Value, EvalError> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(EvalError::stack_overflow(MAX_CALL_DEPTH, span));
        }
        if args.len() != decl.params.len() {
            return Err(EvalError::arity_mismatch(
                self.interner.lookup(decl.name),
                decl.params.len(),
                args.len(),
                span,
            ));
        }
        trace!(
            name = self.interner.lookup(decl.name),
            depth = self.depth,
            "calling procedure"
        );

        self.depth += 1;
        self.env.push_frame();
        for (param, value) in decl.params.iter().zip(args) {
            self.env.define(param.name, value);
        }
        // Grow the native stack if needed so the depth counter, not the
        // OS stack, is what stops runaway recursion.
        let flow = crate::stack::ensure_sufficient_stack(|| self.exec_stmts(&decl.body));
        self.env.pop_frame();
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Unit),
        }
    }

    /// Execute a block in its own scope.
    fn exec_block(&mut self, block: &Block) -> Result<Flow, EvalError> {
        let mut scoped = self.scoped();
        scoped.exec_stmts(block)
    }

    /// Execute a block's statements in the current scope. Procedure bodies
    /// use this directly so parameters share the body's scope.
    fn exec_stmts(&mut self, block: &Block) -> Result<Flow, EvalError> {
        for stmt in &block.stmts {
            match &stmt.kind {
                StmtKind::Let { name, value, .. } => {
                    let value = self.eval(value)?;
                    self.env.define(*name, value);
                }
                StmtKind::Assign { target, value } => {
                    let value = self.eval(value)?;
                    self.assign_place(target, value)?;
                }
                StmtKind::Expr(expr) => {
                    self.eval(expr)?;
                }
                StmtKind::If {
                    cond,
                    then_block,
                    else_block,
                } => {
                    let flow = if self.eval_condition(cond)? {
                        self.exec_block(then_block)?
                    } else if let Some(else_block) = else_block {
                        self.exec_block(else_block)?
                    } else {
                        Flow::Normal
                    };
                    if let Flow::Return(value) = flow {
                        return Ok(Flow::Return(value));
                    }
                }
                StmtKind::While { cond, body } => {
                    while self.eval_condition(cond)? {
                        if let Flow::Return(value) = self.exec_block(body)? {
                            return Ok(Flow::Return(value));
                        }
                    }
                }
                StmtKind::ForRange {
                    var,
                    start,
                    end,
                    body,
                    ..
                } => {
                    let lo = self.eval_int(start)?;
                    let hi = self.eval_int(end)?;
                    // Half-open, ascending only: empty when lo >= hi.
                    for i in lo..hi {
                        let mut scoped = self.scoped();
                        scoped.env.define(*var, Value::Int(i));
                        if let Flow::Return(value) = scoped.exec_stmts(body)? {
                            return Ok(Flow::Return(value));
                        }
                    }
                }
                StmtKind::Return { value } => {
                    let value = match value {
                        Some(expr) => self.eval(expr)?,
                        None => Value::Unit,
                    };
                    return Ok(Flow::Return(value));
                }
            }
        }
        Ok(Flow::Normal)
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Str(name) => Ok(Value::string(self.interner.lookup(*name))),
            // Reading a variable copies it. This is the language's value
            // semantics: no binding ever aliases another.
            ExprKind::Var(name) => self
                .env
                .lookup(*name)
                .cloned()
                .ok_or_else(|| {
                    EvalError::undefined_variable(self.interner.lookup(*name), expr.span)
                }),
            ExprKind::Field {
                base,
                field,
                field_span,
            } => {
                let base = self.eval(base)?;
                match base {
                    Value::Struct(s) => s.field(*field).cloned().ok_or_else(|| {
                        EvalError::unknown_field(
                            self.interner.lookup(s.type_name),
                            self.interner.lookup(*field),
                            *field_span,
                        )
                    }),
                    other => Err(EvalError::type_mismatch(
                        "a struct",
                        other.type_name(self.interner),
                        *field_span,
                    )),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                self.apply_binary(*op, lhs, rhs, expr.span)
            }
            ExprKind::Call {
                callee,
                callee_span,
                args,
            } => {
                let Some(decl) = self.symbols.proc(*callee) else {
                    return Err(EvalError::unknown_function(
                        self.interner.lookup(*callee),
                        *callee_span,
                    ));
                };
                let args = self.eval_args(args)?;
                self.call(decl, args, expr.span)
            }
            ExprKind::AssociatedCall {
                type_name,
                func,
                args,
                ..
            } => {
                let Some(decl) = self.symbols.associated(*type_name, *func) else {
                    return Err(EvalError::unknown_function(
                        format!(
                            "{}::{}",
                            self.interner.lookup(*type_name),
                            self.interner.lookup(*func)
                        ),
                        expr.span,
                    ));
                };
                let args = self.eval_args(args)?;
                self.call(decl, args, expr.span)
            }
            ExprKind::StructLiteral {
                type_name, fields, ..
            } => {
                let Some(decl) = self.symbols.struct_decl(*type_name) else {
                    return Err(EvalError::unknown_function(
                        self.interner.lookup(*type_name),
                        expr.span,
                    ));
                };
                // Initializers run in source order; the instance stores
                // fields in declaration order.
                let mut values = Vec::with_capacity(fields.len());
                for init in fields {
                    values.push((init.name, self.eval(&init.value)?));
                }
                let mut ordered = Vec::with_capacity(decl.fields.len());
                for field in &decl.fields {
                    let Some(pos) = values.iter().position(|(n, _)| *n == field.name) else {
                        return Err(EvalError::unknown_field(
                            self.interner.lookup(*type_name),
                            self.interner.lookup(field.name),
                            expr.span,
                        ));
                    };
                    ordered.push(values.swap_remove(pos));
                }
                Ok(Value::Struct(StructValue::new(*type_name, ordered)))
            }
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Conditions must be comparison results. Any other value is a type
    /// error, including nonzero integers.
    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, EvalError> {
        match self.eval(cond)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::type_mismatch(
                "a comparison result",
                other.type_name(self.interner),
                cond.span,
            )),
        }
    }

    fn eval_int(&mut self, expr: &Expr) -> Result<i32, EvalError> {
        match self.eval(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(EvalError::type_mismatch(
                "i32",
                other.type_name(self.interner),
                expr.span,
            )),
        }
    }

    fn apply_binary(
        &self,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        span: Span,
    ) -> Result<Value, EvalError> {
        use BinaryOp::*;
        match (op, &lhs, &rhs) {
            (Add, Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or_else(|| EvalError::overflow("+", span)),
            (Sub, Value::Int(a), Value::Int(b)) => a
                .checked_sub(*b)
                .map(Value::Int)
                .ok_or_else(|| EvalError::overflow("-", span)),
            (Mul, Value::Int(a), Value::Int(b)) => a
                .checked_mul(*b)
                .map(Value::Int)
                .ok_or_else(|| EvalError::overflow("*", span)),
            (Div, Value::Int(_), Value::Int(0)) => Err(EvalError::division_by_zero(span)),
            (Div, Value::Int(a), Value::Int(b)) => a
                .checked_div(*b)
                .map(Value::Int)
                .ok_or_else(|| EvalError::overflow("/", span)),

            (Eq, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
            (Ne, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a != b)),
            (Eq, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a == b)),
            (Ne, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a != b)),

            (Lt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
            (Le, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
            (Gt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
            (Ge, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),

            _ => {
                let expected = match op {
                    Eq | Ne => "two i32 or two String operands",
                    _ => "i32 operands",
                };
                let found = match &lhs {
                    Value::Int(_) => rhs.type_name(self.interner),
                    other => other.type_name(self.interner),
                };
                Err(EvalError::type_mismatch(expected, found, span))
            }
        }
    }

    /// Store `value` into a variable or a field chain rooted in one.
    fn assign_place(&mut self, place: &Place, value: Value) -> Result<(), EvalError> {
        let root = self.interner.lookup(place.root);
        let mut slot = self
            .env
            .lookup_mut(place.root)
            .ok_or_else(|| EvalError::undefined_variable(root, place.root_span))?;
        for (field, field_span) in &place.fields {
            match slot {
                Value::Struct(s) => {
                    let type_name = self.interner.lookup(s.type_name);
                    slot = s.field_mut(*field).ok_or_else(|| {
                        EvalError::unknown_field(
                            type_name,
                            self.interner.lookup(*field),
                            *field_span,
                        )
                    })?;
                }
                other => {
                    return Err(EvalError::type_mismatch(
                        "a struct",
                        other.type_name(self.interner),
                        *field_span,
                    ));
                }
            }
        }
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalErrorKind;
    use meta_lexer::lex;
    use meta_parse::parse;
    use meta_resolve::resolve;
    use pretty_assertions::assert_eq;

    fn run_source(source: &str) -> Result<i32, EvalError> {
        let interner = StringInterner::new();
        let tokens = lex(source, &interner).unwrap();
        let unit = parse(&tokens, &interner).unwrap();
        let symbols = resolve(&unit, &interner).unwrap();
        run(&symbols, &interner)
    }

    #[test]
    fn test_main_without_return_exits_zero() {
        assert_eq!(run_source("proc main() { let x: i32 = 1; }"), Ok(0));
    }

    #[test]
    fn test_main_returns_status() {
        assert_eq!(run_source("proc main(): i32 { return 42; }"), Ok(42));
    }

    #[test]
    fn test_struct_field_roundtrip() {
        let result = run_source(
            "struct Person { name: String, age: i32 }\n\
             proc main(): i32 {\n\
                 let p: Person = Person { name: \"Jack\", age: 22 };\n\
                 p.age = p.age + 1;\n\
                 return p.age;\n\
             }",
        );
        assert_eq!(result, Ok(23));
    }

    #[test]
    fn test_binding_copies_struct() {
        // b starts as a copy of a; mutating b leaves a untouched
        let result = run_source(
            "struct P { x: i32 }\n\
             proc main(): i32 {\n\
                 let a: P = P { x: 1 };\n\
                 let b: P = a;\n\
                 b.x = 100;\n\
                 return a.x;\n\
             }",
        );
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn test_argument_passing_copies() {
        let result = run_source(
            "struct P { x: i32 }\n\
             proc bump(p: P) { p.x = 100; }\n\
             proc main(): i32 {\n\
                 let a: P = P { x: 7 };\n\
                 bump(a);\n\
                 return a.x;\n\
             }",
        );
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_associated_call_and_field_access() {
        let result = run_source(
            "struct Car { year: i32 }\n\
             impl Car {\n\
                 proc new(year: i32): Car { return Car { year: year }; }\n\
             }\n\
             proc main(): i32 { return Car::new(2023).year; }",
        );
        assert_eq!(result, Ok(2023));
    }

    #[test]
    fn test_while_loop() {
        let result = run_source(
            "proc main(): i32 {\n\
                 let year: i32 = 2010;\n\
                 while year < 2023 { year += 1; }\n\
                 return year;\n\
             }",
        );
        assert_eq!(result, Ok(2023));
    }

    #[test]
    fn test_while_skips_body_when_initially_false() {
        let result = run_source(
            "proc main(): i32 {\n\
                 let n: i32 = 3;\n\
                 while n < 3 { n += 1; }\n\
                 return n;\n\
             }",
        );
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn test_for_range_sums() {
        let result = run_source(
            "proc main(): i32 {\n\
                 let total: i32 = 0;\n\
                 for i in 1..5 { total += i; }\n\
                 return total;\n\
             }",
        );
        assert_eq!(result, Ok(10));
    }

    #[test]
    fn test_for_range_empty_when_start_not_below_end() {
        let result = run_source(
            "proc main(): i32 {\n\
                 let total: i32 = 0;\n\
                 for i in 5..5 { total += 1; }\n\
                 for i in 9..2 { total += 1; }\n\
                 return total;\n\
             }",
        );
        assert_eq!(result, Ok(0));
    }

    #[test]
    fn test_loop_variable_fresh_per_iteration() {
        // assigning to the loop variable does not affect the next iteration
        let result = run_source(
            "proc main(): i32 {\n\
                 let total: i32 = 0;\n\
                 for i in 0..3 { i = 100; total += 1; }\n\
                 return total;\n\
             }",
        );
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn test_condition_must_be_comparison() {
        let err = run_source("proc main() { if 1 { } }").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_string_equality() {
        let result = run_source(
            "proc main(): i32 {\n\
                 let a: String = \"Honda\";\n\
                 if a == \"Honda\" { return 1; }\n\
                 return 0;\n\
             }",
        );
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let err = run_source(
            "proc main(): i32 { return 2147483647 + 1; }",
        )
        .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::Overflow { op: "+" }));
    }

    #[test]
    fn test_division_by_zero() {
        let err = run_source("proc main(): i32 { return 1 / 0; }").unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = run_source(
            "proc f(a: i32): i32 { return a; }\n\
             proc main(): i32 { return f(1, 2); }",
        )
        .unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_runaway_recursion_hits_depth_limit() {
        let err = run_source(
            "proc spin(): i32 { return spin(); }\n\
             proc main(): i32 { return spin(); }",
        )
        .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::StackOverflow { .. }));
    }

    #[test]
    fn test_bounded_recursion_is_fine() {
        let result = run_source(
            "proc sum(n: i32): i32 {\n\
                 if n == 0 { return 0; }\n\
                 return n + sum(n - 1);\n\
             }\n\
             proc main(): i32 { return sum(10); }",
        );
        assert_eq!(result, Ok(55));
    }

    #[test]
    fn test_recursion_just_under_the_cap_succeeds() {
        // One Meta call costs several native frames; recursing almost to
        // the cap proves the stack grows instead of the process dying.
        let result = run_source(
            "proc count(n: i32): i32 {\n\
                 if n == 0 { return 0; }\n\
                 return 1 + count(n - 1);\n\
             }\n\
             proc main(): i32 {\n\
                 if count(250) == 250 { return 1; }\n\
                 return 0;\n\
             }",
        );
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn test_callee_cannot_see_caller_locals() {
        let err = run_source(
            "proc peek(): i32 { return hidden; }\n\
             proc main(): i32 {\n\
                 let hidden: i32 = 5;\n\
                 return peek();\n\
             }",
        )
        .unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UndefinedVariable { name: "hidden" }
        ));
    }

    #[test]
    fn test_block_scope_unwinds() {
        let err = run_source(
            "proc main(): i32 {\n\
                 if 1 == 1 { let inner: i32 = 3; }\n\
                 return inner;\n\
             }",
        )
        .unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UndefinedVariable { name: "inner" }
        ));
    }

    #[test]
    fn test_nested_field_assignment() {
        let result = run_source(
            "struct Engine { hp: i32 }\n\
             struct Car { engine: Engine }\n\
             proc main(): i32 {\n\
                 let c: Car = Car { engine: Engine { hp: 100 } };\n\
                 c.engine.hp = 250;\n\
                 return c.engine.hp;\n\
             }",
        );
        assert_eq!(result, Ok(250));
    }

    #[test]
    fn test_struct_literal_evaluates_in_source_order() {
        // initializer side effects run left to right even when the
        // declaration orders fields differently
        let result = run_source(
            "struct P { a: i32, b: i32 }\n\
             proc two(): i32 { return 2; }\n\
             proc main(): i32 {\n\
                 let p: P = P { b: two(), a: 1 };\n\
                 return p.a * 10 + p.b;\n\
             }",
        );
        assert_eq!(result, Ok(12));
    }

    #[test]
    fn test_min_div_minus_one_overflows() {
        let err = run_source(
            "proc main(): i32 { return (0 - 2147483647 - 1) / (0 - 1); }",
        )
        .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::Overflow { op: "/" }));
    }
}
