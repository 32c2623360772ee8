//! Abstract syntax tree for a Meta translation unit.
//!
//! The tree is built once by the parser and is immutable afterwards; the
//! resolver and evaluator only read it.

use std::fmt;

use super::{Name, Span};

/// A surface type annotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// `i32`
    I32,
    /// `String`
    Str,
    /// A named struct type.
    Named(Name),
}

/// A type annotation with its source span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub ty: Type,
    pub span: Span,
}

/// A parsed source file: struct declarations, impl blocks, and free
/// procedures, in source order.
#[derive(Clone, Debug, Default)]
pub struct TranslationUnit {
    pub structs: Vec<StructDecl>,
    pub impls: Vec<ImplBlock>,
    pub procs: Vec<ProcDecl>,
}

/// `struct Name { field: Type, ... }`
#[derive(Clone, Debug)]
pub struct StructDecl {
    pub name: Name,
    pub name_span: Span,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

/// A single field declaration.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: Name,
    pub name_span: Span,
    pub ty: TypeRef,
}

/// `impl Name { proc ... }`
#[derive(Clone, Debug)]
pub struct ImplBlock {
    pub type_name: Name,
    pub type_span: Span,
    pub procs: Vec<ProcDecl>,
    pub span: Span,
}

/// `proc name(params): RetType? { body }`
#[derive(Clone, Debug)]
pub struct ProcDecl {
    pub name: Name,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub return_type: Option<TypeRef>,
    pub body: Block,
    pub span: Span,
}

/// A procedure parameter.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: Name,
    pub name_span: Span,
    pub ty: TypeRef,
}

/// A braced statement list.
#[derive(Clone, Debug)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A statement with its source span.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    /// `let name: Type? = expr;`
    Let {
        name: Name,
        name_span: Span,
        ty: Option<TypeRef>,
        value: Expr,
    },
    /// `place = expr;` (compound assignment is desugared by the parser)
    Assign { target: Place, value: Expr },
    /// `expr;`
    Expr(Expr),
    /// `if cond { ... } else { ... }?`
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `while cond { ... }`
    While { cond: Expr, body: Block },
    /// `for var in start..end { ... }` over a half-open integer range.
    ForRange {
        var: Name,
        var_span: Span,
        start: Expr,
        end: Expr,
        body: Block,
    },
    /// `return expr?;`
    Return { value: Option<Expr> },
}

/// An assignment target: a variable, optionally followed by a chain of
/// field projections (`car.engine.year = ...`).
#[derive(Clone, Debug)]
pub struct Place {
    pub root: Name,
    pub root_span: Span,
    /// Field projections applied to the root, outermost first.
    pub fields: Vec<(Name, Span)>,
    pub span: Span,
}

/// An expression with its source span.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    /// Integer literal.
    Int(i32),
    /// String literal (interned).
    Str(Name),
    /// Variable reference.
    Var(Name),
    /// `base.field`
    Field {
        base: Box<Expr>,
        field: Name,
        field_span: Span,
    },
    /// `lhs op rhs`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Free procedure call: `f(args)`
    Call {
        callee: Name,
        callee_span: Span,
        args: Vec<Expr>,
    },
    /// Associated procedure call: `Type::f(args)`
    AssociatedCall {
        type_name: Name,
        type_span: Span,
        func: Name,
        func_span: Span,
        args: Vec<Expr>,
    },
    /// Struct literal: `Type { field: expr, ... }`
    StructLiteral {
        type_name: Name,
        type_span: Span,
        fields: Vec<FieldInit>,
    },
}

/// A single `field: expr` initializer in a struct literal.
#[derive(Clone, Debug)]
pub struct FieldInit {
    pub name: Name,
    pub name_span: Span,
    pub value: Expr,
}

/// Binary operators, grouped by precedence tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Multiplicative
    Mul,
    Div,
    // Additive
    Add,
    Sub,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Whether this operator produces a boolean.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    /// The operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Place {
    /// A place with no field projections (a bare variable).
    pub fn var(root: Name, span: Span) -> Self {
        Place {
            root,
            root_span: span,
            fields: Vec::new(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_tiers() {
        assert!(BinaryOp::Eq.is_comparison());
        assert!(BinaryOp::Le.is_comparison());
        assert!(!BinaryOp::Add.is_comparison());
        assert!(!BinaryOp::Div.is_comparison());
    }

    #[test]
    fn test_binary_op_display() {
        assert_eq!(BinaryOp::Ne.to_string(), "!=");
        assert_eq!(BinaryOp::Mul.to_string(), "*");
    }
}
