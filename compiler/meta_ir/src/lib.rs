//! Shared IR types for the Meta interpreter.
//!
//! Everything the pipeline stages exchange lives here: source spans,
//! interned names, tokens, the AST, and surface types. This crate has no
//! dependency on any other workspace crate.

mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Block, Expr, ExprKind, FieldDecl, FieldInit, ImplBlock, Param, Place, ProcDecl,
    Stmt, StmtKind, StructDecl, TranslationUnit, Type, TypeRef,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
