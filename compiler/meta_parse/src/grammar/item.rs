//! Top-level item parsing: `struct`, `impl`, `proc`, and type references.

use meta_ir::{
    FieldDecl, ImplBlock, Param, ProcDecl, StructDecl, TokenKind, TranslationUnit, Type, TypeRef,
};
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole translation unit: items until end of input.
    pub(crate) fn parse_translation_unit(&mut self) -> Result<TranslationUnit, ParseError> {
        let mut unit = TranslationUnit::default();
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::Struct => unit.structs.push(self.parse_struct()?),
                TokenKind::Impl => unit.impls.push(self.parse_impl()?),
                TokenKind::Proc => unit.procs.push(self.parse_proc()?),
                _ => return Err(self.cursor.error("`struct`, `impl`, or `proc`")),
            }
        }
        Ok(unit)
    }

    /// `struct Name { field: Type, ... }`, trailing comma allowed.
    fn parse_struct(&mut self) -> Result<StructDecl, ParseError> {
        let start = self.cursor.expect(TokenKind::Struct, "`struct`")?;
        let (name, name_span) = self.cursor.expect_ident("a struct name")?;
        trace!(name = self.cursor.interner().lookup(name), "parsing struct");
        self.cursor.expect(TokenKind::LBrace, "`{`")?;

        let mut fields = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            let (field_name, field_span) = self.cursor.expect_ident("a field name")?;
            self.cursor.expect(TokenKind::Colon, "`:`")?;
            let ty = self.parse_type()?;
            fields.push(FieldDecl {
                name: field_name,
                name_span: field_span,
                ty,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(TokenKind::RBrace, "`}`")?;

        Ok(StructDecl {
            name,
            name_span,
            fields,
            span: start.merge(end),
        })
    }

    /// `impl Name { proc ... }`
    fn parse_impl(&mut self) -> Result<ImplBlock, ParseError> {
        let start = self.cursor.expect(TokenKind::Impl, "`impl`")?;
        let (type_name, type_span) = self.cursor.expect_ident("a type name")?;
        self.cursor.expect(TokenKind::LBrace, "`{`")?;

        let mut procs = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if !self.cursor.check(TokenKind::Proc) {
                return Err(self.cursor.error("`proc` or `}`"));
            }
            procs.push(self.parse_proc()?);
        }
        let end = self.cursor.expect(TokenKind::RBrace, "`}`")?;

        Ok(ImplBlock {
            type_name,
            type_span,
            procs,
            span: start.merge(end),
        })
    }

    /// `proc name(params): RetType? { body }`
    pub(crate) fn parse_proc(&mut self) -> Result<ProcDecl, ParseError> {
        let start = self.cursor.expect(TokenKind::Proc, "`proc`")?;
        let (name, name_span) = self.cursor.expect_ident("a procedure name")?;
        trace!(
            name = self.cursor.interner().lookup(name),
            "parsing procedure"
        );

        self.cursor.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            let (param_name, param_span) = self.cursor.expect_ident("a parameter name")?;
            self.cursor.expect(TokenKind::Colon, "`:`")?;
            let ty = self.parse_type()?;
            params.push(Param {
                name: param_name,
                name_span: param_span,
                ty,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen, "`)`")?;

        let return_type = if self.cursor.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Ok(ProcDecl {
            name,
            name_span,
            params,
            return_type,
            body,
            span,
        })
    }

    /// A type reference: `i32`, `String`, or a struct name.
    pub(crate) fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let span = self.cursor.current_span();
        let ty = match self.cursor.current_kind() {
            TokenKind::I32Type => Type::I32,
            TokenKind::StringType => Type::Str,
            TokenKind::Ident(name) => Type::Named(name),
            _ => return Err(self.cursor.error("a type")),
        };
        self.cursor.advance();
        Ok(TypeRef { ty, span })
    }
}
