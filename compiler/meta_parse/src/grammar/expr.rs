//! Expression parsing with precedence climbing.
//!
//! Precedence, low to high: comparison, additive, multiplicative,
//! postfix (field access), primary.

use meta_ir::{BinaryOp, Expr, ExprKind, FieldInit, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression at the lowest precedence tier.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    /// Parse a condition header: struct literals are disabled so the `{`
    /// that follows opens the block.
    pub(crate) fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        let outer = self.struct_literals_allowed;
        self.struct_literals_allowed = false;
        let result = self.parse_expr();
        self.struct_literals_allowed = outer;
        result
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::Ge,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.parse_additive()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_postfix()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.parse_postfix()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Postfix field access: `base.field.field`.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.cursor.eat(TokenKind::Dot) {
            let (field, field_span) = self.cursor.expect_ident("a field name")?;
            let span = expr.span.merge(field_span);
            expr = Expr {
                kind: ExprKind::Field {
                    base: Box::new(expr),
                    field,
                    field_span,
                },
                span,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Int(n) => {
                self.cursor.advance();
                Ok(Expr {
                    kind: ExprKind::Int(n),
                    span,
                })
            }
            TokenKind::Str(name) => {
                self.cursor.advance();
                Ok(Expr {
                    kind: ExprKind::Str(name),
                    span,
                })
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                Ok(expr)
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                match self.cursor.current_kind() {
                    // Type::func(args)
                    TokenKind::DoubleColon => {
                        self.cursor.advance();
                        let (func, func_span) = self.cursor.expect_ident("a function name")?;
                        let (args, end) = self.parse_call_args()?;
                        Ok(Expr {
                            kind: ExprKind::AssociatedCall {
                                type_name: name,
                                type_span: span,
                                func,
                                func_span,
                                args,
                            },
                            span: span.merge(end),
                        })
                    }
                    // f(args)
                    TokenKind::LParen => {
                        let (args, end) = self.parse_call_args()?;
                        Ok(Expr {
                            kind: ExprKind::Call {
                                callee: name,
                                callee_span: span,
                                args,
                            },
                            span: span.merge(end),
                        })
                    }
                    // Type { field: expr, ... }
                    TokenKind::LBrace if self.struct_literals_allowed => {
                        self.parse_struct_literal(name, span)
                    }
                    _ => Ok(Expr {
                        kind: ExprKind::Var(name),
                        span,
                    }),
                }
            }
            _ => Err(self.cursor.error("an expression")),
        }
    }

    /// `( expr, ... )`: returns the arguments and the closing paren span.
    fn parse_call_args(&mut self) -> Result<(Vec<Expr>, meta_ir::Span), ParseError> {
        self.cursor.expect(TokenKind::LParen, "`(`")?;
        let mut args = Vec::new();

        // Call arguments are full expressions: the restriction on struct
        // literals does not apply inside parentheses.
        let outer = self.struct_literals_allowed;
        self.struct_literals_allowed = true;
        let result = (|| {
            while !self.cursor.check(TokenKind::RParen) {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(TokenKind::RParen, "`)`")
        })();
        self.struct_literals_allowed = outer;

        let end = result?;
        Ok((args, end))
    }

    /// `Type { field: expr, ... }`, trailing comma allowed. The `Type`
    /// identifier and its span have already been consumed.
    fn parse_struct_literal(
        &mut self,
        type_name: meta_ir::Name,
        type_span: meta_ir::Span,
    ) -> Result<Expr, ParseError> {
        self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();

        // Same as call arguments: field initializers are full expressions.
        let outer = self.struct_literals_allowed;
        self.struct_literals_allowed = true;
        let result = (|| {
            while !self.cursor.check(TokenKind::RBrace) {
                let (field_name, name_span) = self.cursor.expect_ident("a field name")?;
                self.cursor.expect(TokenKind::Colon, "`:`")?;
                let value = self.parse_expr()?;
                fields.push(FieldInit {
                    name: field_name,
                    name_span,
                    value,
                });
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(TokenKind::RBrace, "`}`")
        })();
        self.struct_literals_allowed = outer;

        let end = result?;
        Ok(Expr {
            kind: ExprKind::StructLiteral {
                type_name,
                type_span,
                fields,
            },
            span: type_span.merge(end),
        })
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.merge(rhs.span);
        Expr {
            kind: ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        }
    }
}
