//! Statement and block parsing.

use meta_ir::{BinaryOp, Block, Expr, ExprKind, Place, Stmt, StmtKind, TokenKind, TypeRef};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.error("`}`"));
            }
            stmts.push(self.parse_stmt()?);
        }
        let end = self.cursor.expect(TokenKind::RBrace, "`}`")?;
        Ok(Block {
            stmts,
            span: start.merge(end),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_assign_or_expr(),
        }
    }

    /// `let name: Type? = expr;`
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::Let, "`let`")?;
        let (name, name_span) = self.cursor.expect_ident("a variable name")?;

        let ty: Option<TypeRef> = if self.cursor.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.cursor.expect(TokenKind::Eq, "`=`")?;
        let value = self.parse_expr()?;
        let end = self.cursor.expect(TokenKind::Semicolon, "`;`")?;

        Ok(Stmt {
            kind: StmtKind::Let {
                name,
                name_span,
                ty,
                value,
            },
            span: start.merge(end),
        })
    }

    /// `if cond { ... } else { ... }?`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::If, "`if`")?;
        let cond = self.parse_condition()?;
        let then_block = self.parse_block()?;

        let else_block = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.merge(
            else_block
                .as_ref()
                .map_or(then_block.span, |block| block.span),
        );
        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_block,
                else_block,
            },
            span,
        })
    }

    /// `while cond { ... }`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::While, "`while`")?;
        let cond = self.parse_condition()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::While { cond, body },
            span,
        })
    }

    /// `for name in lo..hi { ... }`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::For, "`for`")?;
        let (var, var_span) = self.cursor.expect_ident("a loop variable")?;
        self.cursor.expect(TokenKind::In, "`in`")?;

        // Range bounds share the condition restriction: `{` after the
        // bound opens the loop body, not a struct literal.
        let outer = self.struct_literals_allowed;
        self.struct_literals_allowed = false;
        let result: Result<(Expr, Expr), ParseError> = (|| {
            let range_start = self.parse_expr()?;
            self.cursor.expect(TokenKind::DotDot, "`..`")?;
            let range_end = self.parse_expr()?;
            Ok((range_start, range_end))
        })();
        self.struct_literals_allowed = outer;
        let (range_start, range_end) = result?;

        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::ForRange {
                var,
                var_span,
                start: range_start,
                end: range_end,
                body,
            },
            span,
        })
    }

    /// `return expr?;`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::Return, "`return`")?;
        let value = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.cursor.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt {
            kind: StmtKind::Return { value },
            span: start.merge(end),
        })
    }

    /// Either `place = expr;`, `place += expr;`, `place -= expr;`, or a
    /// bare expression statement.
    fn parse_assign_or_expr(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        let start = expr.span;

        let compound = match self.cursor.current_kind() {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(BinaryOp::Add),
            TokenKind::MinusEq => Some(BinaryOp::Sub),
            _ => {
                let end = self.cursor.expect(TokenKind::Semicolon, "`;`")?;
                return Ok(Stmt {
                    kind: StmtKind::Expr(expr),
                    span: start.merge(end),
                });
            }
        };
        self.cursor.advance();

        let target = Self::expr_to_place(&expr)?;
        let rhs = self.parse_expr()?;

        // `place op= rhs` desugars to `place = place op rhs`.
        let value = match compound {
            Some(op) => Expr {
                span: start.merge(rhs.span),
                kind: ExprKind::Binary {
                    op,
                    lhs: Box::new(expr),
                    rhs: Box::new(rhs),
                },
            },
            None => rhs,
        };

        let end = self.cursor.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt {
            kind: StmtKind::Assign { target, value },
            span: start.merge(end),
        })
    }

    /// Reinterpret an already-parsed expression as an assignment target.
    ///
    /// Only a variable or a field-access chain rooted in a variable is a
    /// valid place.
    fn expr_to_place(expr: &Expr) -> Result<Place, ParseError> {
        fn collect(expr: &Expr, fields: &mut Vec<(meta_ir::Name, meta_ir::Span)>) -> Option<(meta_ir::Name, meta_ir::Span)> {
            match &expr.kind {
                ExprKind::Var(name) => Some((*name, expr.span)),
                ExprKind::Field {
                    base,
                    field,
                    field_span,
                } => {
                    let root = collect(base, fields)?;
                    fields.push((*field, *field_span));
                    Some(root)
                }
                _ => None,
            }
        }

        let mut fields = Vec::new();
        match collect(expr, &mut fields) {
            Some((root, root_span)) => Ok(Place {
                root,
                root_span,
                fields,
                span: expr.span,
            }),
            None => Err(ParseError {
                span: expr.span,
                expected: "a variable or field to assign to",
                found: "an expression",
            }),
        }
    }
}
