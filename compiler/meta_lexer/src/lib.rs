//! Lexer for Meta using logos with string interning.
//!
//! Produces a [`TokenList`] for the parser, or a [`LexError`] for
//! unterminated strings, out-of-range integer literals, and characters
//! outside the language's alphabet.

mod error;

use logos::Logos;
use meta_ir::{Span, StringInterner, Token, TokenKind, TokenList};

pub use error::LexError;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
enum RawToken {
    #[token("struct")]
    Struct,
    #[token("impl")]
    Impl,
    #[token("proc")]
    Proc,
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("return")]
    Return,

    #[token("i32")]
    I32Type,
    #[token("String")]
    StringType,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+=")]
    PlusEq,
    #[token("+")]
    Plus,
    #[token("-=")]
    MinusEq,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Integer literal. The callback fails (and the token lexes as an
    // error) when the value does not fit in i32.
    #[regex(r"[0-9][0-9_]*", |lex| {
        lex.slice().replace('_', "").parse::<i32>().ok()
    })]
    Int(i32),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`.
///
/// Deterministic: the same input always produces the same token stream.
/// The returned list always ends with an `Eof` token.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => {
                let kind = convert_token(raw, slice, interner);
                result.push(Token::new(kind, span));
            }
            Err(()) => return Err(classify_error(slice, span)),
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    result.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    Ok(result)
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            let unescaped = unescape_string(content);
            TokenKind::Str(interner.intern(&unescaped))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::Struct => TokenKind::Struct,
        RawToken::Impl => TokenKind::Impl,
        RawToken::Proc => TokenKind::Proc,
        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Return => TokenKind::Return,

        RawToken::I32Type => TokenKind::I32Type,
        RawToken::StringType => TokenKind::StringType,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Dot => TokenKind::Dot,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
    }
}

/// Classify a logos error token into a `LexError`.
fn classify_error(slice: &str, span: Span) -> LexError {
    if slice.starts_with('"') {
        LexError::UnterminatedString { span }
    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
        LexError::IntOutOfRange { span }
    } else {
        LexError::IllegalCharacter {
            ch: slice.chars().next().unwrap_or('\0'),
            span,
        }
    }
}

/// Process string escape sequences.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') | None => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
