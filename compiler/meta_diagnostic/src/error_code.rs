//! Error codes for searchable diagnostics.

use std::fmt;

/// Stable error code attached to every diagnostic.
///
/// Ranges: E0xxx lexing, E1xxx parsing, E2xxx resolution, E3xxx runtime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Lexical error (unterminated string, illegal character, bad literal).
    Lex,
    /// Structural parse error.
    Parse,
    /// Reference to an undeclared type.
    UnknownType,
    /// Struct literal fields do not match the declaration.
    FieldMismatch,
    /// Missing or malformed `main` entry point.
    EntryPoint,
    /// Duplicate struct, field, or procedure declaration.
    DuplicateDecl,
    /// Call to an undeclared free or associated procedure.
    UnknownFunction,
    /// Access to a field the struct does not declare.
    UnknownField,
    /// Integer overflow or division by zero.
    Arithmetic,
    /// Operation applied to values of the wrong type.
    TypeMismatch,
    /// Call depth limit exceeded.
    StackOverflow,
    /// Reference to an unbound variable.
    UnknownVariable,
}

impl ErrorCode {
    /// The code as rendered in diagnostics, e.g. `E2001`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Lex => "E0001",
            ErrorCode::Parse => "E1001",
            ErrorCode::UnknownType => "E2001",
            ErrorCode::FieldMismatch => "E2002",
            ErrorCode::EntryPoint => "E2003",
            ErrorCode::DuplicateDecl => "E2004",
            ErrorCode::UnknownFunction => "E3001",
            ErrorCode::UnknownField => "E3002",
            ErrorCode::Arithmetic => "E3003",
            ErrorCode::TypeMismatch => "E3004",
            ErrorCode::StackOverflow => "E3005",
            ErrorCode::UnknownVariable => "E3006",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        use std::collections::HashSet;
        let codes = [
            ErrorCode::Lex,
            ErrorCode::Parse,
            ErrorCode::UnknownType,
            ErrorCode::FieldMismatch,
            ErrorCode::EntryPoint,
            ErrorCode::DuplicateDecl,
            ErrorCode::UnknownFunction,
            ErrorCode::UnknownField,
            ErrorCode::Arithmetic,
            ErrorCode::TypeMismatch,
            ErrorCode::StackOverflow,
            ErrorCode::UnknownVariable,
        ];
        let unique: HashSet<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Parse.to_string(), "E1001");
    }
}
