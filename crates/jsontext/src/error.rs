//! The error type shared by the lexer, reader, and writer.

use alloc::string::String;

use thiserror::Error;

/// Any failure raised by JSON text processing.
///
/// One error kind covers the whole crate, distinguished by message: lexical
/// errors (with the `line:column` where the lexer stopped), predictive-parse
/// errors, and writer validation errors. Errors are returned to the caller of
/// the failing operation; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum JsonError {
    /// The lexer met a character that cannot start or continue any lexeme.
    #[error("invalid character '{ch}' at {line}:{column}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
    },

    /// The input ended in the middle of a string, number, keyword, or block
    /// comment.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEndOfInput {
        /// 1-based line where input ran out.
        line: usize,
        /// 1-based column where input ran out.
        column: usize,
    },

    /// A `\uXXXX` escape contained a non-hexadecimal digit.
    #[error("invalid unicode escape digit '{0}'")]
    InvalidUnicodeEscapeDigit(char),

    /// A `\uXXXX` escape named a code point that is not a Unicode scalar
    /// value (for example a lone surrogate half).
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscape(u16),

    /// The predictive parse table has no production for the current
    /// (nonterminal, terminal) pair.
    #[error("invalid token '{0}' in input string")]
    InvalidToken(&'static str),

    /// Input ended while the parser still expected more of the document.
    #[error("input doesn't evaluate to proper JSON text")]
    IncompleteJson,

    /// A numeric lexeme does not fit any supported representation.
    #[error("number '{0}' is out of range")]
    NumberOutOfRange(String),

    /// A value was written inside an object with no property name pending.
    #[error("Can't add a value here")]
    CantAddValue,

    /// A property name was written outside an object, or while a previous
    /// property still awaits its value.
    #[error("Can't add a property here")]
    CantAddProperty,

    /// `write_array_end` was called while the innermost open container is
    /// not an array.
    #[error("Can't close an array here")]
    CantCloseArray,

    /// `write_object_end` was called while the innermost open container is
    /// not an object.
    #[error("Can't close an object here")]
    CantCloseObject,

    /// `write_object_end` was called while a property still awaits its
    /// value.
    #[error("Expected a property")]
    ExpectedProperty,

    /// A write was attempted after the top-level value was completed.
    #[error("A complete JSON symbol has already been written")]
    DocumentComplete,

    /// A non-finite floating point value cannot be rendered as JSON.
    #[error("not a finite number")]
    NonFiniteNumber,

    /// A pre-rendered numeric literal failed textual validation.
    #[error("'{0}' is not a valid JSON number")]
    InvalidNumberLiteral(String),

    /// The output sink refused a write.
    #[error("error writing to the output sink")]
    Sink(#[from] core::fmt::Error),

    /// A free-form message, for collaborators layered on top of the core.
    #[error("{0}")]
    Custom(String),
}
