//! SemVer version values and boolean range expressions.
//!
//! This crate has two entry points that share one comparison law:
//!
//! - [`Version::parse`] validates a single version string against the SemVer
//!   grammar and produces a totally ordered [`Version`] value.
//! - [`Range::parse`] compiles a range expression (comparisons, tilde, caret,
//!   wildcard and hyphen shorthand, and the `&`/`|`/`!` combinators) into a
//!   reusable predicate over versions.
//!
//! ```rust
//! use expr_semver::{Range, Version};
//!
//! let version = Version::parse("1.2.3-rc.1").unwrap();
//! let range = Range::parse(">=1.0.0 & <2.0.0").unwrap();
//!
//! assert!(range.satisfies(&version));
//! ```
//!
//! Parse failures carry the offending character or token, its offset, and the
//! inputs that would have been accepted at that point, and render as annotated
//! snippets through [`miette`].
//!
//! A second, bracket-notation range dialect (`[1.2,2.0)`) lives in
//! [`IntervalSet`]; it shares the version value and its ordering but nothing
//! of the expression grammar.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub use crate::expr::{not, Expression, Operation};
pub use crate::interval::IntervalSet;
pub use crate::lexer::{Token, TokenKind};
pub use crate::parse::CharKind;
pub use crate::range::Range;
pub use crate::version::{Identifier, Version};

pub mod expr;
mod interval;
mod lexer;
mod parse;
mod range;
mod version;

/**
Parse a single version string.

Equivalent to [`Version::parse`].
*/
pub fn parse_version<S: AsRef<str>>(input: S) -> Result<Version, SemverError> {
    Version::parse(input)
}

/**
Compile a range expression into a reusable predicate.

Equivalent to [`Range::parse`].
*/
pub fn parse_range<S: AsRef<str>>(input: S) -> Result<Range, SemverError> {
    Range::parse(input)
}

/**
A structured parse failure, pointing at the offending spot in the input.
*/
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
#[error("{kind}")]
#[diagnostic(code(expr_semver::parse_error))]
pub struct SemverError {
    #[source_code]
    input: String,
    #[label("{kind}")]
    span: SourceSpan,
    kind: SemverErrorKind,
}

impl SemverError {
    pub(crate) fn new(
        input: impl Into<String>,
        span: impl Into<SourceSpan>,
        kind: SemverErrorKind,
    ) -> Self {
        Self {
            input: input.into(),
            span: span.into(),
            kind,
        }
    }

    /// The input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Zero-based byte offset of the failure within [`Self::input`].
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// What went wrong, with the payload described in [`SemverErrorKind`].
    pub fn kind(&self) -> &SemverErrorKind {
        &self.kind
    }

    /// Zero-indexed (line, column) of the failure.
    pub fn location(&self) -> (usize, usize) {
        let index = self.offset().min(self.input.len());
        let prefix = &self.input[..index];
        let line = bytecount::count(prefix.as_bytes(), b'\n');
        let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, index - line_start)
    }
}

/**
The ways a parse can fail.

Every failure is terminal for that call; nothing is recovered or retried.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemverErrorKind {
    /// The input string was empty.
    Empty,
    /// The version grammar did not accept a character. `unexpected` is `None`
    /// when the input ended early; `expected` lists, in grammar order, the
    /// character classes that were valid at that point.
    UnexpectedCharacter {
        unexpected: Option<char>,
        expected: Vec<CharKind>,
    },
    /// A numeric identifier started with `0` followed by more digits.
    LeadingZero,
    /// A numeric component does not fit in a `u64`.
    NumberOverflow,
    /// The range grammar did not accept a token. `expected` lists, in grammar
    /// order, the token kinds that were valid at that point.
    UnexpectedToken {
        found: TokenKind,
        lexeme: String,
        expected: Vec<TokenKind>,
    },
    /// No token pattern matched the remaining input during tokenization.
    NoMatchingToken { remainder: String },
}

impl fmt::Display for SemverErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemverErrorKind::Empty => write!(f, "input string is empty"),
            SemverErrorKind::UnexpectedCharacter {
                unexpected: Some(ch),
                expected,
            } => {
                write!(f, "unexpected character `{}`, expected ", ch)?;
                write_alternatives(f, expected)
            }
            SemverErrorKind::UnexpectedCharacter {
                unexpected: None,
                expected,
            } => {
                write!(f, "unexpected end of input, expected ")?;
                write_alternatives(f, expected)
            }
            SemverErrorKind::LeadingZero => {
                write!(f, "numeric identifiers must not contain leading zeroes")
            }
            SemverErrorKind::NumberOverflow => {
                write!(f, "numeric component is too large to fit in a u64")
            }
            SemverErrorKind::UnexpectedToken {
                found: TokenKind::Eoi,
                expected,
                ..
            } => {
                write!(f, "unexpected end of input, expected ")?;
                write_alternatives(f, expected)
            }
            SemverErrorKind::UnexpectedToken {
                lexeme, expected, ..
            } => {
                write!(f, "unexpected token `{}`, expected ", lexeme)?;
                write_alternatives(f, expected)
            }
            SemverErrorKind::NoMatchingToken { remainder } => {
                write!(f, "no token matches remaining input `{}`", remainder)
            }
        }
    }
}

impl std::error::Error for SemverErrorKind {}

fn write_alternatives<T: fmt::Display>(f: &mut fmt::Formatter<'_>, options: &[T]) -> fmt::Result {
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            write!(f, " or ")?;
        }
        write!(f, "{}", option)?;
    }
    Ok(())
}
