use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{SemverError, SemverErrorKind};

/**
The token alphabet of the range grammars.

`LeftBracket`, `RightBracket` and `Comma` only occur in the interval
dialect; the expression lexer never produces them.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Numeric,
    Wildcard,
    AlphaNumeric,
    Dot,
    Hyphen,
    Plus,
    NotEqual,
    Equal,
    GreaterEqual,
    Greater,
    LessEqual,
    Less,
    Tilde,
    Caret,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Eoi,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Numeric => "numeric",
            TokenKind::Wildcard => "wildcard",
            TokenKind::AlphaNumeric => "alphanumeric",
            TokenKind::Dot => "`.`",
            TokenKind::Hyphen => "`-`",
            TokenKind::Plus => "`+`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::Equal => "`=`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::Greater => "`>`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::Less => "`<`",
            TokenKind::Tilde => "`~`",
            TokenKind::Caret => "`^`",
            TokenKind::And => "`&`",
            TokenKind::Or => "`|`",
            TokenKind::Not => "`!`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Eoi => "end of input",
        };
        write!(f, "{}", text)
    }
}

/**
A lexed token: its kind, the matched text, and its byte offset in the input.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    pub(crate) fn eoi(offset: usize) -> Token {
        Token {
            kind: TokenKind::Eoi,
            lexeme: String::new(),
            offset,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eoi => write!(f, "end of input at {}", self.offset),
            _ => write!(f, "`{}` at {}", self.lexeme, self.offset),
        }
    }
}

lazy_static! {
    // Patterns are anchored and tried in this order against the remaining
    // input; where lexemes overlap the longer operator comes first, so `>=`
    // can never lex as `>` followed by `=`.
    static ref TOKEN_PATTERNS: Vec<(TokenKind, Regex)> = vec![
        (TokenKind::Numeric, Regex::new("^(0|[1-9][0-9]*)").unwrap()),
        (TokenKind::Wildcard, Regex::new(r"^[*xX]").unwrap()),
        (TokenKind::AlphaNumeric, Regex::new("^[0-9]*[A-Za-z][0-9A-Za-z]*").unwrap()),
        (TokenKind::Dot, Regex::new(r"^\.").unwrap()),
        (TokenKind::Hyphen, Regex::new("^-").unwrap()),
        (TokenKind::Plus, Regex::new(r"^\+").unwrap()),
        (TokenKind::NotEqual, Regex::new("^!=").unwrap()),
        (TokenKind::Equal, Regex::new("^=").unwrap()),
        (TokenKind::GreaterEqual, Regex::new("^>=").unwrap()),
        (TokenKind::Greater, Regex::new("^>").unwrap()),
        (TokenKind::LessEqual, Regex::new("^<=").unwrap()),
        (TokenKind::Less, Regex::new("^<").unwrap()),
        (TokenKind::Tilde, Regex::new("^~").unwrap()),
        (TokenKind::Caret, Regex::new(r"^\^").unwrap()),
        (TokenKind::And, Regex::new("^&").unwrap()),
        (TokenKind::Or, Regex::new(r"^\|").unwrap()),
        (TokenKind::Not, Regex::new("^!").unwrap()),
        (TokenKind::LeftParen, Regex::new(r"^\(").unwrap()),
        (TokenKind::RightParen, Regex::new(r"^\)").unwrap()),
    ];
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
}

/// Tokenizes a range expression. Whitespace advances the position but leaves
/// no token behind; an `Eoi` token is appended at the final offset.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, SemverError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let remainder = &input[offset..];
        if let Some(found) = WHITESPACE.find(remainder) {
            offset += found.end();
            continue;
        }
        match TOKEN_PATTERNS
            .iter()
            .find_map(|(kind, pattern)| pattern.find(remainder).map(|found| (*kind, found)))
        {
            Some((kind, found)) => {
                tokens.push(Token {
                    kind,
                    lexeme: found.as_str().to_string(),
                    offset,
                });
                offset += found.end();
            }
            None => {
                return Err(SemverError::new(
                    input,
                    (offset, input.len() - offset),
                    SemverErrorKind::NoMatchingToken {
                        remainder: remainder.to_string(),
                    },
                ));
            }
        }
    }

    tokens.push(Token::eoi(offset));
    Ok(tokens)
}
