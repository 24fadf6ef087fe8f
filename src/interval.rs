//! The interval-notation range dialect: `[1.2,2.0)`, `[1.5]`, `(,2.0]`, with
//! `,` between rules meaning union. It shares the version value and its
//! ordering with the expression dialect, but nothing of its grammar; the two
//! notations resolve their ambiguities differently, so each keeps its own
//! parser.

use lazy_static::lazy_static;
use regex::Regex;

use crate::lexer::{Token, TokenKind};
use crate::version::Version;
use crate::{parse, SemverError, SemverErrorKind};

/**
A parsed interval range: a union of bracket-notation rules.

```rust
use expr_semver::{IntervalSet, Version};

let set = IntervalSet::parse("[1.0,2.0)").unwrap();
assert!(set.satisfies(&Version::parse("1.5.0").unwrap()));
assert!(!set.satisfies(&Version::parse("2.0.0").unwrap()));
```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSet {
    rules: Vec<Rule>,
}

// `[v]` compares for equality; any other rule is a span with optional
// inclusive or exclusive endpoints. An omitted endpoint leaves that side
// unbounded regardless of the bracket used.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Exact(Version),
    Span {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: Version,
    inclusive: bool,
}

impl IntervalSet {
    /**
    Parse a comma-separated list of interval rules.
    */
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Self, SemverError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(SemverError::new(input, (0, 0), SemverErrorKind::Empty));
        }

        let tokens = tokenize(input)?;
        let mut parser = IntervalParser {
            input,
            tokens,
            pos: 0,
        };
        let mut rules = Vec::new();
        loop {
            rules.push(parser.rule()?);
            let separator = parser.consume(&[TokenKind::Comma, TokenKind::Eoi])?;
            if separator.kind == TokenKind::Eoi {
                break;
            }
            if parser.matches(TokenKind::Eoi) {
                return Err(parser.unexpected(&[TokenKind::LeftBracket, TokenKind::LeftParen]));
            }
        }
        Ok(IntervalSet { rules })
    }

    /**
    Returns true if `version` falls into any rule of the set.
    */
    pub fn satisfies(&self, version: &Version) -> bool {
        self.rules.iter().any(|rule| rule.satisfied_by(version))
    }
}

impl std::str::FromStr for IntervalSet {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntervalSet::parse(s)
    }
}

impl Rule {
    fn satisfied_by(&self, version: &Version) -> bool {
        match self {
            Rule::Exact(exact) => version == exact,
            Rule::Span { lower, upper } => {
                let above = lower.as_ref().map_or(true, |bound| {
                    if bound.inclusive {
                        version >= &bound.version
                    } else {
                        version > &bound.version
                    }
                });
                let below = upper.as_ref().map_or(true, |bound| {
                    if bound.inclusive {
                        version <= &bound.version
                    } else {
                        version < &bound.version
                    }
                });
                above && below
            }
        }
    }
}

lazy_static! {
    // Unlike the expression lexer, alphanumeric runs are tried before
    // numbers, so zero-padded runs like `00011` stay one identifier token.
    // Whitespace is not part of this notation.
    static ref INTERVAL_PATTERNS: Vec<(TokenKind, Regex)> = vec![
        (TokenKind::AlphaNumeric, Regex::new("^(([0-9]*[A-Za-z][0-9A-Za-z]*)|0[0-9]+)").unwrap()),
        (TokenKind::Numeric, Regex::new("^(0|[1-9][0-9]*)").unwrap()),
        (TokenKind::Dot, Regex::new(r"^\.").unwrap()),
        (TokenKind::Hyphen, Regex::new("^-").unwrap()),
        (TokenKind::Plus, Regex::new(r"^\+").unwrap()),
        (TokenKind::LeftBracket, Regex::new(r"^\[").unwrap()),
        (TokenKind::RightBracket, Regex::new(r"^\]").unwrap()),
        (TokenKind::LeftParen, Regex::new(r"^\(").unwrap()),
        (TokenKind::RightParen, Regex::new(r"^\)").unwrap()),
        (TokenKind::Comma, Regex::new("^,").unwrap()),
    ];
}

fn tokenize(input: &str) -> Result<Vec<Token>, SemverError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let remainder = &input[offset..];
        match INTERVAL_PATTERNS
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

/*
Grammar:

set  ::= rule ( "," rule )*
rule ::= "[" version "]"
       | ( "[" | "(" ) version? "," version? ( "]" | ")" )
*/
struct IntervalParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> IntervalParser<'a> {
    fn token(&self, index: usize) -> &Token {
        match self.tokens.get(index) {
            Some(token) => token,
            None => self.tokens.last().expect("token stream ends with Eoi"),
        }
    }

    fn peek(&self) -> TokenKind {
        self.token(self.pos).kind
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.token(self.pos).clone();
        self.pos += 1;
        token
    }

    fn consume(&mut self, expected: &[TokenKind]) -> Result<Token, SemverError> {
        if expected.contains(&self.peek()) {
            return Ok(self.advance());
        }
        Err(self.unexpected(expected))
    }

    fn unexpected(&self, expected: &[TokenKind]) -> SemverError {
        let token = self.token(self.pos);
        SemverError::new(
            self.input,
            (token.offset, token.lexeme.len()),
            SemverErrorKind::UnexpectedToken {
                found: token.kind,
                lexeme: token.lexeme.clone(),
                expected: expected.to_vec(),
            },
        )
    }

    fn rule(&mut self) -> Result<Rule, SemverError> {
        let open = self.consume(&[TokenKind::LeftBracket, TokenKind::LeftParen])?;
        let mut lower = if self.matches(TokenKind::Numeric) {
            Some(self.version()?)
        } else {
            None
        };

        if open.kind == TokenKind::LeftBracket && self.matches(TokenKind::RightBracket) {
            if let Some(version) = lower.take() {
                self.advance();
                return Ok(Rule::Exact(version));
            }
        }

        self.consume(&[TokenKind::Comma])?;
        let upper = if self.matches(TokenKind::Numeric) {
            Some(self.version()?)
        } else {
            None
        };
        let close = self.consume(&[TokenKind::RightBracket, TokenKind::RightParen])?;

        Ok(Rule::Span {
            lower: lower.map(|version| Bound {
                version,
                inclusive: open.kind == TokenKind::LeftBracket,
            }),
            upper: upper.map(|version| Bound {
                version,
                inclusive: close.kind == TokenKind::RightBracket,
            }),
        })
    }

    // Same shape as the expression dialect's version literal, except a `-`
    // always starts a pre-release suffix here.
    fn version(&mut self) -> Result<Version, SemverError> {
        let major = self.numeric()?;
        let mut minor = 0;
        if self.matches(TokenKind::Dot) {
            self.advance();
            minor = self.numeric()?;
        }
        let mut patch = 0;
        if self.matches(TokenKind::Dot) {
            self.advance();
            patch = self.numeric()?;
        }

        let mut version = Version::from((major, minor, patch));
        if self.matches(TokenKind::Hyphen) {
            self.advance();
            let text = self.suffix();
            if !text.is_empty() {
                version.pre_release = parse::parse_pre_release(&text)?;
            }
        }
        if self.matches(TokenKind::Plus) {
            self.advance();
            let text = self.suffix();
            if !text.is_empty() {
                version.build = parse::parse_build(&text)?;
            }
        }
        Ok(version)
    }

    fn suffix(&mut self) -> String {
        let mut text = String::new();
        while matches!(
            self.peek(),
            TokenKind::AlphaNumeric | TokenKind::Numeric | TokenKind::Dot
        ) {
            text.push_str(&self.advance().lexeme);
        }
        text
    }

    fn numeric(&mut self) -> Result<u64, SemverError> {
        let token = self.consume(&[TokenKind::Numeric])?;
        token.lexeme.parse().map_err(|_| {
            SemverError::new(
                self.input,
                (token.offset, token.lexeme.len()),
                SemverErrorKind::NumberOverflow,
            )
        })
    }
}
