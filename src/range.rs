use std::fmt;

use serde::{
    de::{self, Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};

use crate::expr::{self, not, Expression, Operation};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::version::Version;
use crate::{parse, SemverError, SemverErrorKind};

/**
A compiled range expression.

A range combines comparisons (`>=1.2.3`), shorthand forms (`~1.2`, `^0.4.1`,
`1.2.x`, `1.0.0 - 2.0.0`, bare `1.2`) and the boolean operators `&`, `|` and
`!(...)` into a predicate over [`Version`]s. `&` and `|` associate to the
right; parentheses force grouping.

Parsing builds the predicate once; [`Range::satisfies`] can then be called
any number of times, from any thread.

A `-` inside a version literal starts a pre-release suffix only when an
alphanumeric identifier follows, so `1.0.0-rc2 - 2.0.0` reads as a hyphen
range with a pre-release lower bound, while purely numeric pre-release
suffixes are not recognized in range position.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range(Expression);

impl Range {
    /**
    Parse a range from a string.
    */
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Self, SemverError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(SemverError::new(input, (0, 0), SemverErrorKind::Empty));
        }

        let tokens = tokenize(input)?;
        let mut parser = RangeParser {
            input,
            tokens,
            pos: 0,
        };
        let expression = parser.expression()?;
        parser.consume(&[TokenKind::Eoi])?;
        Ok(Range(expression))
    }

    /**
    A range that matches any version.
    */
    pub fn any() -> Self {
        Range(expr::gte(Version::from((0, 0, 0))))
    }

    /**
    Returns true if `version` is satisfied by this range.
    */
    pub fn satisfies(&self, version: &Version) -> bool {
        self.0.satisfies(version)
    }

    /// The compiled predicate tree.
    pub fn expression(&self) -> &Expression {
        &self.0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Range {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl From<Expression> for Range {
    fn from(expression: Expression) -> Self {
        Range(expression)
    }
}

impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize a Range as a string.
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeVisitor;

        /// Deserialize a `Range` from a string.
        impl<'de> Visitor<'de> for RangeVisitor {
            type Value = Range;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a version range as a string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Range::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(RangeVisitor)
    }
}

// ---- Parser ----

/*
Grammar:

expr       ::= "!" "(" expr ")" more-expr
             | "(" expr ")" more-expr
             | range more-expr
more-expr  ::= "&" expr | "|" expr | epsilon
range      ::= comparison | wildcard-range | tilde-range | caret-range
             | hyphen-range | partial-range
comparison ::= ( "=" | "!=" | ">" | ">=" | "<" | "<=" )? version

A bare version literal is a prefix of five of the range forms, so `range`
classifies with bounded multi-token lookahead before committing to a rule.
*/
struct RangeParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> RangeParser<'a> {
    // The stream always ends with an Eoi token; reads past it stay on it.
    fn token(&self, index: usize) -> &Token {
        match self.tokens.get(index) {
            Some(token) => token,
            None => self.tokens.last().expect("token stream ends with Eoi"),
        }
    }

    fn lookahead(&self, k: usize) -> &Token {
        self.token(self.pos + k - 1)
    }

    fn peek(&self) -> TokenKind {
        self.lookahead(1).kind
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
        let token = self.lookahead(1);
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

    fn expression(&mut self) -> Result<Expression, SemverError> {
        let expression = if self.matches(TokenKind::Not) {
            self.advance();
            self.consume(&[TokenKind::LeftParen])?;
            let inner = self.expression()?;
            self.consume(&[TokenKind::RightParen])?;
            not(inner)
        } else if self.matches(TokenKind::LeftParen) {
            self.advance();
            let inner = self.expression()?;
            self.consume(&[TokenKind::RightParen])?;
            inner
        } else {
            self.range()?
        };
        self.more_expressions(expression)
    }

    // `&` and `|` recurse on the rest of the input, so they group rightwards.
    fn more_expressions(&mut self, expression: Expression) -> Result<Expression, SemverError> {
        if self.matches(TokenKind::And) {
            self.advance();
            return Ok(expression.and(self.expression()?));
        }
        if self.matches(TokenKind::Or) {
            self.advance();
            return Ok(expression.or(self.expression()?));
        }
        Ok(expression)
    }

    fn range(&mut self) -> Result<Expression, SemverError> {
        if self.matches(TokenKind::Tilde) {
            return self.tilde_range();
        }
        if self.matches(TokenKind::Caret) {
            return self.caret_range();
        }
        if self.version_followed_by(TokenKind::Wildcard) {
            return self.wildcard_range();
        }
        if self.version_followed_by(TokenKind::Hyphen) {
            return self.hyphen_range();
        }
        if self.partial_version_ahead() {
            return self.partial_version_range();
        }
        self.comparison_range()
    }

    // comparison ::= op version | version, the bare form meaning equality
    fn comparison_range(&mut self) -> Result<Expression, SemverError> {
        let operation = match self.peek() {
            TokenKind::Equal => {
                self.advance();
                Operation::Exact
            }
            TokenKind::NotEqual => {
                self.advance();
                Operation::NotEqual
            }
            TokenKind::Greater => {
                self.advance();
                Operation::GreaterThan
            }
            TokenKind::GreaterEqual => {
                self.advance();
                Operation::GreaterThanEquals
            }
            TokenKind::Less => {
                self.advance();
                Operation::LessThan
            }
            TokenKind::LessEqual => {
                self.advance();
                Operation::LessThanEquals
            }
            _ => Operation::Exact,
        };
        Ok(Expression::Comparison(operation, self.version()?))
    }

    // tilde ::= "~" version, meaning at least the version and below the next
    // minor (next major when only a major is given)
    fn tilde_range(&mut self) -> Result<Expression, SemverError> {
        self.consume(&[TokenKind::Tilde])?;
        let major = self.numeric()?;
        if !self.matches(TokenKind::Dot) {
            return Ok(expr::gte((major, 0, 0).into()).and(expr::lt((major + 1, 0, 0).into())));
        }
        self.advance();
        let minor = self.numeric()?;
        if !self.matches(TokenKind::Dot) {
            return Ok(
                expr::gte((major, minor, 0).into()).and(expr::lt((major, minor + 1, 0).into()))
            );
        }
        self.advance();
        let patch = self.numeric()?;
        Ok(expr::gte((major, minor, patch).into()).and(expr::lt((major, minor + 1, 0).into())))
    }

    // caret ::= "^" version, bumping the leftmost non-zero component; an
    // all-zero version degenerates to exact equality
    fn caret_range(&mut self) -> Result<Expression, SemverError> {
        self.consume(&[TokenKind::Caret])?;
        let major = self.numeric()?;
        if !self.matches(TokenKind::Dot) {
            return Ok(expr::gte((major, 0, 0).into()).and(expr::lt((major + 1, 0, 0).into())));
        }
        self.advance();
        let minor = self.numeric()?;
        if !self.matches(TokenKind::Dot) {
            let lower = Version::from((major, minor, 0));
            let upper = if major > 0 {
                lower.bump_major()
            } else {
                lower.bump_minor()
            };
            return Ok(expr::gte(lower).and(expr::lt(upper)));
        }
        self.advance();
        let patch = self.numeric()?;
        let version = Version::from((major, minor, patch));
        if major > 0 {
            let upper = version.bump_major();
            Ok(expr::gte(version).and(expr::lt(upper)))
        } else if minor > 0 {
            let upper = version.bump_minor();
            Ok(expr::gte(version).and(expr::lt(upper)))
        } else if patch > 0 {
            let upper = version.bump_patch();
            Ok(expr::gte(version).and(expr::lt(upper)))
        } else {
            Ok(expr::eq(version))
        }
    }

    // wildcard ::= a bare wildcard (any version), M "." wildcard, or
    // M "." m "." wildcard; extra `.x` repetitions are accepted and ignored
    fn wildcard_range(&mut self) -> Result<Expression, SemverError> {
        if self.matches(TokenKind::Wildcard) {
            self.advance();
            if self.matches(TokenKind::Dot) {
                self.advance();
                self.consume(&[TokenKind::Wildcard])?;
            }
            if self.matches(TokenKind::Dot) {
                self.advance();
                self.consume(&[TokenKind::Wildcard])?;
            }
            return Ok(expr::gte((0, 0, 0).into()));
        }

        let major = self.numeric()?;
        self.consume(&[TokenKind::Dot])?;
        if self.matches(TokenKind::Wildcard) {
            self.advance();
            if self.matches(TokenKind::Dot) {
                self.advance();
                self.consume(&[TokenKind::Wildcard])?;
            }
            return Ok(expr::gte((major, 0, 0).into()).and(expr::lt((major + 1, 0, 0).into())));
        }

        let minor = self.numeric()?;
        self.consume(&[TokenKind::Dot])?;
        self.consume(&[TokenKind::Wildcard])?;
        Ok(expr::gte((major, minor, 0).into()).and(expr::lt((major, minor + 1, 0).into())))
    }

    // hyphen ::= version "-" version, both bounds inclusive
    fn hyphen_range(&mut self) -> Result<Expression, SemverError> {
        let lower = expr::gte(self.version()?);
        self.consume(&[TokenKind::Hyphen])?;
        Ok(lower.and(expr::lte(self.version()?)))
    }

    // partial ::= M | M "." m, equivalent to the wildcard forms
    fn partial_version_range(&mut self) -> Result<Expression, SemverError> {
        let major = self.numeric()?;
        if !self.matches(TokenKind::Dot) {
            return Ok(expr::gte((major, 0, 0).into()).and(expr::lt((major + 1, 0, 0).into())));
        }
        self.advance();
        let minor = self.numeric()?;
        Ok(expr::gte((major, minor, 0).into()).and(expr::lt((major, minor + 1, 0).into())))
    }

    // version ::= M ( "." m ( "." p )? )? ( "-" pre )? ( "+" build )?
    //
    // The token-level mini-grammar for version literals inside a range.
    // Missing components default to zero. Suffix lexemes are stitched back
    // together and validated with the character-level identifier rules.
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
        if self.matches(TokenKind::Hyphen) && self.lookahead(2).kind == TokenKind::AlphaNumeric {
            self.advance();
            version.pre_release = parse::parse_pre_release(&self.suffix())?;
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

    // Skips ahead over a version literal, including an attached pre-release
    // or build suffix, and tests whether the first distinctive token after it
    // matches `kind`. Nothing is consumed.
    fn version_followed_by(&self, kind: TokenKind) -> bool {
        use TokenKind::*;

        let mut i = self.pos;
        let end = self.tokens.len();
        let mut lookahead: &Token;
        let mut lookahead2: Option<&Token> = None;

        // skip over `major "." minor "."` while the literal keeps that shape
        for _ in 0..2 {
            if i >= end {
                return false;
            }
            lookahead = &self.tokens[i];
            i += 1;
            if lookahead.kind != Numeric {
                if i >= end {
                    return kind == lookahead.kind;
                }
                let second = &self.tokens[i];
                i += 1;
                if second.kind != Numeric && second.kind != Hyphen && second.kind != Plus {
                    return kind == lookahead.kind;
                }
                lookahead2 = Some(second);
                break;
            }
            if i >= end {
                return kind == lookahead.kind;
            }
            lookahead = &self.tokens[i];
            i += 1;
            if lookahead.kind != Dot {
                return kind == lookahead.kind;
            }
        }

        let mut current = match lookahead2 {
            Some(token) => token,
            None => {
                if i >= end {
                    return false;
                }
                let token = &self.tokens[i];
                i += 1;
                token
            }
        };

        // the patch component
        if current.kind == Numeric && i < end {
            current = &self.tokens[i];
            i += 1;
        }
        // an attached pre-release suffix, which must start alphanumeric
        if current.kind == Hyphen && i < end {
            let first = &self.tokens[i];
            i += 1;
            if first.kind == AlphaNumeric {
                while i < end {
                    current = &self.tokens[i];
                    i += 1;
                    if current.kind != AlphaNumeric && current.kind != Numeric && current.kind != Dot
                    {
                        break;
                    }
                }
            }
        }
        // an attached build suffix
        if current.kind == Plus && i < end {
            let first = &self.tokens[i];
            i += 1;
            if first.kind == AlphaNumeric || first.kind == Numeric {
                while i < end {
                    current = &self.tokens[i];
                    i += 1;
                    if current.kind != AlphaNumeric && current.kind != Numeric && current.kind != Dot
                    {
                        break;
                    }
                }
            }
        }

        kind == current.kind
    }

    // A literal shorter than `M.m.p` is a partial-version range; five tokens
    // of lookahead are enough to see past a full core.
    fn partial_version_ahead(&self) -> bool {
        if !self.matches(TokenKind::Numeric) {
            return false;
        }
        for k in 1..=5 {
            let kind = self.lookahead(k).kind;
            if kind != TokenKind::Numeric && kind != TokenKind::Dot {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod satisfies_tests {
    use super::*;

    macro_rules! range_tests {
        ($($name:ident => $range:expr, { yes => [$($yes:expr),*$(,)?], no => [$($no:expr),*$(,)?] }),+ ,$(,)?) => {
            $(
                #[test]
                fn $name() {
                    let range = Range::parse($range).expect("unable to parse");
                    $(
                        let version = Version::parse($yes).unwrap();
                        assert!(range.satisfies(&version), "{} should match {}", $range, $yes);
                    )*
                    $(
                        let version = Version::parse($no).unwrap();
                        assert!(!range.satisfies(&version), "{} should not match {}", $range, $no);
                    )*
                }
            )+
        }
    }

    range_tests![
        exact => "=1.0.0", { yes => ["1.0.0"], no => ["1.0.1"] },
        bare_version_means_exact => "1.0.0", { yes => ["1.0.0"], no => ["1.0.1", "0.9.9"] },
        not_equal => "!=1.0.0", { yes => ["1.2.3", "0.1.0"], no => ["1.0.0"] },
        greater => ">1.0.0", { yes => ["1.2.3"], no => ["1.0.0", "0.9.0"] },
        greater_equal => ">=1.0.0", { yes => ["1.0.0", "1.2.3"], no => ["0.9.9"] },
        less => "<1.2.3", { yes => ["1.0.0"], no => ["1.2.3", "2.0.0"] },
        less_equal => "<=1.2.3", { yes => ["1.0.0", "1.2.3"], no => ["1.2.4"] },
        comparison_with_partial_version => ">=1.2", { yes => ["1.2.0", "2.0.0"], no => ["1.1.9"] },

        tilde_major => "~1", { yes => ["1.2.3"], no => ["3.2.1"] },
        tilde_minor => "~1.2", { yes => ["1.2.3"], no => ["2.0.0"] },
        tilde_patch => "~1.2.3", { yes => ["1.2.3", "1.2.9"], no => ["1.3.0"] },

        caret_major => "^1", { yes => ["1.2.3"], no => ["3.2.1"] },
        caret_zero_minor => "^0.2", { yes => ["0.2.3"], no => ["0.3.0"] },
        caret_zero_full => "^0.2.3", { yes => ["0.2.3", "0.2.9"], no => ["0.3.0"] },
        caret_zero_zero_patch => "^0.0.3", { yes => ["0.0.3"], no => ["0.0.4"] },
        caret_all_zero_is_exact => "^0.0.0", { yes => ["0.0.0"], no => ["0.0.1"] },
        caret_full => "^1.2.3", { yes => ["1.2.3", "1.9.0"], no => ["2.0.0", "1.2.2"] },

        wildcard_patch => "1.2.*", { yes => ["1.2.0", "1.2.999"], no => ["1.3.0", "3.2.1"] },
        wildcard_minor => "1.x", { yes => ["1.2.3", "1.0.0"], no => ["3.2.1", "2.0.0"] },
        wildcard_minor_repeated => "1.x.x", { yes => ["1.2.3"], no => ["3.2.1"] },
        wildcard_any => "X", { yes => ["1.2.3", "0.0.0"], no => [] },
        wildcard_any_dotted => "X.X", { yes => ["1.2.3"], no => [] },
        wildcard_any_triple => "X.X.X", { yes => ["1.2.3"], no => [] },
        wildcard_star => "*", { yes => ["1.2.3"], no => [] },

        hyphen => "1.0.0 - 2.0.0", { yes => ["1.0.0", "1.2.3", "2.0.0"], no => ["2.0.1", "0.9.9", "3.2.1"] },
        hyphen_with_pre_release_bound => "1.0.0-pre2 - 2.0.0", { yes => ["1.0.0", "1.2.3"], no => ["3.2.1"] },

        partial_major => "1", { yes => ["1.0.0", "1.2.3"], no => ["2.0.0"] },
        partial_minor => "2.0", { yes => ["2.0.0", "2.0.9"], no => ["2.1.0"] },

        and_ranges => ">=1.0.0 & <2.0.0", { yes => ["1.2.3"], no => ["3.2.1", "0.9.0"] },
        or_ranges => "1.* | =2.0.0", { yes => ["1.2.3", "2.0.0"], no => ["2.1.0"] },
        parenthesized => "(1)", { yes => ["1.2.3"], no => ["2.0.0"] },
        nested_parentheses => "((1))", { yes => ["1.2.3"], no => ["2.0.0"] },
        negation => "!(1)", { yes => ["2.0.0"], no => ["1.2.3"] },
        negated_window => "0.* & !(>=1 & <2)", { yes => ["0.5.0"], no => ["1.0.1"] },
        negation_then_and => "!(>=1 & <2) & >=2", { yes => ["2.0.0"], no => ["1.2.3"] },
        negation_of_window_with_full_versions => "!(>=1.0.0 & <2.0.0) & >=2.0.0", { yes => ["2.0.0"], no => ["1.5.0"] },
        complex => "((>=1.0.1+33 & <2+djjj3) | (>=3.0-rc.1 & <4)) & ((1-pre2+3.2-1.5) & (~1.5))", { yes => ["1.5.0"], no => ["2.5.0"] },
    ];

    #[test]
    fn boolean_operators_group_to_the_right() {
        // a & b | c reads as a & (b | c); parentheses force the other grouping
        let grouped = Range::parse("(~1.0 & <2.0) | >2.0").unwrap();
        assert!(grouped.satisfies(&Version::parse("2.5.0").unwrap()));

        let plain = Range::parse("~1.0 & (<2.0 | >2.0)").unwrap();
        assert!(!plain.satisfies(&Version::parse("2.5.0").unwrap()));

        let right_grouped = Range::parse("~1.0 & <2.0 | >2.0").unwrap();
        assert!(!right_grouped.satisfies(&Version::parse("2.5.0").unwrap()));
    }

    #[test]
    fn embedded_pre_release_and_build_literals() {
        let range = Range::parse(">=1.2.3-rc.4").unwrap();
        assert!(!range.satisfies(&Version::parse("1.2.3-rc.3").unwrap()));
        assert!(range.satisfies(&Version::parse("1.2.3-rc.4").unwrap()));
        assert!(range.satisfies(&Version::parse("1.2.3").unwrap()));

        // build metadata on the literal carries no ordering weight
        let range = Range::parse("=1.2.3+sha.123").unwrap();
        assert!(range.satisfies(&Version::parse("1.2.3").unwrap()));
        assert!(range.satisfies(&Version::parse("1.2.3+other").unwrap()));
    }

    #[test]
    fn compiled_ranges_are_reusable() {
        let range = Range::parse("~1.2.3").unwrap();
        for _ in 0..3 {
            assert!(range.satisfies(&Version::parse("1.2.9").unwrap()));
            assert!(!range.satisfies(&Version::parse("1.3.0").unwrap()));
        }
    }

    #[test]
    fn any_matches_every_release() {
        let range = Range::any();
        assert!(range.satisfies(&(0, 0, 0).into()));
        assert!(range.satisfies(&(123, 456, 789).into()));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;
    use crate::lexer::TokenKind::*;

    macro_rules! unexpected_token_tests {
        ($($name:ident => [$input:expr, $found:ident, $offset:expr, [$($expected:ident),+]]),+ ,$(,)?) => {
            $(
                #[test]
                fn $name() {
                    let err = Range::parse($input).unwrap_err();
                    assert_eq!(err.offset(), $offset, "offset for {:?}", $input);
                    match err.kind() {
                        SemverErrorKind::UnexpectedToken { found, expected, .. } => {
                            assert_eq!(*found, $found, "found token for {:?}", $input);
                            assert_eq!(expected, &vec![$($expected),+], "expected set for {:?}", $input);
                        }
                        other => panic!("wrong error kind for {:?}: {:?}", $input, other),
                    }
                }
            )+
        }
    }

    unexpected_token_tests![
        trailing_paren => ["1)", RightParen, 1, [Eoi]],
        unclosed_paren => ["(>1.0.1", Eoi, 7, [RightParen]],
        unclosed_nested_paren => ["((>=1 & <2)", Eoi, 11, [RightParen]],
        dangling_and => [">=1.0.0 &", Eoi, 9, [Numeric]],
        empty_or_operand => ["(>2.0 |)", RightParen, 7, [Numeric]],
        leading_and => ["& 1.2", And, 0, [Numeric]],
        tilde_without_version => ["~", Eoi, 1, [Numeric]],
        not_without_parens => ["!1.0.0", Numeric, 1, [LeftParen]],
        four_part_core => ["1.2.3.4", Dot, 5, [Eoi]],
    ];

    #[test]
    fn empty_input_is_invalid() {
        let err = Range::parse("").unwrap_err();
        assert_eq!(err.kind(), &SemverErrorKind::Empty);
    }

    #[test]
    fn lexing_failures_carry_the_remainder() {
        let err = Range::parse(">=1.0.0 @ 2").unwrap_err();
        assert_eq!(err.offset(), 8);
        assert_eq!(
            err.kind(),
            &SemverErrorKind::NoMatchingToken {
                remainder: "@ 2".into()
            }
        );
    }

    #[test]
    fn malformed_embedded_pre_release_is_rejected() {
        // the suffix is validated with the character-level identifier rules
        assert!(Range::parse(">=1.2.3-rc..1").is_err());
    }
}
