use std::fmt;

use crate::version::{Identifier, Version};
use crate::{SemverError, SemverErrorKind};

/**
The terminal alphabet of the version grammar.

Every character of the input falls into exactly one class; `Eoi` stands for
the end of the input and `Illegal` for anything outside the grammar.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharKind {
    Digit,
    Letter,
    Dot,
    Hyphen,
    Plus,
    Eoi,
    Illegal,
}

impl CharKind {
    pub(crate) fn of(ch: Option<char>) -> CharKind {
        match ch {
            None => CharKind::Eoi,
            Some(c) if c.is_ascii_digit() => CharKind::Digit,
            Some(c) if c.is_ascii_alphabetic() => CharKind::Letter,
            Some('.') => CharKind::Dot,
            Some('-') => CharKind::Hyphen,
            Some('+') => CharKind::Plus,
            Some(_) => CharKind::Illegal,
        }
    }

    fn matches(self, ch: Option<char>) -> bool {
        CharKind::of(ch) == self
    }
}

impl fmt::Display for CharKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharKind::Digit => write!(f, "digit"),
            CharKind::Letter => write!(f, "letter"),
            CharKind::Dot => write!(f, "`.`"),
            CharKind::Hyphen => write!(f, "`-`"),
            CharKind::Plus => write!(f, "`+`"),
            CharKind::Eoi => write!(f, "end of input"),
            CharKind::Illegal => write!(f, "illegal character"),
        }
    }
}

// A left-to-right character cursor with arbitrary lookahead. Offsets are byte
// offsets into the original input so error spans line up with it.
struct Chars<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Chars<'a> {
    fn new(input: &'a str) -> Result<Self, SemverError> {
        if input.is_empty() {
            return Err(SemverError::new(input, (0, 0), SemverErrorKind::Empty));
        }
        Ok(Chars {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        })
    }

    fn peek(&self) -> Option<char> {
        self.lookahead(1)
    }

    fn lookahead(&self, k: usize) -> Option<char> {
        self.chars.get(self.pos + k - 1).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn matches_any(&self, kinds: &[CharKind]) -> bool {
        kinds.iter().any(|kind| kind.matches(self.peek()))
    }

    // Consumes the next character if its class is in `expected`; `Eoi` in the
    // expected set matches the end of the input without advancing.
    fn consume(&mut self, expected: &[CharKind]) -> Result<Option<char>, SemverError> {
        let next = self.peek();
        for kind in expected {
            if kind.matches(next) {
                if next.is_some() {
                    self.pos += 1;
                }
                return Ok(next);
            }
        }
        Err(self.unexpected(expected))
    }

    fn unexpected(&self, expected: &[CharKind]) -> SemverError {
        let next = self.peek();
        let len = next.map(char::len_utf8).unwrap_or(0);
        SemverError::new(
            self.input,
            (self.offset(), len),
            SemverErrorKind::UnexpectedCharacter {
                unexpected: next,
                expected: expected.to_vec(),
            },
        )
    }

    // The first class out of `kinds` that occurs in the remaining input, or
    // `Eoi` when none does.
    fn nearest(&self, kinds: &[CharKind]) -> CharKind {
        for &(_, c) in &self.chars[self.pos..] {
            for &kind in kinds {
                if kind.matches(Some(c)) {
                    return kind;
                }
            }
        }
        CharKind::Eoi
    }

    // True if a character of one of `kinds` occurs before the next character
    // of class `boundary`.
    fn lookahead_before(&self, boundary: CharKind, kinds: &[CharKind]) -> bool {
        for &(_, c) in &self.chars[self.pos..] {
            if boundary.matches(Some(c)) {
                return false;
            }
            if kinds.iter().any(|kind| kind.matches(Some(c))) {
                return true;
            }
        }
        false
    }
}

// valid-semver ::= core ( "-" pre-release )? ( "+" build )?
pub(crate) fn parse_full(input: &str) -> Result<Version, SemverError> {
    let mut chars = Chars::new(input)?;
    let (major, minor, patch) = version_core(&mut chars)?;

    let mut pre_release = Vec::new();
    let mut build = Vec::new();
    match chars.consume(&[CharKind::Hyphen, CharKind::Plus, CharKind::Eoi])? {
        Some('-') => {
            pre_release = identifiers(&mut chars, IdentifierPosition::PreRelease)?;
            if let Some('+') = chars.consume(&[CharKind::Plus, CharKind::Eoi])? {
                build = identifiers(&mut chars, IdentifierPosition::Build)?;
            }
        }
        Some('+') => {
            build = identifiers(&mut chars, IdentifierPosition::Build)?;
        }
        _ => {}
    }
    chars.consume(&[CharKind::Eoi])?;

    Ok(Version {
        major,
        minor,
        patch,
        pre_release,
        build,
    })
}

/// Parses a bare dot-separated pre-release identifier sequence, as it appears
/// after the `-` of a full version.
pub(crate) fn parse_pre_release(input: &str) -> Result<Vec<Identifier>, SemverError> {
    let mut chars = Chars::new(input)?;
    let identifiers = identifiers(&mut chars, IdentifierPosition::PreRelease)?;
    chars.consume(&[CharKind::Eoi])?;
    Ok(identifiers)
}

/// Parses a bare dot-separated build metadata sequence, as it appears after
/// the `+` of a full version.
pub(crate) fn parse_build(input: &str) -> Result<Vec<Identifier>, SemverError> {
    let mut chars = Chars::new(input)?;
    let identifiers = identifiers(&mut chars, IdentifierPosition::Build)?;
    chars.consume(&[CharKind::Eoi])?;
    Ok(identifiers)
}

// core ::= major ( "." minor ( "." patch )? )?
//
// Missing components default to zero.
fn version_core(chars: &mut Chars) -> Result<(u64, u64, u64), SemverError> {
    let major = numeric_component(chars)?;
    let mut minor = 0;
    let mut patch = 0;
    if CharKind::Dot.matches(chars.peek()) {
        chars.advance();
        minor = numeric_component(chars)?;
        if CharKind::Dot.matches(chars.peek()) {
            chars.advance();
            patch = numeric_component(chars)?;
        }
    }
    Ok((major, minor, patch))
}

// num ::= "0" | nonzero-digit digit*
fn numeric_component(chars: &mut Chars) -> Result<u64, SemverError> {
    check_leading_zeroes(chars)?;
    let start = chars.offset();
    let digits = digits(chars)?;
    number(chars, start, &digits)
}

#[derive(Clone, Copy, PartialEq)]
enum IdentifierPosition {
    PreRelease,
    Build,
}

// pre-release / build ::= identifier ( "." identifier )*
fn identifiers(
    chars: &mut Chars,
    position: IdentifierPosition,
) -> Result<Vec<Identifier>, SemverError> {
    ensure_valid_lookahead(chars)?;
    let mut identifiers = Vec::new();
    loop {
        identifiers.push(identifier(chars, position)?);
        if CharKind::Dot.matches(chars.peek()) {
            chars.advance();
            continue;
        }
        break;
    }
    Ok(identifiers)
}

// identifier ::= [0-9A-Za-z-]+
//
// A run is alphanumeric if a letter or hyphen occurs anywhere before the next
// structural character, so the classification needs the boundary lookahead
// rather than just the first character.
fn identifier(chars: &mut Chars, position: IdentifierPosition) -> Result<Identifier, SemverError> {
    check_for_empty_identifier(chars)?;
    let boundary = match position {
        IdentifierPosition::PreRelease => {
            chars.nearest(&[CharKind::Dot, CharKind::Plus, CharKind::Eoi])
        }
        IdentifierPosition::Build => chars.nearest(&[CharKind::Dot, CharKind::Eoi]),
    };
    if chars.lookahead_before(boundary, &[CharKind::Letter, CharKind::Hyphen]) {
        return Ok(Identifier::AlphaNumeric(alphanumeric(chars)?));
    }
    match position {
        IdentifierPosition::PreRelease => {
            check_leading_zeroes(chars)?;
            let start = chars.offset();
            let digits = digits(chars)?;
            Ok(Identifier::Numeric(number(chars, start, &digits)?))
        }
        IdentifierPosition::Build => {
            // Build digits carry no ordering weight and may keep leading
            // zeroes, so oversized or zero-padded runs stay verbatim.
            let digits = digits(chars)?;
            Ok(match digits.parse::<u64>() {
                Ok(n) if !(digits.len() > 1 && digits.starts_with('0')) => Identifier::Numeric(n),
                _ => Identifier::AlphaNumeric(digits),
            })
        }
    }
}

fn alphanumeric(chars: &mut Chars) -> Result<String, SemverError> {
    let mut lexeme = String::new();
    loop {
        if let Some(ch) = chars.consume(&[CharKind::Digit, CharKind::Letter, CharKind::Hyphen])? {
            lexeme.push(ch);
        }
        if !chars.matches_any(&[CharKind::Digit, CharKind::Letter, CharKind::Hyphen]) {
            return Ok(lexeme);
        }
    }
}

fn digits(chars: &mut Chars) -> Result<String, SemverError> {
    let mut lexeme = String::new();
    loop {
        if let Some(ch) = chars.consume(&[CharKind::Digit])? {
            lexeme.push(ch);
        }
        if !CharKind::Digit.matches(chars.peek()) {
            return Ok(lexeme);
        }
    }
}

fn number(chars: &Chars, start: usize, digits: &str) -> Result<u64, SemverError> {
    digits.parse().map_err(|_| {
        SemverError::new(
            chars.input,
            (start, digits.len()),
            SemverErrorKind::NumberOverflow,
        )
    })
}

fn check_leading_zeroes(chars: &Chars) -> Result<(), SemverError> {
    if chars.lookahead(1) == Some('0') && CharKind::Digit.matches(chars.lookahead(2)) {
        return Err(SemverError::new(
            chars.input,
            (chars.offset(), 1),
            SemverErrorKind::LeadingZero,
        ));
    }
    Ok(())
}

// Two consecutive separators, or a separator at the boundary, mean an empty
// identifier.
fn check_for_empty_identifier(chars: &Chars) -> Result<(), SemverError> {
    if chars.matches_any(&[CharKind::Dot, CharKind::Plus, CharKind::Eoi]) {
        return Err(chars.unexpected(&[CharKind::Digit, CharKind::Letter, CharKind::Hyphen]));
    }
    Ok(())
}

fn ensure_valid_lookahead(chars: &Chars) -> Result<(), SemverError> {
    if !chars.matches_any(&[CharKind::Digit, CharKind::Letter, CharKind::Hyphen]) {
        return Err(chars.unexpected(&[CharKind::Digit, CharKind::Letter, CharKind::Hyphen]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CharKind::*;
    use super::*;

    // Each malformed input is checked for the exact offending character, its
    // offset, and the ordered set of classes that were acceptable there.
    macro_rules! unexpected_character_tests {
        ($($name:ident => [$input:expr, $unexpected:expr, $offset:expr, [$($expected:ident),+]]),+ ,$(,)?) => {
            $(
                #[test]
                fn $name() {
                    let err = parse_full($input).unwrap_err();
                    assert_eq!(err.offset(), $offset, "offset for {:?}", $input);
                    match err.kind() {
                        SemverErrorKind::UnexpectedCharacter { unexpected, expected } => {
                            assert_eq!(*unexpected, $unexpected, "character for {:?}", $input);
                            assert_eq!(expected, &vec![$($expected),+], "expected set for {:?}", $input);
                        }
                        other => panic!("wrong error kind for {:?}: {:?}", $input, other),
                    }
                }
            )+
        }
    }

    unexpected_character_tests![
        trailing_space => ["1 ", Some(' '), 1, [Hyphen, Plus, Eoi]],
        dot_then_end => ["1.", None, 2, [Digit]],
        second_dot_then_end => ["1.2.", None, 4, [Digit]],
        letter_major => ["a.b.c", Some('a'), 0, [Digit]],
        letter_minor => ["1.b.c", Some('b'), 2, [Digit]],
        letter_patch => ["1.2.c", Some('c'), 4, [Digit]],
        illegal_major => ["!.2.3", Some('!'), 0, [Digit]],
        illegal_minor => ["1.!.3", Some('!'), 2, [Digit]],
        illegal_patch => ["1.2.!", Some('!'), 4, [Digit]],
        leading_v => ["v1.2.3", Some('v'), 0, [Digit]],
        dangling_hyphen => ["1.2.3-", None, 6, [Digit, Letter, Hyphen]],
        space_in_core => ["1.2. 3", Some(' '), 4, [Digit]],
        equals_after_core => ["1.2.3=alpha", Some('='), 5, [Hyphen, Plus, Eoi]],
        tilde_after_core => ["1.2.3~beta", Some('~'), 5, [Hyphen, Plus, Eoi]],
        illegal_in_pre_release => ["1.2.3-be$ta", Some('$'), 8, [Plus, Eoi]],
        second_plus => ["1.2.3+b1+b2", Some('+'), 8, [Eoi]],
        bang_in_pre_release => ["1.2.3-rc!", Some('!'), 8, [Plus, Eoi]],
        plus_after_hyphen => ["1.2.3-+", Some('+'), 6, [Digit, Letter, Hyphen]],
        at_after_hyphen => ["1.2.3-@", Some('@'), 6, [Digit, Letter, Hyphen]],
        at_after_plus => ["1.2.3+@", Some('@'), 6, [Digit, Letter, Hyphen]],
        pre_release_trailing_dot => ["1.2.3-rc.", None, 9, [Digit, Letter, Hyphen]],
        build_trailing_dot => ["1.2.3+b.", None, 8, [Digit, Letter, Hyphen]],
        empty_identifier_before_plus => ["1.2.3-b.+b", Some('+'), 8, [Digit, Letter, Hyphen]],
        double_dot_in_pre_release => ["1.2.3-rc..", Some('.'), 9, [Digit, Letter, Hyphen]],
        double_dot_in_build => ["1.2.3-a+b..", Some('.'), 10, [Digit, Letter, Hyphen]],
    ];

    #[test]
    fn leading_zeroes_are_rejected_with_their_own_kind() {
        let err = parse_full("01.0.0").unwrap_err();
        assert_eq!(err.kind(), &SemverErrorKind::LeadingZero);
        assert_eq!(err.offset(), 0);

        let err = parse_full("1.0.0-01").unwrap_err();
        assert_eq!(err.kind(), &SemverErrorKind::LeadingZero);
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn oversized_components_do_not_wrap() {
        let err = parse_full("18446744073709551616.0.0").unwrap_err();
        assert_eq!(err.kind(), &SemverErrorKind::NumberOverflow);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn pre_release_fragments_parse_standalone() {
        assert_eq!(
            parse_pre_release("alpha.1").unwrap(),
            vec![
                Identifier::AlphaNumeric("alpha".into()),
                Identifier::Numeric(1)
            ]
        );
        assert!(parse_pre_release("alpha..1").is_err());
        assert!(parse_pre_release("01").is_err());
    }

    #[test]
    fn build_fragments_allow_leading_zeroes() {
        assert_eq!(
            parse_build("0001.sha").unwrap(),
            vec![
                Identifier::AlphaNumeric("0001".into()),
                Identifier::AlphaNumeric("sha".into())
            ]
        );
    }

    #[test]
    fn classifies_characters() {
        assert_eq!(CharKind::of(Some('7')), Digit);
        assert_eq!(CharKind::of(Some('z')), Letter);
        assert_eq!(CharKind::of(Some('Z')), Letter);
        assert_eq!(CharKind::of(Some('.')), Dot);
        assert_eq!(CharKind::of(Some('-')), Hyphen);
        assert_eq!(CharKind::of(Some('+')), Plus);
        assert_eq!(CharKind::of(None), Eoi);
        assert_eq!(CharKind::of(Some(' ')), Illegal);
        assert_eq!(CharKind::of(Some('@')), Illegal);
    }
}
