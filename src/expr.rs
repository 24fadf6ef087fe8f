//! The compiled form of a range expression: comparison leaves combined with
//! `and`/`or`/`not`. Trees are immutable once built and hold no state, so one
//! tree can be evaluated against any number of versions, concurrently.

use std::fmt;

use crate::version::Version;

/// A comparison operator applied to a fixed version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Exact,
    NotEqual,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
}

impl Operation {
    fn test(self, candidate: &Version, target: &Version) -> bool {
        match self {
            Operation::Exact => candidate == target,
            Operation::NotEqual => candidate != target,
            Operation::GreaterThan => candidate > target,
            Operation::GreaterThanEquals => candidate >= target,
            Operation::LessThan => candidate < target,
            Operation::LessThanEquals => candidate <= target,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Exact => write!(f, "="),
            Operation::NotEqual => write!(f, "!="),
            Operation::GreaterThan => write!(f, ">"),
            Operation::GreaterThanEquals => write!(f, ">="),
            Operation::LessThan => write!(f, "<"),
            Operation::LessThanEquals => write!(f, "<="),
        }
    }
}

/**
A boolean predicate over versions.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Comparison(Operation, Version),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    /// Evaluates the tree against a candidate version.
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            Expression::Comparison(operation, target) => operation.test(version, target),
            Expression::And(left, right) => left.satisfies(version) && right.satisfies(version),
            Expression::Or(left, right) => left.satisfies(version) || right.satisfies(version),
            Expression::Not(inner) => !inner.satisfies(version),
        }
    }

    pub fn and(self, other: Expression) -> Expression {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expression) -> Expression {
        Expression::Or(Box::new(self), Box::new(other))
    }
}

/// Negates an expression.
pub fn not(expr: Expression) -> Expression {
    Expression::Not(Box::new(expr))
}

pub fn eq(version: Version) -> Expression {
    Expression::Comparison(Operation::Exact, version)
}

pub fn neq(version: Version) -> Expression {
    Expression::Comparison(Operation::NotEqual, version)
}

pub fn gt(version: Version) -> Expression {
    Expression::Comparison(Operation::GreaterThan, version)
}

pub fn gte(version: Version) -> Expression {
    Expression::Comparison(Operation::GreaterThanEquals, version)
}

pub fn lt(version: Version) -> Expression {
    Expression::Comparison(Operation::LessThan, version)
}

pub fn lte(version: Version) -> Expression {
    Expression::Comparison(Operation::LessThanEquals, version)
}

// Renders a form the range parser accepts back. Composite operands are
// parenthesized because the textual grammar groups `a & b | c` to the right.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison(operation, version) => {
                write!(f, "{}{}", operation, version)
            }
            Expression::And(left, right) => {
                write_operand(f, left)?;
                write!(f, " & ")?;
                write_operand(f, right)
            }
            Expression::Or(left, right) => {
                write_operand(f, left)?;
                write!(f, " | ")?;
                write_operand(f, right)
            }
            Expression::Not(inner) => write!(f, "!({})", inner),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression) -> fmt::Result {
    match operand {
        Expression::And(..) | Expression::Or(..) => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(input: &str) -> Version {
        Version::parse(input).unwrap()
    }

    #[test]
    fn comparison_leaves() {
        assert!(eq(v("1.2.3")).satisfies(&v("1.2.3")));
        assert!(!eq(v("1.2.3")).satisfies(&v("3.2.1")));

        assert!(neq(v("1.0.0")).satisfies(&v("2.0.0")));
        assert!(!neq(v("1.0.0")).satisfies(&v("1.0.0")));

        assert!(gt(v("2.0.0")).satisfies(&v("3.2.1")));
        assert!(!gt(v("2.0.0")).satisfies(&v("2.0.0")));

        assert!(gte(v("2.0.0")).satisfies(&v("2.0.0")));
        assert!(gte(v("2.0.0")).satisfies(&v("3.2.1")));
        assert!(!gte(v("2.0.0")).satisfies(&v("1.2.3")));

        assert!(lt(v("2.0.0")).satisfies(&v("1.2.3")));
        assert!(!lt(v("2.0.0")).satisfies(&v("2.0.0")));

        assert!(lte(v("2.0.0")).satisfies(&v("1.2.3")));
        assert!(lte(v("2.0.0")).satisfies(&v("2.0.0")));
        assert!(!lte(v("2.0.0")).satisfies(&v("3.2.1")));
    }

    #[test]
    fn combinators() {
        let between = gt(v("1.0.0")).and(lt(v("2.0.0")));
        assert!(between.satisfies(&v("1.5.0")));
        assert!(!between.satisfies(&v("2.5.0")));

        let either = lt(v("1.0.0")).or(gt(v("1.0.0")));
        assert!(either.satisfies(&v("1.5.0")));
        assert!(!either.satisfies(&v("1.0.0")));

        assert!(not(eq(v("1.0.0"))).satisfies(&v("2.0.0")));
        assert!(!not(eq(v("1.0.0"))).satisfies(&v("1.0.0")));
    }

    #[test]
    fn comparisons_track_pre_release_ordering() {
        assert!(gte(v("1.0.0-alpha")).satisfies(&v("1.0.0")));
        assert!(!gte(v("1.0.0")).satisfies(&v("1.0.0-alpha")));
        assert!(lt(v("1.0.0")).satisfies(&v("1.0.0-alpha")));
    }

    #[test]
    fn display_parenthesizes_composite_operands() {
        let expr = gt(v("1.0.0")).and(lt(v("2.0.0")).or(gt(v("3.0.0"))));
        assert_eq!(expr.to_string(), ">1.0.0 & (<2.0.0 | >3.0.0)");

        let grouped = gt(v("1.0.0")).and(lt(v("2.0.0"))).or(gt(v("3.0.0")));
        assert_eq!(grouped.to_string(), "(>1.0.0 & <2.0.0) | >3.0.0");

        assert_eq!(
            not(eq(v("1.0.0"))).to_string(),
            "!(=1.0.0)"
        );
    }
}
