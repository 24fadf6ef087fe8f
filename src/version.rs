use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{
    de::{self, Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};

use crate::{parse, SemverError};

/**
A single pre-release or build identifier.

Identifiers that consist only of digits are numeric and compare numerically;
anything containing a letter or hyphen is alphanumeric and compares lexically.
Numeric identifiers always rank below alphanumeric ones.
*/
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/**
A parsed version: the three-part numeric core plus optional pre-release
identifiers and build metadata.

Versions are totally ordered. The core compares numerically; on a tie the
pre-release identifiers decide, with a release (no pre-release) ranking above
any pre-release of the same core. Build metadata never participates in
ordering, equality, or hashing; it only survives in the textual
representation.
*/
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Vec<Identifier>,
    pub build: Vec<Identifier>,
}

impl Version {
    /**
    Parse a version from a string.

    A partial core (`1` or `1.2`) is accepted; missing components default
    to zero.
    */
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Self, SemverError> {
        parse::parse_full(input.as_ref())
    }

    /// True if this version carries pre-release identifiers.
    pub fn is_prerelease(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// The next major version: increments major, zeroes the rest, and drops
    /// pre-release and build metadata.
    pub fn bump_major(&self) -> Version {
        Version::from((self.major + 1, 0, 0))
    }

    /// The next minor version of the same major.
    pub fn bump_minor(&self) -> Version {
        Version::from((self.major, self.minor + 1, 0))
    }

    /// The next patch version of the same major and minor.
    pub fn bump_patch(&self) -> Version {
        Version::from((self.major, self.minor, self.patch + 1))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre_release == other.pre_release
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let core = (self.major, self.minor, self.patch);
        let other_core = (other.major, other.minor, other.patch);
        core.cmp(&other_core)
            .then_with(|| compare_pre_release(&self.pre_release, &other.pre_release))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Absence of a pre-release outranks presence; otherwise identifier-by-
// identifier, with a strict prefix ranking lower.
fn compare_pre_release(left: &[Identifier], right: &[Identifier]) -> Ordering {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.cmp(right),
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-")?;
            write_identifiers(f, &self.pre_release)?;
        }
        if !self.build.is_empty() {
            write!(f, "+")?;
            write_identifiers(f, &self.build)?;
        }
        Ok(())
    }
}

fn write_identifiers(f: &mut fmt::Formatter<'_>, identifiers: &[Identifier]) -> fmt::Result {
    for (i, identifier) in identifiers.iter().enumerate() {
        if i > 0 {
            write!(f, ".")?;
        }
        write!(f, "{}", identifier)?;
    }
    Ok(())
}

impl std::str::FromStr for Version {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize a Version as a string.
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a SemVer version as a string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Version::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}
