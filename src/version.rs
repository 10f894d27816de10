//! Version parsing, ordering and range containment
//!
//! Supports the version syntax found in artifact descriptors:
//! - Single: "1.0", "2.3.1-rc1", "1.0-SNAPSHOT", "1.0-20120905.133214-3"
//! - Range: "[1.0,2.0)", "(1.0,2.0]", "[1.2,)", "(,1.5]"
//! - Pinned: "[1.4]"
//! - Compound: "[1.0,2.0),[3.0,4.0)"
//!
//! Single versions are tokenised on `.`, `-`, `_`, `+` and on digit/letter
//! transitions. Numbers compare numerically, qualifiers by their well-known
//! rank, and a number always outranks a qualifier.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{GraphError, Result};

/// One component of a tokenised version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Item {
    /// Digits with leading zeros stripped ("0" for zero)
    Number(String),
    /// Lower-cased qualifier with aliases resolved ("" for a release marker)
    Qualifier(String),
}

impl Item {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Item::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }

    fn qualifier(text: &str) -> Self {
        let canonical = match text {
            "a" => "alpha",
            "b" => "beta",
            "m" => "milestone",
            "cr" => "rc",
            "ga" | "final" | "release" => "",
            other => other,
        };
        Item::Qualifier(canonical.to_string())
    }

    fn is_padding(&self) -> bool {
        match self {
            Item::Number(n) => n == "0",
            Item::Qualifier(q) => q.is_empty(),
        }
    }

    /// Compare against a missing item in the shorter version
    fn cmp_absent(&self) -> Ordering {
        match self {
            Item::Number(n) if n == "0" => Ordering::Equal,
            Item::Number(_) => Ordering::Greater,
            Item::Qualifier(q) => qualifier_cmp(q, ""),
        }
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Item::Number(a), Item::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Number(_), Item::Qualifier(_)) => Ordering::Greater,
            (Item::Qualifier(_), Item::Number(_)) => Ordering::Less,
            (Item::Qualifier(a), Item::Qualifier(b)) => qualifier_cmp(a, b),
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn qualifier_rank(q: &str) -> u8 {
    match q {
        "alpha" => 0,
        "beta" => 1,
        "milestone" => 2,
        "rc" => 3,
        "snapshot" => 4,
        "" => 5,
        "sp" => 6,
        _ => 7,
    }
}

fn qualifier_cmp(a: &str, b: &str) -> Ordering {
    let (ra, rb) = (qualifier_rank(a), qualifier_rank(b));
    if ra == 7 && rb == 7 {
        a.cmp(b)
    } else {
        ra.cmp(&rb)
    }
}

fn timestamp_snapshot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^.+-\d{8}\.\d{6}-\d+$").expect("timestamp snapshot pattern is valid")
    })
}

/// A single, concrete-or-snapshot version such as "1.2" or "1.0-SNAPSHOT"
#[derive(Debug, Clone)]
pub struct SingleVersion {
    raw: String,
    items: Vec<Item>,
    snapshot: bool,
}

impl SingleVersion {
    /// Parse a single version string
    pub fn parse(s: &str) -> Result<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(GraphError::invalid_version(s, "empty version"));
        }

        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')))
        {
            return Err(GraphError::invalid_version(
                raw,
                format!("unexpected character '{}'", bad),
            ));
        }

        let lower = raw.to_ascii_lowercase();
        let mut items = Vec::new();
        for token in lower.split(|c| matches!(c, '.' | '-' | '_' | '+')) {
            if token.is_empty() {
                return Err(GraphError::invalid_version(raw, "empty version component"));
            }
            split_transitions(token, &mut items);
        }

        while items.last().is_some_and(Item::is_padding) {
            items.pop();
        }

        let snapshot = lower.ends_with("snapshot") || timestamp_snapshot_pattern().is_match(raw);

        Ok(SingleVersion {
            raw: raw.to_string(),
            items,
            snapshot,
        })
    }

    /// True for "-SNAPSHOT" versions and their deployed timestamp form
    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    /// True when this version is a fixed release
    pub fn is_release(&self) -> bool {
        !self.snapshot
    }

    /// The version as originally written
    pub fn render_standard(&self) -> &str {
        &self.raw
    }
}

/// Split a separator-free token on digit/letter boundaries
fn split_transitions(token: &str, items: &mut Vec<Item>) {
    let mut start = 0;
    let bytes = token.as_bytes();
    for i in 1..=bytes.len() {
        let boundary =
            i == bytes.len() || bytes[i].is_ascii_digit() != bytes[i - 1].is_ascii_digit();
        if boundary {
            let part = &token[start..i];
            if bytes[start].is_ascii_digit() {
                items.push(Item::number(part));
            } else {
                // padding before a qualifier carries no weight: 1.0-rc1 == 1-rc1
                while items.last().is_some_and(Item::is_padding) {
                    items.pop();
                }
                items.push(Item::qualifier(part));
            }
            start = i;
        }
    }
}

impl PartialEq for SingleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for SingleVersion {}

impl Hash for SingleVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl Ord for SingleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let ord = match (self.items.get(i), other.items.get(i)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(a), None) => a.cmp_absent(),
                (None, Some(b)) => b.cmp_absent().reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for SingleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SingleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for SingleVersion {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A bounded or half-open interval of versions
///
/// An absent bound is always stored as exclusive so that "[,1.0]" and
/// "(,1.0]" are the same range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeVersion {
    lower: Option<SingleVersion>,
    upper: Option<SingleVersion>,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl RangeVersion {
    /// Parse the body of one bracketed range, e.g. `1.0,2.0` between `[` and `)`
    fn from_body(
        input: &str,
        lower_inclusive: bool,
        body: &str,
        upper_inclusive: bool,
    ) -> Result<Self> {
        if body.contains(['[', '(', ']', ')']) {
            return Err(GraphError::invalid_version(input, "nested range brackets"));
        }

        let Some((low, high)) = body.split_once(',') else {
            if !lower_inclusive || !upper_inclusive {
                return Err(GraphError::invalid_version(
                    input,
                    "a pinned version must use '[' and ']'",
                ));
            }
            let pinned = SingleVersion::parse(body)?;
            return Ok(RangeVersion {
                lower: Some(pinned.clone()),
                upper: Some(pinned),
                lower_inclusive: true,
                upper_inclusive: true,
            });
        };

        if high.contains(',') {
            return Err(GraphError::invalid_version(input, "a range has at most two bounds"));
        }

        let parse_bound = |text: &str| -> Result<Option<SingleVersion>> {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                SingleVersion::parse(text).map(Some)
            }
        };

        let lower = parse_bound(low)?;
        let upper = parse_bound(high)?;

        match (&lower, &upper) {
            (None, None) => {
                return Err(GraphError::invalid_version(input, "a range needs at least one bound"));
            }
            (Some(l), Some(u)) if l > u => {
                return Err(GraphError::invalid_version(
                    input,
                    format!("lower bound {} is above upper bound {}", l, u),
                ));
            }
            (Some(l), Some(u)) if l == u && !(lower_inclusive && upper_inclusive) => {
                return Err(GraphError::invalid_version(input, "range excludes its only version"));
            }
            _ => {}
        }

        Ok(RangeVersion {
            lower_inclusive: lower.is_some() && lower_inclusive,
            upper_inclusive: upper.is_some() && upper_inclusive,
            lower,
            upper,
        })
    }

    /// True for "[v]" style ranges that admit exactly one version
    pub fn is_pinned(&self) -> bool {
        self.lower_inclusive
            && self.upper_inclusive
            && self.lower.is_some()
            && self.lower == self.upper
    }

    pub fn lower(&self) -> Option<&SingleVersion> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&SingleVersion> {
        self.upper.as_ref()
    }

    /// Check whether a version falls inside this range
    pub fn contains(&self, version: &SingleVersion) -> bool {
        let above_lower = match &self.lower {
            Some(l) if self.lower_inclusive => version >= l,
            Some(l) => version > l,
            None => true,
        };
        let below_upper = match &self.upper {
            Some(u) if self.upper_inclusive => version <= u,
            Some(u) => version < u,
            None => true,
        };
        above_lower && below_upper
    }
}

impl fmt::Display for RangeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pinned() {
            if let Some(v) = &self.lower {
                return write!(f, "[{}]", v);
            }
        }
        f.write_str(if self.lower_inclusive { "[" } else { "(" })?;
        if let Some(l) = &self.lower {
            write!(f, "{}", l)?;
        }
        f.write_str(",")?;
        if let Some(u) = &self.upper {
            write!(f, "{}", u)?;
        }
        f.write_str(if self.upper_inclusive { "]" } else { ")" })
    }
}

/// Two or more ranges; a version matches if any of them contains it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundVersion {
    components: Vec<RangeVersion>,
}

impl CompoundVersion {
    pub fn components(&self) -> &[RangeVersion] {
        &self.components
    }

    pub fn contains(&self, version: &SingleVersion) -> bool {
        self.components.iter().any(|r| r.contains(version))
    }
}

impl fmt::Display for CompoundVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// A parsed version specification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// Exactly one version, written bare ("1.0")
    Single(SingleVersion),
    /// One bracketed range or pin
    Range(RangeVersion),
    /// Several comma-separated ranges
    Compound(CompoundVersion),
}

impl VersionSpec {
    /// Parse any version specification
    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(GraphError::invalid_version(s, "empty version"));
        }

        if !input.starts_with(['[', '(']) {
            return SingleVersion::parse(input).map(VersionSpec::Single);
        }

        let mut ranges = parse_ranges(input)?;
        if ranges.len() == 1 {
            Ok(VersionSpec::Range(ranges.remove(0)))
        } else {
            Ok(VersionSpec::Compound(CompoundVersion { components: ranges }))
        }
    }

    /// Canonical text form; parsing it yields an equal spec
    pub fn render_standard(&self) -> String {
        self.to_string()
    }

    /// Check whether a concrete version satisfies this spec
    pub fn contains(&self, version: &SingleVersion) -> bool {
        match self {
            VersionSpec::Single(v) => v == version,
            VersionSpec::Range(r) => r.contains(version),
            VersionSpec::Compound(c) => c.contains(version),
        }
    }

    /// True when the spec denotes exactly one version
    pub fn is_single(&self) -> bool {
        self.single_version().is_some()
    }

    /// True when the spec denotes exactly one non-snapshot version
    pub fn is_concrete(&self) -> bool {
        self.single_version().is_some_and(SingleVersion::is_release)
    }

    /// True when the spec denotes exactly one snapshot version
    pub fn is_snapshot(&self) -> bool {
        self.single_version().is_some_and(SingleVersion::is_snapshot)
    }

    /// The one version this spec denotes, if it is single
    pub fn single_version(&self) -> Option<&SingleVersion> {
        match self {
            VersionSpec::Single(v) => Some(v),
            VersionSpec::Range(r) if r.is_pinned() => r.lower(),
            _ => None,
        }
    }
}

/// Parse a comma-separated list of bracketed ranges
fn parse_ranges(input: &str) -> Result<Vec<RangeVersion>> {
    let mut ranges = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let lower_inclusive = if rest.starts_with('[') {
            true
        } else if rest.starts_with('(') {
            false
        } else {
            return Err(GraphError::invalid_version(input, "expected '[' or '('"));
        };

        let close_at = rest
            .find([']', ')'])
            .ok_or_else(|| GraphError::invalid_version(input, "unbalanced brackets"))?;
        let upper_inclusive = rest[close_at..].starts_with(']');

        ranges.push(RangeVersion::from_body(
            input,
            lower_inclusive,
            &rest[1..close_at],
            upper_inclusive,
        )?);

        rest = rest[close_at + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(GraphError::invalid_version(input, "trailing ',' after range"));
            }
        } else if !rest.is_empty() {
            return Err(GraphError::invalid_version(input, "expected ',' between ranges"));
        }
    }

    Ok(ranges)
}

impl From<SingleVersion> for VersionSpec {
    fn from(version: SingleVersion) -> Self {
        VersionSpec::Single(version)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Single(v) => write!(f, "{}", v),
            VersionSpec::Range(r) => write!(f, "{}", r),
            VersionSpec::Compound(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for VersionSpec {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SingleVersion {
        SingleVersion::parse(s).unwrap()
    }

    #[test]
    fn test_version_comparison() {
        assert!(v("1.2") < v("1.10"));
        assert!(v("1.0") < v("1.0.1"));
        assert!(v("1.9") < v("2.0"));
        assert!(v("2.0") > v("1.999.999"));
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0-ga"));
        assert_eq!(v("2.0"), v("2.0.Final"));
        assert_eq!(v("007"), v("7"));
    }

    #[test]
    fn test_padding_before_qualifier_is_ignored() {
        use std::collections::HashSet;

        assert_eq!(v("1.0-SNAPSHOT"), v("1-SNAPSHOT"));
        assert_eq!(v("1.0-SNAPSHOT").cmp(&v("1-SNAPSHOT")), Ordering::Equal);
        assert_eq!(v("1.0.0-rc1"), v("1-rc1"));
        assert_eq!(v("2.0.beta"), v("2-beta"));
        assert_ne!(v("1.0.1-rc1"), v("1-rc1"));

        let unique: HashSet<SingleVersion> =
            ["1.0-SNAPSHOT", "1-SNAPSHOT", "1.0.0-SNAPSHOT"].into_iter().map(v).collect();
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_qualifier_ordering() {
        assert!(v("1.0-alpha1") < v("1.0-beta1"));
        assert!(v("1.0-beta") < v("1.0-m1"));
        assert!(v("1.0-m1") < v("1.0-rc1"));
        assert!(v("1.0-rc1") < v("1.0-SNAPSHOT"));
        assert!(v("1.0-SNAPSHOT") < v("1.0"));
        assert!(v("1.0") < v("1.0-sp1"));
        assert!(v("1.0-sp1") < v("1.0-xyz"));
        assert!(v("1.0-xyz") < v("1.0.1"));
        assert_eq!(v("1.0-cr1"), v("1.0-rc1"));
    }

    #[test]
    fn test_snapshot_detection() {
        assert!(v("1.0-SNAPSHOT").is_snapshot());
        assert!(v("2.1-snapshot").is_snapshot());
        assert!(v("1.0-20120905.133214-3").is_snapshot());
        assert!(!v("1.0").is_snapshot());
        assert!(v("1.0").is_release());
    }

    #[test]
    fn test_invalid_single_versions() {
        assert!(SingleVersion::parse("").is_err());
        assert!(SingleVersion::parse("   ").is_err());
        assert!(SingleVersion::parse("1..0").is_err());
        assert!(SingleVersion::parse("1.0 beta").is_err());
        assert!(SingleVersion::parse("1.0,2.0").is_err());
    }

    #[test]
    fn test_range_containment() {
        let spec = VersionSpec::parse("[1.0,2.0)").unwrap();
        assert!(spec.contains(&v("1.0")));
        assert!(spec.contains(&v("1.5")));
        assert!(spec.contains(&v("1.9")));
        assert!(!spec.contains(&v("2.0")));
        assert!(!spec.contains(&v("0.9")));

        let spec = VersionSpec::parse("(1.0,2.0]").unwrap();
        assert!(!spec.contains(&v("1.0")));
        assert!(spec.contains(&v("2.0")));
    }

    #[test]
    fn test_open_ranges() {
        let spec = VersionSpec::parse("[1.2,)").unwrap();
        assert!(spec.contains(&v("1.2")));
        assert!(spec.contains(&v("99")));
        assert!(!spec.contains(&v("1.1")));

        let spec = VersionSpec::parse("(,1.5]").unwrap();
        assert!(spec.contains(&v("0.1")));
        assert!(spec.contains(&v("1.5")));
        assert!(!spec.contains(&v("1.6")));

        assert_eq!(spec, VersionSpec::parse("[,1.5]").unwrap());
    }

    #[test]
    fn test_pinned_range_is_single() {
        let spec = VersionSpec::parse("[1.4]").unwrap();
        assert!(spec.is_single());
        assert!(spec.is_concrete());
        assert_eq!(spec.single_version(), Some(&v("1.4")));
        assert!(spec.contains(&v("1.4")));
        assert!(!spec.contains(&v("1.4.1")));
        assert_ne!(spec, VersionSpec::parse("1.4").unwrap());
    }

    #[test]
    fn test_compound_spec() {
        let spec = VersionSpec::parse("[1.0,2.0), [3.0,4.0)").unwrap();
        assert!(matches!(spec, VersionSpec::Compound(_)));
        assert!(spec.contains(&v("1.5")));
        assert!(spec.contains(&v("3.0")));
        assert!(!spec.contains(&v("2.5")));
        assert!(!spec.is_single());
        assert!(!spec.is_concrete());
    }

    #[test]
    fn test_single_spec_predicates() {
        let release = VersionSpec::parse("1.0").unwrap();
        assert!(release.is_single());
        assert!(release.is_concrete());
        assert!(!release.is_snapshot());

        let snapshot = VersionSpec::parse("1.0-SNAPSHOT").unwrap();
        assert!(snapshot.is_single());
        assert!(!snapshot.is_concrete());
        assert!(snapshot.is_snapshot());

        let range = VersionSpec::parse("[1.0,2.0)").unwrap();
        assert!(!range.is_single());
        assert!(!range.is_concrete());
        assert!(!range.is_snapshot());
    }

    #[test]
    fn test_render_round_trip() {
        for text in [
            "1.0",
            "1.0-SNAPSHOT",
            "[1.0,2.0)",
            "(1.0,2.0]",
            "[1.2,)",
            "(,1.5]",
            "[1.4]",
            "[1.0,2.0),[3.0,4.0)",
        ] {
            let spec = VersionSpec::parse(text).unwrap();
            let rendered = spec.render_standard();
            assert_eq!(rendered, text);
            assert_eq!(VersionSpec::parse(&rendered).unwrap(), spec);
        }

        let spec = VersionSpec::parse(" [ 1.0 , 2.0 ) ").unwrap();
        assert_eq!(spec.render_standard(), "[1.0,2.0)");
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(VersionSpec::parse("[1.0,2.0").is_err());
        assert!(VersionSpec::parse("[2.0,1.0]").is_err());
        assert!(VersionSpec::parse("[,]").is_err());
        assert!(VersionSpec::parse("(1.0)").is_err());
        assert!(VersionSpec::parse("[1.0,1.0)").is_err());
        assert!(VersionSpec::parse("[1.0,2.0,3.0]").is_err());
        assert!(VersionSpec::parse("[1.0,2.0),").is_err());
        assert!(VersionSpec::parse("[1.0,2.0) x").is_err());

        let err = VersionSpec::parse("[1.0,2.0").unwrap_err();
        assert!(matches!(err, GraphError::InvalidVersion { .. }));
    }
}
