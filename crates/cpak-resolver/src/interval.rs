//! Version requirement parsing and matching.
//!
//! A requirement is either a bare version (exact match) or a conjunction of
//! comparators joined by `and`:
//!
//! - `1.2.3` or `=1.2.3` — exactly that version
//! - `>=1.2.0` — a half-open range
//! - `>=0.1.2 and <3.4.0` — a bounded range
//!
//! Versions compare by semver precedence, so prerelease identifiers order
//! below their release (`1.0.0-alpha < 1.0.0`).

use std::cmp::Ordering;

use semver::Version;

use cpak_util::errors::CpakError;

/// Comparison operator in a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Lt,
    Le,
    Gt,
    Ge,
    Exact,
}

/// A single `op version` term.
#[derive(Debug, Clone)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

/// A parsed version requirement: a predicate over concrete versions.
#[derive(Debug, Clone)]
pub enum Interval {
    /// Bare version or `=x.y.z`.
    Exact(Version),
    /// A range with optional lower and upper bounds. At least one bound is
    /// present; `parse` never produces the unbounded range.
    Range {
        lower: Option<Comparator>,
        upper: Option<Comparator>,
    },
}

impl Interval {
    /// Parse a requirement string.
    ///
    /// Malformed input fails with `InvalidRequirement`; well-formed
    /// comparators combined in an unsupported way (two lower bounds, `=`
    /// inside a conjunction, more than two terms) fail with
    /// `UnsupportedRequirement`.
    pub fn parse(requirement: &str) -> Result<Self, CpakError> {
        let trimmed = requirement.trim();
        if trimmed.is_empty() {
            return Err(CpakError::InvalidRequirement {
                requirement: requirement.to_string(),
                reason: "empty requirement".to_string(),
            });
        }

        let terms: Vec<&str> = trimmed.split(" and ").map(str::trim).collect();
        if terms.len() > 2 {
            return Err(CpakError::UnsupportedRequirement {
                requirement: requirement.to_string(),
            });
        }

        let comparators: Vec<Comparator> = terms
            .iter()
            .map(|term| parse_comparator(term, requirement))
            .collect::<Result<_, _>>()?;

        match comparators.as_slice() {
            [single] => Ok(match single.op {
                Op::Exact => Self::Exact(single.version.clone()),
                Op::Gt | Op::Ge => Self::Range {
                    lower: Some(single.clone()),
                    upper: None,
                },
                Op::Lt | Op::Le => Self::Range {
                    lower: None,
                    upper: Some(single.clone()),
                },
            }),
            [first, second] => {
                let (lower, upper) = match (bound_side(first.op), bound_side(second.op)) {
                    (Side::Lower, Side::Upper) => (first, second),
                    (Side::Upper, Side::Lower) => (second, first),
                    _ => {
                        return Err(CpakError::UnsupportedRequirement {
                            requirement: requirement.to_string(),
                        })
                    }
                };
                Ok(Self::Range {
                    lower: Some(lower.clone()),
                    upper: Some(upper.clone()),
                })
            }
            _ => unreachable!("terms is non-empty and at most two"),
        }
    }

    /// Check a concrete version against this interval.
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Exact(exact) => version.cmp_precedence(exact) == Ordering::Equal,
            Self::Range { lower, upper } => {
                if let Some(lower) = lower {
                    let cmp = version.cmp_precedence(&lower.version);
                    let ok = match lower.op {
                        Op::Ge => cmp != Ordering::Less,
                        Op::Gt => cmp == Ordering::Greater,
                        _ => unreachable!("lower bound is > or >="),
                    };
                    if !ok {
                        return false;
                    }
                }
                if let Some(upper) = upper {
                    let cmp = version.cmp_precedence(&upper.version);
                    let ok = match upper.op {
                        Op::Le => cmp != Ordering::Greater,
                        Op::Lt => cmp == Ordering::Less,
                        _ => unreachable!("upper bound is < or <="),
                    };
                    if !ok {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Parse and check a version string in one step.
    pub fn satisfies(&self, version: &str) -> Result<bool, CpakError> {
        let parsed = Version::parse(version).map_err(|e| CpakError::Generic {
            message: format!("invalid version string `{version}`: {e}"),
        })?;
        Ok(self.matches(&parsed))
    }
}

enum Side {
    Lower,
    Upper,
    Neither,
}

fn bound_side(op: Op) -> Side {
    match op {
        Op::Gt | Op::Ge => Side::Lower,
        Op::Lt | Op::Le => Side::Upper,
        Op::Exact => Side::Neither,
    }
}

fn parse_comparator(term: &str, requirement: &str) -> Result<Comparator, CpakError> {
    // Two-character operators must be tried first.
    let (op, rest) = if let Some(rest) = term.strip_prefix(">=") {
        (Op::Ge, rest)
    } else if let Some(rest) = term.strip_prefix("<=") {
        (Op::Le, rest)
    } else if let Some(rest) = term.strip_prefix('>') {
        (Op::Gt, rest)
    } else if let Some(rest) = term.strip_prefix('<') {
        (Op::Lt, rest)
    } else if let Some(rest) = term.strip_prefix('=') {
        (Op::Exact, rest)
    } else {
        (Op::Exact, term)
    };

    let version = Version::parse(rest.trim()).map_err(|e| CpakError::InvalidRequirement {
        requirement: requirement.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Comparator { op, version })
}
