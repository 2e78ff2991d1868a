//! Dotted hierarchical code of a semantic domain (e.g. `1.6.1.1.3`).

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Positive integers joined by dots, no leading zeros.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*(\.[1-9][0-9]*)*$").unwrap());

/// Errors produced when parsing a [`DomainCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeParseError {
    #[error("Invalid domain code format: '{0}'")]
    InvalidFormat(String),

    #[error("Domain code segment out of range: '{0}'")]
    SegmentOutOfRange(String),
}

/// Position of a record in the taxonomy, parsed into numeric segments.
///
/// Ordering compares segments numerically from the left, and a code sorts
/// before every code it is a prefix of. This gives `1 < 1.1 < 1.9 < 1.10 < 2`,
/// which is exactly the pre-order of the taxonomy tree.
///
/// Parsing is strict (no surrounding whitespace), so every accepted string
/// displays back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainCode {
    segments: Vec<u32>,
}

impl DomainCode {
    /// Builds a code from already-validated segments.
    ///
    /// Returns `None` for an empty slice or a zero segment.
    pub fn from_segments(segments: &[u32]) -> Option<Self> {
        if segments.is_empty() || segments.contains(&0) {
            return None;
        }
        Some(Self {
            segments: segments.to_vec(),
        })
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Number of dot-separated segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a code has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Distance from the root level (`"1"` has depth 0).
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Numeric value of the last segment, used to order siblings.
    pub fn last_segment(&self) -> u32 {
        self.segments[self.segments.len() - 1]
    }

    /// The code with its last segment dropped, or `None` for roots.
    pub fn parent(&self) -> Option<DomainCode> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Proper prefixes of this code, from the root down to the parent.
    pub fn ancestors(&self) -> impl Iterator<Item = DomainCode> + '_ {
        (1..self.segments.len()).map(|end| Self {
            segments: self.segments[..end].to_vec(),
        })
    }

    /// Returns true if `self` is a proper prefix of `other`.
    pub fn is_ancestor_of(&self, other: &DomainCode) -> bool {
        self.segments.len() < other.segments.len() && other.segments.starts_with(&self.segments)
    }
}

impl FromStr for DomainCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !CODE_REGEX.is_match(s) {
            return Err(CodeParseError::InvalidFormat(s.to_string()));
        }

        let segments = s
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| CodeParseError::SegmentOutOfRange(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl fmt::Display for DomainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
