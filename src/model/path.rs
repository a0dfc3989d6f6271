//! Materialized paths of indexed items.
//!
//! An [ItemPath] lists the ids from a root down to an item, e.g. `[1, 3, 9, 11]`
//! for an item `11` below `9` below `3` below root `1`. Its text form joins the
//! ids with dots (`"1.3.9.11"`). The parent-child relation between paths is
//! decided by comparing id sequences, never by matching text, so ids that
//! are digit-prefixes of other ids (`1` vs. `12`) cannot be confused.
//!
//! With the `serde` feature, a path (de)serializes as its dotted text form and
//! goes through the same parser, so an empty path cannot be deserialized.

use crate::error::PathParseError;
use crate::model::item::ItemId;
use std::fmt;
use std::str::FromStr;

/// Separator of the dotted text form.
const SEPARATOR: char = '.';

// =#========================================================================#=
// ITEM PATH
// =#========================================================================#=
/// Ordered chain of ids from a root (first) to the target item (last).
///
/// # Invariants
/// - Never empty; a root path has exactly one segment
/// - Level of the target equals the number of segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ItemPath {
    segments: Vec<ItemId>,
}

impl ItemPath {
    /// Creates a path from its segments, root first.
    ///
    /// Callers guarantee at least one segment; public construction goes
    /// through [FromStr].
    pub(crate) fn from_segments(segments: Vec<ItemId>) -> Self {
        debug_assert!(!segments.is_empty(), "item path without segments");
        ItemPath { segments }
    }

    /// Returns all segments, root first.
    pub fn segments(&self) -> &[ItemId] {
        &self.segments
    }

    /// Returns the level of the target (1 for roots).
    pub fn level(&self) -> usize {
        self.segments.len()
    }

    /// Returns the id of the target item (last segment).
    pub fn target(&self) -> ItemId {
        self.segments[self.segments.len() - 1]
    }

    /// Returns whether the target of this path is a direct child of the
    /// target of `other`, i.e. `other` plus exactly one segment.
    pub fn is_child_of(&self, other: &ItemPath) -> bool {
        self.segments.len() == other.segments.len() + 1
            && self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ItemPath {
    type Err = PathParseError;

    /// Parses the dotted text form, e.g. `"1.3.9"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();
        for (position, segment) in s.split(SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(PathParseError::EmptySegment { position });
            }
            // `u64::from_str` alone would also accept a leading '+'
            let invalid = || PathParseError::InvalidSegment {
                segment: segment.to_string(),
            };
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let id = segment.parse::<ItemId>().map_err(|_| invalid())?;
            segments.push(id);
        }

        Ok(ItemPath { segments })
    }
}

impl TryFrom<String> for ItemPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ItemPath> for String {
    fn from(path: ItemPath) -> Self {
        path.to_string()
    }
}

// =#========================================================================#=
// TESTS - ITEM PATH
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[ItemId]) -> ItemPath {
        ItemPath::from_segments(segments.to_vec())
    }

    #[test]
    fn test_segments_and_level() {
        let root = path(&[1]);
        let grandchild = path(&[1, 3, 9]);

        assert_eq!(root.level(), 1);
        assert_eq!(root.target(), 1);
        assert_eq!(grandchild.level(), 3);
        assert_eq!(grandchild.segments(), &[1, 3, 9]);
        assert_eq!(grandchild.target(), 9);
    }

    #[test]
    fn test_child_relation() {
        let root = path(&[1]);
        let child = path(&[1, 3]);
        let grandchild = path(&[1, 3, 9]);

        assert!(child.is_child_of(&root));
        assert!(grandchild.is_child_of(&child));
        assert!(!grandchild.is_child_of(&root));
        assert!(!root.is_child_of(&root));
        assert!(!root.is_child_of(&child));
        assert!(!path(&[2, 3]).is_child_of(&root));
    }

    #[test]
    fn test_digit_prefix_is_not_a_relation() {
        // "12.4" starts with "1" as text, but 12 is not below 1
        let one = path(&[1]);
        let one_two = path(&[1, 2]);

        assert!(!path(&[12, 4]).is_child_of(&one));
        assert!(!path(&[12]).is_child_of(&one));
        assert!(!path(&[1, 24]).is_child_of(&one_two));
    }

    #[test]
    fn test_display_dotted_form() {
        assert_eq!(path(&[1, 3, 9, 11]).to_string(), "1.3.9.11");
        assert_eq!(path(&[5]).to_string(), "5");
    }

    #[test]
    fn test_parse_dotted_form() {
        let path: ItemPath = "1.3.9.11".parse().unwrap();
        assert_eq!(path.segments(), &[1, 3, 9, 11]);
        assert_eq!(path.to_string(), "1.3.9.11");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ItemPath>(), Err(PathParseError::Empty));
        assert_eq!(
            "1..3".parse::<ItemPath>(),
            Err(PathParseError::EmptySegment { position: 1 })
        );
        assert_eq!(
            "1.x".parse::<ItemPath>(),
            Err(PathParseError::InvalidSegment {
                segment: "x".to_string()
            })
        );
        assert_eq!(
            "1.99999999999999999999".parse::<ItemPath>(),
            Err(PathParseError::InvalidSegment {
                segment: "99999999999999999999".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_signs_and_whitespace() {
        assert_eq!(
            "+1.+3".parse::<ItemPath>(),
            Err(PathParseError::InvalidSegment {
                segment: "+1".to_string()
            })
        );
        assert_eq!(
            "1.-3".parse::<ItemPath>(),
            Err(PathParseError::InvalidSegment {
                segment: "-3".to_string()
            })
        );
        assert_eq!(
            "1. 3".parse::<ItemPath>(),
            Err(PathParseError::InvalidSegment {
                segment: " 3".to_string()
            })
        );
    }

    #[test]
    fn test_string_conversions() {
        let path = ItemPath::try_from("1.3".to_string()).unwrap();
        assert_eq!(path.segments(), &[1, 3]);
        assert_eq!(String::from(path), "1.3");
        assert_eq!(ItemPath::try_from(String::new()), Err(PathParseError::Empty));
    }
}
