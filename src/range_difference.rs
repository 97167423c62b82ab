//! Description of a change between two or three ranges of comparable items.
//!
//! A range is a start index and a length counted in comparable items, not in
//! characters: when an item is a line, the start is a line number and the
//! length a number of lines.

use std::fmt;

use crate::Error;

/// The kind of a [`RangeDifference`].
///
/// The numeric values are stable and used when converting to and from raw
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
#[repr(u8)]
pub enum DifferenceKind {
    /// No change; only produced by the gap-filled variants.
    NoChange = 0,
    /// Both sides changed the same ancestor range differently.
    Conflict = 1,
    /// A two-way change, or a three-way change on the right side only.
    ChangeRight = 2,
    /// A three-way change on the left side only.
    ChangeLeft = 3,
    /// Both sides made the same change; only the ancestor differs.
    AncestorOnly = 4,
    /// Unknown change kind.
    Error = 5,
}

impl DifferenceKind {
    /// The kind reported by two-way comparisons.
    pub const CHANGE: Self = Self::ChangeRight;

    const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoChange),
            1 => Some(Self::Conflict),
            2 => Some(Self::ChangeRight),
            3 => Some(Self::ChangeLeft),
            4 => Some(Self::AncestorOnly),
            5 => Some(Self::Error),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NoChange => "NOCHANGE",
            Self::Conflict => "CONFLICT",
            Self::ChangeRight => "CHANGE/RIGHT",
            Self::ChangeLeft => "LEFT",
            Self::AncestorOnly => "ANCESTOR",
            Self::Error => "ERROR",
        }
    }
}

impl TryFrom<u8> for DifferenceKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Self::from_u8(value).ok_or(Error::InvalidKind(value))
    }
}

impl From<DifferenceKind> for u8 {
    fn from(kind: DifferenceKind) -> u8 {
        kind as u8
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One change span across the left, right and (for three-way results)
/// ancestor sequences.
///
/// Each side is a half-open span `start..start + length`. Values are
/// immutable once built; equality compares the kind and all six coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeDifference {
    kind: DifferenceKind,
    left_start: usize,
    left_length: usize,
    right_start: usize,
    right_length: usize,
    ancestor_start: usize,
    ancestor_length: usize,
}

impl RangeDifference {
    /// Creates a two-way difference.
    #[must_use]
    pub const fn new(
        kind: DifferenceKind,
        left_start: usize,
        left_length: usize,
        right_start: usize,
        right_length: usize,
    ) -> Self {
        Self::with_ancestor(kind, left_start, left_length, right_start, right_length, 0, 0)
    }

    /// Creates a three-way difference.
    #[must_use]
    pub const fn with_ancestor(
        kind: DifferenceKind,
        left_start: usize,
        left_length: usize,
        right_start: usize,
        right_length: usize,
        ancestor_start: usize,
        ancestor_length: usize,
    ) -> Self {
        Self {
            kind,
            left_start,
            left_length,
            right_start,
            right_length,
            ancestor_start,
            ancestor_length,
        }
    }

    /// Creates a difference from a raw numeric kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKind`] if `kind` is not one of the values of
    /// [`DifferenceKind`].
    pub fn from_raw(
        kind: u8,
        left_start: usize,
        left_length: usize,
        right_start: usize,
        right_length: usize,
        ancestor_start: usize,
        ancestor_length: usize,
    ) -> Result<Self, Error> {
        Ok(Self::with_ancestor(
            DifferenceKind::try_from(kind)?,
            left_start,
            left_length,
            right_start,
            right_length,
            ancestor_start,
            ancestor_length,
        ))
    }

    #[must_use]
    pub const fn kind(&self) -> DifferenceKind {
        self.kind
    }

    #[must_use]
    pub const fn left_start(&self) -> usize {
        self.left_start
    }

    #[must_use]
    pub const fn left_length(&self) -> usize {
        self.left_length
    }

    #[must_use]
    pub const fn left_end(&self) -> usize {
        self.left_start + self.left_length
    }

    #[must_use]
    pub const fn right_start(&self) -> usize {
        self.right_start
    }

    #[must_use]
    pub const fn right_length(&self) -> usize {
        self.right_length
    }

    #[must_use]
    pub const fn right_end(&self) -> usize {
        self.right_start + self.right_length
    }

    #[must_use]
    pub const fn ancestor_start(&self) -> usize {
        self.ancestor_start
    }

    #[must_use]
    pub const fn ancestor_length(&self) -> usize {
        self.ancestor_length
    }

    #[must_use]
    pub const fn ancestor_end(&self) -> usize {
        self.ancestor_start + self.ancestor_length
    }

    /// Returns the largest of the left, right and ancestor lengths.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.left_length
            .max(self.right_length)
            .max(self.ancestor_length)
    }
}

impl fmt::Display for RangeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, Left: ({}, {}) Right: ({}, {})",
            self.kind, self.left_start, self.left_length, self.right_start, self.right_length
        )?;
        if self.ancestor_start > 0 || self.ancestor_length > 0 {
            write!(
                f,
                ", Ancestor: ({}, {})",
                self.ancestor_start, self.ancestor_length
            )?;
        }
        f.write_str("}")
    }
}
