//! Two-way and three-way differencing of sequences of comparable items.
//!
//! Items are opaque: a [`RangeComparator`] tells how many items a sequence
//! holds and whether two items are equal, and the results are lists of
//! [`RangeDifference`] spans indexed in those items.
//!
//! ```
//! use rangediff::{find_differences, DifferenceKind, LineComparator, RangeDifference};
//!
//! let left = LineComparator::new("abc\ndef\nxyz");
//! let right = LineComparator::new("abc\ndef\n123\nxyz");
//! assert_eq!(
//!     find_differences(&left, &right),
//!     vec![RangeDifference::new(DifferenceKind::CHANGE, 2, 0, 2, 1)]
//! );
//! ```

mod comparator;
mod error;
mod lcs;
mod range_difference;
mod three_way;
mod two_way;

pub use comparator::{LineComparator, RangeComparator, WordComparator};
pub use error::Error;
pub use lcs::{longest_common_subsequence, longest_common_subsequence_with, Alignment, LcsSettings};
pub use range_difference::{DifferenceKind, RangeDifference};
pub use three_way::DifferencesCursor;

/// Computes differences with a given set of [`LcsSettings`].
///
/// The free functions of this crate use the default settings.
#[derive(Debug, Clone, Default)]
pub struct RangeDifferencer {
    settings: LcsSettings,
}

impl RangeDifferencer {
    pub fn new() -> RangeDifferencer {
        RangeDifferencer::default()
    }

    pub fn with_settings(settings: LcsSettings) -> RangeDifferencer {
        RangeDifferencer { settings }
    }

    pub fn settings(&self) -> &LcsSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: LcsSettings) {
        self.settings = settings;
    }

    /// Return the spans where `left` and `right` differ, all of kind
    /// [`DifferenceKind::CHANGE`].
    ///
    /// On very long inputs the result is not necessarily minimal, see
    /// [`LcsSettings`].
    pub fn find_differences<C>(&self, left: &C, right: &C) -> Vec<RangeDifference>
    where
        C: RangeComparator + ?Sized,
    {
        two_way::find_differences(&self.settings, left, right)
    }

    /// Like [`RangeDifferencer::find_differences`], but also return the
    /// unchanged spans, so that the spans cover both sequences.
    pub fn find_ranges<C>(&self, left: &C, right: &C) -> Vec<RangeDifference>
    where
        C: RangeComparator + ?Sized,
    {
        two_way::find_ranges(&self.settings, left, right)
    }

    /// Return the spans where `left` or `right` differ from `ancestor`.
    ///
    /// Changes of the two sides that overlap in the ancestor are reported as
    /// one span, which is a [`DifferenceKind::Conflict`] unless both sides
    /// made the same change ([`DifferenceKind::AncestorOnly`]). Changes made
    /// by one side only are [`DifferenceKind::ChangeLeft`] or
    /// [`DifferenceKind::ChangeRight`].
    pub fn find_differences3<C>(&self, ancestor: &C, left: &C, right: &C) -> Vec<RangeDifference>
    where
        C: RangeComparator + ?Sized,
    {
        three_way::find_differences3(&self.settings, ancestor, left, right)
    }

    /// Like [`RangeDifferencer::find_differences3`], but also return the
    /// spans no side changed.
    pub fn find_ranges3<C>(&self, ancestor: &C, left: &C, right: &C) -> Vec<RangeDifference>
    where
        C: RangeComparator + ?Sized,
    {
        three_way::find_ranges3(&self.settings, ancestor, left, right)
    }
}

/// See [`RangeDifferencer::find_differences`].
pub fn find_differences<C>(left: &C, right: &C) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    RangeDifferencer::new().find_differences(left, right)
}

/// See [`RangeDifferencer::find_ranges`].
pub fn find_ranges<C>(left: &C, right: &C) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    RangeDifferencer::new().find_ranges(left, right)
}

/// See [`RangeDifferencer::find_differences3`].
pub fn find_differences3<C>(ancestor: &C, left: &C, right: &C) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    RangeDifferencer::new().find_differences3(ancestor, left, right)
}

/// See [`RangeDifferencer::find_ranges3`].
pub fn find_ranges3<C>(ancestor: &C, left: &C, right: &C) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    RangeDifferencer::new().find_ranges3(ancestor, left, right)
}

#[cfg(test)]
mod range_differencer_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings() {
        let mut differencer = RangeDifferencer::new();
        assert_eq!(differencer.settings(), &LcsSettings::default());

        let bounded = LcsSettings {
            too_long: 0,
            pow_limit: 1.5,
        };
        differencer.set_settings(bounded);
        assert_eq!(differencer.settings(), &bounded);
        assert_eq!(
            RangeDifferencer::with_settings(bounded).settings(),
            &bounded
        );
    }

    #[test]
    fn test_bounded_settings_still_cover_both_sides() {
        let differencer = RangeDifferencer::with_settings(LcsSettings {
            too_long: 0,
            pow_limit: 1.5,
        });
        let left: Vec<u8> = (0..200u32).map(|i| (i * 7 % 5) as u8).collect();
        let right: Vec<u8> = (0..180u32).map(|i| (i * 3 % 4) as u8).collect();
        let ranges = differencer.find_ranges(&left[..], &right[..]);
        assert_eq!(ranges.iter().map(|r| r.left_length()).sum::<usize>(), left.len());
        assert_eq!(ranges.iter().map(|r| r.right_length()).sum::<usize>(), right.len());
    }

    #[test]
    fn test_free_functions() {
        let ancestor = LineComparator::new("a\nb\nc");
        let left = LineComparator::new("a\nz\nc");
        let right = LineComparator::new("a\nb\nc");

        assert_eq!(
            find_differences(&ancestor, &left),
            vec![RangeDifference::new(DifferenceKind::CHANGE, 1, 1, 1, 1)]
        );
        assert_eq!(find_ranges(&ancestor, &left).len(), 3);
        assert_eq!(
            find_differences3(&ancestor, &left, &right),
            vec![RangeDifference::with_ancestor(
                DifferenceKind::ChangeLeft,
                1,
                1,
                1,
                1,
                1,
                1
            )]
        );
        assert_eq!(find_ranges3(&ancestor, &left, &right).len(), 3);
    }
}
