//! Two-way differences.
//!
//! The differences between two sequences are the gaps between consecutive
//! pairs of a common subsequence. Every gap becomes one
//! [`DifferenceKind::ChangeRight`] span; its left and right lengths may
//! differ, so insertions, deletions and replacements look the same.

use crate::comparator::RangeComparator;
use crate::lcs::{longest_common_subsequence_with, LcsSettings};
use crate::{DifferenceKind, RangeDifference};

/// Find the change spans between `left` and `right`.
pub(crate) fn find_differences<C>(
    settings: &LcsSettings,
    left: &C,
    right: &C,
) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    let (len1, len2) = (left.range_count(), right.range_count());
    let whole = || {
        if len1 == 0 && len2 == 0 {
            Vec::new()
        } else {
            vec![RangeDifference::new(DifferenceKind::CHANGE, 0, len1, 0, len2)]
        }
    };

    if left.skip_range_comparison(len1.min(len2), len1.max(len2), right) {
        tracing::trace!(len1, len2, "range comparison skipped");
        return whole();
    }

    let alignment = longest_common_subsequence_with(settings, len1, len2, |i, j| {
        left.ranges_equal(i, right, j)
    });
    if alignment.is_empty() {
        return whole();
    }

    let lefts = compact_and_shift(alignment.pairs().map(|(i, _)| i), left);
    let rights = compact_and_shift(alignment.pairs().map(|(_, j)| j), right);

    let mut differences = Vec::new();
    let (mut next1, mut next2) = (0, 0);
    for (&end1, &end2) in lefts.iter().zip(&rights) {
        if end1 != next1 || end2 != next2 {
            differences.push(RangeDifference::new(
                DifferenceKind::CHANGE,
                next1,
                end1 - next1,
                next2,
                end2 - next2,
            ));
        }
        next1 = end1 + 1;
        next2 = end2 + 1;
    }
    if next1 < len1 || next2 < len2 {
        differences.push(RangeDifference::new(
            DifferenceKind::CHANGE,
            next1,
            len1 - next1,
            next2,
            len2 - next2,
        ));
    }

    tracing::trace!(
        len1,
        len2,
        matched = alignment.len(),
        differences = differences.len(),
        "two-way differences"
    );
    differences
}

/// Like [`find_differences`], with [`DifferenceKind::NoChange`] spans for the
/// unchanged stretches around and between the changes.
pub(crate) fn find_ranges<C>(settings: &LcsSettings, left: &C, right: &C) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    let differences = find_differences(settings, left, right);
    let mut ranges = Vec::with_capacity(2 * differences.len() + 1);
    let (mut left_start, mut right_start) = (0, 0);
    for difference in differences {
        let unchanged = RangeDifference::new(
            DifferenceKind::NoChange,
            left_start,
            difference.left_start() - left_start,
            right_start,
            difference.right_start() - right_start,
        );
        if unchanged.max_length() > 0 {
            ranges.push(unchanged);
        }
        ranges.push(difference);
        left_start = difference.left_end();
        right_start = difference.right_end();
    }
    let unchanged = RangeDifference::new(
        DifferenceKind::NoChange,
        left_start,
        left.range_count() - left_start,
        right_start,
        right.range_count() - right_start,
    );
    if unchanged.max_length() > 0 {
        ranges.push(unchanged);
    }
    ranges
}

/// Turn the matched indices of one side into a dense list, moving each match
/// up against the previous one when the item there is equal to it.
///
/// Among equally long alignments this prefers the one whose changes come
/// last in a run of equal items, which is what people expect from a diff.
fn compact_and_shift<C, I>(matched: I, sequence: &C) -> Vec<usize>
where
    C: RangeComparator + ?Sized,
    I: Iterator<Item = usize>,
{
    let mut result: Vec<usize> = Vec::new();
    for index in matched {
        let shifted = match result.last() {
            Some(&previous)
                if previous + 1 < index && sequence.ranges_equal(previous + 1, sequence, index) =>
            {
                previous + 1
            }
            _ => index,
        };
        result.push(shifted);
    }
    result
}


#[cfg(test)]
mod find_differences_tests {
    use super::*;
    use crate::comparator::LineComparator;
    use pretty_assertions::assert_eq;

    fn change(left_start: usize, left_length: usize, right_start: usize, right_length: usize) -> RangeDifference {
        RangeDifference::new(DifferenceKind::CHANGE, left_start, left_length, right_start, right_length)
    }

    fn diff(left: &str, right: &str) -> Vec<RangeDifference> {
        let left: Vec<char> = left.chars().collect();
        let right: Vec<char> = right.chars().collect();
        find_differences(&LcsSettings::default(), &left[..], &right[..])
    }

    #[test]
    fn test_line_addition() {
        let left = LineComparator::new("abc\ndef\nxyz");
        let right = LineComparator::new("abc\ndef\n123\nxyz");
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(2, 0, 2, 1)]
        );
    }

    #[test]
    fn test_line_deletion() {
        let left = LineComparator::new("abc\ndef\n123\nxyz");
        let right = LineComparator::new("abc\ndef\nxyz");
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(2, 1, 2, 0)]
        );
    }

    #[test]
    fn test_append_and_delete_at_ends() {
        assert_eq!(diff("ab", "ab1"), vec![change(2, 0, 2, 1)]);
        assert_eq!(diff("ab1", "ab"), vec![change(2, 1, 2, 0)]);
        assert_eq!(diff("ab", "1ab"), vec![change(0, 0, 0, 1)]);
        assert_eq!(diff("1ab", "ab"), vec![change(0, 1, 0, 0)]);
    }

    #[test]
    fn test_replacement() {
        assert_eq!(diff("abc", "azc"), vec![change(1, 1, 1, 1)]);
    }

    #[test]
    fn test_identical() {
        assert_eq!(diff("abcdef", "abcdef"), vec![]);
    }

    // Two empty sequences have no differences at all, not one empty change.
    #[test]
    fn test_both_empty() {
        assert_eq!(diff("", ""), vec![]);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(diff("ab", ""), vec![change(0, 2, 0, 0)]);
        assert_eq!(diff("", "abc"), vec![change(0, 0, 0, 3)]);
    }

    #[test]
    fn test_nothing_in_common() {
        assert_eq!(diff("abc", "xy"), vec![change(0, 3, 0, 2)]);
    }

    #[test]
    fn test_several_changes() {
        assert_eq!(
            diff("abcabba", "cbabac"),
            vec![
                change(0, 1, 0, 1),
                change(2, 1, 2, 0),
                change(5, 1, 4, 0),
                change(7, 0, 5, 1),
            ]
        );
    }

    #[test]
    fn test_changes_move_to_end_of_runs() {
        assert_eq!(diff("aaab", "aab"), vec![change(2, 1, 2, 0)]);
        assert_eq!(diff("bab", "bbbbb"), vec![change(1, 1, 1, 0), change(3, 0, 2, 3)]);
        assert_eq!(diff("aabaaaa", "ba"), vec![change(0, 2, 0, 0), change(4, 3, 2, 0)]);
    }

    #[test]
    fn test_words() {
        use crate::comparator::WordComparator;

        let left = WordComparator::new("This is a blue book");
        let right = WordComparator::new("This is a big blue book");
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(3, 0, 3, 1)]
        );

        let left = WordComparator::new("This is a green book about food");
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(3, 1, 3, 2), change(5, 2, 6, 0)]
        );
    }

    struct Blob(Vec<u8>);

    impl RangeComparator for Blob {
        fn range_count(&self) -> usize {
            self.0.len()
        }

        fn ranges_equal(&self, this_index: usize, other: &Self, other_index: usize) -> bool {
            self.0[this_index] == other.0[other_index]
        }

        fn skip_range_comparison(&self, _length: usize, max_length: usize, _other: &Self) -> bool {
            max_length > 4
        }
    }

    #[test]
    fn test_skip_range_comparison() {
        let left = Blob(vec![1, 2, 3, 4, 5, 6]);
        let right = Blob(vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(0, 6, 0, 6)]
        );

        let left = Blob(vec![1, 2, 3]);
        let right = Blob(vec![1, 9, 3]);
        assert_eq!(
            find_differences(&LcsSettings::default(), &left, &right),
            vec![change(1, 1, 1, 1)]
        );
    }
}

#[cfg(test)]
mod find_ranges_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ranges(left: &str, right: &str) -> Vec<RangeDifference> {
        let left: Vec<char> = left.chars().collect();
        let right: Vec<char> = right.chars().collect();
        find_ranges(&LcsSettings::default(), &left[..], &right[..])
    }

    #[test]
    fn test_fills_unchanged_stretches() {
        assert_eq!(
            ranges("abcdef", "abXdeYf"),
            vec![
                RangeDifference::new(DifferenceKind::NoChange, 0, 2, 0, 2),
                RangeDifference::new(DifferenceKind::CHANGE, 2, 1, 2, 1),
                RangeDifference::new(DifferenceKind::NoChange, 3, 2, 3, 2),
                RangeDifference::new(DifferenceKind::CHANGE, 5, 0, 5, 1),
                RangeDifference::new(DifferenceKind::NoChange, 5, 1, 6, 1),
            ]
        );
    }

    #[test]
    fn test_no_empty_fillers() {
        assert_eq!(
            ranges("1ab2", "ab"),
            vec![
                RangeDifference::new(DifferenceKind::CHANGE, 0, 1, 0, 0),
                RangeDifference::new(DifferenceKind::NoChange, 1, 2, 0, 2),
                RangeDifference::new(DifferenceKind::CHANGE, 3, 1, 2, 0),
            ]
        );
        assert_eq!(ranges("", ""), vec![]);
    }

    #[test]
    fn test_identical_is_one_unchanged_range() {
        assert_eq!(
            ranges("abc", "abc"),
            vec![RangeDifference::new(DifferenceKind::NoChange, 0, 3, 0, 3)]
        );
    }

    #[test]
    fn test_lengths_add_up() {
        let left: Vec<char> = "the quick brown fox jumps".chars().collect();
        let right: Vec<char> = "a quick brown dog jumped".chars().collect();
        let ranges = find_ranges(&LcsSettings::default(), &left[..], &right[..]);
        assert_eq!(ranges.iter().map(RangeDifference::left_length).sum::<usize>(), left.len());
        assert_eq!(ranges.iter().map(RangeDifference::right_length).sum::<usize>(), right.len());
    }
}
