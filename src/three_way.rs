//! Three-way differences.
//!
//! Both the left and the right sequence are compared with the common
//! ancestor. The two resulting scripts are then walked side by side in
//! ancestor order, and every group of changes that overlap in the ancestor
//! becomes one entry, classified by which sides took part in it.

use std::cmp::Ordering;

use crate::comparator::{spans_equal, RangeComparator};
use crate::lcs::LcsSettings;
use crate::two_way;
use crate::{DifferenceKind, RangeDifference};

/// A read cursor over a two-way script, remembering what it consumed since
/// the last [`DifferencesCursor::remove_all`].
///
/// In the scripts walked here the left side of every difference is the
/// ancestor.
#[derive(Debug, Clone)]
pub struct DifferencesCursor<'a> {
    differences: &'a [RangeDifference],
    index: usize,
    mark: usize,
}

impl<'a> DifferencesCursor<'a> {
    pub fn new(differences: &'a [RangeDifference]) -> Self {
        Self {
            differences,
            index: 0,
            mark: 0,
        }
    }

    /// The difference under the cursor, or `None` once all are consumed.
    pub fn difference(&self) -> Option<&'a RangeDifference> {
        self.differences.get(self.index)
    }

    /// Consume the current difference.
    pub fn advance(&mut self) {
        if self.index < self.differences.len() {
            self.index += 1;
        }
    }

    /// The differences consumed since the last reset, in order.
    pub fn consumed(&self) -> &'a [RangeDifference] {
        &self.differences[self.mark..self.index]
    }

    pub fn count(&self) -> usize {
        self.index - self.mark
    }

    /// Position of the next unread difference.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Forget the consumed differences.
    pub fn remove_all(&mut self) {
        self.mark = self.index;
    }
}

// Positions in the cursor pair.
const RIGHT: usize = 0;
const LEFT: usize = 1;

/// Compute the three-way differences of `left` and `right` against
/// `ancestor`.
pub(crate) fn find_differences3<C>(
    settings: &LcsSettings,
    ancestor: &C,
    left: &C,
    right: &C,
) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    let right_script = two_way::find_differences(settings, ancestor, right);
    let left_script = two_way::find_differences(settings, ancestor, left);
    let merged = merge(&left_script, &right_script, left, right);
    tracing::trace!(
        left = left_script.len(),
        right = right_script.len(),
        merged = merged.len(),
        "three-way differences"
    );
    merged
}

/// Like [`find_differences3`], with [`DifferenceKind::NoChange`] spans for
/// the stretches that no side changed.
pub(crate) fn find_ranges3<C>(
    settings: &LcsSettings,
    ancestor: &C,
    left: &C,
    right: &C,
) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    let differences = find_differences3(settings, ancestor, left, right);
    let mut ranges = Vec::with_capacity(2 * differences.len() + 1);
    let mut starts = (0, 0, 0);
    for difference in differences {
        let ends = (
            difference.left_start(),
            difference.right_start(),
            difference.ancestor_start(),
        );
        ranges.extend(unchanged(starts, ends));
        ranges.push(difference);
        starts = (
            difference.left_end(),
            difference.right_end(),
            difference.ancestor_end(),
        );
    }
    let ends = (left.range_count(), right.range_count(), ancestor.range_count());
    ranges.extend(unchanged(starts, ends));
    ranges
}

/// The unchanged stretch between two entries, unless it is empty.
fn unchanged(
    (left_start, right_start, ancestor_start): (usize, usize, usize),
    (left_end, right_end, ancestor_end): (usize, usize, usize),
) -> Option<RangeDifference> {
    let unchanged = RangeDifference::with_ancestor(
        DifferenceKind::NoChange,
        left_start,
        left_end - left_start,
        right_start,
        right_end - right_start,
        ancestor_start,
        ancestor_end - ancestor_start,
    );
    (unchanged.max_length() > 0).then_some(unchanged)
}

fn merge<C>(
    left_script: &[RangeDifference],
    right_script: &[RangeDifference],
    left: &C,
    right: &C,
) -> Vec<RangeDifference>
where
    C: RangeComparator + ?Sized,
{
    let mut cursors = [
        DifferencesCursor::new(right_script),
        DifferencesCursor::new(left_script),
    ];
    let mut merged: Vec<RangeDifference> = Vec::new();

    loop {
        for cursor in &mut cursors {
            cursor.remove_all();
        }
        let (driver, first) = match (cursors[RIGHT].difference(), cursors[LEFT].difference()) {
            (None, None) => break,
            (Some(mine), None) => (RIGHT, mine),
            (None, Some(yours)) => (LEFT, yours),
            (Some(mine), Some(yours)) => match mine.left_start().cmp(&yours.left_start()) {
                Ordering::Less => (RIGHT, mine),
                Ordering::Greater => (LEFT, yours),
                Ordering::Equal => match (mine.left_length(), yours.left_length()) {
                    (0, 0) => {
                        // Both sides insert at the same place.
                        cursors[LEFT].advance();
                        (RIGHT, mine)
                    }
                    (0, _) => (RIGHT, mine),
                    (_, 0) => (LEFT, yours),
                    _ => (RIGHT, mine),
                },
            },
        };

        let start = first.left_start();
        let mut end = first.left_end();
        cursors[driver].advance();

        // Pull in everything overlapping the window. When the window grows,
        // the side that was just driving may overlap again.
        let mut other = 1 - driver;
        while let Some(next) = cursors[other].difference().filter(|d| d.left_start() < end) {
            cursors[other].advance();
            if next.left_end() > end {
                end = next.left_end();
                other = 1 - other;
            }
        }

        let entry = classify(
            start,
            end,
            cursors[LEFT].consumed(),
            cursors[RIGHT].consumed(),
            merged.last(),
            left,
            right,
        );
        merged.push(entry);
    }
    merged
}

/// Map the ancestor window `start..end` into the other side of `consumed`,
/// using its first and last difference.
fn project(consumed: &[RangeDifference], start: usize, end: usize) -> Option<(usize, usize)> {
    let (first, last) = (consumed.first()?, consumed.last()?);
    debug_assert!(first.left_start() >= start && last.left_end() <= end);
    Some((
        first.right_start() + start - first.left_start(),
        last.right_end() + end - last.left_end(),
    ))
}

/// Map the ancestor window into a side that did not change in it, relative
/// to the end of the previous entry.
fn carry(previous: Option<&RangeDifference>, side_end: usize, start: usize, end: usize) -> (usize, usize) {
    let ancestor_end = previous.map_or(0, RangeDifference::ancestor_end);
    (side_end + start - ancestor_end, side_end + end - ancestor_end)
}

fn classify<C>(
    start: usize,
    end: usize,
    left_consumed: &[RangeDifference],
    right_consumed: &[RangeDifference],
    previous: Option<&RangeDifference>,
    left: &C,
    right: &C,
) -> RangeDifference
where
    C: RangeComparator + ?Sized,
{
    let left_span = project(left_consumed, start, end);
    let right_span = project(right_consumed, start, end);

    let (kind, (left_start, left_end), (right_start, right_end)) = match (left_span, right_span) {
        (Some(left_span), None) => {
            let right_end = previous.map_or(0, RangeDifference::right_end);
            (DifferenceKind::ChangeLeft, left_span, carry(previous, right_end, start, end))
        }
        (None, Some(right_span)) => {
            let left_end = previous.map_or(0, RangeDifference::left_end);
            (DifferenceKind::ChangeRight, carry(previous, left_end, start, end), right_span)
        }
        (Some(left_span), Some(right_span)) => {
            let length = left_span.1 - left_span.0;
            let same = length == right_span.1 - right_span.0
                && !left.skip_range_comparison(length, length, right)
                && spans_equal(left, left_span.0, right, right_span.0, length);
            let kind = if same {
                DifferenceKind::AncestorOnly
            } else {
                DifferenceKind::Conflict
            };
            (kind, left_span, right_span)
        }
        (None, None) => unreachable!("a merged window always consumes a difference"),
    };

    RangeDifference::with_ancestor(
        kind,
        left_start,
        left_end - left_start,
        right_start,
        right_end - right_start,
        start,
        end - start,
    )
}
