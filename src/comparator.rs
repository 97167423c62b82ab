//! The comparable-sequence capability consumed by the differencer.
//!
//! The differencer never looks at item content. It only asks a comparator
//! how many items it holds and whether an item equals an item of another
//! comparator of the same type.

/// A sequence of comparable items.
///
/// Indices passed to [`RangeComparator::ranges_equal`] are always within
/// `0..range_count()` of the respective side.
pub trait RangeComparator {
    /// Returns the number of comparable items.
    fn range_count(&self) -> usize;

    /// Returns whether the item at `this_index` equals the item at
    /// `other_index` of `other`.
    ///
    /// Must be deterministic and symmetric in effect.
    fn ranges_equal(&self, this_index: usize, other: &Self, other_index: usize) -> bool;

    /// Hint allowing the differencer to treat a span of `length` items as
    /// unequal without comparing every item.
    fn skip_range_comparison(&self, _length: usize, _max_length: usize, _other: &Self) -> bool {
        false
    }
}

impl<T: PartialEq> RangeComparator for [T] {
    fn range_count(&self) -> usize {
        self.len()
    }

    fn ranges_equal(&self, this_index: usize, other: &Self, other_index: usize) -> bool {
        self[this_index] == other[other_index]
    }
}

/// Compare `a[a_start..a_start + length]` with `b[b_start..b_start + length]`
/// item by item.
pub(crate) fn spans_equal<C: RangeComparator + ?Sized>(
    a: &C,
    a_start: usize,
    b: &C,
    b_start: usize,
    length: usize,
) -> bool {
    (0..length).all(|i| a.ranges_equal(a_start + i, b, b_start + i))
}

fn is_ignorable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Compares a text line by line.
///
/// Lines are separated by `\n`, `\r` or `\r\n`. The text after the last
/// separator is always a line of its own, so `"a\n"` has two lines.
#[derive(Debug, Clone)]
pub struct LineComparator<'a> {
    lines: Vec<&'a str>,
    ignore_whitespace: bool,
}

impl<'a> LineComparator<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;
        while let Some(pos) = rest.find(|c: char| c == '\n' || c == '\r') {
            lines.push(&rest[..pos]);
            let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[pos + skip..];
        }
        lines.push(rest);
        Self {
            lines,
            ignore_whitespace: false,
        }
    }

    /// Compare lines ignoring spaces, tabs and line terminators.
    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

impl RangeComparator for LineComparator<'_> {
    fn range_count(&self) -> usize {
        self.lines.len()
    }

    fn ranges_equal(&self, this_index: usize, other: &Self, other_index: usize) -> bool {
        let (a, b) = (self.lines[this_index], other.lines[other_index]);
        if self.ignore_whitespace || other.ignore_whitespace {
            a.chars()
                .filter(|c| !is_ignorable(*c))
                .eq(b.chars().filter(|c| !is_ignorable(*c)))
        } else {
            a == b
        }
    }
}

/// Compares a text word by word, splitting on runs of whitespace.
#[derive(Debug, Clone)]
pub struct WordComparator<'a> {
    words: Vec<&'a str>,
}

impl<'a> WordComparator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            words: text.split_whitespace().collect(),
        }
    }

    pub fn words(&self) -> &[&'a str] {
        &self.words
    }
}

impl RangeComparator for WordComparator<'_> {
    fn range_count(&self) -> usize {
        self.words.len()
    }

    fn ranges_equal(&self, this_index: usize, other: &Self, other_index: usize) -> bool {
        self.words[this_index] == other.words[other_index]
    }
}

#[cfg(test)]
mod line_comparator_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_separators() {
        assert_eq!(LineComparator::new("abc\ndef\nxyz").lines(), &["abc", "def", "xyz"]);
        assert_eq!(LineComparator::new("a\r\nb\rc").lines(), &["a", "b", "c"]);
        assert_eq!(LineComparator::new("a\n").lines(), &["a", ""]);
        assert_eq!(LineComparator::new("a\n\nb").lines(), &["a", "", "b"]);
        assert_eq!(LineComparator::new("").lines(), &[""]);
    }

    #[test]
    fn test_ranges_equal() {
        let a = LineComparator::new("foo bar\nbaz");
        let b = LineComparator::new("foobar\nbaz");
        assert!(!a.ranges_equal(0, &b, 0));
        assert!(a.ranges_equal(1, &b, 1));

        let a = a.ignore_whitespace(true);
        assert!(a.ranges_equal(0, &b, 0));
        assert!(b.ranges_equal(0, &a, 0));
        assert!(!a.ranges_equal(0, &b, 1));
    }

    #[test]
    fn test_line_accessor() {
        let a = LineComparator::new("x\ny");
        assert_eq!(a.range_count(), 2);
        assert_eq!(a.line(1), Some("y"));
        assert_eq!(a.line(2), None);
    }
}

#[cfg(test)]
mod word_comparator_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_words() {
        let a = WordComparator::new("  This is\ta  blue book ");
        assert_eq!(a.words(), &["This", "is", "a", "blue", "book"]);
        assert_eq!(a.range_count(), 5);

        let b = WordComparator::new("a blue");
        assert!(a.ranges_equal(2, &b, 0));
        assert!(!a.ranges_equal(3, &b, 0));
    }
}

#[cfg(test)]
mod slice_comparator_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slice_comparator() {
        let a = [1, 2, 3];
        let b = [3, 2];
        assert_eq!(a[..].range_count(), 3);
        assert!(a[..].ranges_equal(2, &b[..], 0));
        assert!(!a[..].skip_range_comparison(3, 3, &b[..]));
        assert!(spans_equal(&a[..], 1, &[0, 2, 3][..], 1, 2));
        assert!(!spans_equal(&a[..], 0, &b[..], 0, 1));
    }
}
