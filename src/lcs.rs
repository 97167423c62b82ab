//! Longest common subsequence of two index ranges.
//!
//! This is Myers' O(ND) algorithm ("An O(ND) Difference Algorithm and Its
//! Variations", 1986) in its linear-space, divide-and-conquer form: a forward
//! and a backward search meet in a middle snake, which splits the problem in
//! two. On top of the paper it narrows the diagonal range once a search runs
//! off the edge of either sequence, and it bounds the work on very long inputs
//! to about `(N + M)^1.5` by giving up on a full search and splitting at the
//! most advanced diagonal. The result is then still a common subsequence but
//! not necessarily a longest one.

/// Tuning of the complexity bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcsSettings {
    /// Once the product of the two (trimmed) lengths exceeds this value the
    /// number of differences searched for is bounded.
    pub too_long: u64,
    /// The search is limited to `D^(pow_limit - 1)` differences per split.
    pub pow_limit: f64,
}

impl Default for LcsSettings {
    fn default() -> Self {
        Self {
            too_long: 100_000_000,
            pow_limit: 1.5,
        }
    }
}

impl LcsSettings {
    fn max_differences(&self, n: usize, m: usize) -> usize {
        let max_d = (n + m + 2) / 2;
        if (n as u64).saturating_mul(m as u64) > self.too_long {
            let bounded = ((max_d as f64).powf(self.pow_limit - 1.0) as usize).max(1);
            tracing::debug!(n, m, max_d, bounded, "bounding LCS search");
            bounded
        } else {
            max_d
        }
    }
}

/// The matched index pairs of a common subsequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    length: usize,
    // Indexed by position in the first sequence.
    matches: Vec<Option<usize>>,
}

impl Alignment {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Matched `(index1, index2)` pairs in increasing index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matches
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|j| (i, j)))
    }
}

/// Compute a longest common subsequence of two sequences of length `len1`
/// and `len2`, where `equal(i, j)` tells whether item `i` of the first equals
/// item `j` of the second.
pub fn longest_common_subsequence<E>(len1: usize, len2: usize, equal: E) -> Alignment
where
    E: FnMut(usize, usize) -> bool,
{
    longest_common_subsequence_with(&LcsSettings::default(), len1, len2, equal)
}

/// Like [`longest_common_subsequence`], with explicit complexity settings.
pub fn longest_common_subsequence_with<E>(
    settings: &LcsSettings,
    len1: usize,
    len2: usize,
    equal: E,
) -> Alignment
where
    E: FnMut(usize, usize) -> bool,
{
    let mut search = Myers {
        equal,
        len1,
        len2,
        max_differences: 0,
        forward: Vec::new(),
        backward: Vec::new(),
        matches: vec![None; len1],
    };
    if len1 == 0 || len2 == 0 {
        return Alignment {
            length: 0,
            matches: search.matches,
        };
    }

    // A common prefix and suffix is always part of some LCS.
    let max = len1.min(len2);
    let mut prefix = 0;
    while prefix < max && (search.equal)(prefix, prefix) {
        search.record(prefix, prefix);
        prefix += 1;
    }
    let (mut end1, mut end2) = (len1, len2);
    while end1 > prefix && end2 > prefix && (search.equal)(end1 - 1, end2 - 1) {
        end1 -= 1;
        end2 -= 1;
        search.record(end1, end2);
    }
    let suffix = len1 - end1;

    let (n, m) = (end1 - prefix, end2 - prefix);
    let mut length = prefix + suffix;
    if n > 0 && m > 0 {
        search.max_differences = settings.max_differences(n, m);
        search.forward = vec![0; 2 * (n + m) + 1];
        search.backward = vec![0; 2 * (n + m) + 1];
        length += search.run(prefix, end1, prefix, end2);
    }

    tracing::trace!(len1, len2, prefix, suffix, length, "computed common subsequence");
    Alignment {
        length,
        matches: search.matches,
    }
}

struct MiddleSnake {
    x: usize,
    y: usize,
    len: usize,
    edit_distance: usize,
}

struct Myers<E> {
    equal: E,
    len1: usize,
    len2: usize,
    max_differences: usize,
    // Furthest reaching paths, indexed by `limit + diagonal`.
    forward: Vec<isize>,
    backward: Vec<isize>,
    matches: Vec<Option<usize>>,
}

impl<E: FnMut(usize, usize) -> bool> Myers<E> {
    fn record(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.len1 && j < self.len2);
        self.matches[i] = Some(j);
    }

    fn is_equal(&mut self, i: isize, j: isize) -> bool {
        debug_assert!(i >= 0 && j >= 0);
        (self.equal)(i as usize, j as usize)
    }

    /// Match `lo1..hi1` against `lo2..hi2`, returning the number of pairs
    /// recorded. Sub-problems go on an explicit stack, so the depth of the
    /// divide and conquer does not grow the call stack.
    fn run(&mut self, lo1: usize, hi1: usize, lo2: usize, hi2: usize) -> usize {
        let mut length = 0;
        let mut pending = vec![(lo1, hi1, lo2, hi2)];
        while let Some((lo1, hi1, lo2, hi2)) = pending.pop() {
            if lo1 >= hi1 || lo2 >= hi2 {
                continue;
            }
            let snake = self.find_middle_snake(lo1, hi1, lo2, hi2);
            for i in 0..snake.len {
                self.record(snake.x + i, snake.y + i);
            }
            length += snake.len;
            match snake.edit_distance {
                0 => {}
                1 => {
                    // The ranges differ by a single item and everything after
                    // it is in the snake; pair up what comes before it.
                    let before = (snake.x - lo1).min(snake.y - lo2);
                    for i in 0..before {
                        self.record(lo1 + i, lo2 + i);
                    }
                    length += before;
                }
                _ => {
                    let (x, y) = (snake.x + snake.len, snake.y + snake.len);
                    let at_corner = (x, y) == (hi1, hi2) || (snake.x, snake.y) == (lo1, lo2);
                    if snake.len == 0 && at_corner {
                        // An empty split at a corner would not shrink the problem.
                        continue;
                    }
                    pending.push((x, hi1, y, hi2));
                    pending.push((lo1, snake.x, lo2, snake.y));
                }
            }
        }
        length
    }

    fn find_middle_snake(
        &mut self,
        lo1: usize,
        hi1: usize,
        lo2: usize,
        hi2: usize,
    ) -> MiddleSnake {
        let (lo1, lo2) = (lo1 as isize, lo2 as isize);
        let n = hi1 as isize - lo1;
        let m = hi2 as isize - lo2;
        let delta = n - m;
        let is_even = delta & 1 == 0;

        let limit = self.max_differences.min(((n + m + 2) / 2) as usize).max(1) as isize;
        let at = |k: isize| -> usize {
            debug_assert!(limit + k >= 0);
            (limit + k) as usize
        };

        // 0 or 1, added to the first diagonal so it has the parity of `d`.
        let mut forward_parity = m & 1;
        let mut backward_parity = n & 1;

        let (mut start_forward, mut end_forward) = (-m, n);
        let (mut start_backward, mut end_backward) = (-n, m);

        self.forward[at(1)] = 0;
        self.backward[at(-1)] = n;

        for d in 0..=limit {
            let first = (forward_parity + start_forward).max(-d);
            let last = end_forward.min(d);
            forward_parity = 1 - forward_parity;

            let mut k = first;
            while k <= last {
                let down = k == -d || (k < d && self.forward[at(k - 1)] < self.forward[at(k + 1)]);
                let mut x = if down {
                    self.forward[at(k + 1)]
                } else {
                    self.forward[at(k - 1)] + 1
                };
                let mut y = x - k;
                let (start_x, start_y) = (x, y);
                while x < n && y < m && self.is_equal(x + lo1, y + lo2) {
                    x += 1;
                    y += 1;
                }
                self.forward[at(k)] = x;

                if !is_even
                    && k >= delta - d + 1
                    && k <= delta + d - 1
                    && x >= self.backward[at(k - delta)]
                {
                    return MiddleSnake {
                        x: (start_x + lo1) as usize,
                        y: (start_y + lo2) as usize,
                        len: (x - start_x) as usize,
                        edit_distance: (2 * d - 1) as usize,
                    };
                }

                // Diagonals past the end of either sequence are done.
                if x >= n && end_forward > k - 1 {
                    end_forward = k - 1;
                } else if y >= m {
                    start_forward = k + 1;
                    forward_parity = 0;
                }
                k += 2;
            }

            let first = (backward_parity + start_backward).max(-d);
            let last = end_backward.min(d);
            backward_parity = 1 - backward_parity;

            let mut k = first;
            while k <= last {
                let up =
                    k == d || (k != -d && self.backward[at(k - 1)] < self.backward[at(k + 1)]);
                let mut x = if up {
                    self.backward[at(k - 1)]
                } else {
                    self.backward[at(k + 1)] - 1
                };
                let mut y = x - k - delta;
                let end_x = x;
                while x > 0 && y > 0 && self.is_equal(x - 1 + lo1, y - 1 + lo2) {
                    x -= 1;
                    y -= 1;
                }
                self.backward[at(k)] = x;

                if is_even
                    && k >= -delta - d
                    && k <= d - delta
                    && x <= self.forward[at(k + delta)]
                {
                    return MiddleSnake {
                        x: (x + lo1) as usize,
                        y: (y + lo2) as usize,
                        len: (end_x - x) as usize,
                        edit_distance: (2 * d) as usize,
                    };
                }

                if x <= 0 {
                    start_backward = k + 1;
                    backward_parity = 0;
                } else if y <= 0 && end_backward > k - 1 {
                    end_backward = k - 1;
                }
                k += 2;
            }
        }

        // The full search is too expensive: pretend an empty middle snake
        // sits on the diagonal that made the most progress. The true edit
        // distance is unknown, only that it exceeds 1.
        let (x, y) = self.find_most_progress(n, m, limit);
        tracing::debug!(
            n,
            m,
            limit,
            x,
            y,
            "LCS search bound reached, splitting at most progress"
        );
        MiddleSnake {
            x: (x + lo1) as usize,
            y: (y + lo2) as usize,
            len: 0,
            edit_distance: 5,
        }
    }

    /// Among the forward and backward furthest reaching paths, pick the
    /// middle one of those with the most progress. Forward paths win ties
    /// with backward paths.
    fn find_most_progress(&self, n: isize, m: isize, limit: isize) -> (isize, isize) {
        let delta = n - m;
        let at = |k: isize| (limit + k) as usize;

        let forward_first = if m & 1 == limit & 1 {
            (-m).max(-limit)
        } else {
            (1 - m).max(-limit)
        };
        let forward_last = n.min(limit);
        let backward_first = if n & 1 == limit & 1 {
            (-n).max(-limit)
        } else {
            (1 - n).max(-limit)
        };
        let backward_last = m.min(limit);

        let mut best = vec![(0, 0)];
        let mut best_progress = 0;

        for k in (forward_first..=forward_last).step_by(2) {
            let x = self.forward[at(k)];
            let y = x - k;
            if x > n || y > m {
                continue;
            }
            let progress = x + y;
            if progress > best_progress {
                best_progress = progress;
                best.clear();
                best.push((x, y));
            } else if progress == best_progress {
                best.push((x, y));
            }
        }

        let mut best_is_forward = true;
        for k in (backward_first..=backward_last).step_by(2) {
            let x = self.backward[at(k)];
            let y = x - k - delta;
            if x < 0 || y < 0 {
                continue;
            }
            let progress = n - x + m - y;
            if progress > best_progress {
                best_progress = progress;
                best_is_forward = false;
                best.clear();
                best.push((x, y));
            } else if progress == best_progress && !best_is_forward {
                best.push((x, y));
            }
        }

        best[(best.len() - 1) / 2]
    }
}
