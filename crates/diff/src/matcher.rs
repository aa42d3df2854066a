use std::collections::HashMap;
use std::hash::Hash;

/// Sequences at least this long get their most frequent elements left out of the index
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of `size` equal elements: `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Ratcliff/Obershelp similarity over two sequences.
///
/// Matching blocks are found by repeatedly taking the longest common
/// contiguous run and recursing on both sides of it. For long `b` sequences,
/// elements occurring in more than 1% of positions are not indexed, which
/// keeps the search fast on HTML where a few bytes dominate.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    blocks: Vec<MatchBlock>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let index = index_positions(b);
        let blocks = compute_matching_blocks(a, b, &index);
        Self { a, b, blocks }
    }

    /// Non-overlapping, non-adjacent blocks in increasing order
    pub fn matching_blocks(&self) -> &[MatchBlock] {
        &self.blocks
    }

    pub fn matched_len(&self) -> usize {
        self.blocks.iter().map(|block| block.size).sum()
    }

    /// `2 * M / T`, where M is the matched length and T the combined length
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }

    /// Elements of `a` that are part of a matching block, in order
    pub fn common_elements(&self) -> impl Iterator<Item = &'a T> + '_ {
        let a = self.a;
        self.blocks
            .iter()
            .flat_map(move |block| a[block.a..block.a + block.size].iter())
    }
}

fn index_positions<T: Eq + Hash>(b: &[T]) -> HashMap<&T, Vec<usize>> {
    let mut index: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        index.entry(item).or_default().push(j);
    }

    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        index.retain(|_, positions| positions.len() <= limit);
    }

    index
}

fn longest_match<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    index: &HashMap<&T, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> MatchBlock {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

    // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    let mut next_j2len: HashMap<usize, usize> = HashMap::new();

    for (i, item) in a.iter().enumerate().take(ahi).skip(alo) {
        next_j2len.clear();
        if let Some(positions) = index.get(item) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let previous = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                } else {
                    0
                };
                let k = previous + 1;
                next_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        std::mem::swap(&mut j2len, &mut next_j2len);
    }

    // Popular elements are missing from the index; grow over equal neighbours.
    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < ahi
        && best_j + best_size < bhi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    MatchBlock {
        a: best_i,
        b: best_j,
        size: best_size,
    }
}

fn compute_matching_blocks<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    index: &HashMap<&T, Vec<usize>>,
) -> Vec<MatchBlock> {
    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let block = longest_match(a, b, index, (alo, ahi), (blo, bhi));
        if block.size == 0 {
            continue;
        }

        if alo < block.a && blo < block.b {
            queue.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a, block.b));

    let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(last) = merged.last_mut() {
            if last.a + last.size == block.a && last.b + last.size == block.b {
                last.size += block.size;
                continue;
            }
        }
        merged.push(block);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(a: &str, b: &str) -> f64 {
        SequenceMatcher::new(a.as_bytes(), b.as_bytes()).ratio()
    }

    #[test]
    fn test_ratio_basics() {
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("same", "same"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert!((ratio("abcd", "bcde") - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_matching_blocks() {
        let matcher = SequenceMatcher::new("abxcd".as_bytes(), "abcd".as_bytes());
        assert_eq!(
            matcher.matching_blocks(),
            &[
                MatchBlock { a: 0, b: 0, size: 2 },
                MatchBlock { a: 3, b: 2, size: 2 },
            ]
        );

        let matcher = SequenceMatcher::new("qabxcd".as_bytes(), "abycdf".as_bytes());
        assert_eq!(matcher.matched_len(), 4);
    }

    #[test]
    fn test_token_sequences() {
        let a = ["<html>", "<p>", "token=1", "</p>", "</html>"];
        let b = ["<html>", "<p>", "token=2", "</p>", "</html>"];
        let matcher = SequenceMatcher::new(&a, &b);

        let common: Vec<_> = matcher.common_elements().copied().collect();
        assert_eq!(common, vec!["<html>", "<p>", "</p>", "</html>"]);
        assert!((matcher.ratio() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_long_sequences_with_popular_elements() {
        // 'a' dominates both inputs and is left out of the index, so only the
        // first run survives as a matching block: 2 * 300 / 1202
        let a = format!("{}x{}", "a".repeat(300), "a".repeat(300));
        let b = format!("{}y{}", "a".repeat(300), "a".repeat(300));
        let r = ratio(&a, &b);
        assert!((r - 600.0 / 1202.0).abs() < 1e-9, "ratio was {r}");
    }
}
