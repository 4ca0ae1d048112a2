//! Similarity metrics, both bounded to [0, 1].
//!
//! `text_similarity` is the classic Ratcliff/Obershelp "similarity ratio":
//! find the longest matching block, recurse on both sides, and report
//! `2 * matched / total_len`. `word_overlap` divides the intersection by the
//! size of the LARGER set, not the union.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Sequences at least this long get the popular-element heuristic
const AUTOJUNK_MIN_LEN: usize = 200;

/// Character-level similarity ratio of two (already normalized) strings.
///
/// Returns 1.0 for identical strings, including two empty strings, and 0.0
/// when no characters align. The block search breaks ties by position, so the
/// ratio is taken both ways and the smaller one reported.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let forward = BlockMatcher::new(&a, &b).matching_chars();
    let backward = BlockMatcher::new(&b, &a).matching_chars();
    (2.0 * forward.min(backward) as f64) / total as f64
}

/// `|A ∩ B| / max(|A|, |B|)`; 0.0 if either set is empty
pub fn word_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let common = a.intersection(b).count();
    common as f64 / a.len().max(b.len()) as f64
}

/// Longest-matching-block search over two char sequences
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each char of `b`, popular chars removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        // Very frequent chars in long sequences never seed a block
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > limit)
                .map(|(c, _)| *c)
                .collect();
            for c in popular {
                b2j.remove(&c);
            }
        }

        Self { a, b, b2j }
    }

    /// Longest block `(i, j, size)` inside `a[alo..ahi]` and `b[blo..bhi]`.
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 } + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular chars may still extend a block on either side
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total chars covered by the recursive block decomposition
    fn matching_chars(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_identical_strings() {
        for s in ["", "a", "hello", "how can i connect hive server to power bi"] {
            assert_abs_diff_eq!(text_similarity(s, s), 1.0);
        }
    }

    #[test]
    fn test_disjoint_strings() {
        assert_abs_diff_eq!(text_similarity("abc", "xyz"), 0.0);
        assert_abs_diff_eq!(text_similarity("", "xyz"), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert_abs_diff_eq!(text_similarity("abcd", "bcde"), 0.75);
        // "hii" vs "hello": "h" then nothing else aligns after it... "h" only
        assert_abs_diff_eq!(text_similarity("hii", "hello"), 0.25);
        assert_abs_diff_eq!(text_similarity("hello", "hello world"), 10.0 / 16.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("abcd", "bcda"),
            ("what is ai", "what is power bi"),
            ("connect hive", "how can i connect hive server to power bi"),
            ("tide", "diet"),
        ];
        for (a, b) in pairs {
            assert_eq!(text_similarity(a, b), text_similarity(b, a));
        }
    }

    #[test]
    fn test_order_dependent_pair_takes_lower_ratio() {
        // 10 chars align in query-first order, 11 the other way round
        let query = "tell me about python";
        let question = "tell me a joke";
        assert_eq!(text_similarity(query, question), text_similarity(question, query));
        assert_abs_diff_eq!(text_similarity(query, question), 20.0 / 34.0, epsilon = 1e-12);
    }

    #[test]
    fn test_long_sequence_popular_chars() {
        let long = "a ".repeat(150);
        let score = text_similarity(&long, &long);
        assert_abs_diff_eq!(score, 1.0);
        let other = format!("{}b", long);
        let score = text_similarity(&long, &other);
        assert!(score > 0.99 && score < 1.0);
    }

    #[test]
    fn test_word_overlap_uses_larger_set() {
        let a = set(&["power", "bi"]);
        let b = set(&["power", "bi", "gateway", "refresh"]);
        assert_abs_diff_eq!(word_overlap(&a, &b), 0.5);
        assert_abs_diff_eq!(word_overlap(&b, &a), 0.5);
    }

    #[test]
    fn test_word_overlap_empty() {
        assert_abs_diff_eq!(word_overlap(&set(&[]), &set(&["x"])), 0.0);
        assert_abs_diff_eq!(word_overlap(&set(&["x"]), &set(&[])), 0.0);
    }
}
