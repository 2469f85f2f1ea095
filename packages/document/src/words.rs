//! Word counting.
//!
//! Counts are cached on every persisted node and only recomputed for
//! nodes the editing bridge actually rebuilds. Three buckets are kept
//! separately: manuscript text, comments, and "missing" placeholders,
//! so the UI can report "42,000 words, 300 still missing".

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Cached word counts for a node and its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordCount {
    /// Words of manuscript text (paragraphs, synopses, headers).
    pub text: u32,
    /// Words inside comment blocks.
    pub comments: u32,
    /// Words inside missing-content placeholders.
    pub missing: u32,
}

impl WordCount {
    pub const ZERO: WordCount = WordCount {
        text: 0,
        comments: 0,
        missing: 0,
    };

    /// Total across all buckets.
    pub fn total(&self) -> u32 {
        self.text + self.comments + self.missing
    }
}

impl Add for WordCount {
    type Output = WordCount;

    fn add(self, rhs: WordCount) -> WordCount {
        WordCount {
            text: self.text + rhs.text,
            comments: self.comments + rhs.comments,
            missing: self.missing + rhs.missing,
        }
    }
}

impl AddAssign for WordCount {
    fn add_assign(&mut self, rhs: WordCount) {
        *self = *self + rhs;
    }
}

impl Sum for WordCount {
    fn sum<I: Iterator<Item = WordCount>>(iter: I) -> WordCount {
        iter.fold(WordCount::ZERO, Add::add)
    }
}

/// Count whitespace-separated words in a piece of text.
///
/// Deterministic and intentionally simple: a word is any maximal run
/// of non-whitespace characters.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_basic() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("the quick brown fox"), 4);
        assert_eq!(word_count("  leading   and trailing  "), 3);
    }

    #[test]
    fn test_word_count_unicode_whitespace() {
        assert_eq!(word_count("mot\u{00a0}clé"), 1); // NBSP is not a separator
        assert_eq!(word_count("a\tb\nc"), 3);
    }

    #[test]
    fn test_word_count_sum() {
        let counts = vec![
            WordCount {
                text: 10,
                comments: 1,
                missing: 0,
            },
            WordCount {
                text: 5,
                comments: 0,
                missing: 2,
            },
        ];
        let total: WordCount = counts.into_iter().sum();
        assert_eq!(total.text, 15);
        assert_eq!(total.comments, 1);
        assert_eq!(total.missing, 2);
        assert_eq!(total.total(), 18);
    }
}
