use alloc::{string::String, vec::Vec};
use core::{cmp::Ordering, convert::Infallible};

use super::{LexiconEntry, LexiconStore, LookupQuery};

/// Lexicon held in memory, ordered by key ignoring ASCII case.
#[derive(Clone, Debug, Default)]
pub struct MemoryLexicon {
    entries: Vec<LexiconEntry>,
}

impl MemoryLexicon {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds the lexicon; of several entries with the same key only the first is kept.
    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut entries: Vec<LexiconEntry> = entries.into_iter().collect();
        entries.sort_by(|a, b| compare_keys(&a.word, &b.word));
        entries.dedup_by(|next, kept| compare_keys(&next.word, &kept.word) == Ordering::Equal);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, word: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|entry| compare_keys(&entry.word, word))
            .ok()
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

impl LexiconStore for MemoryLexicon {
    type Error = Infallible;

    fn find(&mut self, query: &LookupQuery<'_>) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| query.admits(entry))
            .take(query.limit)
            .map(|entry| entry.word.clone())
            .collect())
    }

    fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, Self::Error> {
        Ok(self.position(word).map(|index| self.entries[index].clone()))
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
