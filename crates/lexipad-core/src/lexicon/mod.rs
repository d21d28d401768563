//! Dictionary entries and the lookup engine over a pluggable lexicon store.

pub mod memory;
pub mod query;

use alloc::{string::String, vec::Vec};
use core::fmt;

use log::{debug, warn};

use crate::settings::FilterSettings;

pub use memory::MemoryLexicon;
pub use query::{Exclusion, LookupQuery};

/// Vocabulary ranges an entry belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LevelFlags {
    pub gaokao: bool,
    pub cet4: bool,
    pub cet6: bool,
    pub kaoyan: bool,
}

impl LevelFlags {
    /// Labels of the set flags, in display order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.gaokao, "高考"),
            (self.cet4, "四级"),
            (self.cet6, "六级"),
            (self.kaoyan, "考研"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
    }
}

/// Inflected forms; empty strings mean "not recorded".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Inflections {
    pub plural: String,
    pub comparative: String,
    pub superlative: String,
    pub present_participle: String,
    pub past: String,
    pub past_participle: String,
    pub third_person: String,
    pub lemma: String,
}

impl Inflections {
    /// Recorded forms with their labels, in display order.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("复数", self.plural.as_str()),
            ("比较级", self.comparative.as_str()),
            ("最高级", self.superlative.as_str()),
            ("现在分词", self.present_participle.as_str()),
            ("过去式", self.past.as_str()),
            ("过去分词", self.past_participle.as_str()),
            ("第三人称单数", self.third_person.as_str()),
            ("原形", self.lemma.as_str()),
        ]
        .into_iter()
        .filter(|(_, form)| !form.is_empty())
    }
}

/// One dictionary record keyed by `word`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LexiconEntry {
    pub word: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub definition: String,
    /// Chinese translation; multi-sense translations are newline separated.
    pub translation: String,
    /// Collins stars, 0 to 5.
    pub rating: u8,
    /// Oxford 3000 core vocabulary.
    pub core_vocabulary: bool,
    pub levels: LevelFlags,
    pub inflections: Inflections,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = phonetic.into();
        self
    }

    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = part_of_speech.into();
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(5);
        self
    }

    pub fn with_core_vocabulary(mut self, core_vocabulary: bool) -> Self {
        self.core_vocabulary = core_vocabulary;
        self
    }

    pub fn with_levels(mut self, levels: LevelFlags) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_inflections(mut self, inflections: Inflections) -> Self {
        self.inflections = inflections;
        self
    }
}

/// Keyed lexicon backend.
pub trait LexiconStore {
    type Error;

    /// Keys admitted by `query`, in key order, at most `query.limit` of them.
    fn find(&mut self, query: &LookupQuery<'_>) -> Result<Vec<String>, Self::Error>;

    /// Entry whose key equals `word`, ignoring ASCII case.
    fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, Self::Error>;

    fn close(&mut self) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupError<E> {
    /// The lexicon was closed or never opened.
    DictionaryClosed,
    Store(E),
}

impl<E: fmt::Display> fmt::Display for LookupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DictionaryClosed => f.write_str("operation on closed dictionary"),
            Self::Store(err) => write!(f, "lexicon store: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for LookupError<E> {}

/// Filtered lookups against an owned lexicon store.
///
/// The store is closed by [`LookupEngine::close`] or when the engine is
/// dropped; afterwards every lookup fails with
/// [`LookupError::DictionaryClosed`].
pub struct LookupEngine<S: LexiconStore> {
    store: Option<S>,
    filters: FilterSettings,
}

impl<S: LexiconStore> LookupEngine<S> {
    pub fn new(store: S, filters: FilterSettings) -> Self {
        Self {
            store: Some(store),
            filters,
        }
    }

    /// Engine without a store; every lookup reports a closed dictionary.
    pub fn detached(filters: FilterSettings) -> Self {
        Self {
            store: None,
            filters,
        }
    }

    pub fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSettings) {
        self.filters = filters;
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }

    /// Keys starting with `prefix` that pass the active filters.
    pub fn find(
        &mut self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, LookupError<S::Error>> {
        let store = self.store.as_mut().ok_or(LookupError::DictionaryClosed)?;
        let query = LookupQuery::compose(prefix, limit, &self.filters);
        let words = store.find(&query).map_err(LookupError::Store)?;
        debug!(
            "lexicon: find prefix={:?} limit={} exclusions={} hits={}",
            prefix,
            limit,
            query.exclusions.len(),
            words.len()
        );
        Ok(words)
    }

    pub fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, LookupError<S::Error>> {
        let store = self.store.as_mut().ok_or(LookupError::DictionaryClosed)?;
        store.get(word).map_err(LookupError::Store)
    }

    /// Closes the store. Closing an already closed engine succeeds.
    pub fn close(&mut self) -> Result<(), LookupError<S::Error>> {
        let Some(mut store) = self.store.take() else {
            return Ok(());
        };
        debug!("lexicon: close");
        store.close().map_err(LookupError::Store)
    }
}

impl<S: LexiconStore> Drop for LookupEngine<S> {
    fn drop(&mut self) {
        if self.close().is_err() {
            warn!("lexicon: close on drop failed");
        }
    }
}
