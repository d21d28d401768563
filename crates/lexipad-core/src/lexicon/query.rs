//! Lookup query composition from filter settings.

use alloc::{format, string::String};

use heapless::Vec as HeaplessVec;

use super::LexiconEntry;
use crate::settings::{FilterOption, FilterSettings};

pub const MARKER_ABBREVIATION: &str = "abbr.";
pub const MARKER_NETWORK: &str = "[网络]";
pub const MARKER_PLACE: &str = "[地名]";
pub const MARKER_MEDICAL: &str = "[医]";
pub const MARKER_PHARMACOLOGICAL: &str = "[药]";
pub const MARKER_CHEMICAL: &str = "[化]";

/// One active exclusion predicate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Exclusion {
    /// Keys containing a space.
    Phrases,
    /// Entries with no Collins stars.
    ZeroRated,
    /// Single-sense translations (no newline) containing the marker.
    Marker(&'static str),
    /// Keys containing an ASCII or full-width opening parenthesis.
    Parentheses,
}

impl Exclusion {
    pub const fn for_option(option: FilterOption) -> Self {
        match option {
            FilterOption::Phrases => Self::Phrases,
            FilterOption::ZeroRated => Self::ZeroRated,
            FilterOption::Abbreviations => Self::Marker(MARKER_ABBREVIATION),
            FilterOption::NetworkSlang => Self::Marker(MARKER_NETWORK),
            FilterOption::PlaceNames => Self::Marker(MARKER_PLACE),
            FilterOption::Medical => Self::Marker(MARKER_MEDICAL),
            FilterOption::Pharmacological => Self::Marker(MARKER_PHARMACOLOGICAL),
            FilterOption::Chemical => Self::Marker(MARKER_CHEMICAL),
            FilterOption::Parentheses => Self::Parentheses,
        }
    }

    /// Whether `entry` is dropped by this exclusion.
    pub fn excludes(&self, entry: &LexiconEntry) -> bool {
        match self {
            Self::Phrases => entry.word.contains(' '),
            Self::ZeroRated => entry.rating == 0,
            Self::Marker(marker) => {
                !entry.translation.contains('\n') && entry.translation.contains(marker)
            }
            Self::Parentheses => entry.word.contains(['(', '（']),
        }
    }

    /// SQLite predicate that holds for the rows this exclusion keeps.
    ///
    /// Column names follow the `ecdict` table; markers are constants and
    /// never contain quotes.
    pub fn sql(&self) -> String {
        match self {
            Self::Phrases => String::from("instr(word, ' ') = 0"),
            Self::ZeroRated => String::from("coalesce(collins, 0) > 0"),
            Self::Marker(marker) => format!(
                "(instr(coalesce(translation, ''), char(10)) > 0 \
                 OR instr(coalesce(translation, ''), '{marker}') = 0)"
            ),
            Self::Parentheses => String::from("instr(word, '(') = 0 AND instr(word, '（') = 0"),
        }
    }
}

/// Prefix lookup with the exclusions derived from the current settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LookupQuery<'a> {
    pub prefix: &'a str,
    pub limit: usize,
    pub exclusions: HeaplessVec<Exclusion, { FilterOption::COUNT }>,
}

impl<'a> LookupQuery<'a> {
    /// One exclusion per disabled option, in option order.
    pub fn compose(prefix: &'a str, limit: usize, filters: &FilterSettings) -> Self {
        let mut exclusions = HeaplessVec::new();
        for (option, enabled) in filters.iter() {
            if !enabled {
                let _ = exclusions.push(Exclusion::for_option(option));
            }
        }

        Self {
            prefix,
            limit,
            exclusions,
        }
    }

    /// ASCII case-insensitive prefix test, matching SQLite `LIKE`.
    pub fn matches_prefix(&self, word: &str) -> bool {
        let prefix = self.prefix.as_bytes();
        word.as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    pub fn admits(&self, entry: &LexiconEntry) -> bool {
        self.matches_prefix(&entry.word)
            && !self
                .exclusions
                .iter()
                .any(|exclusion| exclusion.excludes(entry))
    }

    /// `LIKE` pattern for the prefix; `%`, `_` and `\` are escaped with `\`.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.prefix.len() + 2);
        for ch in self.prefix.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// `WHERE` body binding the pattern as `?1`.
    pub fn where_clause(&self) -> String {
        let mut clause = String::from("word LIKE ?1 ESCAPE '\\'");
        for exclusion in &self.exclusions {
            clause.push_str(" AND ");
            clause.push_str(&exclusion.sql());
        }
        clause
    }
}
