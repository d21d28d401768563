//! Dictionary search and entry detail screen.

use alloc::{format, string::String, vec::Vec};

use heapless::String as HeaplessString;
use log::debug;

use super::{Outcome, list::ListView};
use crate::{
    input::InputEvent,
    lexicon::{LexiconEntry, LexiconStore, LookupEngine, LookupError},
    render::Screen,
    text_policy::{LINE_COLUMNS, wrap_lines},
};

/// Query buffer capacity in bytes; keystrokes past it are ignored.
pub const QUERY_CAPACITY: usize = 32;
/// Suffix drawn after the query as a cursor.
pub const CURSOR_MARK: char = '|';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DictionaryMode {
    Search,
    Detail,
}

pub struct DictionaryView {
    query: HeaplessString<QUERY_CAPACITY>,
    results: ListView,
    detail: ListView,
    mode: DictionaryMode,
    search_limit: usize,
}

impl DictionaryView {
    pub fn new(search_limit: usize) -> Self {
        let mut results = ListView::new(String::new(), true, false);
        results.set_title(search_title(""));
        Self {
            query: HeaplessString::new(),
            results,
            detail: ListView::new(String::new(), false, true),
            mode: DictionaryMode::Search,
            search_limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> DictionaryMode {
        self.mode
    }

    pub fn results(&self) -> &ListView {
        &self.results
    }

    pub fn detail(&self) -> &ListView {
        &self.detail
    }

    /// Returns to search mode and re-runs the current query.
    pub fn enter<S: LexiconStore>(
        &mut self,
        engine: &mut LookupEngine<S>,
    ) -> Result<(), LookupError<S::Error>> {
        let query = self.query.clone();
        self.search(engine, query)?;
        self.mode = DictionaryMode::Search;
        Ok(())
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.mode {
            DictionaryMode::Search => self.results.screen(),
            DictionaryMode::Detail => self.detail.screen(),
        }
    }

    pub fn process<S: LexiconStore>(
        &mut self,
        event: InputEvent,
        engine: &mut LookupEngine<S>,
    ) -> Result<Outcome, LookupError<S::Error>> {
        match self.mode {
            DictionaryMode::Search => self.process_search(event, engine),
            DictionaryMode::Detail => Ok(self.process_detail(event)),
        }
    }

    fn process_search<S: LexiconStore>(
        &mut self,
        event: InputEvent,
        engine: &mut LookupEngine<S>,
    ) -> Result<Outcome, LookupError<S::Error>> {
        match event {
            InputEvent::Char(ch) => {
                let mut query = self.query.clone();
                if query.push(ch).is_err() {
                    debug!("ui-dict: query full, dropped {:?}", ch);
                    return Ok(Outcome::Unchanged);
                }
                self.search(engine, query)?;
                Ok(Outcome::Redraw)
            }
            InputEvent::Backspace => {
                let mut query = self.query.clone();
                if query.pop().is_none() {
                    return Ok(Outcome::Exit);
                }
                self.search(engine, query)?;
                Ok(Outcome::Redraw)
            }
            InputEvent::Left => Ok(Outcome::Exit),
            InputEvent::Up => Ok(Outcome::redraw_if(self.results.select_up())),
            InputEvent::Down => Ok(Outcome::redraw_if(self.results.select_down())),
            InputEvent::Right => {
                let Some(word) = self.results.selected_item() else {
                    return Ok(Outcome::Unchanged);
                };
                let Some(entry) = engine.get(word)? else {
                    debug!("ui-dict: entry vanished word={:?}", word);
                    return Ok(Outcome::Unchanged);
                };
                self.show_detail(&entry);
                Ok(Outcome::Redraw)
            }
        }
    }

    fn process_detail(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Up => Outcome::redraw_if(self.detail.select_up()),
            InputEvent::Down => Outcome::redraw_if(self.detail.select_down()),
            InputEvent::Left | InputEvent::Backspace => {
                debug!(
                    "ui-dict: back to search query={:?} selected={}",
                    self.query.as_str(),
                    self.results.select_index()
                );
                self.mode = DictionaryMode::Search;
                Outcome::Redraw
            }
            InputEvent::Right | InputEvent::Char(_) => Outcome::Unchanged,
        }
    }

    /// Looks up `query` and adopts it only once the lookup succeeds.
    fn search<S: LexiconStore>(
        &mut self,
        engine: &mut LookupEngine<S>,
        query: HeaplessString<QUERY_CAPACITY>,
    ) -> Result<(), LookupError<S::Error>> {
        let words = engine.find(&query, self.search_limit)?;
        self.results.set_items(words);
        self.results.set_title(search_title(&query));
        self.query = query;
        Ok(())
    }

    fn show_detail(&mut self, entry: &LexiconEntry) {
        debug!(
            "ui-dict: detail word={:?} from selected={}",
            entry.word,
            self.results.select_index()
        );
        self.detail.set_title(entry.word.as_str());
        self.detail.set_items(detail_lines(entry));
        self.mode = DictionaryMode::Detail;
    }
}

fn search_title(query: &str) -> String {
    let mut title = String::with_capacity(query.len() + 1);
    title.push_str(query);
    title.push(CURSOR_MARK);
    title
}

/// Formats `entry` as display lines, each at most one screen line wide.
///
/// Field order: phonetic, tags, part of speech, translation, definition,
/// inflections. Empty fields produce no lines.
pub fn detail_lines(entry: &LexiconEntry) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |text: &str| lines.extend(wrap_lines(text, LINE_COLUMNS));

    if !entry.phonetic.is_empty() {
        push(&format!("/{}/", entry.phonetic));
    }

    let mut tags: Vec<String> = Vec::new();
    if entry.rating > 0 {
        tags.push(format!("★{}", entry.rating));
    }
    if entry.core_vocabulary {
        tags.push(String::from("牛津"));
    }
    tags.extend(entry.levels.labels().map(String::from));
    if !tags.is_empty() {
        push(&tags.join(" "));
    }

    push(&entry.part_of_speech);
    push(&entry.translation);
    push(&entry.definition);

    for (label, form) in entry.inflections.labelled() {
        push(&format!("{label} {form}"));
    }

    lines
}
