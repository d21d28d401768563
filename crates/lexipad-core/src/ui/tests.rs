use alloc::{rc::Rc, string::String, vec::Vec};
use core::{
    cell::{Cell, RefCell},
    convert::Infallible,
};

use super::*;
use crate::{
    lexicon::{LexiconEntry, LookupQuery, MemoryLexicon},
    render::glyph::tests::sample_table,
    settings::FilterSettings,
};

/// Memory lexicon that records every prefix it is asked for.
struct RecordingLexicon {
    inner: MemoryLexicon,
    prefixes: Rc<RefCell<Vec<String>>>,
}

impl LexiconStore for RecordingLexicon {
    type Error = Infallible;

    fn find(&mut self, query: &LookupQuery<'_>) -> Result<Vec<String>, Self::Error> {
        self.prefixes.borrow_mut().push(query.prefix.into());
        self.inner.find(query)
    }

    fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, Self::Error> {
        self.inner.get(word)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.inner.close()
    }
}

/// Memory lexicon whose lookups fail while `offline` is set.
struct UnreliableLexicon {
    inner: MemoryLexicon,
    offline: Rc<Cell<bool>>,
}

impl LexiconStore for UnreliableLexicon {
    type Error = &'static str;

    fn find(&mut self, query: &LookupQuery<'_>) -> Result<Vec<String>, Self::Error> {
        if self.offline.get() {
            return Err("offline");
        }
        Ok(self.inner.find(query).unwrap_or_default())
    }

    fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, Self::Error> {
        if self.offline.get() {
            return Err("offline");
        }
        Ok(self.inner.get(word).unwrap_or_default())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn lexicon() -> MemoryLexicon {
    MemoryLexicon::from_entries([
        LexiconEntry::new("ca").with_rating(1).with_translation("abbr. 加利福尼亚"),
        LexiconEntry::new("cab").with_rating(2).with_translation("n. 出租车"),
        LexiconEntry::new("cake").with_rating(3).with_translation("n. 蛋糕"),
        LexiconEntry::new("cat").with_rating(3).with_translation("n. 猫"),
        LexiconEntry::new("catch").with_rating(4).with_translation("v. 抓住"),
        LexiconEntry::new("cattle").with_rating(2).with_translation("n. 牛"),
        LexiconEntry::new("cat fight").with_rating(1).with_translation("猫打架"),
    ])
}

fn navigator() -> (Navigator<RecordingLexicon>, Rc<RefCell<Vec<String>>>) {
    let prefixes = Rc::new(RefCell::new(Vec::new()));
    let store = RecordingLexicon {
        inner: lexicon(),
        prefixes: prefixes.clone(),
    };
    let engine = LookupEngine::new(store, FilterSettings::default());
    (Navigator::new(engine, &AppConfig::default()), prefixes)
}

fn feed<S: LexiconStore>(nav: &mut Navigator<S>, events: &[InputEvent]) {
    for event in events {
        assert!(nav.process(*event).is_ok());
    }
}

fn type_text<S: LexiconStore>(nav: &mut Navigator<S>, text: &str) {
    for ch in text.chars() {
        assert!(nav.process(InputEvent::Char(ch)).is_ok());
    }
}

fn texts(nav: &Navigator<impl LexiconStore>) -> Vec<String> {
    nav.screen().row_texts().map(String::from).collect()
}

#[test]
fn starts_on_the_main_menu() {
    let (nav, prefixes) = navigator();

    assert_eq!(nav.mode(), Mode::Menu);
    assert!(nav.pending_redraw());
    assert_eq!(texts(&nav), ["辞典", "设置", "关于"]);
    assert_eq!(nav.screen().highlighted_row(), Some(0));
    assert!(prefixes.borrow().is_empty());
}

#[test]
fn typing_requeries_after_every_keystroke() {
    let (mut nav, prefixes) = navigator();
    feed(&mut nav, &[InputEvent::Right]);
    assert_eq!(nav.mode(), Mode::Dictionary);

    type_text(&mut nav, "cat");

    assert_eq!(nav.dictionary().query(), "cat");
    assert_eq!(*prefixes.borrow(), ["", "c", "ca", "cat"]);
    assert_eq!(nav.screen().title, "cat|");
    assert_eq!(texts(&nav), ["cat", "catch", "cattle"]);
    assert_eq!(nav.dictionary().results().select_index(), 0);

    assert_eq!(nav.process(InputEvent::Backspace), Ok(TickResult::RenderRequested));
    assert_eq!(nav.dictionary().query(), "ca");
    assert_eq!(prefixes.borrow().last().map(String::as_str), Some("ca"));
}

#[test]
fn default_filters_hide_phrases_and_abbreviations() {
    let (mut nav, _) = navigator();
    feed(&mut nav, &[InputEvent::Right]);
    type_text(&mut nav, "ca");

    let results = nav.dictionary().results().items().to_vec();
    assert_eq!(results, ["cab", "cake", "cat", "catch", "cattle"]);
    assert!(results.iter().all(|word| !word.contains(' ')));
}

#[test]
fn detail_round_trip_restores_query_and_selection() {
    let (mut nav, prefixes) = navigator();
    feed(&mut nav, &[InputEvent::Right]);
    type_text(&mut nav, "cat");
    feed(&mut nav, &[InputEvent::Down]);
    let queries_before = prefixes.borrow().len();

    assert_eq!(nav.process(InputEvent::Right), Ok(TickResult::RenderRequested));
    assert_eq!(nav.dictionary().mode(), DictionaryMode::Detail);
    assert_eq!(nav.screen().title, "catch");
    assert_eq!(texts(&nav), ["★4", "v. 抓住"]);
    assert_eq!(nav.screen().highlighted_row(), None);

    feed(&mut nav, &[InputEvent::Down, InputEvent::Left]);

    assert_eq!(nav.dictionary().mode(), DictionaryMode::Search);
    assert_eq!(nav.dictionary().query(), "cat");
    assert_eq!(nav.dictionary().results().select_index(), 1);
    assert_eq!(nav.screen().highlighted_row(), Some(1));
    assert_eq!(prefixes.borrow().len(), queries_before);
}

#[test]
fn backspace_in_detail_returns_without_editing_the_query() {
    let (mut nav, prefixes) = navigator();
    feed(&mut nav, &[InputEvent::Right]);
    type_text(&mut nav, "cat");
    feed(&mut nav, &[InputEvent::Down, InputEvent::Down, InputEvent::Right]);
    assert_eq!(nav.dictionary().mode(), DictionaryMode::Detail);
    assert_eq!(nav.screen().title, "cattle");
    let queries_before = prefixes.borrow().len();

    assert_eq!(nav.process(InputEvent::Backspace), Ok(TickResult::RenderRequested));

    assert_eq!(nav.mode(), Mode::Dictionary);
    assert_eq!(nav.dictionary().mode(), DictionaryMode::Search);
    assert_eq!(nav.dictionary().query(), "cat");
    assert_eq!(nav.screen().title, "cat|");
    assert_eq!(texts(&nav), ["cat", "catch", "cattle"]);
    assert_eq!(nav.dictionary().results().select_index(), 2);
    assert_eq!(nav.screen().highlighted_row(), Some(2));
    assert_eq!(prefixes.borrow().len(), queries_before);
}

#[test]
fn failed_lookup_keeps_the_previous_query_and_results() {
    let offline = Rc::new(Cell::new(false));
    let store = UnreliableLexicon {
        inner: lexicon(),
        offline: offline.clone(),
    };
    let mut nav = Navigator::new(
        LookupEngine::new(store, FilterSettings::default()),
        &AppConfig::default(),
    );
    feed(&mut nav, &[InputEvent::Right]);
    type_text(&mut nav, "ca");
    let results_before = texts(&nav);

    offline.set(true);
    assert_eq!(
        nav.process(InputEvent::Char('t')),
        Err(LookupError::Store("offline"))
    );
    assert_eq!(nav.dictionary().query(), "ca");
    assert_eq!(nav.screen().title, "ca|");
    assert_eq!(texts(&nav), results_before);

    assert_eq!(
        nav.process(InputEvent::Backspace),
        Err(LookupError::Store("offline"))
    );
    assert_eq!(nav.dictionary().query(), "ca");

    offline.set(false);
    assert_eq!(nav.process(InputEvent::Char('t')), Ok(TickResult::RenderRequested));
    assert_eq!(nav.dictionary().query(), "cat");
    assert_eq!(nav.screen().title, "cat|");
}

#[test]
fn backspace_on_an_empty_query_returns_to_the_menu() {
    let (mut nav, _) = navigator();
    feed(&mut nav, &[InputEvent::Right]);
    type_text(&mut nav, "c");

    feed(&mut nav, &[InputEvent::Backspace]);
    assert_eq!(nav.mode(), Mode::Dictionary);
    feed(&mut nav, &[InputEvent::Backspace]);
    assert_eq!(nav.mode(), Mode::Menu);

    feed(&mut nav, &[InputEvent::Right, InputEvent::Left]);
    assert_eq!(nav.mode(), Mode::Menu);
}

#[test]
fn settings_toggle_applies_to_the_next_lookup() {
    let (mut nav, _) = navigator();
    feed(&mut nav, &[InputEvent::Down, InputEvent::Right]);
    assert_eq!(nav.mode(), Mode::Settings);
    assert_eq!(texts(&nav)[0], "  词组");

    assert_eq!(nav.process(InputEvent::Right), Ok(TickResult::RenderRequested));
    assert!(nav.engine().filters().phrases);
    assert_eq!(texts(&nav)[0], "+ 词组");

    feed(&mut nav, &[InputEvent::Left, InputEvent::Up, InputEvent::Right]);
    assert_eq!(nav.mode(), Mode::Dictionary);
    type_text(&mut nav, "cat");
    assert!(
        nav.dictionary()
            .results()
            .items()
            .iter()
            .any(|word| word == "cat fight")
    );
}

#[test]
fn events_that_do_not_apply_request_no_render() {
    let (mut nav, _) = navigator();

    assert_eq!(nav.process(InputEvent::Left), Ok(TickResult::NoRender));
    assert_eq!(nav.process(InputEvent::Char('x')), Ok(TickResult::NoRender));
    assert_eq!(nav.process(InputEvent::Backspace), Ok(TickResult::NoRender));
    assert_eq!(nav.mode(), Mode::Menu);
}

#[test]
fn menu_selection_wraps_around() {
    let (mut nav, _) = navigator();

    feed(&mut nav, &[InputEvent::Up]);
    assert_eq!(nav.menu().selected_entry(), Some(MenuEntry::About));
    feed(&mut nav, &[InputEvent::Down]);
    assert_eq!(nav.menu().selected_entry(), Some(MenuEntry::Dictionary));
}

#[test]
fn closed_dictionary_surfaces_on_entry() {
    let (mut nav, _) = navigator();
    assert!(nav.close().is_ok());

    assert_eq!(
        nav.process(InputEvent::Right),
        Err(LookupError::DictionaryClosed)
    );
    assert_eq!(nav.mode(), Mode::Menu);
}

#[test]
fn render_paints_the_active_screen_and_clears_the_request() {
    let bytes = sample_table();
    let glyphs = GlyphTable::unifont(&bytes);
    let store = MemoryLexicon::from_entries([LexiconEntry::new("A").with_rating(1)]);
    let mut nav = Navigator::new(
        LookupEngine::new(store, FilterSettings::default()),
        &AppConfig::default(),
    );
    feed(&mut nav, &[InputEvent::Right, InputEvent::Char('A')]);
    let mut frame = FrameBuffer::new();

    nav.render(&glyphs, &mut frame);

    assert!(!nav.pending_redraw());
    // "A|": title glyph column drawn, no inverted title bar.
    assert!(frame.pixel(0, 4));
    assert!(!frame.pixel(127, 4));
    // Single highlighted result: bar with the glyph column cut out.
    assert!(!frame.pixel(0, 20));
    assert!(frame.pixel(1, 20));
    assert!(frame.pixel(127, 31));
}
