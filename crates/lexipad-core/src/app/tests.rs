use alloc::vec::Vec;

use super::*;
use crate::{
    input::{InputEvent, mock::ScriptedInput},
    lexicon::{LexiconEntry, LookupEngine, MemoryLexicon},
    render::glyph::tests::sample_table,
    settings::FilterSettings,
    ui::Mode,
};

/// Sink that keeps every presented frame.
#[derive(Default)]
struct RecordingSink {
    frame: FrameBuffer,
    presented: Vec<(FrameBuffer, bool)>,
    fail_after: Option<usize>,
}

impl FrameSink for RecordingSink {
    type Error = &'static str;

    fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn present(&mut self, force: bool) -> Result<usize, Self::Error> {
        if self.fail_after == Some(self.presented.len()) {
            return Err("bus");
        }
        self.presented.push((self.frame.clone(), force));
        Ok(if force { 512 } else { 1 })
    }
}

struct FailingInput;

impl InputProvider for FailingInput {
    type Error = ();

    fn next_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Err(())
    }
}

fn make_navigator() -> Navigator<MemoryLexicon> {
    let lexicon = MemoryLexicon::from_entries([
        LexiconEntry::new("A").with_rating(1),
        LexiconEntry::new("AA").with_rating(1),
    ]);
    Navigator::new(
        LookupEngine::new(lexicon, FilterSettings::default()),
        &AppConfig::default(),
    )
}

#[test]
fn run_presents_once_per_render_request() {
    let bytes = sample_table();
    let glyphs = GlyphTable::unifont(&bytes);
    let mut nav = make_navigator();
    let events = [
        InputEvent::Right,
        InputEvent::Left,
        InputEvent::Left,
        InputEvent::Right,
        InputEvent::Char('A'),
    ];
    let mut input = ScriptedInput::new(&events);
    let mut sink = RecordingSink::default();

    let summary = run(&mut nav, &glyphs, &mut input, &mut sink).unwrap();

    assert_eq!(summary.events, 5);
    // Initial frame plus every event except the second LEFT on the menu.
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.words_written, 512 + 4);
    assert_eq!(input.remaining(), 0);
    assert!(sink.presented[0].1);
    assert!(sink.presented[1..].iter().all(|(_, force)| !force));
    assert_eq!(nav.mode(), Mode::Dictionary);
    assert_eq!(nav.dictionary().query(), "A");
}

#[test]
fn presented_frame_matches_the_navigator_screen() {
    let bytes = sample_table();
    let glyphs = GlyphTable::unifont(&bytes);
    let mut nav = make_navigator();
    let events = [InputEvent::Right, InputEvent::Char('A')];
    let mut input = ScriptedInput::new(&events);
    let mut sink = RecordingSink::default();

    run(&mut nav, &glyphs, &mut input, &mut sink).unwrap();

    let mut expected = FrameBuffer::new();
    crate::render::render_screen(&nav.screen(), &glyphs, &mut expected);
    let (last, _) = sink.presented.last().unwrap();
    assert_eq!(*last, expected);
}

#[test]
fn empty_script_only_draws_the_menu() {
    let bytes = sample_table();
    let glyphs = GlyphTable::unifont(&bytes);
    let mut nav = make_navigator();
    let mut input = ScriptedInput::new(&[]);
    let mut sink = RecordingSink::default();

    let summary = run(&mut nav, &glyphs, &mut input, &mut sink).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            events: 0,
            frames: 1,
            words_written: 512,
        }
    );
}

#[test]
fn failures_stop_the_loop() {
    let bytes = sample_table();
    let glyphs = GlyphTable::unifont(&bytes);

    let mut nav = make_navigator();
    let mut sink = RecordingSink::default();
    let result = run(&mut nav, &glyphs, &mut FailingInput, &mut sink);
    assert_eq!(result, Err(RunError::Input(())));

    let mut nav = make_navigator();
    let events = [InputEvent::Down, InputEvent::Down];
    let mut input = ScriptedInput::new(&events);
    let mut sink = RecordingSink {
        fail_after: Some(1),
        ..RecordingSink::default()
    };
    let result = run(&mut nav, &glyphs, &mut input, &mut sink);
    assert_eq!(result, Err(RunError::Sink("bus")));
    assert_eq!(input.remaining(), 1);

    let mut nav = make_navigator();
    nav.close().unwrap();
    let events = [InputEvent::Right];
    let mut input = ScriptedInput::new(&events);
    let result = run(&mut nav, &glyphs, &mut input, &mut RecordingSink::default());
    assert_eq!(result, Err(RunError::Lookup(LookupError::DictionaryClosed)));
}
