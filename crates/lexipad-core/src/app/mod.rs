//! Event loop wiring input, navigation, rendering and the display.

use core::fmt;

use log::{debug, info};
use st7920::FrameBuffer;

use crate::{
    input::InputProvider,
    lexicon::{LexiconStore, LookupError},
    render::GlyphTable,
    ui::{Navigator, TickResult},
};

#[cfg(test)]
mod tests;

/// Keys shown per search.
pub const SEARCH_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppConfig {
    pub search_limit: usize,
    pub menu_title: &'static str,
    pub settings_title: &'static str,
    pub about_title: &'static str,
    pub about_lines: &'static [&'static str],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_limit: SEARCH_LIMIT,
            menu_title: "lexipad",
            settings_title: "设置",
            about_title: "关于",
            about_lines: &[
                concat!("lexipad ", env!("CARGO_PKG_VERSION")),
                "英汉辞典",
                "ST7920 128x64",
                "ECDICT 词库",
                "Unifont 字体",
                "MIT License",
            ],
        }
    }
}

/// Display the event loop presents frames to.
pub trait FrameSink {
    type Error;

    /// Frame the next screen is painted into.
    fn frame_mut(&mut self) -> &mut FrameBuffer;

    /// Pushes the painted frame to the panel; `force` rewrites every word.
    /// Returns the number of display words written.
    fn present(&mut self, force: bool) -> Result<usize, Self::Error>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunError<I, L, D> {
    Input(I),
    Lookup(LookupError<L>),
    Sink(D),
}

impl<I: fmt::Debug, L: fmt::Display, D: fmt::Debug> fmt::Display for RunError<I, L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "input: {err:?}"),
            Self::Lookup(err) => write!(f, "lookup: {err}"),
            Self::Sink(err) => write!(f, "display: {err:?}"),
        }
    }
}

impl<I, L, D> core::error::Error for RunError<I, L, D>
where
    I: fmt::Debug,
    L: fmt::Debug + fmt::Display,
    D: fmt::Debug,
{
}

/// Counters reported when the input ends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub events: u32,
    pub frames: u32,
    pub words_written: usize,
}

type RunResult<T, IN, S, OUT> = Result<
    T,
    RunError<<IN as InputProvider>::Error, <S as LexiconStore>::Error, <OUT as FrameSink>::Error>,
>;

/// Runs the UI until `input` reports end of input.
///
/// The first frame is pushed with a full rewrite; later frames only send the
/// words that changed. Input, lookup and display failures stop the loop.
pub fn run<S, IN, OUT>(
    navigator: &mut Navigator<S>,
    glyphs: &GlyphTable<'_>,
    input: &mut IN,
    sink: &mut OUT,
) -> RunResult<RunSummary, IN, S, OUT>
where
    S: LexiconStore,
    IN: InputProvider,
    OUT: FrameSink,
{
    let mut summary = RunSummary::default();

    navigator.render(glyphs, sink.frame_mut());
    summary.words_written += sink.present(true).map_err(RunError::Sink)?;
    summary.frames += 1;

    while let Some(event) = input.next_event().map_err(RunError::Input)? {
        summary.events = summary.events.saturating_add(1);

        match navigator.process(event).map_err(RunError::Lookup)? {
            TickResult::NoRender => {
                debug!("app: {:?} ignored in {:?}", event, navigator.mode());
            }
            TickResult::RenderRequested => {
                navigator.render(glyphs, sink.frame_mut());
                let words = sink.present(false).map_err(RunError::Sink)?;
                summary.words_written += words;
                summary.frames = summary.frames.saturating_add(1);
                debug!("app: {:?} -> {:?} words={}", event, navigator.mode(), words);
            }
        }
    }

    info!(
        "app: input ended events={} frames={} words={}",
        summary.events, summary.frames, summary.words_written
    );
    Ok(summary)
}
