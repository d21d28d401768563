//! Menu and dictionary navigation state machine.

pub mod dictionary;
pub mod list;
pub mod menu;

#[cfg(test)]
mod tests;

use log::debug;
use st7920::FrameBuffer;

use crate::{
    app::AppConfig,
    input::InputEvent,
    lexicon::{LexiconStore, LookupEngine, LookupError},
    render::{GlyphTable, Screen, render_screen},
};

pub use dictionary::{DictionaryMode, DictionaryView};
pub use list::{ListView, VisibleRow, Window, window};
pub use menu::{AboutView, MenuEntry, MenuView, SettingsView};

/// Top-level screen the navigator routes events to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Menu,
    Settings,
    About,
    Dictionary,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// What a view did with one event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Unchanged,
    Redraw,
    /// Leave the view for the main menu.
    Exit,
    Enter(Mode),
}

impl Outcome {
    pub const fn redraw_if(changed: bool) -> Self {
        if changed { Self::Redraw } else { Self::Unchanged }
    }
}

pub struct Navigator<S: LexiconStore> {
    engine: LookupEngine<S>,
    mode: Mode,
    menu: MenuView,
    settings: SettingsView,
    about: AboutView,
    dictionary: DictionaryView,
    pending_redraw: bool,
}

impl<S: LexiconStore> Navigator<S> {
    pub fn new(engine: LookupEngine<S>, config: &AppConfig) -> Self {
        let settings = SettingsView::new(config.settings_title, engine.filters());
        Self {
            menu: MenuView::new(config.menu_title),
            settings,
            about: AboutView::new(config.about_title, config.about_lines),
            dictionary: DictionaryView::new(config.search_limit),
            engine,
            mode: Mode::Menu,
            pending_redraw: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn engine(&self) -> &LookupEngine<S> {
        &self.engine
    }

    pub fn dictionary(&self) -> &DictionaryView {
        &self.dictionary
    }

    pub fn menu(&self) -> &MenuView {
        &self.menu
    }

    pub fn pending_redraw(&self) -> bool {
        self.pending_redraw
    }

    /// Routes one event to the active view.
    ///
    /// Lookup failures are returned as-is; the view state stays as it was
    /// before the failing lookup.
    pub fn process(&mut self, event: InputEvent) -> Result<TickResult, LookupError<S::Error>> {
        let outcome = match self.mode {
            Mode::Menu => self.menu.process(event),
            Mode::Settings => {
                let mut filters = *self.engine.filters();
                let outcome = self.settings.process(event, &mut filters);
                if filters != *self.engine.filters() {
                    debug!("ui-nav: filters changed {:?}", filters);
                    self.engine.set_filters(filters);
                }
                outcome
            }
            Mode::About => self.about.process(event),
            Mode::Dictionary => self.dictionary.process(event, &mut self.engine)?,
        };

        match outcome {
            Outcome::Unchanged => return Ok(TickResult::NoRender),
            Outcome::Redraw => {}
            Outcome::Exit => self.enter(Mode::Menu)?,
            Outcome::Enter(mode) => self.enter(mode)?,
        }

        self.pending_redraw = true;
        Ok(TickResult::RenderRequested)
    }

    fn enter(&mut self, mode: Mode) -> Result<(), LookupError<S::Error>> {
        debug!("ui-nav: {:?} -> {:?}", self.mode, mode);
        match mode {
            Mode::Menu => {}
            Mode::Settings => self.settings.sync(self.engine.filters()),
            Mode::About => {}
            Mode::Dictionary => self.dictionary.enter(&mut self.engine)?,
        }
        self.mode = mode;
        Ok(())
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.mode {
            Mode::Menu => self.menu.list().screen(),
            Mode::Settings => self.settings.list().screen(),
            Mode::About => self.about.list().screen(),
            Mode::Dictionary => self.dictionary.screen(),
        }
    }

    /// Paints the active screen into `frame` and clears the redraw request.
    pub fn render(&mut self, glyphs: &GlyphTable<'_>, frame: &mut FrameBuffer) {
        render_screen(&self.screen(), glyphs, frame);
        self.pending_redraw = false;
    }

    /// Closes the lexicon; later dictionary lookups report a closed dictionary.
    pub fn close(&mut self) -> Result<(), LookupError<S::Error>> {
        self.engine.close()
    }
}
