//! Main menu, filter settings and about screens.

use alloc::{format, string::String, vec::Vec};

use super::{Mode, Outcome, list::ListView};
use crate::{
    input::InputEvent,
    settings::{FilterOption, FilterSettings},
};

/// Main menu entries, in display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuEntry {
    Dictionary,
    Settings,
    About,
}

impl MenuEntry {
    pub const ALL: [Self; 3] = [Self::Dictionary, Self::Settings, Self::About];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dictionary => "辞典",
            Self::Settings => "设置",
            Self::About => "关于",
        }
    }

    pub const fn mode(self) -> Mode {
        match self {
            Self::Dictionary => Mode::Dictionary,
            Self::Settings => Mode::Settings,
            Self::About => Mode::About,
        }
    }
}

pub struct MenuView {
    list: ListView,
}

impl MenuView {
    pub fn new(title: &str) -> Self {
        let mut list = ListView::new(title, true, true);
        list.set_items(MenuEntry::ALL.iter().map(|entry| entry.label().into()).collect());
        Self { list }
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn selected_entry(&self) -> Option<MenuEntry> {
        MenuEntry::ALL.get(self.list.select_index()).copied()
    }

    pub fn process(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Up => Outcome::redraw_if(self.list.select_up()),
            InputEvent::Down => Outcome::redraw_if(self.list.select_down()),
            InputEvent::Right => self
                .selected_entry()
                .map_or(Outcome::Unchanged, |entry| Outcome::Enter(entry.mode())),
            _ => Outcome::Unchanged,
        }
    }
}

/// Settings row text: `+ ` marks an enabled option, two spaces a disabled one.
pub fn settings_row(option: FilterOption, enabled: bool) -> String {
    let marker = if enabled { "+ " } else { "  " };
    format!("{marker}{}", option.label())
}

pub fn settings_rows(filters: &FilterSettings) -> Vec<String> {
    filters
        .iter()
        .map(|(option, enabled)| settings_row(option, enabled))
        .collect()
}

pub struct SettingsView {
    list: ListView,
}

impl SettingsView {
    pub fn new(title: &str, filters: &FilterSettings) -> Self {
        let mut list = ListView::new(title, true, true);
        list.set_items(settings_rows(filters));
        Self { list }
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// Rebuilds the rows from `filters`, keeping the cursor.
    pub fn sync(&mut self, filters: &FilterSettings) {
        self.list.replace_items(settings_rows(filters));
    }

    /// RIGHT flips the selected option in `filters` and rebuilds the rows.
    pub fn process(&mut self, event: InputEvent, filters: &mut FilterSettings) -> Outcome {
        match event {
            InputEvent::Up => Outcome::redraw_if(self.list.select_up()),
            InputEvent::Down => Outcome::redraw_if(self.list.select_down()),
            InputEvent::Right => {
                let Some(option) = FilterOption::from_index(self.list.select_index()) else {
                    return Outcome::Unchanged;
                };
                filters.toggle(option);
                self.sync(filters);
                Outcome::Redraw
            }
            InputEvent::Left | InputEvent::Backspace => Outcome::Exit,
            InputEvent::Char(_) => Outcome::Unchanged,
        }
    }
}

/// Read-only scrolling text.
pub struct AboutView {
    list: ListView,
}

impl AboutView {
    pub fn new(title: &str, lines: &[&str]) -> Self {
        let mut list = ListView::new(title, false, true);
        list.set_items(lines.iter().map(|line| String::from(*line)).collect());
        Self { list }
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn process(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Up => Outcome::redraw_if(self.list.select_up()),
            InputEvent::Down => Outcome::redraw_if(self.list.select_down()),
            InputEvent::Left | InputEvent::Backspace => Outcome::Exit,
            InputEvent::Right | InputEvent::Char(_) => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_rows_mark_enabled_options() {
        let filters = FilterSettings::new().with(FilterOption::ZeroRated, true);
        let rows = settings_rows(&filters);

        assert_eq!(rows.len(), FilterOption::COUNT);
        assert_eq!(rows[0], "  词组");
        assert_eq!(rows[1], "+ 柯林斯 0 星");
    }

    #[test]
    fn right_toggles_the_selected_option_and_keeps_the_cursor() {
        let mut filters = FilterSettings::new();
        let mut view = SettingsView::new("设置", &filters);
        view.process(InputEvent::Down, &mut filters);
        view.process(InputEvent::Down, &mut filters);

        assert_eq!(view.process(InputEvent::Right, &mut filters), Outcome::Redraw);
        assert!(filters.abbreviations);
        assert_eq!(view.list().select_index(), 2);
        assert_eq!(view.list().selected_item(), Some("+ 缩写 abbr."));

        view.process(InputEvent::Right, &mut filters);
        assert!(!filters.abbreviations);
        assert_eq!(view.list().selected_item(), Some("  缩写 abbr."));
    }

    #[test]
    fn menu_right_enters_the_selected_mode() {
        let mut menu = MenuView::new("lexipad");

        assert_eq!(menu.process(InputEvent::Right), Outcome::Enter(Mode::Dictionary));
        assert_eq!(menu.process(InputEvent::Up), Outcome::Redraw);
        assert_eq!(menu.process(InputEvent::Right), Outcome::Enter(Mode::About));
        assert_eq!(menu.process(InputEvent::Left), Outcome::Unchanged);
        assert_eq!(menu.process(InputEvent::Char('a')), Outcome::Unchanged);
    }

    #[test]
    fn about_scrolls_without_highlight() {
        let mut about = AboutView::new("关于", &["a", "b", "c", "d"]);

        assert_eq!(about.process(InputEvent::Down), Outcome::Redraw);
        assert_eq!(about.list().screen().highlighted_row(), None);
        assert_eq!(about.process(InputEvent::Right), Outcome::Unchanged);
        assert_eq!(about.process(InputEvent::Backspace), Outcome::Exit);
    }
}
